//! Intel 8080 interpreter core.
//!
//! The core owns registers, memory and the opcode table, and talks to the
//! outside world through the [`IoPort`] capability it is constructed with.
//! A host drives it by calling [`Interpreter::tick`] with elapsed wall-clock
//! time and raising interrupts through [`Interpreter::request_interrupt`].

pub mod config;
pub mod cpu;
pub mod error;
pub mod flags;
pub mod interpreter;
pub mod io;
pub mod memory;
pub mod observer;
pub mod opcodes;
pub mod registers;

pub use config::{FastForward, InterpreterConfig, DEFAULT_CLOCK_HZ};
pub use cpu::Cpu8080;
pub use error::CpuError;
pub use flags::{parity, Flags};
pub use interpreter::{Interpreter, RunExit, RunResult, Snapshot, StepOutcome};
pub use io::{IoPort, NoPorts, PortAccess, PortError};
pub use memory::{Memory, MemoryLayout};
pub use observer::{LogObserver, NoopObserver, Observer};
pub use opcodes::{mnemonic, OpcodeTable, CYCLES};
pub use registers::{RegisterName, Registers};
