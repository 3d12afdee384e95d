use crate::opcodes::mnemonic;
use crate::registers::{RegisterName, Registers};

/// Diagnostics hooks invoked by the interpreter.
///
/// Every method defaults to a no-op so implementations only override
/// what they care about.
pub trait Observer {
    /// Called before the instruction at `pc` executes.
    fn on_step(&mut self, _pc: u16, _opcode: u8, _regs: &Registers) {}

    /// Called once per register whose value changed during a step.
    fn on_register_write(&mut self, _reg: RegisterName, _value: u16) {}

    /// Called for every memory write that landed.
    fn on_memory_write(&mut self, _addr: u16, _value: u8) {}

    /// Called when a pending interrupt is serviced.
    fn on_interrupt(&mut self, _vector: u8, _return_pc: u16) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards every hook to the `log` facade at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_step(&mut self, pc: u16, opcode: u8, regs: &Registers) {
        log::trace!(
            "{:04X}  {:02X}  {:<10} a={:02X} f={:02X} bc={:04X} de={:04X} hl={:04X} sp={:04X}",
            pc,
            opcode,
            mnemonic(opcode).unwrap_or("???"),
            regs.a,
            regs.f,
            regs.bc(),
            regs.de(),
            regs.hl(),
            regs.sp
        );
    }

    fn on_register_write(&mut self, reg: RegisterName, value: u16) {
        log::trace!("  {} <- {:04X}", reg.as_str(), value);
    }

    fn on_memory_write(&mut self, addr: u16, value: u8) {
        log::trace!("  [{:04X}] <- {:02X}", addr, value);
    }

    fn on_interrupt(&mut self, vector: u8, return_pc: u16) {
        log::trace!("interrupt {:02X}, returning to {:04X}", vector, return_pc);
    }
}
