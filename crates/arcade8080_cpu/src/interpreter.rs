//! Fetch-execute-interrupt loop.
//!
//! The interpreter never schedules itself. A host calls [`Interpreter::tick`]
//! with the wall-clock time that passed since the previous call; the
//! interpreter converts it into owed cycles, executes until the debt is
//! paid (or something stops it) and returns.


use std::time::Duration;

use crate::config::InterpreterConfig;
use crate::cpu::Cpu8080;
use crate::error::CpuError;
use crate::io::IoPort;
use crate::memory::Memory;
use crate::observer::Observer;
use crate::opcodes::{is_rst, OpcodeTable, JMP};
use crate::registers::Registers;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Why a [`Interpreter::tick`] burst returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunExit {
    /// All owed cycles were spent; call `tick` again later.
    BudgetExhausted,
    /// HLT executed. Only `reset` makes the interpreter runnable again.
    Halted,
    /// The interpreter is paused, stopped or faulted.
    Stopped,
    /// A fast-forwarded delay loop asked the host to let this much
    /// wall-clock time pass before execution continues.
    Waiting(Duration),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunResult {
    pub cycles: u64,
    pub instructions: u64,
    pub exit: RunExit,
}

impl RunResult {
    fn idle(exit: RunExit) -> Self {
        Self {
            cycles: 0,
            instructions: 0,
            exit,
        }
    }
}

/// Result of a single [`Interpreter::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Cycles charged, including an interrupt serviced before the fetch.
    pub cycles: u32,
    /// Set when the step fast-forwarded through a delay loop.
    pub wait: Option<Duration>,
}

/// Point-in-time copy of the machine state, safe to hand across a thread
/// boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub registers: Registers,
    pub memory: Vec<u8>,
    pub interrupts_enabled: bool,
    pub pending_interrupt: u8,
    pub ready: bool,
    pub halted: bool,
}

pub struct Interpreter<P: IoPort> {
    cpu: Cpu8080,
    io: P,
    table: OpcodeTable,
    config: InterpreterConfig,
    ready: bool,
    halted: bool,
    fault: Option<CpuError>,
    /// RST opcode waiting for service; 0 means none.
    pending_interrupt: u8,
    cycle_budget: i64,
    /// Fractional cycles carried between ticks, in units of 1/clock_hz ns.
    clock_remainder: u128,
    /// Wall-clock time still owed to a fast-forwarded delay loop.
    waiting: Duration,
    total_cycles: u64,
}

impl<P: IoPort> Interpreter<P> {
    /// Build an interpreter over `rom` with `io` attached to the port space.
    /// The interpreter starts out ready to run.
    pub fn new(rom: &[u8], io: P, config: InterpreterConfig) -> Self {
        let memory = Memory::new(rom, config.layout);
        let mut interpreter = Self {
            cpu: Cpu8080::new(memory),
            io,
            table: OpcodeTable::new(),
            config,
            ready: false,
            halted: false,
            fault: None,
            pending_interrupt: 0,
            cycle_budget: 0,
            clock_remainder: 0,
            waiting: Duration::ZERO,
            total_cycles: 0,
        };
        interpreter.reset();
        interpreter
    }

    /// Restore the reset register state and make the interpreter runnable.
    /// Memory is left as it is.
    pub fn reset(&mut self) {
        let mut regs = Registers::new();
        regs.pc = self.config.initial_pc;
        regs.sp = self.config.initial_sp;
        self.cpu.regs = regs;
        self.cpu.interrupts_enabled = self.config.interrupts_enabled_at_reset;
        self.cpu.halt_requested = false;
        self.halted = false;
        self.fault = None;
        self.pending_interrupt = 0;
        self.cycle_budget = 0;
        self.clock_remainder = 0;
        self.waiting = Duration::ZERO;
        self.ready = true;
        log::info!(
            "reset: pc={:04X} sp={:04X}",
            self.config.initial_pc,
            self.config.initial_sp
        );
    }

    /// Replace the ROM image. Registers are not touched.
    pub fn load_rom(&mut self, rom: &[u8]) {
        self.cpu.memory.load(rom);
    }

    /// Resume execution. Refused after HLT or a fault until [`reset`].
    ///
    /// [`reset`]: Interpreter::reset
    pub fn start(&mut self) -> bool {
        if self.halted || self.fault.is_some() {
            log::warn!("start refused: interpreter is halted or faulted, reset first");
            return false;
        }
        if !self.ready {
            log::info!("started at {:04X}", self.cpu.regs.pc);
        }
        self.ready = true;
        true
    }

    /// Suspend execution, keeping owed cycles and any pending delay.
    pub fn pause(&mut self) {
        self.ready = false;
    }

    /// Suspend execution and forget owed cycles, the pending delay and the
    /// pending interrupt.
    pub fn stop(&mut self) {
        self.ready = false;
        self.cycle_budget = 0;
        self.clock_remainder = 0;
        self.waiting = Duration::ZERO;
        self.pending_interrupt = 0;
        log::info!("stopped at {:04X}", self.cpu.regs.pc);
    }

    /// Latch an interrupt for service before the next fetch.
    ///
    /// Only RST opcodes are accepted, and only while interrupts are enabled
    /// and nothing is already pending. Anything else is dropped.
    pub fn request_interrupt(&mut self, vector: u8) -> bool {
        if !is_rst(vector) {
            log::warn!("ignoring interrupt request with non-RST vector {:02X}", vector);
            return false;
        }
        if !self.cpu.interrupts_enabled || self.pending_interrupt != 0 {
            log::trace!("interrupt {:02X} dropped", vector);
            return false;
        }
        self.pending_interrupt = vector;
        true
    }

    /// Run one bounded burst for `elapsed` wall-clock time.
    pub fn tick(&mut self, elapsed: Duration) -> Result<RunResult, CpuError> {
        if !self.ready {
            let exit = if self.halted {
                RunExit::Halted
            } else {
                RunExit::Stopped
            };
            return Ok(RunResult::idle(exit));
        }

        let mut elapsed = elapsed;
        if !self.waiting.is_zero() {
            if elapsed < self.waiting {
                self.waiting -= elapsed;
                return Ok(RunResult::idle(RunExit::Waiting(self.waiting)));
            }
            elapsed -= self.waiting;
            self.waiting = Duration::ZERO;
        }
        self.replenish(elapsed);

        let mut result = RunResult::idle(RunExit::BudgetExhausted);
        while self.ready && self.cycle_budget > 0 {
            let outcome = self.step()?;
            result.cycles += u64::from(outcome.cycles);
            result.instructions += 1;
            if let Some(wait) = outcome.wait {
                self.waiting = wait;
                result.exit = RunExit::Waiting(wait);
                return Ok(result);
            }
        }

        if self.halted {
            result.exit = RunExit::Halted;
        } else if !self.ready {
            result.exit = RunExit::Stopped;
        }
        Ok(result)
    }

    /// Execute one instruction, servicing a pending interrupt first.
    ///
    /// Stepping works while paused. A halted interpreter does nothing and a
    /// faulted one reports its fault again.
    pub fn step(&mut self) -> Result<StepOutcome, CpuError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if self.halted {
            return Ok(StepOutcome::default());
        }

        let outcome = self.step_inner().map_err(|err| self.fail(err))?;
        self.cycle_budget -= i64::from(outcome.cycles);
        self.total_cycles += u64::from(outcome.cycles);
        Ok(outcome)
    }

    /// Step at most `n` times, stopping early on HLT or a delay-loop wait.
    pub fn step_n(&mut self, n: usize) -> Result<u64, CpuError> {
        let mut cycles = 0u64;
        for _ in 0..n {
            let outcome = self.step()?;
            cycles += u64::from(outcome.cycles);
            if self.halted || outcome.wait.is_some() {
                break;
            }
        }
        Ok(cycles)
    }

    fn step_inner(&mut self) -> Result<StepOutcome, CpuError> {
        let mut outcome = StepOutcome::default();

        if self.cpu.interrupts_enabled && self.pending_interrupt != 0 {
            let vector = std::mem::take(&mut self.pending_interrupt);
            self.cpu.interrupts_enabled = false;
            let return_pc = self.cpu.regs.pc;
            log::debug!("servicing interrupt {:02X} at {:04X}", vector, return_pc);
            self.cpu.observer.on_interrupt(vector, return_pc);
            outcome.cycles += self.execute(vector, return_pc)?;
        }

        let pc = self.cpu.regs.pc;
        let opcode = self.cpu.read8(pc);
        if !self.table.is_defined(opcode) {
            return Err(CpuError::UndefinedOpcode { opcode, pc });
        }

        if let Some(ff) = self.config.fast_forward {
            if opcode == JMP && self.cpu.operand16() == ff.loop_entry {
                let wait = ff.delay_for(self.cpu.regs.a);
                log::debug!(
                    "fast-forward {:04X} -> {:04X}, waiting {:?}",
                    pc,
                    ff.resume_at,
                    wait
                );
                self.cpu.regs.pc = ff.resume_at;
                // A zero-length delay keeps the burst going.
                outcome.wait = (!wait.is_zero()).then_some(wait);
                return Ok(outcome);
            }
        }

        self.cpu.observer.on_step(pc, opcode, &self.cpu.regs);
        outcome.cycles += self.execute(opcode, pc)?;
        Ok(outcome)
    }

    /// Run the handler for `opcode` against the current state and report
    /// its cycle cost. `pc` is only used for error context.
    fn execute(&mut self, opcode: u8, pc: u16) -> Result<u32, CpuError> {
        let handler = self
            .table
            .handler(opcode)
            .ok_or(CpuError::UndefinedOpcode { opcode, pc })?;

        let before = self.cpu.regs;
        handler(&mut self.cpu, &mut self.io, opcode)
            .map_err(|source| CpuError::Port { opcode, pc, source })?;

        if self.cpu.take_halt_request() {
            self.ready = false;
            self.halted = true;
            log::info!("halted at {:04X}", pc);
        }

        let after = self.cpu.regs;
        let observer = &mut self.cpu.observer;
        after.for_each_change(&before, |name, value| observer.on_register_write(name, value));

        Ok(self.table.cycles(opcode))
    }

    fn fail(&mut self, err: CpuError) -> CpuError {
        log::error!("{}; interpreter stopped", err);
        self.ready = false;
        self.fault = Some(err.clone());
        err
    }

    fn replenish(&mut self, elapsed: Duration) {
        let scaled = elapsed.as_nanos() * u128::from(self.config.clock_hz) + self.clock_remainder;
        let owed = scaled / NANOS_PER_SEC;
        self.clock_remainder = scaled % NANOS_PER_SEC;
        let owed = i64::try_from(owed).unwrap_or(i64::MAX);
        self.cycle_budget = self.cycle_budget.saturating_add(owed);
    }

    pub fn set_observer(&mut self, observer: Box<dyn Observer + Send>) {
        self.cpu.observer = observer;
    }

    pub fn cpu(&self) -> &Cpu8080 {
        &self.cpu
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.regs
    }

    pub fn memory(&self) -> &Memory {
        &self.cpu.memory
    }

    pub fn io(&self) -> &P {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut P {
        &mut self.io
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.cpu.interrupts_enabled
    }

    pub fn pending_interrupt(&self) -> u8 {
        self.pending_interrupt
    }

    pub fn cycle_budget(&self) -> i64 {
        self.cycle_budget
    }

    /// The fault that stopped the interpreter, if any.
    pub fn fault(&self) -> Option<&CpuError> {
        self.fault.as_ref()
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: self.cpu.regs,
            memory: self.cpu.memory.as_slice().to_vec(),
            interrupts_enabled: self.cpu.interrupts_enabled,
            pending_interrupt: self.pending_interrupt,
            ready: self.ready,
            halted: self.halted,
        }
    }
}
