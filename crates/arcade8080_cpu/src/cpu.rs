mod alu;

use crate::memory::Memory;
use crate::observer::{NoopObserver, Observer};
use crate::registers::Registers;

/// Architectural state of an Intel 8080: registers, memory and the
/// interrupt-enable flip-flop.
///
/// Opcode handlers mutate this through the helpers below. Memory writes
/// go through [`Cpu8080::write8`] so the diagnostics observer sees them.
pub struct Cpu8080 {
    pub(crate) regs: Registers,
    pub(crate) memory: Memory,
    pub(crate) interrupts_enabled: bool,
    /// Latched by HLT; the interpreter consumes it after the step.
    pub(crate) halt_requested: bool,
    pub(crate) observer: Box<dyn Observer + Send>,
}

impl Cpu8080 {
    pub fn new(memory: Memory) -> Self {
        Self {
            regs: Registers::new(),
            memory,
            interrupts_enabled: false,
            halt_requested: false,
            observer: Box::new(NoopObserver),
        }
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    pub(crate) fn take_halt_request(&mut self) -> bool {
        std::mem::take(&mut self.halt_requested)
    }

    #[inline]
    pub(crate) fn read8(&self, addr: u16) -> u8 {
        self.memory.get(addr)
    }

    #[inline]
    pub(crate) fn read16(&self, addr: u16) -> u16 {
        self.memory.get16(addr)
    }

    pub(crate) fn write8(&mut self, addr: u16, value: u8) {
        if self.memory.set(addr, value) {
            self.observer.on_memory_write(addr, value);
        }
    }

    pub(crate) fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        if let Some(next) = addr.checked_add(1) {
            self.write8(next, hi);
        }
    }

    /// Byte following the opcode.
    #[inline]
    pub(crate) fn operand8(&self) -> u8 {
        self.read8(self.regs.pc.wrapping_add(1))
    }

    /// Little-endian word following the opcode.
    #[inline]
    pub(crate) fn operand16(&self) -> u16 {
        self.read16(self.regs.pc.wrapping_add(1))
    }

    #[inline]
    pub(crate) fn advance(&mut self, len: u16) {
        self.regs.pc = self.regs.pc.wrapping_add(len);
    }

    pub(crate) fn push(&mut self, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        self.write16(self.regs.sp, value);
    }

    pub(crate) fn pop(&mut self) -> u16 {
        let value = self.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Read the operand selected by a 3-bit register field
    /// (B, C, D, E, H, L, M, A). Index 6 is memory at HL.
    pub(crate) fn load_reg(&self, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => self.read8(self.regs.hl()),
            _ => self.regs.a,
        }
    }

    pub(crate) fn store_reg(&mut self, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => self.write8(self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    /// Read the pair selected by a 2-bit field (BC, DE, HL, SP).
    pub(crate) fn load_pair(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    pub(crate) fn store_pair(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.sp = value,
        }
    }

    /// Evaluate a 3-bit condition field: NZ, Z, NC, C, PO, PE, P, M.
    pub(crate) fn condition(&self, index: u8) -> bool {
        use crate::flags::Flags;

        let (flag, expect) = match index & 0x07 {
            0 => (Flags::ZERO, false),
            1 => (Flags::ZERO, true),
            2 => (Flags::CARRY, false),
            3 => (Flags::CARRY, true),
            4 => (Flags::PARITY, false),
            5 => (Flags::PARITY, true),
            6 => (Flags::SIGN, false),
            _ => (Flags::SIGN, true),
        };
        self.regs.flag(flag) == expect
    }
}
