use super::Cpu8080;
use crate::flags::Flags;

impl Cpu8080 {
    /// ADD/ADC: flags are computed from the unmasked sum before A is
    /// truncated.
    pub(crate) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let carry = if use_carry { self.regs.carry_in() } else { 0 };
        let raw = i32::from(self.regs.a) + i32::from(value) + carry;
        self.regs.set_szp(raw);
        self.regs.set_carry(raw);
        self.regs.a = raw as u8;
    }

    /// SUB/SBB: a borrow shows up as a negative raw difference.
    pub(crate) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let borrow = if use_carry { self.regs.carry_in() } else { 0 };
        let raw = i32::from(self.regs.a) - i32::from(value) - borrow;
        self.regs.set_szp(raw);
        self.regs.set_carry(raw);
        self.regs.a = raw as u8;
    }

    pub(crate) fn alu_and(&mut self, value: u8) {
        self.logical(self.regs.a & value);
    }

    pub(crate) fn alu_xor(&mut self, value: u8) {
        self.logical(self.regs.a ^ value);
    }

    pub(crate) fn alu_or(&mut self, value: u8) {
        self.logical(self.regs.a | value);
    }

    /// Compare sets flags as if `A - value` was performed; A is untouched.
    pub(crate) fn alu_cmp(&mut self, value: u8) {
        let raw = i32::from(self.regs.a) - i32::from(value);
        self.regs.set_szp(raw);
        self.regs.set_carry(raw);
    }

    /// Dispatch one of the eight accumulator operations by its 3-bit
    /// field: ADD ADC SUB SBB ANA XRA ORA CMP.
    pub(crate) fn alu_op(&mut self, op: u8, value: u8) {
        match op & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cmp(value),
        }
    }

    /// INR: S, Z and P follow the result; carry is not affected.
    pub(crate) fn alu_inr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_szp(result.into());
        result
    }

    /// DCR: S, Z and P follow the result; carry is not affected.
    pub(crate) fn alu_dcr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_szp(result.into());
        result
    }

    /// DAD: HL += pair, only carry is affected.
    pub(crate) fn alu_dad(&mut self, value: u16) {
        let raw = u32::from(self.regs.hl()) + u32::from(value);
        self.regs.set_carry16(raw);
        self.regs.set_hl(raw as u16);
    }

    /// Decimal adjust. The low-nibble correction looks only at the nibble
    /// value, never at the auxiliary carry, and carry is only ever set
    /// (never cleared) by the high-nibble correction.
    pub(crate) fn alu_daa(&mut self) {
        if self.regs.a & 0x0f > 0x09 {
            self.regs.a = self.regs.a.wrapping_add(0x06);
        }
        if self.regs.a & 0xf0 > 0x90 {
            let raw = i32::from(self.regs.a) + 0x60;
            self.regs.set_carry(raw);
            self.regs.a = raw as u8;
        }
        self.regs.set_szp(self.regs.a.into());
    }

    pub(crate) fn rotate_left(&mut self, through_carry: bool) {
        let out = self.regs.a >> 7;
        let fill = if through_carry {
            u8::from(self.regs.flag(Flags::CARRY))
        } else {
            out
        };
        self.regs.a = (self.regs.a << 1) | fill;
        self.regs.set_flag(Flags::CARRY, out == 1);
    }

    pub(crate) fn rotate_right(&mut self, through_carry: bool) {
        let out = self.regs.a & 0x01;
        let fill = if through_carry {
            u8::from(self.regs.flag(Flags::CARRY))
        } else {
            out
        };
        self.regs.a = (self.regs.a >> 1) | (fill << 7);
        self.regs.set_flag(Flags::CARRY, out == 1);
    }

    fn logical(&mut self, result: u8) {
        let raw = i32::from(result);
        self.regs.set_szp(raw);
        self.regs.set_carry(raw);
        self.regs.a = result;
    }
}
