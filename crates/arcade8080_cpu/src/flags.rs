use bitflags::bitflags;

use crate::registers::Registers;

bitflags! {
    /// Condition-code bits packed into the F register.
    ///
    /// Layout (MSB to LSB): S Z 0 0 AC P 1 CY. Bit 1 is fixed at 1 after
    /// reset and bits 5/4 at 0; they are carried through PUSH/POP PSW
    /// untouched.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const SIGN = 0b1000_0000;
        const ZERO = 0b0100_0000;
        const AUX_CARRY = 0b0000_1000;
        const PARITY = 0b0000_0100;
        const CARRY = 0b0000_0001;
    }
}

/// Even parity of the low byte: true when the number of set bits is even.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

impl Registers {
    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_retain(self.f)
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.f = flags.bits();
    }

    /// Carry as an arithmetic operand (0 or 1).
    #[inline]
    pub(crate) fn carry_in(&self) -> i32 {
        i32::from(self.flag(Flags::CARRY))
    }

    /// Update S, Z and P from the low byte of an unmasked result.
    pub fn set_szp(&mut self, result: i32) {
        let low = result as u8;
        self.set_flag(Flags::SIGN, low & 0x80 != 0);
        self.set_flag(Flags::ZERO, low == 0);
        self.set_flag(Flags::PARITY, parity(low));
    }

    /// Carry for an 8-bit operation: the result left the 0..=0xff range.
    pub fn set_carry(&mut self, result: i32) {
        self.set_flag(Flags::CARRY, !(0..=0xff).contains(&result));
    }

    /// Carry for a 16-bit addition.
    pub fn set_carry16(&mut self, result: u32) {
        self.set_flag(Flags::CARRY, result > 0xffff);
    }
}
