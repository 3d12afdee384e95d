/// Value of F after reset: only the fixed bit 1 is set.
pub const INITIAL_FLAGS: u8 = 0b0000_0010;

/// Register file of the Intel 8080.
///
/// Register widths are carried by the field types, so every write wraps
/// the same way the hardware registers do. Register pairs are views over
/// the 8-bit halves rather than separate storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            a: 0,
            f: INITIAL_FLAGS,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            sp: 0,
            pc: 0,
        }
    }
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    /// Processor status word: A in the high byte, F in the low byte.
    #[inline]
    pub fn psw(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f])
    }

    #[inline]
    pub fn set_psw(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = f;
    }

    /// Read a register by name, widened to 16 bits.
    pub fn get(&self, name: RegisterName) -> u16 {
        match name {
            RegisterName::A => self.a.into(),
            RegisterName::F => self.f.into(),
            RegisterName::B => self.b.into(),
            RegisterName::C => self.c.into(),
            RegisterName::D => self.d.into(),
            RegisterName::E => self.e.into(),
            RegisterName::H => self.h.into(),
            RegisterName::L => self.l.into(),
            RegisterName::Sp => self.sp,
            RegisterName::Pc => self.pc,
        }
    }

    /// Write a register by name. 8-bit registers keep only the low byte.
    pub fn set(&mut self, name: RegisterName, value: u16) {
        let low = value as u8;
        match name {
            RegisterName::A => self.a = low,
            RegisterName::F => self.f = low,
            RegisterName::B => self.b = low,
            RegisterName::C => self.c = low,
            RegisterName::D => self.d = low,
            RegisterName::E => self.e = low,
            RegisterName::H => self.h = low,
            RegisterName::L => self.l = low,
            RegisterName::Sp => self.sp = value,
            RegisterName::Pc => self.pc = value,
        }
    }

    /// Call `f` for every register whose value differs from `before`.
    pub(crate) fn for_each_change(&self, before: &Registers, mut f: impl FnMut(RegisterName, u16)) {
        for name in RegisterName::ALL {
            let value = self.get(name);
            if value != before.get(name) {
                f(name, value);
            }
        }
    }
}

/// Architectural register names, used by diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterName {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
    Sp,
    Pc,
}

impl RegisterName {
    pub const ALL: [RegisterName; 10] = [
        RegisterName::A,
        RegisterName::F,
        RegisterName::B,
        RegisterName::C,
        RegisterName::D,
        RegisterName::E,
        RegisterName::H,
        RegisterName::L,
        RegisterName::Sp,
        RegisterName::Pc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegisterName::A => "a",
            RegisterName::F => "f",
            RegisterName::B => "b",
            RegisterName::C => "c",
            RegisterName::D => "d",
            RegisterName::E => "e",
            RegisterName::H => "h",
            RegisterName::L => "l",
            RegisterName::Sp => "sp",
            RegisterName::Pc => "pc",
        }
    }

    /// Width of the register in bits.
    pub fn width(self) -> u32 {
        match self {
            RegisterName::Sp | RegisterName::Pc => 16,
            _ => 8,
        }
    }
}
