//! Opcode dispatch table.
//!
//! Each of the 256 slots holds an optional handler; the empty slots are
//! the opcodes this core does not define and decoding one is fatal. A
//! parallel table gives the nominal cycle cost charged per opcode, which
//! is only used for pacing.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;


use crate::cpu::Cpu8080;
use crate::io::{IoPort, PortError};

/// An opcode handler. It receives the opcode so one function can serve a
/// whole family (MOV, ALU, RST, ...) by decoding its register fields.
///
/// Handlers advance PC past the instruction themselves, unless they jump.
pub(crate) type Handler = fn(&mut Cpu8080, &mut dyn IoPort, u8) -> Result<(), PortError>;

pub const JMP: u8 = 0xc3;

/// Nominal cycle cost per opcode.
#[rustfmt::skip]
pub const CYCLES: [u8; 256] = [
    4, 10, 7, 5, 5, 5, 7, 4, 4, 10, 7, 5, 5, 5, 7, 4,             // 0x00
    4, 10, 7, 5, 5, 5, 7, 4, 4, 10, 7, 5, 5, 5, 7, 4,             // 0x10
    4, 10, 16, 5, 5, 5, 7, 4, 4, 10, 16, 5, 5, 5, 7, 4,           // 0x20
    4, 10, 13, 5, 10, 10, 10, 4, 4, 10, 13, 5, 5, 5, 7, 4,        // 0x30
    5, 5, 5, 5, 5, 5, 7, 5, 5, 5, 5, 5, 5, 5, 7, 5,               // 0x40
    5, 5, 5, 5, 5, 5, 7, 5, 5, 5, 5, 5, 5, 5, 7, 5,               // 0x50
    5, 5, 5, 5, 5, 5, 7, 5, 5, 5, 5, 5, 5, 5, 7, 5,               // 0x60
    7, 7, 7, 7, 7, 7, 7, 7, 5, 5, 5, 5, 5, 5, 7, 5,               // 0x70
    4, 4, 4, 4, 4, 4, 7, 4, 4, 4, 4, 4, 4, 4, 7, 4,               // 0x80
    4, 4, 4, 4, 4, 4, 7, 4, 4, 4, 4, 4, 4, 4, 7, 4,               // 0x90
    4, 4, 4, 4, 4, 4, 7, 4, 4, 4, 4, 4, 4, 4, 7, 4,               // 0xa0
    4, 4, 4, 4, 4, 4, 7, 4, 4, 4, 4, 4, 4, 4, 7, 4,               // 0xb0
    11, 10, 10, 10, 17, 11, 7, 11, 11, 10, 10, 10, 10, 17, 7, 11, // 0xc0
    11, 10, 10, 10, 17, 11, 7, 11, 11, 10, 10, 10, 10, 17, 7, 11, // 0xd0
    11, 10, 10, 18, 17, 11, 7, 11, 11, 5, 10, 5, 17, 17, 7, 11,   // 0xe0
    11, 10, 10, 4, 17, 11, 7, 11, 11, 5, 10, 4, 17, 17, 7, 11,    // 0xf0
];

/// Assembler mnemonics; `*NOP` marks the undocumented NOP aliases and the
/// empty strings are the undefined slots.
#[rustfmt::skip]
const MNEMONICS: [&str; 256] = [
    // 0x00
    "NOP", "LXI B,d16", "STAX B", "INX B", "INR B", "DCR B", "MVI B,d8", "RLC",
    "*NOP", "DAD B", "LDAX B", "DCX B", "INR C", "DCR C", "MVI C,d8", "RRC",
    // 0x10
    "*NOP", "LXI D,d16", "STAX D", "INX D", "INR D", "DCR D", "MVI D,d8", "RAL",
    "*NOP", "DAD D", "LDAX D", "DCX D", "INR E", "DCR E", "MVI E,d8", "RAR",
    // 0x20
    "*NOP", "LXI H,d16", "SHLD a16", "INX H", "INR H", "DCR H", "MVI H,d8", "DAA",
    "*NOP", "DAD H", "LHLD a16", "DCX H", "INR L", "DCR L", "MVI L,d8", "CMA",
    // 0x30
    "*NOP", "LXI SP,d16", "STA a16", "INX SP", "INR M", "DCR M", "MVI M,d8", "STC",
    "*NOP", "DAD SP", "LDA a16", "DCX SP", "INR A", "DCR A", "MVI A,d8", "CMC",
    // 0x40
    "MOV B,B", "MOV B,C", "MOV B,D", "MOV B,E", "MOV B,H", "MOV B,L", "MOV B,M", "MOV B,A",
    "MOV C,B", "MOV C,C", "MOV C,D", "MOV C,E", "MOV C,H", "MOV C,L", "MOV C,M", "MOV C,A",
    // 0x50
    "MOV D,B", "MOV D,C", "MOV D,D", "MOV D,E", "MOV D,H", "MOV D,L", "MOV D,M", "MOV D,A",
    "MOV E,B", "MOV E,C", "MOV E,D", "MOV E,E", "MOV E,H", "MOV E,L", "MOV E,M", "MOV E,A",
    // 0x60
    "MOV H,B", "MOV H,C", "MOV H,D", "MOV H,E", "MOV H,H", "MOV H,L", "MOV H,M", "MOV H,A",
    "MOV L,B", "MOV L,C", "MOV L,D", "MOV L,E", "MOV L,H", "MOV L,L", "MOV L,M", "MOV L,A",
    // 0x70
    "MOV M,B", "MOV M,C", "MOV M,D", "MOV M,E", "MOV M,H", "MOV M,L", "HLT", "MOV M,A",
    "MOV A,B", "MOV A,C", "MOV A,D", "MOV A,E", "MOV A,H", "MOV A,L", "MOV A,M", "MOV A,A",
    // 0x80
    "ADD B", "ADD C", "ADD D", "ADD E", "ADD H", "ADD L", "ADD M", "ADD A",
    "ADC B", "ADC C", "ADC D", "ADC E", "ADC H", "ADC L", "ADC M", "ADC A",
    // 0x90
    "SUB B", "SUB C", "SUB D", "SUB E", "SUB H", "SUB L", "SUB M", "SUB A",
    "SBB B", "SBB C", "SBB D", "SBB E", "SBB H", "SBB L", "SBB M", "SBB A",
    // 0xA0
    "ANA B", "ANA C", "ANA D", "ANA E", "ANA H", "ANA L", "ANA M", "ANA A",
    "XRA B", "XRA C", "XRA D", "XRA E", "XRA H", "XRA L", "XRA M", "XRA A",
    // 0xB0
    "ORA B", "ORA C", "ORA D", "ORA E", "ORA H", "ORA L", "ORA M", "ORA A",
    "CMP B", "CMP C", "CMP D", "CMP E", "CMP H", "CMP L", "CMP M", "CMP A",
    // 0xC0
    "RNZ", "POP B", "JNZ a16", "JMP a16", "CNZ a16", "PUSH B", "ADI d8", "RST 0",
    "RZ", "RET", "JZ a16", "", "CZ a16", "CALL a16", "ACI d8", "RST 1",
    // 0xD0
    "RNC", "POP D", "JNC a16", "OUT d8", "CNC a16", "PUSH D", "SUI d8", "RST 2",
    "RC", "", "JC a16", "IN d8", "CC a16", "", "SBI d8", "RST 3",
    // 0xE0
    "RPO", "POP H", "JPO a16", "XTHL", "CPO a16", "PUSH H", "ANI d8", "RST 4",
    "RPE", "PCHL", "JPE a16", "XCHG", "CPE a16", "", "XRI d8", "RST 5",
    // 0xF0
    "RP", "POP PSW", "JP a16", "DI", "CP a16", "PUSH PSW", "ORI d8", "RST 6",
    "RM", "SPHL", "JM a16", "EI", "CM a16", "", "CPI d8", "RST 7",
];

/// Mnemonic for `opcode`, or `None` when the slot is undefined.
pub fn mnemonic(opcode: u8) -> Option<&'static str> {
    match MNEMONICS[opcode as usize] {
        "" => None,
        name => Some(name),
    }
}

/// The 256-entry dispatch table, populated once at construction.
pub struct OpcodeTable {
    handlers: [Option<Handler>; 256],
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OpcodeTable {
    pub fn new() -> Self {
        Self {
            handlers: std::array::from_fn(|opcode| decode(opcode as u8)),
        }
    }

    #[inline]
    pub(crate) fn handler(&self, opcode: u8) -> Option<Handler> {
        self.handlers[opcode as usize]
    }

    pub fn is_defined(&self, opcode: u8) -> bool {
        self.handlers[opcode as usize].is_some()
    }

    #[inline]
    pub fn cycles(&self, opcode: u8) -> u32 {
        u32::from(CYCLES[opcode as usize])
    }
}

fn decode(opcode: u8) -> Option<Handler> {
    let handler: Handler = match opcode {
        // NOP and its undocumented aliases.
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => system::nop,

        // Data movement.
        0x01 | 0x11 | 0x21 | 0x31 => ld::lxi,
        op if op & 0xc7 == 0x06 => ld::mvi,
        0x02 | 0x12 => ld::stax,
        0x0a | 0x1a => ld::ldax,
        0x22 => ld::shld,
        0x2a => ld::lhld,
        0x32 => ld::sta,
        0x3a => ld::lda,
        0x76 => system::hlt,
        0x40..=0x7f => ld::mov,
        0xeb => ld::xchg,
        0xe3 => ld::xthl,
        0xf9 => ld::sphl,

        // Increment / decrement.
        0x03 | 0x13 | 0x23 | 0x33 => incdec::inx,
        0x0b | 0x1b | 0x2b | 0x3b => incdec::dcx,
        op if op & 0xc7 == 0x04 => incdec::inr,
        op if op & 0xc7 == 0x05 => incdec::dcr,

        // Arithmetic and logic.
        0x09 | 0x19 | 0x29 | 0x39 => alu::dad,
        0x07 => alu::rlc,
        0x0f => alu::rrc,
        0x17 => alu::ral,
        0x1f => alu::rar,
        0x27 => alu::daa,
        0x2f => alu::cma,
        0x37 => alu::stc,
        0x3f => alu::cmc,
        0x80..=0xbf => alu::alu_reg,
        op if op & 0xc7 == 0xc6 => alu::alu_imm,

        // Branches.
        JMP => control::jmp,
        op if op & 0xc7 == 0xc2 => control::jmp_cond,
        0xcd => control::call,
        op if op & 0xc7 == 0xc4 => control::call_cond,
        0xc9 => control::ret,
        op if op & 0xc7 == 0xc0 => control::ret_cond,
        op if op & 0xc7 == 0xc7 => control::rst,
        0xe9 => control::pchl,

        // Stack.
        0xc1 | 0xd1 | 0xe1 => stack::pop,
        0xf1 => stack::pop_psw,
        0xc5 | 0xd5 | 0xe5 => stack::push,
        0xf5 => stack::push_psw,

        // I/O and machine control.
        0xd3 => system::out,
        0xdb => system::input,
        0xf3 => system::di,
        0xfb => system::ei,

        // 0xCB, 0xD9, 0xDD, 0xED, 0xFD
        _ => return None,
    };
    Some(handler)
}

/// Whether `opcode` is one of the eight RST instructions.
#[inline]
pub fn is_rst(opcode: u8) -> bool {
    opcode & 0xc7 == 0xc7
}
