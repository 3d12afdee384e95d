use crate::cpu::Cpu8080;
use crate::flags::Flags;
use crate::io::{IoPort, PortError};

/// ADD..CMP with a register or M operand (0x80..=0xBF).
pub(super) fn alu_reg(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.load_reg(op);
    cpu.alu_op(op >> 3, value);
    cpu.advance(1);
    Ok(())
}

/// ADI ACI SUI SBI ANI XRI ORI CPI
pub(super) fn alu_imm(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.operand8();
    cpu.alu_op(op >> 3, value);
    cpu.advance(2);
    Ok(())
}

pub(super) fn dad(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.load_pair(op >> 4);
    cpu.alu_dad(value);
    cpu.advance(1);
    Ok(())
}

pub(super) fn daa(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.alu_daa();
    cpu.advance(1);
    Ok(())
}

pub(super) fn rlc(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.rotate_left(false);
    cpu.advance(1);
    Ok(())
}

pub(super) fn rrc(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.rotate_right(false);
    cpu.advance(1);
    Ok(())
}

pub(super) fn ral(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.rotate_left(true);
    cpu.advance(1);
    Ok(())
}

pub(super) fn rar(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.rotate_right(true);
    cpu.advance(1);
    Ok(())
}

pub(super) fn cma(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.regs.a = !cpu.regs.a;
    cpu.advance(1);
    Ok(())
}

pub(super) fn stc(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.regs.set_flag(Flags::CARRY, true);
    cpu.advance(1);
    Ok(())
}

pub(super) fn cmc(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let carry = cpu.regs.flag(Flags::CARRY);
    cpu.regs.set_flag(Flags::CARRY, !carry);
    cpu.advance(1);
    Ok(())
}
