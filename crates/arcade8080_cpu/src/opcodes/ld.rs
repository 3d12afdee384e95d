use crate::cpu::Cpu8080;
use crate::io::{IoPort, PortError};

// None of the data-movement instructions touch the flags.

pub(super) fn mov(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.load_reg(op);
    cpu.store_reg(op >> 3, value);
    cpu.advance(1);
    Ok(())
}

pub(super) fn mvi(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.operand8();
    cpu.store_reg(op >> 3, value);
    cpu.advance(2);
    Ok(())
}

pub(super) fn lxi(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.operand16();
    cpu.store_pair(op >> 4, value);
    cpu.advance(3);
    Ok(())
}

/// STAX B / STAX D
pub(super) fn stax(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let addr = cpu.load_pair(op >> 4);
    cpu.write8(addr, cpu.regs.a);
    cpu.advance(1);
    Ok(())
}

/// LDAX B / LDAX D
pub(super) fn ldax(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let addr = cpu.load_pair(op >> 4);
    cpu.regs.a = cpu.read8(addr);
    cpu.advance(1);
    Ok(())
}

pub(super) fn sta(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let addr = cpu.operand16();
    cpu.write8(addr, cpu.regs.a);
    cpu.advance(3);
    Ok(())
}

pub(super) fn lda(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let addr = cpu.operand16();
    cpu.regs.a = cpu.read8(addr);
    cpu.advance(3);
    Ok(())
}

pub(super) fn shld(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let addr = cpu.operand16();
    cpu.write16(addr, cpu.regs.hl());
    cpu.advance(3);
    Ok(())
}

pub(super) fn lhld(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let addr = cpu.operand16();
    let value = cpu.read16(addr);
    cpu.regs.set_hl(value);
    cpu.advance(3);
    Ok(())
}

pub(super) fn xchg(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let (de, hl) = (cpu.regs.de(), cpu.regs.hl());
    cpu.regs.set_de(hl);
    cpu.regs.set_hl(de);
    cpu.advance(1);
    Ok(())
}

/// Swap HL with the word on top of the stack.
pub(super) fn xthl(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let sp = cpu.regs.sp;
    let top = cpu.read16(sp);
    cpu.write16(sp, cpu.regs.hl());
    cpu.regs.set_hl(top);
    cpu.advance(1);
    Ok(())
}

pub(super) fn sphl(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.regs.sp = cpu.regs.hl();
    cpu.advance(1);
    Ok(())
}
