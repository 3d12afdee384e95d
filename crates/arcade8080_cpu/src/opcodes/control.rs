use crate::cpu::Cpu8080;
use crate::io::{IoPort, PortError};

pub(super) fn jmp(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.regs.pc = cpu.operand16();
    Ok(())
}

pub(super) fn jmp_cond(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    if cpu.condition(op >> 3) {
        cpu.regs.pc = cpu.operand16();
    } else {
        cpu.advance(3);
    }
    Ok(())
}

/// Pushes the address of the next instruction, then jumps.
pub(super) fn call(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let target = cpu.operand16();
    let ret = cpu.regs.pc.wrapping_add(3);
    cpu.push(ret);
    cpu.regs.pc = target;
    Ok(())
}

pub(super) fn call_cond(cpu: &mut Cpu8080, io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    if cpu.condition(op >> 3) {
        call(cpu, io, op)
    } else {
        cpu.advance(3);
        Ok(())
    }
}

pub(super) fn ret(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.regs.pc = cpu.pop();
    Ok(())
}

pub(super) fn ret_cond(cpu: &mut Cpu8080, io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    if cpu.condition(op >> 3) {
        ret(cpu, io, op)
    } else {
        cpu.advance(1);
        Ok(())
    }
}

/// RST n pushes the current PC, not the address after the opcode. During
/// interrupt service PC still points at the interrupted instruction.
pub(super) fn rst(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    cpu.push(cpu.regs.pc);
    cpu.regs.pc = u16::from(op & 0x38);
    Ok(())
}

pub(super) fn pchl(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.regs.pc = cpu.regs.hl();
    Ok(())
}
