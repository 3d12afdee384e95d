use crate::cpu::Cpu8080;
use crate::io::{IoPort, PortError};

pub(super) fn inr(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let index = op >> 3;
    let value = cpu.load_reg(index);
    let result = cpu.alu_inr(value);
    cpu.store_reg(index, result);
    cpu.advance(1);
    Ok(())
}

pub(super) fn dcr(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let index = op >> 3;
    let value = cpu.load_reg(index);
    let result = cpu.alu_dcr(value);
    cpu.store_reg(index, result);
    cpu.advance(1);
    Ok(())
}

/// 16-bit increments wrap and leave the flags alone.
pub(super) fn inx(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let index = op >> 4;
    let value = cpu.load_pair(index).wrapping_add(1);
    cpu.store_pair(index, value);
    cpu.advance(1);
    Ok(())
}

pub(super) fn dcx(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let index = op >> 4;
    let value = cpu.load_pair(index).wrapping_sub(1);
    cpu.store_pair(index, value);
    cpu.advance(1);
    Ok(())
}
