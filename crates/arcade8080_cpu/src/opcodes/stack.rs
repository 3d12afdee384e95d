use crate::cpu::Cpu8080;
use crate::io::{IoPort, PortError};

/// PUSH B/D/H
pub(super) fn push(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.load_pair(op >> 4);
    cpu.push(value);
    cpu.advance(1);
    Ok(())
}

/// POP B/D/H
pub(super) fn pop(cpu: &mut Cpu8080, _io: &mut dyn IoPort, op: u8) -> Result<(), PortError> {
    let value = cpu.pop();
    cpu.store_pair(op >> 4, value);
    cpu.advance(1);
    Ok(())
}

/// PUSH PSW: A is the high byte, F the low byte.
pub(super) fn push_psw(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.push(cpu.regs.psw());
    cpu.advance(1);
    Ok(())
}

pub(super) fn pop_psw(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let value = cpu.pop();
    cpu.regs.set_psw(value);
    cpu.advance(1);
    Ok(())
}
