use crate::cpu::Cpu8080;
use crate::io::{IoPort, PortError};

pub(super) fn nop(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.advance(1);
    Ok(())
}

/// HLT steps past itself and latches a halt request for the interpreter.
pub(super) fn hlt(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.advance(1);
    cpu.halt_requested = true;
    Ok(())
}

pub(super) fn input(cpu: &mut Cpu8080, io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let port = cpu.operand8();
    cpu.regs.a = io.read(port)?;
    cpu.advance(2);
    Ok(())
}

pub(super) fn out(cpu: &mut Cpu8080, io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    let port = cpu.operand8();
    io.write(port, cpu.regs.a)?;
    cpu.advance(2);
    Ok(())
}

pub(super) fn ei(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.interrupts_enabled = true;
    cpu.advance(1);
    Ok(())
}

pub(super) fn di(cpu: &mut Cpu8080, _io: &mut dyn IoPort, _op: u8) -> Result<(), PortError> {
    cpu.interrupts_enabled = false;
    cpu.advance(1);
    Ok(())
}
