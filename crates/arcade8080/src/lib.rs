use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use arcade8080_cpu::{Flags, LogObserver, RunExit};
use arcade8080_invaders::machine::HALF_FRAME;
use arcade8080_invaders::SpaceInvadersMachine;

/// Run a Space Invaders ROM headless against the wall clock.
///
/// Stops when the program halts or after `limit`, if one is given.
pub fn run(rom_data: &[u8], limit: Option<Duration>) -> Result<()> {
    let mut machine = SpaceInvadersMachine::new(rom_data);
    if log::log_enabled!(log::Level::Trace) {
        machine.interpreter_mut().set_observer(Box::new(LogObserver));
    }
    let started = Instant::now();
    let mut last = started;

    loop {
        let now = Instant::now();
        let result = machine
            .advance(now - last)
            .with_context(|| format!("emulation stopped after {} frames", machine.frames()))?;
        last = now;

        match result.exit {
            RunExit::Halted | RunExit::Stopped => {
                log::info!("machine stopped: {:?}", result.exit);
                break;
            }
            RunExit::Waiting(wait) => thread::sleep(wait.min(HALF_FRAME)),
            RunExit::BudgetExhausted => thread::sleep(HALF_FRAME),
        }

        if limit.is_some_and(|limit| started.elapsed() >= limit) {
            break;
        }
    }

    report(&machine);
    Ok(())
}

fn report(machine: &SpaceInvadersMachine) {
    let interpreter = machine.interpreter();
    let regs = interpreter.registers();
    let flags = regs.flags();
    log::info!(
        "{} frames, {} cycles",
        machine.frames(),
        interpreter.total_cycles()
    );
    log::info!(
        "pc={:04X} sp={:04X} a={:02X} bc={:04X} de={:04X} hl={:04X}",
        regs.pc,
        regs.sp,
        regs.a,
        regs.bc(),
        regs.de(),
        regs.hl()
    );
    log::info!(
        "flags: s={} z={} p={} cy={} ac={}",
        u8::from(flags.contains(Flags::SIGN)),
        u8::from(flags.contains(Flags::ZERO)),
        u8::from(flags.contains(Flags::PARITY)),
        u8::from(flags.contains(Flags::CARRY)),
        u8::from(flags.contains(Flags::AUX_CARRY))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halting_rom_returns() {
        // MVI A,1 ; HLT
        run(&[0x3e, 0x01, 0x76], Some(Duration::from_secs(5))).unwrap();
    }

    #[test]
    fn undefined_opcode_is_reported() {
        let err = run(&[0x00, 0xed], Some(Duration::from_secs(5))).unwrap_err();
        let fault = err.downcast_ref::<arcade8080_cpu::CpuError>().unwrap();
        assert_eq!((fault.opcode(), fault.pc()), (0xed, 0x0001));
    }
}
