use std::time::Duration;

use arcade8080_cpu::{
    CpuError, FastForward, Interpreter, InterpreterConfig, RunExit, RunResult, DEFAULT_CLOCK_HZ,
};
use typed_builder::TypedBuilder;

use crate::ports::{Button, DipConfig, InvadersIo};

/// Start of video RAM; the frame buffer occupies 0x2400-0x3fff.
const VRAM_START: usize = 0x2400;
/// Size of video RAM in bytes (0x1c00 = 7168 bytes = 224x256 bits).
const VRAM_SIZE: usize = 0x1c00;

pub const FRAME_RATE_HZ: u64 = 60;
/// The video hardware interrupts twice per frame.
pub const HALF_FRAME: Duration = Duration::from_nanos(1_000_000_000 / (FRAME_RATE_HZ * 2));

/// RST 1, raised when the beam reaches the middle of the screen.
pub const MID_FRAME_VECTOR: u8 = 0xcf;
/// RST 2, raised at vertical blank.
pub const END_FRAME_VECTOR: u8 = 0xd7;

/// The ROM's busy-wait subroutine: `JMP 0x0AD7` spins for A * 1/64 s and
/// continues at 0x0AE1.
pub const DELAY_LOOP: FastForward = FastForward {
    loop_entry: 0x0ad7,
    resume_at: 0x0ae1,
    delay_unit: Duration::from_micros(15_625),
};

#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    #[builder(default)]
    pub dip: DipConfig,
    /// Skip the ROM's delay loop instead of executing it.
    #[builder(default = true)]
    pub fast_forward: bool,
    #[builder(default = DEFAULT_CLOCK_HZ)]
    pub clock_hz: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MachineConfig {
    fn interpreter_config(&self) -> InterpreterConfig {
        let config = InterpreterConfig::builder().clock_hz(self.clock_hz);
        if self.fast_forward {
            config.fast_forward(DELAY_LOOP).build()
        } else {
            config.build()
        }
    }
}

/// The Space Invaders board: the 8080 interpreter, its I/O devices and the
/// video interrupt source that paces them.
pub struct SpaceInvadersMachine {
    interpreter: Interpreter<InvadersIo>,
    config: MachineConfig,
    /// Time left before the next video interrupt.
    until_interrupt: Duration,
    next_vector: u8,
    frames: u64,
}

impl SpaceInvadersMachine {
    /// Build a machine over a combined ROM image starting at 0x0000.
    pub fn new(rom: &[u8]) -> Self {
        Self::with_config(rom, MachineConfig::default())
    }

    pub fn with_config(rom: &[u8], config: MachineConfig) -> Self {
        let interpreter = Interpreter::new(
            rom,
            InvadersIo::new(config.dip),
            config.interpreter_config(),
        );
        Self {
            interpreter,
            config,
            until_interrupt: HALF_FRAME,
            next_vector: MID_FRAME_VECTOR,
            frames: 0,
        }
    }

    /// Reset CPU and I/O, preserving memory contents.
    pub fn reset(&mut self) {
        *self.interpreter.io_mut() = InvadersIo::new(self.config.dip);
        self.interpreter.reset();
        self.until_interrupt = HALF_FRAME;
        self.next_vector = MID_FRAME_VECTOR;
        self.frames = 0;
    }

    pub fn load_rom(&mut self, rom: &[u8]) {
        self.interpreter.load_rom(rom);
    }

    /// Let `elapsed` wall-clock time pass, raising the video interrupts at
    /// every half-frame boundary crossed.
    pub fn advance(&mut self, elapsed: Duration) -> Result<RunResult, CpuError> {
        let mut total = RunResult {
            cycles: 0,
            instructions: 0,
            exit: RunExit::BudgetExhausted,
        };
        let mut remaining = elapsed;

        loop {
            let slice = remaining.min(self.until_interrupt);
            let result = self.interpreter.tick(slice)?;
            total.cycles += result.cycles;
            total.instructions += result.instructions;
            total.exit = result.exit;

            remaining -= slice;
            self.until_interrupt -= slice;
            if self.until_interrupt.is_zero() {
                self.raise_video_interrupt();
                self.until_interrupt = HALF_FRAME;
            }

            if remaining.is_zero() || matches!(result.exit, RunExit::Halted | RunExit::Stopped) {
                break;
            }
        }
        Ok(total)
    }

    /// Run one video frame: RST 1 at mid frame, RST 2 at the end.
    pub fn step_frame(&mut self) -> Result<RunResult, CpuError> {
        self.advance(HALF_FRAME * 2)
    }

    fn raise_video_interrupt(&mut self) {
        let vector = self.next_vector;
        if !self.interpreter.request_interrupt(vector) {
            log::trace!("video interrupt {:02X} dropped", vector);
        }
        if vector == END_FRAME_VECTOR {
            self.next_vector = MID_FRAME_VECTOR;
            self.frames += 1;
        } else {
            self.next_vector = END_FRAME_VECTOR;
        }
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.interpreter.io_mut().set_button(button, pressed);
    }

    /// The raw video RAM window: 0x1c00 bytes starting at 0x2400.
    pub fn video_ram(&self) -> &[u8] {
        self.interpreter
            .memory()
            .as_slice()
            .get(VRAM_START..VRAM_START + VRAM_SIZE)
            .unwrap_or_default()
    }

    /// Current values of the sound output ports (OUT 3 and OUT 5).
    pub fn outputs(&self) -> (u8, u8) {
        self.interpreter.io().outputs()
    }

    /// Completed frames since construction or the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn interpreter(&self) -> &Interpreter<InvadersIo> {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter<InvadersIo> {
        &mut self.interpreter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 16 KiB image with `chunks` placed at their addresses.
    fn rom_with(chunks: &[(usize, &[u8])]) -> Vec<u8> {
        let mut rom = vec![0u8; 0x4000];
        for (addr, bytes) in chunks {
            rom[*addr..*addr + bytes.len()].copy_from_slice(bytes);
        }
        rom
    }

    /// Spins at 0x0004; RST 1 bumps [0x2000], RST 2 bumps [0x2001].
    fn counting_rom() -> Vec<u8> {
        rom_with(&[
            // LXI SP,0x2400 ; EI ; JMP 0x0004
            (0x00, &[0x31, 0x00, 0x24, 0xfb, 0xc3, 0x04, 0x00]),
            (0x08, &[0xc3, 0x20, 0x00]),
            (0x10, &[0xc3, 0x30, 0x00]),
            // LDA ; INR A ; STA ; EI ; RET
            (0x20, &[0x3a, 0x00, 0x20, 0x3c, 0x32, 0x00, 0x20, 0xfb, 0xc9]),
            (0x30, &[0x3a, 0x01, 0x20, 0x3c, 0x32, 0x01, 0x20, 0xfb, 0xc9]),
        ])
    }

    #[test]
    fn frames_raise_both_video_interrupts() {
        let mut machine = SpaceInvadersMachine::new(&counting_rom());
        machine.step_frame().unwrap();
        machine.step_frame().unwrap();

        // The last RST 2 is still pending at the end of the second frame.
        let memory = machine.interpreter().memory();
        assert_eq!(memory.get(0x2000), 2);
        assert_eq!(memory.get(0x2001), 1);
        assert_eq!(machine.frames(), 2);
        assert_eq!(machine.interpreter().pending_interrupt(), END_FRAME_VECTOR);
    }

    #[test]
    fn advance_splits_at_half_frames() {
        let mut machine = SpaceInvadersMachine::new(&counting_rom());
        // Just short of the first boundary: nothing raised yet.
        machine.advance(HALF_FRAME - Duration::from_micros(1)).unwrap();
        assert_eq!(machine.interpreter().pending_interrupt(), 0);

        machine.advance(Duration::from_micros(1)).unwrap();
        assert_eq!(machine.interpreter().pending_interrupt(), MID_FRAME_VECTOR);
        assert_eq!(machine.frames(), 0);
    }

    #[test]
    fn masked_video_interrupts_still_alternate() {
        // DI ; JMP 0x0001
        let rom = rom_with(&[(0x0000, &[0xf3, 0xc3, 0x01, 0x00])]);
        let mut machine = SpaceInvadersMachine::new(&rom);
        machine.step_frame().unwrap();

        assert_eq!(machine.interpreter().pending_interrupt(), 0);
        assert_eq!(machine.frames(), 1);
        assert_eq!(machine.next_vector, MID_FRAME_VECTOR);
    }

    #[test]
    fn delay_loop_is_skipped_by_default() {
        // MVI A,0x40 ; JMP 0x0AD7      0x0AE1: HLT
        let rom = rom_with(&[(0x0000, &[0x3e, 0x40, 0xc3, 0xd7, 0x0a]), (0x0ae1, &[0x76])]);
        let mut machine = SpaceInvadersMachine::new(&rom);
        let result = machine.advance(Duration::from_millis(1)).unwrap();
        assert_eq!(result.exit, RunExit::Waiting(Duration::from_secs(1)));
        assert_eq!(machine.interpreter().registers().pc, 0x0ae1);

        let config = MachineConfig::builder().fast_forward(false).build();
        let mut machine = SpaceInvadersMachine::with_config(&rom, config);
        machine.interpreter_mut().step_n(2).unwrap();
        assert_eq!(machine.interpreter().registers().pc, 0x0ad7);
    }

    #[test]
    fn buttons_reach_the_program() {
        // IN 1 ; STA 0x2000 ; HLT
        let rom = rom_with(&[(0x0000, &[0xdb, 0x01, 0x32, 0x00, 0x20, 0x76])]);
        let mut machine = SpaceInvadersMachine::new(&rom);
        machine.set_button(Button::P1Start, true);
        let result = machine.advance(Duration::from_millis(1)).unwrap();

        assert_eq!(result.exit, RunExit::Halted);
        assert_eq!(machine.interpreter().memory().get(0x2000), 0b0000_1100);
    }

    #[test]
    fn sound_latches_are_visible() {
        // MVI A,0x02 ; OUT 3 ; OUT 5 ; HLT
        let rom = rom_with(&[(0x0000, &[0x3e, 0x02, 0xd3, 0x03, 0xd3, 0x05, 0x76])]);
        let mut machine = SpaceInvadersMachine::new(&rom);
        machine.step_frame().unwrap();
        assert_eq!(machine.outputs(), (0x02, 0x02));
    }

    #[test]
    fn unknown_port_stops_the_machine() {
        // OUT 7
        let rom = rom_with(&[(0x0000, &[0xd3, 0x07])]);
        let mut machine = SpaceInvadersMachine::new(&rom);
        let err = machine.step_frame().unwrap_err();
        assert_eq!((err.opcode(), err.pc()), (0xd3, 0x0000));
        assert!(!machine.interpreter().is_ready());
    }

    #[test]
    fn reset_clears_io_but_keeps_memory() {
        let mut machine = SpaceInvadersMachine::new(&counting_rom());
        machine.set_button(Button::Tilt, true);
        machine.step_frame().unwrap();
        machine.reset();

        assert_eq!(machine.frames(), 0);
        assert_eq!(machine.interpreter().registers().pc, 0);
        assert_eq!(machine.interpreter().memory().get(0x2000), 1);
        assert_eq!(machine.interpreter().io().outputs(), (0, 0));
        assert!(machine.interpreter().is_ready());
        assert_eq!(machine.video_ram().len(), VRAM_SIZE);
    }
}
