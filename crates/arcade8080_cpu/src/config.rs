use std::time::Duration;

use typed_builder::TypedBuilder;

use crate::memory::MemoryLayout;

/// Clock rate of the Space Invaders board.
pub const DEFAULT_CLOCK_HZ: u64 = 2_000_000;

/// Interpreter settings. Every field has a default matching the
/// Space Invaders board.
#[derive(Clone, Debug, TypedBuilder)]
pub struct InterpreterConfig {
    /// Emulated clock in cycles per second.
    #[builder(default = DEFAULT_CLOCK_HZ)]
    pub clock_hz: u64,
    #[builder(default)]
    pub layout: MemoryLayout,
    #[builder(default = 0x0000)]
    pub initial_pc: u16,
    #[builder(default = 0x0000)]
    pub initial_sp: u16,
    /// State of the interrupt-enable flip-flop after reset.
    #[builder(default = true)]
    pub interrupts_enabled_at_reset: bool,
    #[builder(default, setter(strip_option))]
    pub fast_forward: Option<FastForward>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A ROM delay loop the interpreter may skip instead of spinning through.
///
/// When the instruction at PC is `JMP loop_entry`, PC moves straight to
/// `resume_at` and the host is asked to wait `A * delay_unit` of wall-clock
/// time before execution continues. This is a throughput optimization tied
/// to a specific ROM; leave it unset for bit-exact timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastForward {
    pub loop_entry: u16,
    pub resume_at: u16,
    pub delay_unit: Duration,
}

impl FastForward {
    pub fn delay_for(&self, accumulator: u8) -> Duration {
        self.delay_unit * u32::from(accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_invaders_board() {
        let config = InterpreterConfig::default();
        assert_eq!(config.clock_hz, 2_000_000);
        assert_eq!(config.layout.capacity(), 0x4000);
        assert_eq!(config.layout.writable_floor(), 0x2000);
        assert!(config.interrupts_enabled_at_reset);
        assert!(config.fast_forward.is_none());
    }

    #[test]
    fn delay_scales_with_accumulator() {
        let ff = FastForward {
            loop_entry: 0x0ad7,
            resume_at: 0x0ae1,
            delay_unit: Duration::from_micros(15_625),
        };
        assert_eq!(ff.delay_for(0x40), Duration::from_secs(1));
        assert_eq!(ff.delay_for(0), Duration::ZERO);
    }
}
