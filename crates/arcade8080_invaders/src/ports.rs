use arcade8080_cpu::{IoPort, PortError};

const IN0_VALUE: u8 = 0b0000_1110;
/// IN 1 bit 3 is tied high on the board.
const IN1_FIXED: u8 = 0b0000_1000;

const SHIPS_MASK: u8 = 0b0000_0011;
const HIDE_COIN_INFO: u8 = 0b1000_0000;

/// DIP switches on IN 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DipConfig {
    /// 3 to 6; other values are clamped.
    pub ships_per_credit: u8,
    pub show_coin_info: bool,
}

impl Default for DipConfig {
    fn default() -> Self {
        Self {
            ships_per_credit: 3,
            show_coin_info: true,
        }
    }
}

impl DipConfig {
    fn port2_bits(&self) -> u8 {
        let ships = (self.ships_per_credit.clamp(3, 6) - 3) & SHIPS_MASK;
        if self.show_coin_info {
            ships
        } else {
            ships | HIDE_COIN_INFO
        }
    }
}

/// Cabinet inputs wired to ports 1 and 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Coin,
    P1Start,
    P2Start,
    P1Left,
    P1Right,
    P1Shoot,
    P2Left,
    P2Right,
    P2Shoot,
    /// Latched: releasing it does not clear the bit, only a reset does.
    Tilt,
}

impl Button {
    /// Input port and bit mask the button drives.
    fn wiring(self) -> (u8, u8) {
        match self {
            Button::Coin => (1, 0x01),
            Button::P2Start => (1, 0x02),
            Button::P1Start => (1, 0x04),
            Button::P1Shoot => (1, 0x10),
            Button::P1Left => (1, 0x20),
            Button::P1Right => (1, 0x40),
            Button::Tilt => (2, 0x04),
            Button::P2Shoot => (2, 0x10),
            Button::P2Left => (2, 0x20),
            Button::P2Right => (2, 0x40),
        }
    }
}

/// The Space Invaders board as seen through IN/OUT: player inputs, DIP
/// switches, the external shift register, the two sound latches and the
/// watchdog.
#[derive(Clone, Debug)]
pub struct InvadersIo {
    in_port1: u8,
    in_port2: u8,
    out_port3: u8,
    out_port5: u8,
    shift_register: u16,
    shift_offset: u8,
    watchdog_kicks: u64,
    dip_config: DipConfig,
}

impl Default for InvadersIo {
    fn default() -> Self {
        Self::new(DipConfig::default())
    }
}

impl InvadersIo {
    pub fn new(dip_config: DipConfig) -> Self {
        Self {
            in_port1: IN1_FIXED,
            in_port2: dip_config.port2_bits(),
            out_port3: 0,
            out_port5: 0,
            shift_register: 0,
            shift_offset: 0,
            watchdog_kicks: 0,
            dip_config,
        }
    }

    pub fn dip_config(&self) -> DipConfig {
        self.dip_config
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if button == Button::Tilt && !pressed {
            return;
        }
        let (port, mask) = button.wiring();
        let latch = if port == 1 {
            &mut self.in_port1
        } else {
            &mut self.in_port2
        };
        if pressed {
            *latch |= mask;
        } else {
            *latch &= !mask;
        }
    }

    /// Current values of the sound latches (OUT 3, OUT 5).
    pub fn outputs(&self) -> (u8, u8) {
        (self.out_port3, self.out_port5)
    }

    /// How many times the program has written the watchdog port.
    pub fn watchdog_kicks(&self) -> u64 {
        self.watchdog_kicks
    }

    fn shift_result(&self) -> u8 {
        let shift = 8 - (self.shift_offset & 0x7);
        (self.shift_register >> shift) as u8
    }
}

impl IoPort for InvadersIo {
    fn read(&mut self, port: u8) -> Result<u8, PortError> {
        match port {
            0 => Ok(IN0_VALUE),
            1 => Ok(self.in_port1),
            2 => Ok(self.in_port2),
            3 => Ok(self.shift_result()),
            _ => Err(PortError::unimplemented_read(port)),
        }
    }

    fn write(&mut self, port: u8, value: u8) -> Result<(), PortError> {
        match port {
            2 => self.shift_offset = value & 0x7,
            3 => self.out_port3 = value,
            4 => {
                self.shift_register = (self.shift_register >> 8) | (u16::from(value) << 8);
            }
            5 => self.out_port5 = value,
            6 => {
                self.watchdog_kicks += 1;
                log::trace!("watchdog reset ({} total)", self.watchdog_kicks);
            }
            _ => return Err(PortError::unimplemented_write(port)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_register_returns_window_at_offset() {
        let mut io = InvadersIo::default();
        io.write(4, 0xab).unwrap();
        io.write(4, 0xcd).unwrap();
        // register is now 0xCDAB

        io.write(2, 0).unwrap();
        assert_eq!(io.read(3).unwrap(), 0xcd);
        io.write(2, 4).unwrap();
        assert_eq!(io.read(3).unwrap(), 0xda);
        io.write(2, 7).unwrap();
        assert_eq!(io.read(3).unwrap(), 0xd5);
        // only the low three bits select the offset
        io.write(2, 0x0c).unwrap();
        assert_eq!(io.read(3).unwrap(), 0xda);
    }

    #[test]
    fn port1_keeps_bit3_set() {
        let mut io = InvadersIo::default();
        assert_eq!(io.read(1).unwrap(), 0b0000_1000);
        io.set_button(Button::Coin, true);
        io.set_button(Button::P1Shoot, true);
        assert_eq!(io.read(1).unwrap(), 0b0001_1001);
        io.set_button(Button::Coin, false);
        io.set_button(Button::P1Shoot, false);
        assert_eq!(io.read(1).unwrap(), 0b0000_1000);
        assert_eq!(io.read(0).unwrap(), 0b0000_1110);
    }

    #[test]
    fn dip_switches_land_on_port2() {
        let mut io = InvadersIo::new(DipConfig {
            ships_per_credit: 5,
            show_coin_info: false,
        });
        assert_eq!(io.read(2).unwrap(), 0b1000_0010);

        // out-of-range ship counts are clamped
        let mut io = InvadersIo::new(DipConfig {
            ships_per_credit: 9,
            show_coin_info: true,
        });
        assert_eq!(io.read(2).unwrap(), 0b0000_0011);
        io.set_button(Button::P2Left, true);
        assert_eq!(io.read(2).unwrap(), 0b0010_0011);
    }

    #[test]
    fn each_button_drives_one_bit() {
        let buttons = [
            (Button::Coin, 1u8, 0x01),
            (Button::P2Start, 1, 0x02),
            (Button::P1Start, 1, 0x04),
            (Button::P1Shoot, 1, 0x10),
            (Button::P1Left, 1, 0x20),
            (Button::P1Right, 1, 0x40),
            (Button::Tilt, 2, 0x04),
            (Button::P2Shoot, 2, 0x10),
            (Button::P2Left, 2, 0x20),
            (Button::P2Right, 2, 0x40),
        ];
        for (button, port, mask) in buttons {
            let mut io = InvadersIo::default();
            let idle = [io.read(1).unwrap(), io.read(2).unwrap()];
            io.set_button(button, true);
            let pressed = [io.read(1).unwrap(), io.read(2).unwrap()];
            let index = usize::from(port - 1);
            assert_eq!(pressed[index], idle[index] | mask, "{button:?}");
            assert_eq!(pressed[1 - index], idle[1 - index], "{button:?}");
        }
    }

    #[test]
    fn tilt_latches_until_reset() {
        let mut io = InvadersIo::default();
        io.set_button(Button::Tilt, true);
        io.set_button(Button::Tilt, false);
        assert_eq!(io.read(2).unwrap() & 0b100, 0b100);
        assert_eq!(InvadersIo::default().read(2).unwrap() & 0b100, 0);
    }

    #[test]
    fn sound_latches_and_watchdog() {
        let mut io = InvadersIo::default();
        io.write(3, 0x01).unwrap();
        io.write(5, 0x10).unwrap();
        io.write(6, 0x00).unwrap();
        io.write(6, 0x00).unwrap();
        assert_eq!(io.outputs(), (0x01, 0x10));
        assert_eq!(io.watchdog_kicks(), 2);
    }

    #[test]
    fn unknown_ports_are_errors() {
        let mut io = InvadersIo::default();
        assert_eq!(io.read(4), Err(PortError::unimplemented_read(4)));
        assert_eq!(io.read(7), Err(PortError::unimplemented_read(7)));
        assert_eq!(io.write(0, 1), Err(PortError::unimplemented_write(0)));
        assert_eq!(io.write(7, 1), Err(PortError::unimplemented_write(7)));
    }
}
