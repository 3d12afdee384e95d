/// Size of the Space Invaders address space (16 KiB).
pub const DEFAULT_CAPACITY: usize = 0x4000;
/// First writable address on Space Invaders; everything below is ROM.
pub const DEFAULT_WRITABLE_FLOOR: u16 = 0x2000;
/// Largest address space the 8080 can reach.
pub const MAX_CAPACITY: usize = 0x1_0000;

/// Shape of the address space: how many bytes exist and where ROM ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLayout {
    capacity: usize,
    writable_floor: u16,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            writable_floor: DEFAULT_WRITABLE_FLOOR,
        }
    }
}

impl MemoryLayout {
    /// Build a layout, clamping capacity to 64 KiB and the floor to the
    /// capacity.
    pub fn new(capacity: usize, writable_floor: u16) -> Self {
        let clamped = capacity.min(MAX_CAPACITY);
        if clamped != capacity {
            log::warn!(
                "memory capacity 0x{:X} exceeds the 8080 address space, clamping to 0x{:X}",
                capacity,
                clamped
            );
        }
        let floor = (writable_floor as usize).min(clamped) as u16;
        Self {
            capacity: clamped,
            writable_floor: floor,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn writable_floor(&self) -> u16 {
        self.writable_floor
    }
}

/// Byte-addressable memory with a read-only low region.
///
/// Out-of-range reads return 0 and out-of-range or read-only writes are
/// dropped. Neither is an error: real hardware lets a runaway program do
/// both.
#[derive(Clone, Debug)]
pub struct Memory {
    bytes: Vec<u8>,
    writable_floor: usize,
}

impl Memory {
    /// Load `rom` at address 0, zero-padding up to the layout's capacity.
    pub fn new(rom: &[u8], layout: MemoryLayout) -> Self {
        let mut memory = Self {
            bytes: vec![0; layout.capacity()],
            writable_floor: layout.writable_floor() as usize,
        };
        memory.load(rom);
        memory
    }

    /// Replace the whole contents with `rom`, zero-padded.
    pub fn load(&mut self, rom: &[u8]) {
        let len = rom.len().min(self.bytes.len());
        if len < rom.len() {
            log::warn!(
                "ROM image is {} bytes, only the first {} fit in memory",
                rom.len(),
                len
            );
        }
        self.bytes.fill(0);
        self.bytes[..len].copy_from_slice(&rom[..len]);
        log::info!("Loaded {} byte ROM image", len);
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn writable_floor(&self) -> u16 {
        self.writable_floor as u16
    }

    pub fn get(&self, addr: u16) -> u8 {
        self.read_at(addr as usize)
    }

    /// Little-endian 16-bit read; each byte follows the bounds rule alone.
    pub fn get16(&self, addr: u16) -> u16 {
        let addr = addr as usize;
        u16::from_le_bytes([self.read_at(addr), self.read_at(addr + 1)])
    }

    /// Store a byte. Returns whether the write landed.
    pub fn set(&mut self, addr: u16, value: u8) -> bool {
        self.write_at(addr as usize, value)
    }

    /// Little-endian 16-bit write. Returns whether each byte (low, high)
    /// landed.
    pub fn set16(&mut self, addr: u16, value: u16) -> (bool, bool) {
        let addr = addr as usize;
        let [lo, hi] = value.to_le_bytes();
        (self.write_at(addr, lo), self.write_at(addr + 1, hi))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn read_at(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    fn write_at(&mut self, addr: usize, value: u8) -> bool {
        if addr < self.writable_floor {
            log::trace!("dropped write of {:02X} to read-only 0x{:04X}", value, addr);
            return false;
        }
        match self.bytes.get_mut(addr) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => {
                log::trace!("dropped write of {:02X} to unmapped 0x{:04X}", value, addr);
                false
            }
        }
    }
}
