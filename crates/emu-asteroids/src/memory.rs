//! Memory regions and the board's region table.
//!
//! The board decodes its 16-bit address space into five regions plus
//! the I/O ranges handled in [`crate::bus`]:
//!
//! | Range         | Region        | Backing                          |
//! |---------------|---------------|----------------------------------|
//! | `$0000-$0FFF` | work RAM      | 4K                               |
//! | `$4000-$47FF` | vector RAM    | 2K, shared with the DVG          |
//! | `$5000-$57FF` | vector ROM    | 2K, shared with the DVG          |
//! | `$6800-$F7FF` | program ROM   | 6K (3 × 2K chips), mirrored ×6   |
//! | `$F800-$FFFF` | vector table  | the third chip again             |
//!
//! Program ROM mirroring is plain modulo addressing: the 6K image
//! repeats across the 36K window. The top 2K is a separate region so
//! the 6502 reset/IRQ/NMI vectors always land in the last chip, which a
//! pure mirror of the full window would not give. Addresses outside
//! every region and I/O range read the open-bus value.

use crate::config::AsteroidsConfig;

/// Value read from an address nothing claims.
pub const OPEN_BUS: u8 = 0xFF;

/// Size of one program/vector ROM chip.
pub const ROM_CHIP_SIZE: usize = 0x0800;

/// Work RAM window.
pub const RAM_BASE: u16 = 0x0000;
pub const RAM_SIZE: usize = 0x1000;

/// Vector RAM window (CPU side; the DVG sees it at byte 0).
pub const VECTOR_RAM_BASE: u16 = 0x4000;
pub const VECTOR_RAM_SIZE: usize = 0x0800;

/// Vector ROM window (CPU side; the DVG sees it at byte $800).
pub const VECTOR_ROM_BASE: u16 = 0x5000;
pub const VECTOR_ROM_SIZE: usize = 0x0800;

/// Program ROM window and its 6K backing image.
pub const PROGRAM_ROM_BASE: u16 = 0x6800;
pub const PROGRAM_ROM_WINDOW: usize = 0x9000;
pub const PROGRAM_ROM_IMAGE: usize = 3 * ROM_CHIP_SIZE;

/// High window holding the CPU vectors.
pub const HIGH_ROM_BASE: u16 = 0xF800;
pub const HIGH_ROM_SIZE: usize = 0x0800;

/// A contiguous owned byte image mapped into a window of the address
/// space. The image may be smaller than the window, in which case it
/// mirrors via modulo addressing; the image length must divide the
/// window evenly.
#[derive(Debug)]
pub struct MemoryRegion {
    base: u16,
    window: usize,
    image: Vec<u8>,
    writable: bool,
}

impl MemoryRegion {
    /// A RAM region: zero-filled, window equals image.
    #[must_use]
    pub fn ram(base: u16, size: usize) -> Self {
        Self {
            base,
            window: size,
            image: vec![0; size],
            writable: true,
        }
    }

    /// A ROM region mirrored across `window` bytes.
    pub fn rom(base: u16, window: usize, image: Vec<u8>) -> Result<Self, String> {
        if image.is_empty() || !window.is_multiple_of(image.len()) {
            return Err(format!(
                "ROM image of {} bytes cannot mirror evenly across a {window}-byte window at {base:#06X}",
                image.len()
            ));
        }
        Ok(Self {
            base,
            window,
            image,
            writable: false,
        })
    }

    /// Does this region claim the address?
    #[must_use]
    pub fn contains(&self, address: u16) -> bool {
        usize::from(address) >= usize::from(self.base)
            && usize::from(address) < usize::from(self.base) + self.window
    }

    /// Read through the mirror.
    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        let offset = usize::from(address - self.base) % self.image.len();
        self.image[offset]
    }

    /// Write through the mirror; silently ignored for ROM.
    pub fn write(&mut self, address: u16, value: u8) {
        if self.writable {
            let offset = usize::from(address - self.base) % self.image.len();
            self.image[offset] = value;
        }
    }

    /// Byte at an offset into the backing image (no windowing).
    #[must_use]
    pub fn image_byte(&self, offset: usize) -> u8 {
        self.image.get(offset).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn base(&self) -> u16 {
        self.base
    }

    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }
}

/// The board's region table.
pub struct Memory {
    ram: MemoryRegion,
    vector_ram: MemoryRegion,
    vector_rom: MemoryRegion,
    program_rom: MemoryRegion,
    high_rom: MemoryRegion,
}

impl Memory {
    /// Build the region table from the configured ROM images.
    pub fn new(config: &AsteroidsConfig) -> Result<Self, String> {
        config.validate()?;

        let mut program = Vec::with_capacity(PROGRAM_ROM_IMAGE);
        program.extend_from_slice(&config.prom0);
        program.extend_from_slice(&config.prom1);
        program.extend_from_slice(&config.prom2);

        let memory = Self {
            ram: MemoryRegion::ram(RAM_BASE, RAM_SIZE),
            vector_ram: MemoryRegion::ram(VECTOR_RAM_BASE, VECTOR_RAM_SIZE),
            vector_rom: MemoryRegion::rom(
                VECTOR_ROM_BASE,
                VECTOR_ROM_SIZE,
                config.vector_rom.clone(),
            )?,
            program_rom: MemoryRegion::rom(PROGRAM_ROM_BASE, PROGRAM_ROM_WINDOW, program)?,
            high_rom: MemoryRegion::rom(HIGH_ROM_BASE, HIGH_ROM_SIZE, config.prom2.clone())?,
        };
        memory.check_disjoint()?;
        Ok(memory)
    }

    fn regions(&self) -> [&MemoryRegion; 5] {
        [
            &self.ram,
            &self.vector_ram,
            &self.vector_rom,
            &self.program_rom,
            &self.high_rom,
        ]
    }

    /// Every pair of windows must be disjoint so each address has
    /// exactly one owner.
    fn check_disjoint(&self) -> Result<(), String> {
        let regions = self.regions();
        for (i, a) in regions.iter().enumerate() {
            for b in &regions[i + 1..] {
                let a_end = usize::from(a.base()) + a.window();
                let b_end = usize::from(b.base()) + b.window();
                if usize::from(a.base()) < b_end && usize::from(b.base()) < a_end {
                    return Err(format!(
                        "memory regions at {:#06X} and {:#06X} overlap",
                        a.base(),
                        b.base()
                    ));
                }
            }
        }
        Ok(())
    }

    /// Read from whichever region claims the address.
    #[must_use]
    pub fn read(&self, address: u16) -> Option<u8> {
        self.regions()
            .into_iter()
            .find(|r| r.contains(address))
            .map(|r| r.read(address))
    }

    /// Write to whichever region claims the address. ROM and unmapped
    /// writes fall through silently.
    pub fn write(&mut self, address: u16, value: u8) {
        if self.ram.contains(address) {
            self.ram.write(address, value);
        } else if self.vector_ram.contains(address) {
            self.vector_ram.write(address, value);
        }
        // ROM regions ignore writes; so does open bus.
    }

    /// One byte of the DVG's own address space: vector RAM occupies
    /// bytes `$0000-$07FF`, vector ROM `$0800-$0FFF`, anything beyond
    /// reads zero (the generator's bus floats low, unlike the CPU's).
    #[must_use]
    pub fn dvg_fetch(&self, byte_address: u16) -> u8 {
        match usize::from(byte_address) {
            offset @ 0..VECTOR_RAM_SIZE => self.vector_ram.image_byte(offset),
            offset @ VECTOR_RAM_SIZE..=0x0FFF => {
                self.vector_rom.image_byte(offset - VECTOR_RAM_SIZE)
            }
            _ => 0x00,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AsteroidsConfig;

    fn numbered_config() -> AsteroidsConfig {
        // Distinct fill bytes per chip so mirrors are tellable apart
        AsteroidsConfig::new(
            vec![0xE0; ROM_CHIP_SIZE],
            vec![0xE1; ROM_CHIP_SIZE],
            vec![0xE2; ROM_CHIP_SIZE],
            vec![0x5E; ROM_CHIP_SIZE],
        )
    }

    #[test]
    fn program_rom_mirrors_by_modulo() {
        let memory = Memory::new(&numbered_config()).unwrap();
        for k in 0..PROGRAM_ROM_WINDOW {
            let addr = PROGRAM_ROM_BASE + k as u16;
            let image_addr = PROGRAM_ROM_BASE + (k % PROGRAM_ROM_IMAGE) as u16;
            assert_eq!(memory.read(addr), memory.read(image_addr), "at {addr:#06X}");
        }
        // Chip layout within one mirror
        assert_eq!(memory.read(0x6800), Some(0xE0));
        assert_eq!(memory.read(0x7000), Some(0xE1));
        assert_eq!(memory.read(0x7800), Some(0xE2));
        // First mirror repeat
        assert_eq!(memory.read(0x8000), Some(0xE0));
    }

    #[test]
    fn cpu_vectors_come_from_the_last_chip() {
        let memory = Memory::new(&numbered_config()).unwrap();
        assert_eq!(memory.read(0xF800), Some(0xE2));
        assert_eq!(memory.read(0xFFFC), Some(0xE2));
        assert_eq!(memory.read(0xFFFF), Some(0xE2));
    }

    #[test]
    fn ram_reads_back_and_rom_ignores_writes() {
        let mut memory = Memory::new(&numbered_config()).unwrap();
        memory.write(0x0123, 0xAB);
        assert_eq!(memory.read(0x0123), Some(0xAB));

        memory.write(0x6800, 0x00);
        assert_eq!(memory.read(0x6800), Some(0xE0));
        memory.write(0x5000, 0x00);
        assert_eq!(memory.read(0x5000), Some(0x5E));
    }

    #[test]
    fn unmapped_addresses_have_no_owner() {
        let memory = Memory::new(&numbered_config()).unwrap();
        assert_eq!(memory.read(0x1000), None);
        assert_eq!(memory.read(0x3FFF), None);
        assert_eq!(memory.read(0x5800), None);
        assert_eq!(memory.read(0x67FF), None);
    }

    #[test]
    fn dvg_space_maps_ram_then_rom() {
        let mut memory = Memory::new(&numbered_config()).unwrap();
        memory.write(0x4000, 0x11);
        memory.write(0x47FF, 0x22);
        assert_eq!(memory.dvg_fetch(0x0000), 0x11);
        assert_eq!(memory.dvg_fetch(0x07FF), 0x22);
        assert_eq!(memory.dvg_fetch(0x0800), 0x5E);
        assert_eq!(memory.dvg_fetch(0x0FFF), 0x5E);
        assert_eq!(memory.dvg_fetch(0x1000), 0x00);
    }

    #[test]
    fn uneven_mirror_rejected() {
        let err = MemoryRegion::rom(0x6800, 0x9000, vec![0; 0x700]).unwrap_err();
        assert!(err.contains("mirror"));
    }

    #[test]
    fn region_window_queries() {
        let region = MemoryRegion::rom(0x5000, 0x0800, vec![0xAA; 0x0800]).unwrap();
        assert!(region.contains(0x5000));
        assert!(region.contains(0x57FF));
        assert!(!region.contains(0x5800));
        assert!(!region.contains(0x4FFF));
    }
}
