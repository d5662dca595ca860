//! Board configuration.

use crate::memory::ROM_CHIP_SIZE;

/// Master crystal frequency in Hz. The CPU runs at crystal / 8.
pub const CRYSTAL_HZ: u64 = 12_096_000;

/// CPU clock divisor from the crystal.
pub const CPU_DIVISOR: u64 = 8;

/// Display refresh rate the game was tuned for.
pub const FRAME_RATE: u64 = 60;

/// NMI cadence: one interrupt per this many CPU instructions. The board
/// paces its frame logic off the NMI, and tying it to instruction count
/// (rather than host time) keeps emulation deterministic.
pub const NMI_INTERVAL: u32 = 300;

/// Steps after an NMI assert before the line drops again. The CPU
/// latches the edge; three instructions is comfortably past it.
pub const NMI_RELEASE: u32 = 3;

/// Board configuration: ROM images plus the operator settings.
///
/// ROM bytes come from an external loader; this crate only checks the
/// sizes. The three program chips map consecutively at $6800 and mirror
/// across the window up to $F7FF, with the third chip pinned again at
/// $F800 so the CPU vectors resolve.
pub struct AsteroidsConfig {
    /// Program ROM chip at $6800 (2K).
    pub prom0: Vec<u8>,
    /// Program ROM chip at $7000 (2K).
    pub prom1: Vec<u8>,
    /// Program ROM chip at $7800 (2K); also serves $F800-$FFFF.
    pub prom2: Vec<u8>,
    /// Vector object ROM at $5000 (2K).
    pub vector_rom: Vec<u8>,
    /// Operator DIP switches (see [`crate::input::dip`]).
    pub dip_switches: u8,
    /// Instructions per NMI.
    pub nmi_interval: u32,
    /// Steps until the NMI line releases.
    pub nmi_release: u32,
}

impl AsteroidsConfig {
    /// Configuration with the standard operator settings.
    #[must_use]
    pub fn new(prom0: Vec<u8>, prom1: Vec<u8>, prom2: Vec<u8>, vector_rom: Vec<u8>) -> Self {
        Self {
            prom0,
            prom1,
            prom2,
            vector_rom,
            dip_switches: crate::input::dip::DEFAULT,
            nmi_interval: NMI_INTERVAL,
            nmi_release: NMI_RELEASE,
        }
    }

    /// Check every ROM image is one 2K chip.
    pub fn validate(&self) -> Result<(), String> {
        for (name, image) in [
            ("prom0", &self.prom0),
            ("prom1", &self.prom1),
            ("prom2", &self.prom2),
            ("vector_rom", &self.vector_rom),
        ] {
            if image.len() != ROM_CHIP_SIZE {
                return Err(format!(
                    "{name} must be {ROM_CHIP_SIZE} bytes, got {}",
                    image.len()
                ));
            }
        }
        Ok(())
    }
}
