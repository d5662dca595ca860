//! Asteroids arcade board emulator: the bus glue and vector hardware
//! around an external 6502-class CPU core.
//!
//! The board is a 1.512 MHz CPU (12.096 MHz crystal / 8), 4K of work
//! RAM, 8K of ROM, and the DVG vector coprocessor sharing a 2K vector
//! RAM with the CPU. There is no frame buffer: once per frame the game
//! builds a display list and strobes the generator, which walks the
//! list into beam deflection samples (see the `atari-dvg` crate).
//!
//! Two schedulable loops drive a machine instance:
//!
//! 1. the **stepping loop** — [`Asteroids::run_frame`], single-stepping
//!    the CPU and pacing the NMI off the instruction count;
//! 2. the **presentation loop** — [`Asteroids::present`] at the display
//!    refresh rate, forwarding completed sample lists to a
//!    [`arcade_core::FrameSink`] and pushing input snapshots.
//!
//! They may live on different cores behind a lock; nothing in here
//! consults the host clock, so pacing belongs entirely to the caller.

mod asteroids;
mod bus;
mod config;
pub mod input;
pub mod memory;
mod pacer;

pub use asteroids::Asteroids;
pub use bus::{AsteroidsBus, SoundLatches};
pub use config::{
    AsteroidsConfig, CPU_DIVISOR, CRYSTAL_HZ, FRAME_RATE, NMI_INTERVAL, NMI_RELEASE,
};
pub use input::{Button, InputEvent, InputQueue, Inputs};
pub use memory::{Memory, MemoryRegion, OPEN_BUS};
pub use pacer::InterruptPacer;
