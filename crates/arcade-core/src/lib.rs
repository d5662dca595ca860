//! Core traits and types for arcade-board emulation.
//!
//! The CPU core is a collaborator, not a component of this workspace: it
//! executes instructions and touches the machine only through [`Bus`],
//! [`Cpu::step`] and its interrupt lines. Everything the board itself owns
//! (address decode, coprocessors, timing glue) lives behind these traits.

mod bus;
mod clock;
mod cpu;
mod observable;
mod sink;
mod ticks;

pub use bus::{Bus, SimpleBus};
pub use clock::MasterClock;
pub use cpu::{Cpu, InterruptLine};
pub use observable::{Observable, Value};
pub use sink::{BeamSample, CollectSink, FrameSink};
pub use ticks::Ticks;
