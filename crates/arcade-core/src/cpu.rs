//! CPU collaborator contract.

use crate::{Bus, Ticks};

/// An interrupt line into the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptLine {
    /// Maskable interrupt request.
    Irq,
    /// Non-maskable interrupt. Edge-triggered: the CPU latches the
    /// inactive→active transition, so the line need not stay asserted.
    Nmi,
}

/// A CPU core driven one instruction at a time.
///
/// Instruction execution itself is out of scope for this workspace; any
/// core that can single-step against a [`Bus`] and latch interrupt edges
/// plugs in here. The machine drives `step` in a loop and feeds the step
/// count to its timing glue, so emulation stays deterministic regardless
/// of host speed.
pub trait Cpu {
    /// Execute one instruction against the bus.
    ///
    /// Returns the number of clock cycles the instruction consumed.
    /// Interrupt entry, when a latched line is taken, counts as part of
    /// the step that services it.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Ticks;

    /// Drive an interrupt line to the given level.
    ///
    /// Calling with the current level is a no-op; edge detection is the
    /// CPU's responsibility.
    fn assert_interrupt(&mut self, line: InterruptLine, active: bool);

    /// Current program counter.
    fn pc(&self) -> u16;

    /// Reset the CPU to its power-on state. The reset vector is fetched
    /// from the bus on the next `step`.
    fn reset(&mut self);
}
