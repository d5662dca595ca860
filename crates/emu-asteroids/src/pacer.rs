//! Instruction-count interrupt pacing.

use arcade_core::{Cpu, InterruptLine};

/// Generates the periodic NMI that paces the game's frame logic.
///
/// Real hardware derives this from a divider off the 3 kHz clock; here
/// it counts CPU instructions instead, which keeps runs reproducible on
/// any host. The line is driven as an edge: asserted when the counter
/// trips, dropped a fixed few steps later — the CPU is expected to have
/// latched it by then.
pub struct InterruptPacer {
    /// Instructions between asserts.
    interval: u32,
    /// Steps between assert and release.
    release_after: u32,
    /// Instructions since the last assert.
    instructions: u32,
    /// Line currently driven active.
    line_active: bool,
    /// Steps until the active line releases.
    release_countdown: u32,
    /// Total assert edges produced.
    asserts: u64,
}

impl InterruptPacer {
    /// Build a pacer. A zero interval or release delay has no hardware
    /// meaning and is rejected.
    pub fn new(interval: u32, release_after: u32) -> Result<Self, String> {
        if interval == 0 {
            return Err("interrupt interval must be at least one instruction".into());
        }
        if release_after == 0 {
            return Err("interrupt release delay must be at least one step".into());
        }
        Ok(Self {
            interval,
            release_after,
            instructions: 0,
            line_active: false,
            release_countdown: 0,
            asserts: 0,
        })
    }

    /// Account one CPU step, driving the NMI line as needed.
    pub fn advance<C: Cpu>(&mut self, cpu: &mut C) {
        if self.line_active {
            self.release_countdown -= 1;
            if self.release_countdown == 0 {
                cpu.assert_interrupt(InterruptLine::Nmi, false);
                self.line_active = false;
            }
        }

        self.instructions += 1;
        if self.instructions >= self.interval {
            self.instructions = 0;
            self.asserts += 1;
            cpu.assert_interrupt(InterruptLine::Nmi, true);
            self.line_active = true;
            self.release_countdown = self.release_after;
        }
    }

    /// Is the line currently driven active?
    #[must_use]
    pub fn line_active(&self) -> bool {
        self.line_active
    }

    /// Total assert edges produced so far.
    #[must_use]
    pub fn asserts(&self) -> u64 {
        self.asserts
    }
}
