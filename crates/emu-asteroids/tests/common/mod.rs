//! Shared test scaffolding: a scripted CPU collaborator.

use std::collections::VecDeque;

use arcade_core::{Bus, Cpu, InterruptLine, Ticks};
use emu_asteroids::AsteroidsConfig;
use emu_asteroids::memory::ROM_CHIP_SIZE;

/// One bus access for the scripted CPU to perform on its next step.
pub enum BusOp {
    Read(u16),
    Write(u16, u8),
    Idle,
}

/// A stand-in CPU core that replays a queued list of bus accesses, one
/// per step, and records everything done to it.
pub struct ScriptedCpu {
    pub ops: VecDeque<BusOp>,
    /// Every read performed, with the value the bus returned.
    pub reads: Vec<(u16, u8)>,
    /// Every interrupt line transition, in order.
    pub lines: Vec<(InterruptLine, bool)>,
    pub resets: u32,
}

impl ScriptedCpu {
    pub fn new() -> Self {
        Self::script(Vec::new())
    }

    pub fn script(ops: Vec<BusOp>) -> Self {
        Self {
            ops: ops.into(),
            reads: Vec::new(),
            lines: Vec::new(),
            resets: 0,
        }
    }

    /// Number of NMI assert edges seen.
    pub fn nmi_edges(&self) -> usize {
        self.lines
            .iter()
            .filter(|(line, active)| *line == InterruptLine::Nmi && *active)
            .count()
    }

    /// Number of NMI releases seen.
    pub fn nmi_releases(&self) -> usize {
        self.lines
            .iter()
            .filter(|(line, active)| *line == InterruptLine::Nmi && !*active)
            .count()
    }
}

impl Cpu for ScriptedCpu {
    fn step<B: Bus>(&mut self, bus: &mut B) -> Ticks {
        match self.ops.pop_front() {
            Some(BusOp::Read(address)) => {
                let value = bus.read(address);
                self.reads.push((address, value));
            }
            Some(BusOp::Write(address, value)) => bus.write(address, value),
            Some(BusOp::Idle) | None => {}
        }
        Ticks::new(4)
    }

    fn assert_interrupt(&mut self, line: InterruptLine, active: bool) {
        self.lines.push((line, active));
    }

    fn pc(&self) -> u16 {
        0
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// A configuration with blank (zero-filled) ROM chips.
pub fn blank_config() -> AsteroidsConfig {
    AsteroidsConfig::new(
        vec![0; ROM_CHIP_SIZE],
        vec![0; ROM_CHIP_SIZE],
        vec![0; ROM_CHIP_SIZE],
        vec![0; ROM_CHIP_SIZE],
    )
}

/// Bus write ops laying a 16-bit word into vector RAM, little-endian.
pub fn poke_word_ops(word_addr: u16, word: u16) -> [BusOp; 2] {
    [
        BusOp::Write(0x4000 + word_addr * 2, (word & 0xFF) as u8),
        BusOp::Write(0x4000 + word_addr * 2 + 1, (word >> 8) as u8),
    ]
}
