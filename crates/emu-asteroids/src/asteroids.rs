//! Top-level board.
//!
//! The machine is generic over the CPU collaborator: anything that can
//! single-step against the bus and latch an NMI edge drives it. One
//! `step` is one CPU instruction plus the pacing bookkeeping; a frame
//! is one sixtieth of a second of CPU cycles (crystal / 8 / 60 =
//! 25,200), counted in emulated cycles, never host time.
//!
//! Two loops share the machine (see the crate docs): the stepping loop
//! calls [`Asteroids::step`]/[`Asteroids::run_frame`], the presentation
//! loop calls [`Asteroids::present`] and pushes fresh input snapshots.
//! Completed sample lists move through a separate slot filled when the
//! generator halts, so a reader never sees one mid-build.

use arcade_core::{BeamSample, Cpu, FrameSink, MasterClock, Observable, Ticks, Value};

use crate::bus::AsteroidsBus;
use crate::config::{AsteroidsConfig, CPU_DIVISOR, CRYSTAL_HZ, FRAME_RATE};
use crate::input::{Button, InputQueue};
use crate::memory::Memory;
use crate::pacer::InterruptPacer;

/// The board: CPU collaborator, bus, and timing glue.
pub struct Asteroids<C: Cpu> {
    cpu: C,
    bus: AsteroidsBus,
    pacer: InterruptPacer,
    /// CPU cycles per video frame.
    cycles_per_frame: u64,
    /// Completed frame counter (stepping-loop frames).
    frame_count: u64,
    /// CPU instructions executed.
    total_steps: u64,
    /// Timed input event queue.
    input_queue: InputQueue,
}

impl<C: Cpu> Asteroids<C> {
    /// Build the board around a CPU core.
    ///
    /// # Errors
    ///
    /// Returns an error for bad ROM image sizes, overlapping regions,
    /// or a meaningless interrupt cadence.
    pub fn new(mut cpu: C, config: &AsteroidsConfig) -> Result<Self, String> {
        let memory = Memory::new(config)?;
        let pacer = InterruptPacer::new(config.nmi_interval, config.nmi_release)?;
        let bus = AsteroidsBus::new(memory, config.dip_switches);
        cpu.reset();

        let cpu_clock = MasterClock::new(CRYSTAL_HZ).divided_hz(CPU_DIVISOR);
        Ok(Self {
            cpu,
            bus,
            pacer,
            cycles_per_frame: cpu_clock / FRAME_RATE,
            frame_count: 0,
            total_steps: 0,
            input_queue: InputQueue::new(),
        })
    }

    /// Execute one CPU instruction and advance the interrupt pacing.
    pub fn step(&mut self) -> Ticks {
        let cycles = self.cpu.step(&mut self.bus);
        self.bus.total_cycles += cycles.get();
        self.total_steps += 1;
        self.pacer.advance(&mut self.cpu);
        cycles
    }

    /// Run one frame's worth of CPU cycles.
    ///
    /// Applies any input queue events due this frame first. Returns the
    /// cycles actually executed (the last instruction may overshoot).
    pub fn run_frame(&mut self) -> Ticks {
        self.input_queue
            .process(self.frame_count, &mut self.bus.inputs);
        self.frame_count += 1;

        let mut elapsed = Ticks::ZERO;
        while elapsed.get() < self.cycles_per_frame {
            elapsed += self.step();
        }
        elapsed
    }

    /// Hand the most recent completed sample list to a sink.
    ///
    /// Returns false if nothing new has completed since the last call —
    /// the presentation loop just redisplays its previous frame then.
    pub fn present<S: FrameSink>(&mut self, sink: &mut S) -> bool {
        match self.bus.take_frame() {
            Some(frame) => {
                sink.present(&frame);
                true
            }
            None => false,
        }
    }

    /// Take the completed sample list without a sink.
    pub fn take_frame(&mut self) -> Option<Vec<BeamSample>> {
        self.bus.take_frame()
    }

    /// Press or release a button immediately.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.inputs.set_button(button, pressed);
    }

    /// Mutable reference to the timed input queue.
    pub fn input_queue(&mut self) -> &mut InputQueue {
        &mut self.input_queue
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &C {
        &self.cpu
    }

    /// Mutable reference to the CPU.
    pub fn cpu_mut(&mut self) -> &mut C {
        &mut self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &AsteroidsBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut AsteroidsBus {
        &mut self.bus
    }

    /// CPU cycles executed so far.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.bus.total_cycles
    }

    /// CPU instructions executed so far.
    #[must_use]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Frames run by the stepping loop.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// NMI edges produced so far.
    #[must_use]
    pub fn nmi_count(&self) -> u64 {
        self.pacer.asserts()
    }

    /// CPU cycles per video frame.
    #[must_use]
    pub fn cycles_per_frame(&self) -> u64 {
        self.cycles_per_frame
    }
}

impl<C: Cpu> Observable for Asteroids<C> {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("dvg.") {
            self.bus.dvg.query(rest)
        } else if let Some(rest) = path.strip_prefix("memory.") {
            let address = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
                u16::from_str_radix(hex, 16).ok()
            } else if let Some(hex) = rest.strip_prefix('$') {
                u16::from_str_radix(hex, 16).ok()
            } else {
                rest.parse().ok()
            };
            address.and_then(|a| self.bus.memory.read(a)).map(Value::U8)
        } else {
            match path {
                "frame_count" => Some(self.frame_count.into()),
                "total_cycles" => Some(self.bus.total_cycles.into()),
                "total_steps" => Some(self.total_steps.into()),
                "nmi_count" => Some(self.pacer.asserts().into()),
                "nmi_line" => Some(self.pacer.line_active().into()),
                "watchdog_resets" => Some(self.bus.watchdog_resets().into()),
                "activations" => Some(self.bus.activations().into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "dvg.<generator_paths>",
            "memory.<address>",
            "frame_count",
            "total_cycles",
            "total_steps",
            "nmi_count",
            "nmi_line",
            "watchdog_resets",
            "activations",
        ]
    }
}
