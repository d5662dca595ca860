//! Sequencer PROM and scale table.
//!
//! The DVG has no conventional instruction decoder. A 256×4 PROM maps
//! (halt line, latched opcode, current micro-state) to the next
//! micro-state; everything the chip does falls out of walking this
//! table. The address is formed as:
//!
//! ```text
//! bit 7    : inverted halt bit of the state latch
//! bits 4-6 : opcode bits 0-2, ORed in when opcode bit 3 is set
//! bits 0-3 : state latch low nibble
//! ```
//!
//! While the machine runs the halt bit is clear, so only the upper 128
//! entries are live; the lower half is all zeros.
//!
//! Micro-states with bit 3 set strobe the data bus and dispatch a
//! handler; bit 0 of the state selects the low/high byte of the current
//! 16-bit word. The per-opcode walks encoded below:
//!
//! ```text
//! VCTR $0-$9:  LATCH1 → LATCH0 → LATCH3 → LATCH2 → GOSTROBE → settle
//! HALT $A,
//! SCAL $B:     LATCH1 → LATCH0 → LATCH3 → LATCH2 → HALTSTROBE
//! JSRL $C:     LATCH1 → LATCH0 → DMAPUSH → DMALD
//! RTSL $D,
//! JMPL $E:     LATCH1 → LATCH0 → DMALD
//! SVEC $F:     LATCH1 → LATCH0 → GOSTROBE → settle
//! ```
//!
//! Every walk ends back at LATCH1, the high-byte fetch of the next
//! instruction word. Unreachable entries are zero; state 0 routes to
//! LATCH1, so a stray state falls back into the fetch loop within two
//! steps.

/// Strobe micro-states (bit 3 set). The low two bits select the handler
/// pair; bit 0 doubles as the byte-select into the current word.
pub mod state {
    /// Push the program counter (subroutine call).
    pub const DMAPUSH: u8 = 0x8;
    /// Load the program counter from the stack or the Y latch.
    pub const DMALD: u8 = 0x9;
    /// Commit the latched deltas as a beam movement.
    pub const GOSTROBE: u8 = 0xA;
    /// Halt check and final-position latch.
    pub const HALTSTROBE: u8 = 0xB;
    /// Latch the low byte of the first word (Y delta low).
    pub const LATCH0: u8 = 0xC;
    /// Latch the high byte of the first word (opcode + Y delta high).
    pub const LATCH1: u8 = 0xD;
    /// Latch the low byte of the second word (X delta low).
    pub const LATCH2: u8 = 0xE;
    /// Latch the high byte of the second word (intensity + X delta high).
    pub const LATCH3: u8 = 0xF;
}

/// Sequencer PROM address for the given state latch and opcode.
#[must_use]
pub fn state_addr(latch: u8, op: u8) -> usize {
    let mut addr = usize::from((((latch >> 4) ^ 1) & 1) << 7) | usize::from(latch & 0x0F);
    if op & 0x08 != 0 {
        addr |= usize::from(op & 0x07) << 4;
    }
    addr
}

/// The sequencer PROM. Indexed by [`state_addr`]; the low nibble of each
/// entry replaces the state latch's low nibble.
#[rustfmt::skip]
pub const SEQUENCER_PROM: [u8; 256] = [
    // $00-$7F: halt bit set — machine is stopped, no transitions
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
    // $80-$8F: opcodes $0-$7 (and $8, fold 0) — long vector
    0xD, 0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x1, 0x0, 0xF, 0xC, 0xA, 0xE,
    // $90-$9F: opcode $9 (fold 1) — long vector
    0xD, 0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x1, 0x0, 0xF, 0xC, 0xA, 0xE,
    // $A0-$AF: opcode $A (fold 2) — halt
    0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0xD, 0xF, 0xC, 0xB, 0xE,
    // $B0-$BF: opcode $B (fold 3) — scale load, falls through halt check
    0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0xD, 0xF, 0xC, 0xB, 0xE,
    // $C0-$CF: opcode $C (fold 4) — subroutine call
    0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x9, 0xD, 0x0, 0x0, 0x8, 0xC, 0x0, 0x0,
    // $D0-$DF: opcode $D (fold 5) — subroutine return
    0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0xD, 0x0, 0x0, 0x9, 0xC, 0x0, 0x0,
    // $E0-$EF: opcode $E (fold 6) — jump
    0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0xD, 0x0, 0x0, 0x9, 0xC, 0x0, 0x0,
    // $F0-$FF: opcode $F (fold 7) — short vector
    0xD, 0xD, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x1, 0x0, 0xA, 0xC, 0x0, 0x0,
];

/// Beam movement scale factors, indexed by the 4-bit scale field.
///
/// Deltas are multiplied by the entry and shifted right 8, so entry 7
/// (256) is unity gain. The top six entries are the shifter falling off
/// its 11-bit bus: they collapse to zero-length movements.
pub const SCALE_TABLE: [u16; 16] = [
    2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 0, 0, 0, 0, 0, 0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_state_enters_fetch() {
        // Latch 0, opcode 0: running half, no fold
        let addr = state_addr(0x00, 0x0);
        assert_eq!(addr, 0x80);
        assert_eq!(SEQUENCER_PROM[addr], state::LATCH1);
    }

    #[test]
    fn halted_half_is_inert() {
        for entry in &SEQUENCER_PROM[..0x80] {
            assert_eq!(*entry, 0);
        }
    }

    #[test]
    fn opcode_folds_only_when_bit_3_set() {
        // Opcode $7: no fold, base bank
        assert_eq!(state_addr(0x0D, 0x7), 0x8D);
        // Opcode $C: fold 4 → bits 4-6 = 100
        assert_eq!(state_addr(0x0D, 0xC), 0xCD);
        // Opcode $F: fold 7
        assert_eq!(state_addr(0x0D, 0xF), 0xFD);
    }

    #[test]
    fn every_opcode_walk_returns_to_fetch() {
        // From LATCH1, walk the table with the data strobes ignored and
        // confirm each opcode's path reaches LATCH1 again within a few
        // steps — the fetch loop is closed for the whole instruction set.
        for op in 0x0..=0xFu8 {
            let mut latch = state::LATCH1;
            let mut seen_fetch = false;
            for _ in 0..8 {
                latch = SEQUENCER_PROM[state_addr(latch, op)] & 0x0F;
                if latch == state::LATCH1 {
                    seen_fetch = true;
                    break;
                }
            }
            assert!(seen_fetch, "opcode {op:X} never returns to LATCH1");
        }
    }

    #[test]
    fn stray_state_recovers_into_fetch() {
        // An unreachable state decays to 0, and state 0 maps to LATCH1.
        let mut latch = 0x5;
        latch = SEQUENCER_PROM[state_addr(latch, 0x0)] & 0x0F;
        assert_eq!(latch, 0);
        latch = SEQUENCER_PROM[state_addr(latch, 0x0)] & 0x0F;
        assert_eq!(latch, state::LATCH1);
    }

    #[test]
    fn unity_scale_is_entry_7() {
        assert_eq!(SCALE_TABLE[7], 256);
    }
}
