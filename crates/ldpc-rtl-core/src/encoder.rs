//! LDPC Encoder — cycle-accurate register-transfer model
//!
//! Models a clocked circuit that multiplies a k-bit message by a k×n
//! generator matrix over GF(2), one clock edge at a time, with a
//! start/done handshake. The caller supplies the clock by calling
//! [`LdpcEncoder::step`]; every call performs one synchronous edge with
//! simultaneous-update semantics (all registers update together from the
//! pre-edge snapshot).
//!
//! The latency is a hard timing contract, not a side effect: completion is
//! decided by a cycle counter, never by data convergence, so `done` always
//! asserts exactly `k-1` edges after the edge on which `start` was observed
//! deasserted, regardless of the message.
//!
//! ## Example
//!
//! ```rust
//! use ldpc_rtl_core::{GeneratorMatrix, LdpcEncoder};
//!
//! let matrix = GeneratorMatrix::example_6_3().unwrap();
//! let mut enc = LdpcEncoder::new(matrix);
//!
//! enc.assert_start(0b101).unwrap();
//! enc.step(); // start edge: reset registers, latch the message
//!
//! let mut edges = 0;
//! while !enc.done() {
//!     enc.step();
//!     edges += 1;
//! }
//! assert_eq!(enc.read_output(), (0b101011, true));
//! // k-1 = 2 edges between start deassertion and done
//! assert_eq!(edges - 1, 2);
//! ```

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::error::EncoderResult;
use crate::generator_matrix::GeneratorMatrix;

/// Controller state, one value at any instant.
///
/// `Presenting` is Idle-with-done-held: once the codeword is latched no
/// register changes until the next `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncoderState {
    /// Reset state; no encode has been requested yet.
    Idle,
    /// Accumulation window: the counter is running and the parity chains
    /// are re-folded every edge.
    Accumulating,
    /// Codeword latched to the output register, `done` held high.
    Presenting,
}

impl fmt::Display for EncoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncoderState::Idle => write!(f, "Idle"),
            EncoderState::Accumulating => write!(f, "Accumulating"),
            EncoderState::Presenting => write!(f, "Presenting"),
        }
    }
}

/// Cycle-accurate LDPC encoder.
///
/// Owns the generator matrix and the full register file. All mutation goes
/// through [`step`](Self::step); the input lines are driven between edges
/// via [`assert_start`](Self::assert_start) (one-edge pulse) or the raw
/// [`set_start`](Self::set_start) / [`set_data_input`](Self::set_data_input)
/// port writers.
///
/// The accumulator bank is a fixed k-entry × n-bit array sized at
/// construction: entry `j` packs, for every codeword bit `i`, the running
/// XOR of working rows `0..=j`. Entry `k-1` is the finished parity column.
/// The bank is double-buffered so every edge folds from the pre-edge
/// snapshot, never from half-updated entries.
#[derive(Debug, Clone)]
pub struct LdpcEncoder {
    matrix: GeneratorMatrix,

    // Registers, mutated only on a step boundary
    state: EncoderState,
    counter: usize,
    latched_input: u64,
    acc: Box<[u64]>,
    acc_next: Box<[u64]>,
    output: u64,
    done: bool,

    // Input lines, driven by the harness between edges
    start: bool,
    data_input: u64,

    // Previous-edge value of `start`, exposed for verification
    start_d: bool,
}

impl LdpcEncoder {
    /// Create an encoder with all registers at their reset values.
    pub fn new(matrix: GeneratorMatrix) -> Self {
        let k = matrix.message_len();
        Self {
            matrix,
            state: EncoderState::Idle,
            counter: 0,
            latched_input: 0,
            acc: vec![0; k].into_boxed_slice(),
            acc_next: vec![0; k].into_boxed_slice(),
            output: 0,
            done: false,
            start: false,
            data_input: 0,
            start_d: false,
        }
    }

    /// Message length k.
    pub fn message_len(&self) -> usize {
        self.matrix.message_len()
    }

    /// Codeword width n.
    pub fn codeword_width(&self) -> usize {
        self.matrix.codeword_width()
    }

    /// The generator matrix this encoder was built with.
    pub fn matrix(&self) -> &GeneratorMatrix {
        &self.matrix
    }

    /// Drive `data_input` and raise `start` for the next edge.
    ///
    /// The line stays high for exactly one sampled edge (the pulse the
    /// original testbench drives); asserting mid-encode interrupts and
    /// restarts with the new message. Messages wider than k bits are
    /// rejected, never truncated.
    pub fn assert_start(&mut self, message: u64) -> EncoderResult<()> {
        self.set_data_input(message)?;
        self.start = true;
        Ok(())
    }

    /// Drive the `start` line directly.
    pub fn set_start(&mut self, start: bool) {
        self.start = start;
    }

    /// Drive the `data_input` line directly. Overwide values are rejected.
    pub fn set_data_input(&mut self, message: u64) -> EncoderResult<()> {
        self.matrix.check_message(message)?;
        self.data_input = message;
        Ok(())
    }

    /// Codeword and handshake outputs, as the pair `(data_output, done)`.
    pub fn read_output(&self) -> (u64, bool) {
        (self.output, self.done)
    }

    /// The `data_output` register. Zero until the first `done`.
    pub fn output(&self) -> u64 {
        self.output
    }

    /// The `done` register.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Current value of the `start` line (the value the next edge samples).
    pub fn start_line(&self) -> bool {
        self.start
    }

    /// Current value of the `data_input` line.
    pub fn data_input_line(&self) -> u64 {
        self.data_input
    }

    /// The value of `start` sampled on the previous edge.
    pub fn start_was_asserted(&self) -> bool {
        self.start_d
    }

    /// Controller state.
    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Elapsed accumulation cycles, in `[0, k-1]`.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Advance one clock edge.
    ///
    /// Priority order, evaluated on the pre-edge snapshot:
    ///
    /// 1. `start` sampled high: zero the accumulator bank, clear `counter`,
    ///    `done` and `output`, latch `data_input`, enter `Accumulating`.
    ///    Interrupts an in-flight encode; the latest `start` always wins.
    /// 2. `Accumulating` with `counter < k-1`: fold the accumulator chains
    ///    from the latched input and increment the counter.
    /// 3. `Accumulating` with `counter == k-1`: latch the finished parity
    ///    column to `output`, raise `done`, enter `Presenting`.
    /// 4. `Idle` / `Presenting`: hold every register.
    ///
    /// Before any `start` this is a no-op on the reset values.
    pub fn step(&mut self) {
        let start = self.start;

        if start {
            self.acc.iter_mut().for_each(|entry| *entry = 0);
            self.counter = 0;
            self.done = false;
            self.output = 0;
            self.latched_input = self.data_input;
            self.state = EncoderState::Accumulating;
        } else if self.state == EncoderState::Accumulating {
            let k = self.matrix.message_len();
            if self.counter < k - 1 {
                // Sequential fold: entry 1 restarts the chain from the
                // combinational working rows, entries 2..k shift the
                // pre-edge prefix down by one row. Entry k-1 settles on
                // the last accumulating edge, exactly when it is needed.
                self.acc_next[0] = self.acc[0];
                for j in 1..k {
                    self.acc_next[j] = if j == 1 {
                        self.working_row(1) ^ self.working_row(0)
                    } else {
                        self.acc[j - 1] ^ self.working_row(j)
                    };
                }
                mem::swap(&mut self.acc, &mut self.acc_next);
                self.counter += 1;
            } else {
                // k == 1 has an empty accumulation window; the single
                // working row is the whole product.
                self.output = if k == 1 {
                    self.working_row(0)
                } else {
                    self.acc[k - 1]
                };
                self.done = true;
                self.state = EncoderState::Presenting;
            }
        }

        self.start_d = start;
        // One-edge pulse: the line drops unless the harness re-drives it
        self.start = false;
    }

    /// Working-row combiner: row `r` masked by its latched message bit.
    /// Pure, recomputed from the latch on every accumulating edge.
    fn working_row(&self, r: usize) -> u64 {
        if self.matrix.data_bit(self.latched_input, r) {
            self.matrix.row(r)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncoderError;

    fn encoder_6_3() -> LdpcEncoder {
        LdpcEncoder::new(GeneratorMatrix::example_6_3().unwrap())
    }

    fn encoder_9_4() -> LdpcEncoder {
        LdpcEncoder::new(GeneratorMatrix::example_9_4().unwrap())
    }

    /// Pulse start, clock the latch edge, then clock post-start edges
    /// (numbered from 0) until `done`; returns (codeword, index of the
    /// edge on which done first read true).
    fn encode(enc: &mut LdpcEncoder, message: u64) -> (u64, usize) {
        enc.assert_start(message).unwrap();
        enc.step();
        assert!(!enc.done());
        assert_eq!(enc.output(), 0);
        for edge in 0..128 {
            enc.step();
            if enc.done() {
                return (enc.output(), edge);
            }
        }
        panic!("done never asserted");
    }

    #[test]
    fn test_codewords_6_3() {
        let mut enc = encoder_6_3();
        assert_eq!(encode(&mut enc, 0b101).0, 0b101011);
        assert_eq!(encode(&mut enc, 0b011).0, 0b011001);
        assert_eq!(encode(&mut enc, 0b000).0, 0b000000);
        assert_eq!(encode(&mut enc, 0b110).0, 0b110010);
    }

    #[test]
    fn test_done_timing_6_3() {
        // k = 3: two accumulating edges, done first true on post-start
        // edge 2
        let mut enc = encoder_6_3();
        let (_, done_edge) = encode(&mut enc, 0b101);
        assert_eq!(done_edge, 2);
    }

    #[test]
    fn test_codeword_and_timing_9_4() {
        let mut enc = encoder_9_4();
        let (codeword, done_edge) = encode(&mut enc, 0b0101);
        assert_eq!(codeword, 0b010101111);
        assert_eq!(done_edge, 3);
    }

    #[test]
    fn test_latency_independent_of_message() {
        let mut enc = encoder_9_4();
        for message in 0..16u64 {
            let (_, done_edge) = encode(&mut enc, message);
            assert_eq!(done_edge, 3, "message {:04b}", message);
        }
    }

    #[test]
    fn test_all_messages_match_reference() {
        let mut enc = encoder_6_3();
        for message in 0..8u64 {
            let (codeword, _) = encode(&mut enc, message);
            assert_eq!(
                codeword,
                enc.matrix().encode_reference(message),
                "message {:03b}",
                message
            );
        }
        let mut enc = encoder_9_4();
        for message in 0..16u64 {
            let (codeword, _) = encode(&mut enc, message);
            assert_eq!(codeword, enc.matrix().encode_reference(message));
        }
    }

    #[test]
    fn test_step_before_start_is_noop() {
        let mut enc = encoder_6_3();
        for _ in 0..10 {
            enc.step();
            assert_eq!(enc.state(), EncoderState::Idle);
            assert_eq!(enc.counter(), 0);
            assert_eq!(enc.read_output(), (0, false));
        }
    }

    #[test]
    fn test_start_edge_clears_outputs() {
        let mut enc = encoder_6_3();
        let _ = encode(&mut enc, 0b111);
        assert!(enc.done());

        // New start: the start edge itself must drop done and output
        enc.assert_start(0b001).unwrap();
        enc.step();
        assert_eq!(enc.read_output(), (0, false));
        assert_eq!(enc.state(), EncoderState::Accumulating);
        assert_eq!(enc.counter(), 0);
    }

    #[test]
    fn test_start_interrupts_inflight_encode() {
        let mut enc = encoder_9_4();
        enc.assert_start(0b1111).unwrap();
        enc.step();
        enc.step(); // one accumulating edge of the doomed encode
        assert_eq!(enc.counter(), 1);

        // Latest start wins; no partial result ever reaches the output
        enc.assert_start(0b0101).unwrap();
        enc.step();
        assert_eq!(enc.read_output(), (0, false));
        assert_eq!(enc.counter(), 0);

        for edge in 0..4 {
            assert!(!enc.done(), "done early on edge {}", edge);
            enc.step();
        }
        assert_eq!(enc.read_output(), (0b010101111, true));
    }

    #[test]
    fn test_output_holds_after_done() {
        let mut enc = encoder_6_3();
        let (codeword, _) = encode(&mut enc, 0b110);
        for _ in 0..10 {
            enc.step();
            assert_eq!(enc.read_output(), (codeword, true));
            assert_eq!(enc.state(), EncoderState::Presenting);
        }
    }

    #[test]
    fn test_counter_and_state_progression() {
        let mut enc = encoder_6_3();
        enc.assert_start(0b101).unwrap();
        enc.step();
        assert_eq!((enc.state(), enc.counter()), (EncoderState::Accumulating, 0));
        enc.step();
        assert_eq!((enc.state(), enc.counter()), (EncoderState::Accumulating, 1));
        enc.step();
        assert_eq!((enc.state(), enc.counter()), (EncoderState::Accumulating, 2));
        enc.step();
        assert_eq!((enc.state(), enc.counter()), (EncoderState::Presenting, 2));
        assert!(enc.done());
    }

    #[test]
    fn test_start_line_is_single_edge_pulse() {
        let mut enc = encoder_6_3();
        enc.assert_start(0b101).unwrap();
        assert!(enc.start_line());
        enc.step();
        assert!(!enc.start_line());
        assert!(enc.start_was_asserted());
        enc.step();
        assert!(!enc.start_was_asserted());
    }

    #[test]
    fn test_k1_boundary() {
        // Empty accumulation window: done on the first post-start edge,
        // the codeword is the single masked row
        let g = GeneratorMatrix::new(vec![0b101], 3).unwrap();
        let mut enc = LdpcEncoder::new(g);

        let (codeword, done_edge) = encode(&mut enc, 0b1);
        assert_eq!((codeword, done_edge), (0b101, 0));

        let (codeword, _) = encode(&mut enc, 0b0);
        assert_eq!(codeword, 0b000);
    }

    #[test]
    fn test_k2_boundary() {
        let g = GeneratorMatrix::new(vec![0b10, 0b01], 2).unwrap();
        let mut enc = LdpcEncoder::new(g);
        for message in 0..4u64 {
            let (codeword, done_edge) = encode(&mut enc, message);
            assert_eq!(codeword, message);
            assert_eq!(done_edge, 1);
        }
    }

    #[test]
    fn test_overwide_message_rejected() {
        let mut enc = encoder_6_3();
        assert_eq!(
            enc.assert_start(0b1010),
            Err(EncoderError::MessageTooWide {
                value: 0b1010,
                width: 3
            })
        );
        // The rejected write left the lines untouched
        assert!(!enc.start_line());
        assert_eq!(enc.data_input_line(), 0);
    }

    #[test]
    fn test_held_start_keeps_resetting() {
        let mut enc = encoder_6_3();
        enc.assert_start(0b101).unwrap();
        enc.step();
        // Harness re-drives the line: each sampled edge restarts
        enc.set_start(true);
        enc.step();
        assert_eq!(enc.counter(), 0);
        assert_eq!(enc.read_output(), (0, false));
        // Once released the encode completes normally from the re-latch
        for _ in 0..3 {
            enc.step();
        }
        assert_eq!(enc.read_output(), (0b101011, true));
    }
}
