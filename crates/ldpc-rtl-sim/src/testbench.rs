//! Clock-driving testbench
//!
//! Owns the encoder under test, supplies the clock one edge at a time and
//! records every signal into a [`WaveformTrace`]. This is the software
//! equivalent of the synchronous testbench process the hardware design was
//! simulated with: pulse `start` with a message, clock until `done`,
//! optionally keep clocking to observe the hold behavior.
//!
//! ## Example
//!
//! ```rust
//! use ldpc_rtl_core::{GeneratorMatrix, LdpcEncoder};
//! use ldpc_rtl_sim::testbench::Testbench;
//!
//! let encoder = LdpcEncoder::new(GeneratorMatrix::example_6_3().unwrap());
//! let mut tb = Testbench::new(encoder);
//!
//! let report = tb.encode(0b101, 16).unwrap();
//! assert_eq!(report.codeword, 0b101011);
//! assert_eq!(report.latency, 2); // k-1 edges from start deassertion
//! ```

use ldpc_rtl_core::LdpcEncoder;
use serde::Serialize;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::trace::{TraceSample, WaveformTrace};

/// Outcome of one completed encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeReport {
    /// The finished codeword.
    pub codeword: u64,
    /// Edge on which `done` first read true.
    pub done_cycle: u64,
    /// Edges elapsed between `start` deassertion and `done`; always `k-1`.
    pub latency: u64,
}

/// Testbench: encoder under test plus clock and trace.
///
/// The encoder is an explicit owned object; nothing here is process-wide.
#[derive(Debug)]
pub struct Testbench {
    encoder: LdpcEncoder,
    trace: WaveformTrace,
    cycle: u64,
}

impl Testbench {
    /// Wrap an encoder with a fresh trace and the clock at zero.
    pub fn new(encoder: LdpcEncoder) -> Self {
        let trace = WaveformTrace::new(encoder.message_len(), encoder.codeword_width());
        Self {
            encoder,
            trace,
            cycle: 0,
        }
    }

    /// The encoder under test.
    pub fn encoder(&self) -> &LdpcEncoder {
        &self.encoder
    }

    /// Mutable access for harnesses that drive the lines per edge.
    pub fn encoder_mut(&mut self) -> &mut LdpcEncoder {
        &mut self.encoder
    }

    /// The recorded signal history.
    pub fn trace(&self) -> &WaveformTrace {
        &self.trace
    }

    /// Consume the bench, keeping the trace.
    pub fn into_trace(self) -> WaveformTrace {
        self.trace
    }

    /// Number of edges driven so far.
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    /// Drive one clock edge and record every signal.
    pub fn tick(&mut self) {
        let start = self.encoder.start_line();
        let data_input = self.encoder.data_input_line();
        self.encoder.step();
        self.trace.push(TraceSample {
            cycle: self.cycle,
            start,
            data_input,
            data_output: self.encoder.output(),
            done: self.encoder.done(),
            state: self.encoder.state(),
            counter: self.encoder.counter(),
        });
        self.cycle += 1;
    }

    /// Drive `edges` clock edges.
    pub fn clock(&mut self, edges: usize) {
        for _ in 0..edges {
            self.tick();
        }
    }

    /// Pulse `start` with a message and clock the latch edge.
    pub fn pulse_start(&mut self, message: u64) -> SimResult<()> {
        self.encoder.assert_start(message)?;
        self.tick();
        Ok(())
    }

    /// Clock until `done` asserts, up to `max_edges` edges.
    pub fn run_until_done(&mut self, max_edges: u64) -> SimResult<EncodeReport> {
        for edges in 1..=max_edges {
            self.tick();
            if self.encoder.done() {
                return Ok(EncodeReport {
                    codeword: self.encoder.output(),
                    done_cycle: self.cycle - 1,
                    latency: edges - 1,
                });
            }
        }
        Err(SimError::Timeout { cycles: max_edges })
    }

    /// Pulse `start` and clock to completion; the common path.
    pub fn encode(&mut self, message: u64, max_edges: u64) -> SimResult<EncodeReport> {
        self.pulse_start(message)?;
        let report = self.run_until_done(max_edges)?;
        debug!(
            message_bits = %format!("{:0width$b}", message, width = self.encoder.message_len()),
            codeword_bits = %format!(
                "{:0width$b}",
                report.codeword,
                width = self.encoder.codeword_width()
            ),
            latency = report.latency,
            "encode complete"
        );
        Ok(report)
    }
}
