//! Waveform trace recording
//!
//! Per-edge history of every externally visible encoder signal, recorded by
//! the testbench as it drives the clock. The trace is the input to the
//! design-verification checks and can be exported as a VCD file for
//! waveform inspection or as JSON.
//!
//! ## Example
//!
//! ```rust
//! use ldpc_rtl_core::{GeneratorMatrix, LdpcEncoder};
//! use ldpc_rtl_sim::testbench::Testbench;
//!
//! let mut tb = Testbench::new(LdpcEncoder::new(
//!     GeneratorMatrix::example_6_3().unwrap(),
//! ));
//! tb.encode(0b101, 16).unwrap();
//!
//! let trace = tb.trace();
//! assert_eq!(trace.first_done_cycle(), Some(3));
//!
//! let mut vcd = Vec::new();
//! trace.write_vcd(&mut vcd).unwrap();
//! assert!(String::from_utf8(vcd).unwrap().contains("$var"));
//! ```

use std::io::{self, Write};

use ldpc_rtl_core::EncoderState;
use serde::{Deserialize, Serialize};

/// One clock edge worth of signal values.
///
/// `start` and `data_input` are the line values sampled on this edge; the
/// remaining fields are the post-edge register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSample {
    /// Edge index, counted from the first edge the testbench drove.
    pub cycle: u64,
    /// `start` line as sampled on this edge.
    pub start: bool,
    /// `data_input` line as sampled on this edge.
    pub data_input: u64,
    /// `data_output` register after this edge.
    pub data_output: u64,
    /// `done` register after this edge.
    pub done: bool,
    /// Controller state after this edge.
    pub state: EncoderState,
    /// Accumulation counter after this edge.
    pub counter: usize,
}

/// Append-only per-edge signal history.
#[derive(Debug, Clone)]
pub struct WaveformTrace {
    message_len: usize,
    codeword_width: usize,
    samples: Vec<TraceSample>,
}

impl WaveformTrace {
    /// Create an empty trace for signals of the given port widths.
    pub fn new(message_len: usize, codeword_width: usize) -> Self {
        Self {
            message_len,
            codeword_width,
            samples: Vec::new(),
        }
    }

    /// Append one edge.
    pub fn push(&mut self, sample: TraceSample) {
        self.samples.push(sample);
    }

    /// All recorded edges, oldest first.
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    /// Number of recorded edges.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Width of the `data_input` port.
    pub fn message_len(&self) -> usize {
        self.message_len
    }

    /// Width of the `data_output` port.
    pub fn codeword_width(&self) -> usize {
        self.codeword_width
    }

    /// The sample recorded for a given edge, if any.
    pub fn sample_at(&self, cycle: u64) -> Option<&TraceSample> {
        self.samples.iter().find(|s| s.cycle == cycle)
    }

    /// First edge on which `done` read true.
    pub fn first_done_cycle(&self) -> Option<u64> {
        self.samples.iter().find(|s| s.done).map(|s| s.cycle)
    }

    /// Write the trace as a value-change dump.
    ///
    /// Ports are named as on the device: `start`, `data_input`,
    /// `data_output`, `done`, plus the `counter` register for debugging.
    /// Only changed signals are emitted per edge.
    pub fn write_vcd<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "$timescale 1 ns $end")?;
        writeln!(w, "$scope module ldpc_encoder $end")?;
        writeln!(w, "$var wire 1 ! start $end")?;
        writeln!(w, "$var wire {} \" data_input $end", self.message_len)?;
        writeln!(w, "$var wire {} # data_output $end", self.codeword_width)?;
        writeln!(w, "$var wire 1 $ done $end")?;
        writeln!(w, "$var wire 32 % counter $end")?;
        writeln!(w, "$upscope $end")?;
        writeln!(w, "$enddefinitions $end")?;

        let mut prev: Option<&TraceSample> = None;
        for sample in &self.samples {
            writeln!(w, "#{}", sample.cycle)?;
            if prev.is_none() {
                writeln!(w, "$dumpvars")?;
            }
            let changed = |f: fn(&TraceSample) -> u64| {
                prev.map(|p| f(p) != f(sample)).unwrap_or(true)
            };
            if changed(|s| s.start as u64) {
                writeln!(w, "{}!", sample.start as u8)?;
            }
            if changed(|s| s.data_input) {
                writeln!(
                    w,
                    "b{:0width$b} \"",
                    sample.data_input,
                    width = self.message_len
                )?;
            }
            if changed(|s| s.data_output) {
                writeln!(
                    w,
                    "b{:0width$b} #",
                    sample.data_output,
                    width = self.codeword_width
                )?;
            }
            if changed(|s| s.done as u64) {
                writeln!(w, "{}$", sample.done as u8)?;
            }
            if changed(|s| s.counter as u64) {
                writeln!(w, "b{:b} %", sample.counter)?;
            }
            if prev.is_none() {
                writeln!(w, "$end")?;
            }
            prev = Some(sample);
        }
        Ok(())
    }
}
