//! Design verification over recorded traces
//!
//! Coverage queries ("has signal combination X ever been observed") and
//! assertions over signal history ("whenever condition Y held one edge
//! ago, property Z must hold now"), evaluated against a
//! [`WaveformTrace`](crate::trace::WaveformTrace). These are the software
//! rendition of the cover/assert statements the hardware design was
//! formally checked with.
//!
//! ## Example
//!
//! ```rust
//! use ldpc_rtl_core::{GeneratorMatrix, LdpcEncoder};
//! use ldpc_rtl_sim::testbench::Testbench;
//! use ldpc_rtl_sim::verification;
//!
//! let mut tb = Testbench::new(LdpcEncoder::new(
//!     GeneratorMatrix::example_6_3().unwrap(),
//! ));
//! tb.encode(0b101, 16).unwrap();
//! tb.clock(4);
//!
//! let trace = tb.trace();
//! assert!(verification::cover(trace, |s| s.done && s.data_output == 0b101011));
//! verification::check_start_clears_outputs(trace).unwrap();
//! ```

use ldpc_rtl_core::GeneratorMatrix;
use thiserror::Error;

use crate::trace::{TraceSample, WaveformTrace};

/// A failed assertion, naming the property and the edge it failed on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("property '{property}' violated at cycle {cycle}")]
pub struct Violation {
    /// Human-readable property name.
    pub property: String,
    /// Edge on which the property did not hold.
    pub cycle: u64,
}

impl Violation {
    fn new(property: &str, cycle: u64) -> Self {
        Self {
            property: property.to_string(),
            cycle,
        }
    }
}

/// Coverage query: true if any recorded edge satisfies the predicate.
pub fn cover<F>(trace: &WaveformTrace, predicate: F) -> bool
where
    F: Fn(&TraceSample) -> bool,
{
    trace.samples().iter().any(predicate)
}

/// Assertion over signal history: `predicate(previous, current)` must hold
/// for every consecutive edge pair.
pub fn assert_always<F>(trace: &WaveformTrace, property: &str, predicate: F) -> Result<(), Violation>
where
    F: Fn(&TraceSample, &TraceSample) -> bool,
{
    for pair in trace.samples().windows(2) {
        if !predicate(&pair[0], &pair[1]) {
            return Err(Violation::new(property, pair[1].cycle));
        }
    }
    Ok(())
}

/// Whenever `start` was asserted one edge ago and is now deasserted, `done`
/// and `data_output` must read zero.
///
/// This is the reset invariant of the handshake; it holds for every code
/// with `k >= 2` (with `k == 1` the window is empty and `done` rises on
/// the first post-start edge).
pub fn check_start_clears_outputs(trace: &WaveformTrace) -> Result<(), Violation> {
    assert_always(trace, "start clears done and output", |prev, cur| {
        !(prev.start && !cur.start) || (!cur.done && cur.data_output == 0)
    })
}

/// Once `done` is high it stays high with a stable codeword until the next
/// `start`.
pub fn check_output_holds_after_done(trace: &WaveformTrace) -> Result<(), Violation> {
    assert_always(trace, "output stable while done held", |prev, cur| {
        !(prev.done && !cur.start) || (cur.done && cur.data_output == prev.data_output)
    })
}

/// For every start edge in the trace, `done` must first assert exactly `k`
/// edges later (`k-1` edges after the deassertion edge) — never earlier,
/// never later.
pub fn check_done_latency(trace: &WaveformTrace, k: usize) -> Result<(), Violation> {
    let samples = trace.samples();
    for (i, s) in samples.iter().enumerate() {
        if !s.start {
            continue;
        }
        let mut j = i + 1;
        while j < samples.len() && !samples[j].start {
            let elapsed = j - i;
            if samples[j].done {
                if elapsed != k {
                    return Err(Violation::new("done asserts after exactly k edges", samples[j].cycle));
                }
                break;
            }
            if elapsed >= k {
                return Err(Violation::new("done asserts after exactly k edges", samples[j].cycle));
            }
            j += 1;
        }
    }
    Ok(())
}

/// Every codeword presented while `done` is high must equal the reference
/// GF(2) product of the message latched on the preceding start edge.
pub fn check_codeword_against_reference(
    trace: &WaveformTrace,
    matrix: &GeneratorMatrix,
) -> Result<(), Violation> {
    let samples = trace.samples();
    let mut latched: Option<u64> = None;
    for s in samples {
        if s.start {
            latched = Some(s.data_input);
        } else if s.done {
            let message = match latched {
                Some(m) => m,
                None => return Err(Violation::new("done without a preceding start", s.cycle)),
            };
            if s.data_output != matrix.encode_reference(message) {
                return Err(Violation::new("codeword matches reference product", s.cycle));
            }
        }
    }
    Ok(())
}
