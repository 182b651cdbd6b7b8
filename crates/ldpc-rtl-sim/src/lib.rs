//! # LDPC Encoder Testbench & Verification
//!
//! Simulation harness for the `ldpc-rtl-core` encoder model: a
//! clock-driving [`Testbench`](testbench::Testbench) that records every
//! signal per edge, a [`WaveformTrace`](trace::WaveformTrace) with VCD and
//! JSON export, trace-level design [`verification`] (coverage queries and
//! assertions over signal history), and a declarative
//! [`TestbenchConfig`](config::TestbenchConfig) for scripted runs.
//!
//! ## Example
//!
//! ```rust
//! use ldpc_rtl_core::{GeneratorMatrix, LdpcEncoder};
//! use ldpc_rtl_sim::{testbench::Testbench, verification};
//!
//! let mut tb = Testbench::new(LdpcEncoder::new(
//!     GeneratorMatrix::example_9_4().unwrap(),
//! ));
//!
//! let report = tb.encode(0b0101, 32).unwrap();
//! assert_eq!(report.codeword, 0b010101111);
//! assert_eq!(report.latency, 3); // k-1 for k = 4
//!
//! verification::check_done_latency(tb.trace(), 4).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod testbench;
pub mod trace;
pub mod verification;

pub use config::TestbenchConfig;
pub use error::{SimError, SimResult};
pub use logging::{init_logging, LogLevel};
pub use testbench::{EncodeReport, Testbench};
pub use trace::{TraceSample, WaveformTrace};
pub use verification::Violation;
