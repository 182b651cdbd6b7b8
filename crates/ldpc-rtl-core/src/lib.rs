//! # LDPC Encoder RTL Core
//!
//! Cycle-accurate register-transfer model of a clocked LDPC block encoder:
//! a k-bit message is multiplied by a k×n generator matrix over GF(2) one
//! clock edge at a time, under a start/done handshake with a fixed `k-1`
//! edge accumulation window.
//!
//! The crate models the circuit, not the arithmetic: the point is what
//! every observable register reads on every edge, not just the final
//! codeword. The caller owns the clock and drives it through
//! [`LdpcEncoder::step`]; each call performs one synchronous edge with
//! simultaneous-update semantics.
//!
//! ## Components
//!
//! - [`GeneratorMatrix`] — immutable k×n bit matrix store, plus the
//!   combinational reference product used as a golden model by tests.
//! - [`LdpcEncoder`] — the controller FSM, accumulator bank and port/step
//!   interface.
//!
//! Clock driving, waveform tracing and design-verification checks live in
//! the companion `ldpc-rtl-sim` crate.
//!
//! ## Example
//!
//! ```rust
//! use ldpc_rtl_core::{GeneratorMatrix, LdpcEncoder};
//!
//! let mut enc = LdpcEncoder::new(GeneratorMatrix::example_6_3().unwrap());
//!
//! enc.assert_start(0b011).unwrap();
//! enc.step(); // latch edge
//! while !enc.done() {
//!     enc.step();
//! }
//! assert_eq!(enc.output(), 0b011001);
//! ```

pub mod encoder;
pub mod error;
pub mod generator_matrix;

pub use encoder::{EncoderState, LdpcEncoder};
pub use error::{EncoderError, EncoderResult};
pub use generator_matrix::GeneratorMatrix;
