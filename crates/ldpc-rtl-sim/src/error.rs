//! Simulation error types

use ldpc_rtl_core::EncoderError;
use thiserror::Error;

use crate::verification::Violation;

/// Result type for testbench operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while driving or checking a simulation
#[derive(Error, Debug)]
pub enum SimError {
    /// Construction or port error from the encoder under test
    #[error("encoder port error: {0}")]
    Encoder(#[from] EncoderError),

    /// `done` never asserted within the clocked window
    #[error("done not asserted within {cycles} edges")]
    Timeout { cycles: u64 },

    /// Malformed testbench configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// A design-verification property failed
    #[error(transparent)]
    Verification(#[from] Violation),

    /// Waveform or config file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
