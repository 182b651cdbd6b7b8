//! Encoder error types

use thiserror::Error;

/// Result type for encoder construction and port operations
pub type EncoderResult<T> = Result<T, EncoderError>;

/// Errors raised at the construction / port boundary.
///
/// Once an encoder is constructed every `step()` is total: all register
/// updates are defined for every reachable state, so no error can occur
/// mid-encode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncoderError {
    /// Generator matrix has no rows; no codeword could ever be produced
    #[error("generator matrix is empty")]
    EmptyMatrix,

    /// Codeword width outside the supported word size
    #[error("codeword width {0} not in 1..=64")]
    CodewordWidthOutOfRange(usize),

    /// More matrix rows than a 64-bit message word can address
    #[error("{0} matrix rows exceed the 64-bit message word")]
    TooManyRows(usize),

    /// A generator row has bits set above the codeword width
    #[error("row {row} value {value:#b} wider than the {width}-bit codeword")]
    RowTooWide {
        row: usize,
        value: u64,
        width: usize,
    },

    /// Message has bits set above the input port width
    #[error("message {value:#b} wider than the {width}-bit input port")]
    MessageTooWide { value: u64, width: usize },
}
