//! Generator Matrix Store
//!
//! An immutable k×n bit matrix over GF(2) defining the linear encoding map
//! from k-bit messages to n-bit codewords. Rows are stored as n-bit words
//! with bit `n-1` as the leftmost column, so the binary-literal notation
//! `0b100101` reads the same as the matrix row `1 0 0 1 0 1`.
//!
//! Row 0 pairs with the most significant message bit; this ordering is part
//! of the output format and must not be changed.
//!
//! ## Example
//!
//! ```rust
//! use ldpc_rtl_core::GeneratorMatrix;
//!
//! let g = GeneratorMatrix::example_6_3().unwrap();
//! assert_eq!(g.message_len(), 3);
//! assert_eq!(g.codeword_width(), 6);
//!
//! // Combinational GF(2) product, used as the golden model by tests
//! assert_eq!(g.encode_reference(0b101), 0b101011);
//! ```

use crate::error::{EncoderError, EncoderResult};

/// Immutable k×n generator matrix over GF(2).
///
/// `k` (the number of rows) is the message length, `n` the codeword width.
/// Both are fixed at construction; rows wider than `n` bits and empty
/// matrices are rejected rather than truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorMatrix {
    rows: Box<[u64]>,
    codeword_width: usize,
}

impl GeneratorMatrix {
    /// Create a matrix from row words and the codeword width.
    pub fn new(rows: Vec<u64>, codeword_width: usize) -> EncoderResult<Self> {
        if rows.is_empty() {
            return Err(EncoderError::EmptyMatrix);
        }
        if codeword_width == 0 || codeword_width > 64 {
            return Err(EncoderError::CodewordWidthOutOfRange(codeword_width));
        }
        if rows.len() > 64 {
            return Err(EncoderError::TooManyRows(rows.len()));
        }
        for (r, &value) in rows.iter().enumerate() {
            if codeword_width < 64 && value >> codeword_width != 0 {
                return Err(EncoderError::RowTooWide {
                    row: r,
                    value,
                    width: codeword_width,
                });
            }
        }
        Ok(Self {
            rows: rows.into_boxed_slice(),
            codeword_width,
        })
    }

    /// The (6,3) code from the Wikipedia LDPC example encoder.
    pub fn example_6_3() -> EncoderResult<Self> {
        Self::new(vec![0b100101, 0b010111, 0b001110], 6)
    }

    /// A (9,4) code used by the larger simulation scenarios.
    pub fn example_9_4() -> EncoderResult<Self> {
        Self::new(
            vec![0b100000010, 0b010011010, 0b001000001, 0b000110101],
            9,
        )
    }

    /// Message length k (number of rows).
    pub fn message_len(&self) -> usize {
        self.rows.len()
    }

    /// Codeword width n.
    pub fn codeword_width(&self) -> usize {
        self.codeword_width
    }

    /// Row `r` as an n-bit word.
    pub fn row(&self, r: usize) -> u64 {
        self.rows[r]
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    /// The message bit paired with row `r`: bit `k-1-r`, so row 0 selects
    /// the most significant message bit.
    pub fn data_bit(&self, message: u64, r: usize) -> bool {
        let k = self.rows.len();
        (message >> (k - 1 - r)) & 1 != 0
    }

    /// Reject messages with bits set above the k-bit input port.
    pub fn check_message(&self, message: u64) -> EncoderResult<()> {
        let k = self.rows.len();
        if k < 64 && message >> k != 0 {
            return Err(EncoderError::MessageTooWide {
                value: message,
                width: k,
            });
        }
        Ok(())
    }

    /// Combinational GF(2) message × matrix product: the XOR-reduction of
    /// the rows selected by the message bits.
    ///
    /// This is the golden model the cycle-accurate encoder must agree with
    /// once `done` asserts; the encoder itself never calls it.
    pub fn encode_reference(&self, message: u64) -> u64 {
        let mut codeword = 0u64;
        for r in 0..self.rows.len() {
            if self.data_bit(message, r) {
                codeword ^= self.rows[r];
            }
        }
        codeword
    }
}
