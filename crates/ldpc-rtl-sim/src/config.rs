//! Testbench configuration
//!
//! Declarative description of a simulation run: the generator matrix (rows
//! written as binary strings, the same notation as the hardware source),
//! the messages to encode and how long to idle after each. Loadable from
//! JSON for scripted runs.

use std::fs;
use std::path::{Path, PathBuf};

use ldpc_rtl_core::GeneratorMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Configuration for one testbench run. Omitted JSON fields fall back to
/// the (6,3) defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestbenchConfig {
    /// Generator matrix rows as binary strings, e.g. `"100101"`.
    pub rows: Vec<String>,
    /// Codeword width n.
    pub codeword_width: usize,
    /// Messages to encode, as binary strings.
    pub messages: Vec<String>,
    /// Idle edges to clock after each completed encode.
    pub hold_cycles: usize,
    /// Optional VCD output path.
    pub vcd_path: Option<PathBuf>,
}

impl Default for TestbenchConfig {
    fn default() -> Self {
        Self {
            rows: vec!["100101".into(), "010111".into(), "001110".into()],
            codeword_width: 6,
            messages: vec!["101".into(), "011".into(), "000".into(), "110".into()],
            hold_cycles: 4,
            vcd_path: None,
        }
    }
}

impl TestbenchConfig {
    /// The (9,4) counterpart of the default (6,3) run.
    pub fn example_9_4() -> Self {
        Self {
            rows: vec![
                "100000010".into(),
                "010011010".into(),
                "001000001".into(),
                "000110101".into(),
            ],
            codeword_width: 9,
            messages: vec!["0101".into(), "1100".into()],
            hold_cycles: 4,
            vcd_path: None,
        }
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Parse and validate the generator matrix.
    pub fn build_matrix(&self) -> SimResult<GeneratorMatrix> {
        let rows = self
            .rows
            .iter()
            .map(|r| parse_binary(r))
            .collect::<SimResult<Vec<u64>>>()?;
        Ok(GeneratorMatrix::new(rows, self.codeword_width)?)
    }

    /// Parse the message list.
    pub fn parsed_messages(&self) -> SimResult<Vec<u64>> {
        self.messages.iter().map(|m| parse_binary(m)).collect()
    }
}

fn parse_binary(s: &str) -> SimResult<u64> {
    u64::from_str_radix(s, 2)
        .map_err(|_| SimError::Config(format!("'{}' is not a binary word", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builds_example_6_3() {
        let config = TestbenchConfig::default();
        let matrix = config.build_matrix().unwrap();
        assert_eq!(matrix, GeneratorMatrix::example_6_3().unwrap());
        assert_eq!(config.parsed_messages().unwrap(), vec![0b101, 0b011, 0b000, 0b110]);
    }

    #[test]
    fn test_example_9_4_builds() {
        let matrix = TestbenchConfig::example_9_4().build_matrix().unwrap();
        assert_eq!(matrix, GeneratorMatrix::example_9_4().unwrap());
    }

    #[test]
    fn test_bad_binary_rejected() {
        let config = TestbenchConfig {
            rows: vec!["10012".into()],
            ..Default::default()
        };
        assert!(matches!(config.build_matrix(), Err(SimError::Config(_))));
    }

    #[test]
    fn test_overwide_row_propagates_encoder_error() {
        let config = TestbenchConfig {
            rows: vec!["1111111".into()],
            codeword_width: 6,
            ..Default::default()
        };
        assert!(matches!(config.build_matrix(), Err(SimError::Encoder(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = TestbenchConfig::example_9_4();
        let json = serde_json::to_string(&config).unwrap();
        let back: TestbenchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows, config.rows);
        assert_eq!(back.codeword_width, 9);
    }
}
