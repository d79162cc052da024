//! # charseq
//!
//! Sequence dataset preparation for next-symbol prediction models.
//!
//! ## Overview
//!
//! Raw sentences are read one per line, every symbol but the last is one-hot
//! encoded against a fixed [`Vocabulary`], the context is padded with zero rows
//! to a fixed length and regrouped into chunks, and the final symbol becomes
//! the one-hot label. The encoded rows are split into train, validation and
//! test [`SubSet`]s.
//!
//! ## Structure
//!
//! - [`core`] — Error type, one-hot primitive, sentence encoder
//! - [`data`] — Vocabulary, file reading, splitting, subsets and the dataset

pub mod core;
pub mod data;

pub use crate::core::{get_binary, DataError, DataResult, SentenceEncoder};
pub use data::{DataSet, Example, LoadOptions, SubSet, Vocabulary};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a symbol that has no valid one-hot position.
///
/// Covers both symbols missing from the vocabulary and symbols whose
/// vocabulary index falls outside `[0, vocab_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownSymbolPolicy {
    /// Encode as an all-zero vector.
    #[default]
    ZeroVector,
    /// Fail the sentence with [`DataError::UnknownSymbol`].
    Reject,
}

/// Encoding and splitting configuration.
///
/// Validated once by [`DataSet::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of encoded rows per sentence before chunking.
    pub sentence_length: usize,
    /// Fraction of training rows held out for validation, in `[0, 1)`.
    pub validation_split: f64,
    /// Consecutive rows merged into one wider row. Must divide `sentence_length`.
    pub chunk_length: usize,
    /// Seed for every shuffle performed by `load_data`.
    pub seed: u64,
    /// Symbols kept by the truncated-pattern augmentation.
    pub truncated_pattern_length: usize,
    /// Handling of symbols with no valid one-hot position.
    pub unknown_symbols: UnknownSymbolPolicy,
    /// Field delimiter of the sentence files.
    pub delimiter: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentence_length: 8,
            validation_split: 0.2,
            chunk_length: 1,
            seed: 42,
            truncated_pattern_length: 5,
            unknown_symbols: UnknownSymbolPolicy::ZeroVector,
            delimiter: b',',
        }
    }
}

impl Config {
    /// Check every constraint the encoder and splitter rely on.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidConfig`] naming the first violated constraint.
    pub fn validate(&self) -> DataResult<()> {
        if self.sentence_length == 0 {
            return Err(DataError::InvalidConfig(
                "sentence_length must be positive".to_string(),
            ));
        }
        if self.chunk_length == 0 {
            return Err(DataError::InvalidConfig(
                "chunk_length must be positive".to_string(),
            ));
        }
        if self.sentence_length % self.chunk_length != 0 {
            return Err(DataError::InvalidConfig(format!(
                "sentence_length {} is not a multiple of chunk_length {}",
                self.sentence_length, self.chunk_length
            )));
        }
        if !(0.0..1.0).contains(&self.validation_split) {
            return Err(DataError::InvalidConfig(format!(
                "validation_split {} is outside [0, 1)",
                self.validation_split
            )));
        }
        if self.truncated_pattern_length == 0 {
            return Err(DataError::InvalidConfig(
                "truncated_pattern_length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of chunked rows per encoded sentence.
    #[must_use]
    pub fn chunks(&self) -> usize {
        self.sentence_length / self.chunk_length.max(1)
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> DataResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
