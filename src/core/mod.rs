//! Core encoding primitives.
//!
//! This module provides the pieces every other module builds on:
//! - [`DataError`], the crate-wide error type
//! - [`get_binary`], the bounds-checked one-hot primitive
//! - [`SentenceEncoder`], which turns one sentence into a chunked context
//!   matrix and a label vector
//!
//! ## Encoding
//!
//! For a sentence `s` of `n` symbols, vocabulary width `V`, length `L` and
//! chunk length `k`:
//! ```text
//! rows[i]   = one_hot(s[i])    for i < n - 1
//! rows[i]   = 0                for n - 1 <= i < L
//! context   = reshape(rows, (L / k, k * V))
//! label     = one_hot(s[n - 1])
//! ```

use ndarray::{Array1, Array2};
use std::path::PathBuf;
use thiserror::Error;

use crate::data::vocab::Vocabulary;
use crate::{Config, UnknownSymbolPolicy};

/// Error type for dataset operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Configuration rejected by [`Config::validate`]
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Vocabulary could not be built
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
    /// Sentence has more symbols than the configured length
    #[error("sentence has {len} symbols, more than sentence_length {max}")]
    SentenceTooLong { len: usize, max: usize },
    /// Sentence has no symbols, so there is no label
    #[error("sentence is empty")]
    EmptySentence,
    /// Line has fields but its sentence field is empty
    #[error("line {line} has an empty sentence field")]
    EmptyField { line: u64 },
    /// Symbol without a valid one-hot position under [`UnknownSymbolPolicy::Reject`]
    #[error("symbol {symbol:?} at position {position} has no valid vocabulary index")]
    UnknownSymbol { symbol: char, position: usize },
    /// Array reshape failed
    #[error("shape mismatch: {0}")]
    ShapeMismatch(#[from] ndarray::ShapeError),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DataResult<T> = Result<T, DataError>;

/// One-hot vector of size `length` with a 1 at `index`.
///
/// Indices outside `[0, length)` produce an all-zero vector.
#[must_use]
pub fn get_binary(index: i64, length: usize) -> Array1<f32> {
    let mut binary = Array1::zeros(length);
    if let Ok(i) = usize::try_from(index) {
        if i < length {
            binary[i] = 1.0;
        }
    }
    binary
}

/// Encodes sentences against a vocabulary with a fixed length and chunking.
///
/// Borrows the vocabulary; cheap to construct per call.
#[derive(Debug, Clone, Copy)]
pub struct SentenceEncoder<'a> {
    vocab: &'a Vocabulary,
    sentence_length: usize,
    chunk_length: usize,
    unknown_symbols: UnknownSymbolPolicy,
}

impl<'a> SentenceEncoder<'a> {
    /// Create an encoder. `config` is expected to have passed [`Config::validate`].
    #[must_use]
    pub fn new(vocab: &'a Vocabulary, config: &Config) -> Self {
        Self {
            vocab,
            sentence_length: config.sentence_length,
            chunk_length: config.chunk_length,
            unknown_symbols: config.unknown_symbols,
        }
    }

    /// One-hot width.
    #[must_use]
    pub fn output_labels(&self) -> usize {
        self.vocab.size()
    }

    /// Shape of the chunked context matrix: `(chunks, chunk_length * vocab_size)`.
    #[must_use]
    pub fn context_shape(&self) -> (usize, usize) {
        (
            self.sentence_length / self.chunk_length,
            self.chunk_length * self.output_labels(),
        )
    }

    /// Encode one sentence into `(context, label)`.
    ///
    /// # Errors
    ///
    /// - [`DataError::EmptySentence`] if there is no symbol to use as label
    /// - [`DataError::SentenceTooLong`] if the sentence exceeds `sentence_length`
    /// - [`DataError::UnknownSymbol`] under [`UnknownSymbolPolicy::Reject`]
    /// - [`DataError::ShapeMismatch`] if `chunk_length` does not divide `sentence_length`
    pub fn encode(&self, sentence: &str) -> DataResult<(Array2<f32>, Array1<f32>)> {
        let symbols: Vec<char> = sentence.chars().collect();
        let Some((&last, context)) = symbols.split_last() else {
            return Err(DataError::EmptySentence);
        };
        if symbols.len() > self.sentence_length {
            return Err(DataError::SentenceTooLong {
                len: symbols.len(),
                max: self.sentence_length,
            });
        }

        let width = self.output_labels();
        // Rows past the context stay zero: that is the padding.
        let mut rows = Array2::zeros((self.sentence_length, width));
        for (position, &symbol) in context.iter().enumerate() {
            let index = self.checked_index(symbol, position)?;
            rows.row_mut(position).assign(&get_binary(index, width));
        }

        let data = rows.into_shape(self.context_shape())?;
        let label = get_binary(self.checked_index(last, context.len())?, width);
        Ok((data, label))
    }

    /// Index to one-hot encode `symbol` at. Out-of-range values encode as zeros.
    fn checked_index(&self, symbol: char, position: usize) -> DataResult<i64> {
        match self.vocab.index_of(symbol) {
            Some(idx) if usize::try_from(idx).is_ok_and(|i| i < self.vocab.size()) => Ok(idx),
            other => match self.unknown_symbols {
                UnknownSymbolPolicy::ZeroVector => Ok(other.unwrap_or(-1)),
                UnknownSymbolPolicy::Reject => Err(DataError::UnknownSymbol { symbol, position }),
            },
        }
    }
}
