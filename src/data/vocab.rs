//! Symbol vocabulary for one-hot encoding.
//!
//! An ordered mapping from symbol to integer index. The number of entries is
//! the one-hot width; indices are kept as given, so a vocabulary may map a
//! symbol to a position outside that width (such symbols encode as zero).

use ndarray::Array1;
use std::collections::HashMap;
use std::path::Path;

use crate::core::{get_binary, DataError, DataResult};

/// Printable ASCII symbols in canonical order (97 entries).
const DEFAULT_CHARS: &[char] = &[
    // a-z (26)
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    // A-Z (26)
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    // 0-9 (10)
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    // whitespace (3)
    ' ', '\n', '\t',
    // punctuation (7)
    '.', ',', ';', ':', '!', '?', '\'',
    // brackets (8)
    '(', ')', '[', ']', '{', '}', '<', '>',
    // operators (13)
    '+', '-', '*', '/', '=', '&', '|', '^', '~', '%',
    '@', '#', '_',
    // quotes and escapes (4)
    '"', '`', '\\', '$',
];

/// Ordered symbol-to-index vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    /// Symbols in insertion order.
    symbols: Vec<char>,
    /// Index assigned to each symbol.
    symbol_to_idx: HashMap<char, i64>,
}

impl Vocabulary {
    /// Build from `(symbol, index)` pairs.
    ///
    /// A repeated symbol keeps its first position but takes the later index.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidVocabulary`] if no pairs are given.
    pub fn from_pairs<I>(pairs: I) -> DataResult<Self>
    where
        I: IntoIterator<Item = (char, i64)>,
    {
        let mut symbols = Vec::new();
        let mut symbol_to_idx = HashMap::new();
        for (symbol, idx) in pairs {
            if symbol_to_idx.insert(symbol, idx).is_none() {
                symbols.push(symbol);
            }
        }
        if symbols.is_empty() {
            return Err(DataError::InvalidVocabulary(
                "vocabulary has no symbols".to_string(),
            ));
        }
        Ok(Self {
            symbols,
            symbol_to_idx,
        })
    }

    /// Build from an ordered symbol list; each symbol's index is its position.
    ///
    /// Repeated symbols after the first occurrence are ignored. Unlike
    /// [`Vocabulary::from_pairs`], an empty list is accepted and yields an
    /// empty vocabulary; [`crate::DataSet::new`] rejects it.
    #[must_use]
    pub fn from_chars(chars: &[char]) -> Self {
        let mut symbols = Vec::with_capacity(chars.len());
        let mut symbol_to_idx = HashMap::with_capacity(chars.len());
        for &c in chars {
            if !symbol_to_idx.contains_key(&c) {
                symbol_to_idx.insert(c, symbols.len() as i64);
                symbols.push(c);
            }
        }
        Self {
            symbols,
            symbol_to_idx,
        }
    }

    /// The default 97-symbol printable vocabulary.
    #[must_use]
    pub fn default_ascii() -> Self {
        Self::from_chars(DEFAULT_CHARS)
    }

    /// Parse a JSON object such as `{"a": 0, "b": 1}`. Key order is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, is not an object of integers,
    /// has a key that is not exactly one symbol, or is empty.
    pub fn from_json_str(json: &str) -> DataResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(map) = value else {
            return Err(DataError::InvalidVocabulary(
                "expected a JSON object of symbol to index".to_string(),
            ));
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (key, idx) in map {
            let mut chars = key.chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                return Err(DataError::InvalidVocabulary(format!(
                    "key {key:?} is not a single symbol"
                )));
            };
            let idx = idx.as_i64().ok_or_else(|| {
                DataError::InvalidVocabulary(format!("index for {key:?} is not an integer"))
            })?;
            pairs.push((symbol, idx));
        }
        Self::from_pairs(pairs)
    }

    /// Load a JSON vocabulary file. See [`Vocabulary::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> DataResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Number of symbols, which is also the one-hot width.
    #[must_use]
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Symbols in vocabulary order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Index assigned to a symbol, or `None` if it is not in the vocabulary.
    #[must_use]
    pub fn index_of(&self, c: char) -> Option<i64> {
        self.symbol_to_idx.get(&c).copied()
    }

    /// First symbol (in vocabulary order) assigned to `idx`.
    #[must_use]
    pub fn symbol_at(&self, idx: i64) -> Option<char> {
        self.symbols
            .iter()
            .copied()
            .find(|c| self.symbol_to_idx.get(c) == Some(&idx))
    }

    /// One-hot encode a single symbol. Unknown or out-of-range symbols give zeros.
    #[must_use]
    pub fn one_hot(&self, c: char) -> Array1<f32> {
        get_binary(self.index_of(c).unwrap_or(-1), self.size())
    }

    /// Decode a one-hot (or soft) vector back to a symbol using argmax.
    ///
    /// An all-zero vector decodes to `None`.
    #[must_use]
    pub fn decode_argmax(&self, v: &Array1<f32>) -> Option<char> {
        let (idx, &max) = v
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;
        if max <= 0.0 {
            return None;
        }
        self.symbol_at(idx as i64)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::default_ascii()
    }
}
