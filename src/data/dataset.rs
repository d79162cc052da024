//! Dataset orchestration: read, encode, oversample, split.
//!
//! [`DataSet::load_data`] turns a training file and a test file into three
//! [`SubSet`]s. All shuffling draws from an RNG seeded with
//! [`Config::seed`], recreated on every call.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use super::reader::{encode_sentences, read_sentences, with_truncated_patterns};
use super::split::{oversample, shuffle_split};
use super::subset::{Example, SubSet};
use super::vocab::Vocabulary;
use crate::core::{get_binary, DataError, DataResult, SentenceEncoder};
use crate::Config;

/// Per-call options for [`DataSet::load_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Extra copies of the training rows to add before splitting.
    pub oversample_factor: usize,
    /// Append truncated copies of every training sentence.
    pub double_with_truncated_patterns: bool,
}

/// Vocabulary, configuration and the subsets produced by the last load.
#[derive(Debug, Clone)]
pub struct DataSet {
    vocabulary: Vocabulary,
    config: Config,
    train: Option<SubSet>,
    validation: Option<SubSet>,
    test: Option<SubSet>,
}

impl DataSet {
    /// Create a dataset with nothing loaded.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidConfig`] if `config` fails validation or
    /// the vocabulary is empty.
    pub fn new(vocabulary: Vocabulary, config: Config) -> DataResult<Self> {
        config.validate()?;
        if vocabulary.size() == 0 {
            return Err(DataError::InvalidConfig("vocabulary is empty".to_string()));
        }
        Ok(Self {
            vocabulary,
            config,
            train: None,
            validation: None,
            test: None,
        })
    }

    /// Read and encode both sources and populate train, validation and test.
    ///
    /// The training rows are optionally augmented with truncated patterns,
    /// oversampled, then shuffled and split by `1 - validation_split`. The
    /// test rows are kept in file order.
    ///
    /// # Errors
    ///
    /// Returns the first read or encoding error. On error the previously
    /// loaded subsets are left untouched.
    pub fn load_data(
        &mut self,
        train_source: &Path,
        test_source: &Path,
        options: LoadOptions,
    ) -> DataResult<&Self> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut all_train =
            self.read_from_csv(train_source, options.double_with_truncated_patterns)?;
        if options.oversample_factor > 0 {
            all_train = oversample(all_train, options.oversample_factor, &mut rng);
            tracing::debug!(
                "Oversampled training rows x{} -> {}",
                options.oversample_factor + 1,
                all_train.len()
            );
        }
        let all_test = self.read_from_csv(test_source, false)?;

        // A zero split leaves validation empty.
        let train_fraction = 1.0 - self.config.validation_split;
        let (train, validation) = shuffle_split(all_train, train_fraction, &mut rng);

        let shape = self.context_shape();
        let width = self.output_labels();
        let train = SubSet::new(train, shape, width)?;
        let validation = SubSet::new(validation, shape, width)?;
        let test = SubSet::new(all_test, shape, width)?;

        tracing::info!(
            "Loaded dataset: {} train, {} validation, {} test (context {:?}, {} labels)",
            train.len(),
            validation.len(),
            test.len(),
            shape,
            width
        );

        self.train = Some(train);
        self.validation = Some(validation);
        self.test = Some(test);
        Ok(&*self)
    }

    /// Read a sentence file and encode every row.
    ///
    /// With `patterns` set, the rows are followed by copies truncated to
    /// [`Config::truncated_pattern_length`] symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a sentence cannot be encoded.
    pub fn read_from_csv(&self, path: &Path, patterns: bool) -> DataResult<Vec<Example>> {
        let mut sentences = read_sentences(path, self.config.delimiter)?;
        if patterns {
            sentences = with_truncated_patterns(sentences, self.config.truncated_pattern_length);
        }
        encode_sentences(sentences, &self.encoder())
    }

    /// Encode one sentence into `(context, label)`. See [`SentenceEncoder::encode`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sentence is empty, too long, or holds a
    /// rejected symbol.
    pub fn split_sentence(&self, sentence: &str) -> DataResult<(Array2<f32>, Array1<f32>)> {
        self.encoder().encode(sentence)
    }

    /// See [`crate::core::get_binary`].
    #[must_use]
    pub fn get_binary(index: i64, length: usize) -> Array1<f32> {
        get_binary(index, length)
    }

    fn encoder(&self) -> SentenceEncoder<'_> {
        SentenceEncoder::new(&self.vocabulary, &self.config)
    }

    #[must_use]
    pub fn train(&self) -> Option<&SubSet> {
        self.train.as_ref()
    }

    #[must_use]
    pub fn validation(&self) -> Option<&SubSet> {
        self.validation.as_ref()
    }

    #[must_use]
    pub fn test(&self) -> Option<&SubSet> {
        self.test.as_ref()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One-hot width, i.e. the vocabulary size.
    #[must_use]
    pub fn output_labels(&self) -> usize {
        self.vocabulary.size()
    }

    /// Shape of each encoded context: `(chunks, chunk_length * vocab_size)`.
    #[must_use]
    pub fn context_shape(&self) -> (usize, usize) {
        self.encoder().context_shape()
    }
}
