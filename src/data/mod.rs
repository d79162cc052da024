//! Dataset loading, vocabulary management and splitting.
//!
//! ## Submodules
//!
//! - [`vocab`] — Symbol vocabulary and one-hot encoding
//! - [`reader`] — Sentence file reading and truncated-pattern augmentation
//! - [`split`] — Seeded oversampling and ratio splits
//! - [`subset`] — Encoded examples stacked into arrays
//! - [`dataset`] — The train/validation/test orchestrator

pub mod dataset;
pub mod reader;
pub mod split;
pub mod subset;
pub mod vocab;

pub use dataset::{DataSet, LoadOptions};
pub use reader::{encode_sentences, read_sentences, with_truncated_patterns};
pub use split::{oversample, shuffle_split};
pub use subset::{Example, SubSet};
pub use vocab::Vocabulary;
