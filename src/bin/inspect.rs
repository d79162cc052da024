//! Dataset inspection binary.
//!
//! Loads a train/test pair of sentence files, encodes and splits them, and
//! logs the resulting shapes together with a few decoded labels.

use anyhow::{Context, Result};
use charseq::{Config, DataSet, LoadOptions, SubSet, UnknownSymbolPolicy, Vocabulary};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "charseq-inspect",
    about = "Encode sentence files into one-hot train/validation/test subsets \
             and report their shapes"
)]
struct Args {
    /// Training sentences, one per line
    #[arg(long)]
    train: PathBuf,

    /// Test sentences, one per line
    #[arg(long)]
    test: PathBuf,

    /// JSON vocabulary ({"a": 0, ...}); defaults to the printable ASCII set
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// JSON config file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Encoded rows per sentence
    #[arg(long)]
    sentence_length: Option<usize>,

    /// Rows merged into one chunk
    #[arg(long)]
    chunk_length: Option<usize>,

    /// Fraction of training rows held out for validation
    #[arg(long)]
    validation_split: Option<f64>,

    /// Shuffle seed
    #[arg(long)]
    seed: Option<u64>,

    /// Extra copies of the training set
    #[arg(long, default_value_t = 0)]
    oversample: usize,

    /// Append truncated copies of every training sentence
    #[arg(long, default_value_t = false)]
    patterns: bool,

    /// Fail on symbols without a valid vocabulary index instead of zero-encoding them
    #[arg(long, default_value_t = false)]
    reject_unknown: bool,

    /// Decoded labels to print per subset
    #[arg(long, default_value_t = 3)]
    show: usize,
}

impl Args {
    fn build_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("Cannot load config '{}'", path.display()))?,
            None => Config::default(),
        };
        if let Some(v) = self.sentence_length {
            config.sentence_length = v;
        }
        if let Some(v) = self.chunk_length {
            config.chunk_length = v;
        }
        if let Some(v) = self.validation_split {
            config.validation_split = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if self.reject_unknown {
            config.unknown_symbols = UnknownSymbolPolicy::Reject;
        }
        Ok(config)
    }

    fn build_vocabulary(&self) -> Result<Vocabulary> {
        match &self.vocab {
            Some(path) => Vocabulary::from_json_file(path)
                .with_context(|| format!("Cannot load vocabulary '{}'", path.display())),
            None => Ok(Vocabulary::default_ascii()),
        }
    }
}

fn report(name: &str, subset: Option<&SubSet>, vocab: &Vocabulary, show: usize) {
    let Some(subset) = subset else {
        tracing::warn!("{name}: not loaded");
        return;
    };
    tracing::info!(
        "{name}: {} rows, data {:?}, labels {:?}",
        subset.len(),
        subset.data().shape(),
        subset.labels().shape()
    );
    for (record, label) in subset.records().iter().zip(subset.labels().rows()).take(show) {
        let decoded = vocab.decode_argmax(&label.to_owned());
        tracing::info!("  {:?} -> {:?}", record.sentence, decoded);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("charseq=info,charseq_inspect=info")
            }),
        )
        .init();

    let args = Args::parse();
    let config = args.build_config()?;
    let vocab = args.build_vocabulary()?;

    tracing::info!(
        "Vocabulary: {} symbols, sentence_length={}, chunk_length={}, validation_split={}, seed={}",
        vocab.size(),
        config.sentence_length,
        config.chunk_length,
        config.validation_split,
        config.seed
    );

    let mut dataset = DataSet::new(vocab, config).context("Invalid dataset configuration")?;
    let options = LoadOptions {
        oversample_factor: args.oversample,
        double_with_truncated_patterns: args.patterns,
    };
    dataset
        .load_data(&args.train, &args.test, options)
        .with_context(|| {
            format!(
                "Cannot load '{}' / '{}'",
                args.train.display(),
                args.test.display()
            )
        })?;

    let vocab = dataset.vocabulary();
    report("train", dataset.train(), vocab, args.show);
    report("validation", dataset.validation(), vocab, args.show);
    report("test", dataset.test(), vocab, args.show);
    Ok(())
}
