//! Sentence file reading and encoding.
//!
//! Sentence files are headerless, one sentence per line. They are read with
//! the `csv` crate so quoted fields and CRLF line endings behave like any
//! other table input.

use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

use super::subset::Example;
use crate::core::{DataError, DataResult, SentenceEncoder};

/// Read every sentence from a headerless delimited file.
///
/// Blank lines are skipped. A line with several fields contributes its last
/// field; the leading fields are treated as row labels and dropped.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be opened,
/// [`DataError::Csv`] if it cannot be parsed and [`DataError::EmptyField`]
/// if a non-blank line ends in an empty field (e.g. `abc,`).
pub fn read_sentences(path: &Path, delimiter: u8) -> DataResult<Vec<String>> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(file);

    let mut sentences = Vec::new();
    for record in reader.records() {
        let record = record?;
        // a lone empty field is a blank line
        if record.len() <= 1 && record.get(0).map_or(true, str::is_empty) {
            continue;
        }
        match record.iter().last() {
            Some(sentence) if !sentence.is_empty() => sentences.push(sentence.to_string()),
            _ => {
                let line = record.position().map_or(0, |p| p.line());
                tracing::warn!("{}: line {line} has an empty sentence field", path.display());
                return Err(DataError::EmptyField { line });
            }
        }
    }
    tracing::debug!(
        "Read {} sentences from {}",
        sentences.len(),
        path.display()
    );
    Ok(sentences)
}

/// Append a copy of every sentence cut to its first `len` symbols.
///
/// Output is twice the input length: the originals followed by the copies.
#[must_use]
pub fn with_truncated_patterns(mut sentences: Vec<String>, len: usize) -> Vec<String> {
    let truncated: Vec<String> = sentences
        .iter()
        .map(|s| s.chars().take(len).collect())
        .collect();
    sentences.extend(truncated);
    sentences
}

/// Encode sentences into examples, stopping at the first failure.
///
/// # Errors
///
/// Returns the encoder's error for the first sentence that cannot be encoded.
pub fn encode_sentences(
    sentences: Vec<String>,
    encoder: &SentenceEncoder<'_>,
) -> DataResult<Vec<Example>> {
    sentences
        .into_iter()
        .enumerate()
        .map(|(row, sentence)| match encoder.encode(&sentence) {
            Ok((data, label)) => Ok(Example {
                sentence,
                data,
                label,
            }),
            Err(e) => {
                tracing::warn!("Cannot encode row {row} ({sentence:?}): {e}");
                Err(e)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::Vocabulary;
    use crate::Config;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_sentences_one_per_line() {
        let file = write_file("hello\nworld\r\nab\n");
        let sentences = read_sentences(file.path(), b',').unwrap();
        assert_eq!(sentences, vec!["hello", "world", "ab"]);
    }

    #[test]
    fn test_read_sentences_skips_blank_lines() {
        let file = write_file("ab\n\n\ncd\n");
        let sentences = read_sentences(file.path(), b',').unwrap();
        assert_eq!(sentences, vec!["ab", "cd"]);
    }

    #[test]
    fn test_read_sentences_last_field_wins() {
        let file = write_file("7,abc\n\"x,y\"\nplain\n");
        let sentences = read_sentences(file.path(), b',').unwrap();
        assert_eq!(sentences, vec!["abc", "x,y", "plain"]);
    }

    #[test]
    fn test_read_sentences_trailing_delimiter_is_error() {
        let file = write_file("ab\nabc,\ncd\n");
        let err = read_sentences(file.path(), b',').unwrap_err();
        assert!(matches!(err, DataError::EmptyField { line: 2 }));
    }

    #[test]
    fn test_read_sentences_quoted_fields() {
        let file = write_file("\"say \"\"hi\"\"\"\nx\"y\n");
        let sentences = read_sentences(file.path(), b',').unwrap();
        assert_eq!(sentences, vec!["say \"hi\"", "x\"y"]);
    }

    #[test]
    fn test_read_sentences_empty_file() {
        let file = write_file("");
        assert!(read_sentences(file.path(), b',').unwrap().is_empty());
    }

    #[test]
    fn test_read_sentences_missing_file() {
        let err = read_sentences(Path::new("/nonexistent/charseq/input.csv"), b',').unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_truncated_patterns_double_the_list() {
        let sentences = vec!["abcdefg".to_string(), "abc".to_string()];
        let doubled = with_truncated_patterns(sentences, 5);
        assert_eq!(doubled, vec!["abcdefg", "abc", "abcde", "abc"]);
    }

    #[test]
    fn test_truncated_patterns_count_symbols_not_bytes() {
        let doubled = with_truncated_patterns(vec!["ééééééé".to_string()], 2);
        assert_eq!(doubled[1], "éé");
    }

    #[test]
    fn test_encode_sentences_keeps_text() {
        let vocab = Vocabulary::from_chars(&['a', 'b']);
        let config = Config {
            sentence_length: 3,
            ..Config::default()
        };
        let encoder = SentenceEncoder::new(&vocab, &config);
        let examples =
            encode_sentences(vec!["ab".to_string(), "ba".to_string()], &encoder).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].sentence, "ba");
        assert_eq!(examples[1].label[0], 1.0);
        assert_eq!(examples[1].data.shape(), &[3, 2]);
    }

    #[test]
    fn test_encode_sentences_propagates_error() {
        let vocab = Vocabulary::from_chars(&['a', 'b']);
        let config = Config {
            sentence_length: 2,
            ..Config::default()
        };
        let encoder = SentenceEncoder::new(&vocab, &config);
        let err = encode_sentences(vec!["ab".to_string(), "abab".to_string()], &encoder)
            .unwrap_err();
        assert!(matches!(err, DataError::SentenceTooLong { len: 4, max: 2 }));
    }
}
