//! Encoded examples and the stacked subsets built from them.

use ndarray::{stack, Array1, Array2, Array3, ArrayView1, ArrayView2, Axis};

use crate::core::DataResult;

/// One encoded sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Source sentence text.
    pub sentence: String,
    /// Chunked context, shape `(chunks, chunk_length * vocab_size)`.
    pub data: Array2<f32>,
    /// One-hot next symbol, shape `(vocab_size,)`.
    pub label: Array1<f32>,
}

/// A train, validation or test partition.
///
/// Keeps the examples it was built from alongside the stacked arrays:
/// - `data` has shape `(n, chunks, chunk_length * vocab_size)`
/// - `labels` has shape `(n, vocab_size)`
#[derive(Debug, Clone)]
pub struct SubSet {
    records: Vec<Example>,
    data: Array3<f32>,
    labels: Array2<f32>,
}

impl SubSet {
    /// Stack `records` into arrays.
    ///
    /// `context_shape` and `output_labels` give the trailing dimensions and are
    /// only used when `records` is empty, which yields zero-row arrays.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DataError::ShapeMismatch`] if the records disagree on shape.
    pub fn new(
        records: Vec<Example>,
        context_shape: (usize, usize),
        output_labels: usize,
    ) -> DataResult<Self> {
        if records.is_empty() {
            return Ok(Self::empty(context_shape, output_labels));
        }

        let data_views: Vec<ArrayView2<f32>> = records.iter().map(|r| r.data.view()).collect();
        let label_views: Vec<ArrayView1<f32>> = records.iter().map(|r| r.label.view()).collect();
        let data = stack(Axis(0), &data_views)?;
        let labels = stack(Axis(0), &label_views)?;

        Ok(Self {
            records,
            data,
            labels,
        })
    }

    /// A subset with no rows.
    #[must_use]
    pub fn empty(context_shape: (usize, usize), output_labels: usize) -> Self {
        Self {
            records: Vec::new(),
            data: Array3::zeros((0, context_shape.0, context_shape.1)),
            labels: Array2::zeros((0, output_labels)),
        }
    }

    /// Number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The examples this subset was stacked from, in row order.
    #[must_use]
    pub fn records(&self) -> &[Example] {
        &self.records
    }

    #[must_use]
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    #[must_use]
    pub fn labels(&self) -> &Array2<f32> {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataError;
    use ndarray::{arr1, arr2};

    fn example(sentence: &str, data: Array2<f32>, label: Array1<f32>) -> Example {
        Example {
            sentence: sentence.to_string(),
            data,
            label,
        }
    }

    #[test]
    fn test_stack_shapes() {
        let records = vec![
            example("ab", arr2(&[[1.0, 0.0], [0.0, 0.0]]), arr1(&[0.0, 1.0])),
            example("ba", arr2(&[[0.0, 1.0], [0.0, 0.0]]), arr1(&[1.0, 0.0])),
            example("b", arr2(&[[0.0, 0.0], [0.0, 0.0]]), arr1(&[0.0, 1.0])),
        ];
        let subset = SubSet::new(records, (2, 2), 2).unwrap();

        assert_eq!(subset.len(), 3);
        assert_eq!(subset.data().shape(), &[3, 2, 2]);
        assert_eq!(subset.labels().shape(), &[3, 2]);
        assert_eq!(subset.data()[[1, 0, 1]], 1.0);
        assert_eq!(subset.labels().row(1), arr1(&[1.0, 0.0]));
        assert_eq!(subset.records()[2].sentence, "b");
    }

    #[test]
    fn test_empty_subset_zero_rows() {
        let subset = SubSet::new(Vec::new(), (4, 6), 3).unwrap();
        assert!(subset.is_empty());
        assert_eq!(subset.data().shape(), &[0, 4, 6]);
        assert_eq!(subset.labels().shape(), &[0, 3]);
    }

    #[test]
    fn test_mismatched_records_rejected() {
        let records = vec![
            example("ab", arr2(&[[1.0, 0.0]]), arr1(&[0.0, 1.0])),
            example("abc", arr2(&[[1.0, 0.0, 0.0]]), arr1(&[0.0, 1.0])),
        ];
        let err = SubSet::new(records, (1, 2), 2).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch(_)));
    }
}
