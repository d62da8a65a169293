//! Error types.
//!
//! [`ModelError`] is what a [`ListModel`](crate::core::ListModel) primitive reports when it
//! refuses an operation. [`SortError`] is what the sort entry points return: either a broken
//! caller contract (missing or incomparable keys) or a propagated primitive failure.

/// Failure of a single list-model primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("index {index} out of bounds for model of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot move {count} row(s) from {from} to {to} in model of length {len}")]
    MoveOutOfRange {
        from: usize,
        to: usize,
        count: usize,
        len: usize,
    },

    #[error("model rejected operation: {0}")]
    Rejected(String),
}

/// Failure of a sort invocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// The record at `index` has no value for the sort key.
    #[error("record {index} has no field `{field}`")]
    MissingKey { index: usize, field: String },

    /// Two keys could not be ordered against each other (mixed types, NaN, ...).
    /// Indices refer to positions before the sort started.
    #[error("keys of records {left} and {right} are not comparable")]
    Incomparable { left: usize, right: usize },

    /// The permutation handed to the executor is not a bijection on `[0, len)`.
    #[error("invalid permutation for model of length {len}: {reason}")]
    InvalidPermutation { len: usize, reason: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_converts() {
        let err: SortError = ModelError::IndexOutOfBounds { index: 4, len: 2 }.into();
        assert_eq!(
            err.to_string(),
            "index 4 out of bounds for model of length 2"
        );
        assert!(matches!(err, SortError::Model(_)));
    }

    #[test]
    fn test_messages() {
        let err = SortError::MissingKey {
            index: 3,
            field: "name".into(),
        };
        assert_eq!(err.to_string(), "record 3 has no field `name`");

        let err = SortError::Incomparable { left: 0, right: 2 };
        assert_eq!(err.to_string(), "keys of records 0 and 2 are not comparable");
    }
}
