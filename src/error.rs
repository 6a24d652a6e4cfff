//! Error taxonomy shared by every alignment entry point.

use thiserror::Error;

/// Errors produced by the aligners and the batch coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// The scoring model has no substitution score for this symbol pair.
    #[error("no substitution score defined for symbol pair ({}, {})", *a as char, *b as char)]
    InvalidSymbolPair { a: u8, b: u8 },

    /// A sequence or candidate list that must be non-empty was empty.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Two derived arrays that must share a length did not.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// One concurrent batch chunk failed; the whole batch result is withheld.
    #[error("batch chunk {chunk} failed: {source}")]
    BatchTaskFailure {
        chunk: usize,
        #[source]
        source: Box<AlignError>,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pair_renders_symbols() {
        let err = AlignError::InvalidSymbolPair { a: b'A', b: b'N' };
        assert_eq!(
            err.to_string(),
            "no substitution score defined for symbol pair (A, N)"
        );
    }

    #[test]
    fn batch_failure_exposes_source() {
        use std::error::Error as _;
        let err = AlignError::BatchTaskFailure {
            chunk: 3,
            source: Box::new(AlignError::EmptyInput("candidate sequence")),
        };
        assert_eq!(
            err.to_string(),
            "batch chunk 3 failed: empty input: candidate sequence"
        );
        assert!(err.source().is_some());
    }
}
