//! Error types shared across the substrate.
//!
//! All failures here are local and synchronous: nothing in this crate
//! retries, and nothing is swallowed. The environment that drives the
//! heuristic loop decides whether a failed step is retried with a fresh
//! selection or aborted.

use std::fmt;

/// An operator's preconditions do not hold against the current solution.
///
/// Operators are immutable value objects that may outlive the solution
/// shape they were produced for (e.g. a concurrent mutation already
/// landed). `check`/`apply` surface that staleness instead of patching
/// around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidOperatorError {
    /// A referenced position lies outside the current solution.
    IndexOutOfBounds { index: usize, len: usize },
    /// An inclusive range has its endpoints out of order.
    InvertedRange { first: usize, last: usize },
    /// A segment of the given length starting at `start` does not fit.
    SegmentOutOfBounds { start: usize, len: usize, solution_len: usize },
    /// A splice destination would land inside the segment being moved.
    DestinationInsideSegment { start: usize, len: usize, dest: usize },
}

impl fmt::Display for InvalidOperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidOperatorError::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for solution of length {}", index, len)
            }
            InvalidOperatorError::InvertedRange { first, last } => {
                write!(f, "inverted range: first {} > last {}", first, last)
            }
            InvalidOperatorError::SegmentOutOfBounds { start, len, solution_len } => {
                write!(
                    f,
                    "segment [{}, {}) out of bounds for solution of length {}",
                    start,
                    start + len,
                    solution_len
                )
            }
            InvalidOperatorError::DestinationInsideSegment { start, len, dest } => {
                write!(
                    f,
                    "destination {} lies inside the moved segment [{}, {})",
                    dest,
                    start,
                    start + len
                )
            }
        }
    }
}

impl std::error::Error for InvalidOperatorError {}

/// A feature statistic is mathematically undefined for the given input.
///
/// Distinct from the documented empty-collection defaults: a tour with no
/// legs reports 0.0 leg statistics, but a mean over non-zero edges when
/// the instance has none cannot be defaulted without lying to the
/// selection agent, so it is surfaced instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedFeatureError {
    feature: &'static str,
    reason: &'static str,
}

impl UndefinedFeatureError {
    pub fn new(feature: &'static str, reason: &'static str) -> Self {
        Self { feature, reason }
    }

    /// The stable key of the feature that could not be computed.
    pub fn feature(&self) -> &'static str {
        self.feature
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for UndefinedFeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature '{}' is undefined: {}", self.feature, self.reason)
    }
}

impl std::error::Error for UndefinedFeatureError {}

/// Instance or state construction received inconsistent structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    /// A required collection is empty.
    Empty { what: &'static str },
    /// A matrix row does not match the expected width.
    NonSquareMatrix { rows: usize, row: usize, row_len: usize },
    /// Two fields that must agree in size do not.
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },
    /// A quantity that must be strictly positive is not.
    NonPositive { what: &'static str },
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInputError::Empty { what } => write!(f, "{} must not be empty", what),
            MalformedInputError::NonSquareMatrix { rows, row, row_len } => {
                write!(
                    f,
                    "matrix with {} rows is not square: row {} has length {}",
                    rows, row, row_len
                )
            }
            MalformedInputError::DimensionMismatch { what, expected, actual } => {
                write!(f, "{}: expected {}, got {}", what, expected, actual)
            }
            MalformedInputError::NonPositive { what } => {
                write!(f, "{} must be strictly positive", what)
            }
        }
    }
}

impl std::error::Error for MalformedInputError {}
