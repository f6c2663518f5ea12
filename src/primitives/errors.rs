//! Error types for spline fitting and evaluation.
//!
//! ## Purpose
//!
//! This module defines the crate-wide error enum. Every fallible operation
//! returns `Result<_, SplineError>`; callers must check before trusting a
//! result.
//!
//! ## Design notes
//!
//! * **Codes, not exceptions**: every variant maps to a stable numeric code
//!   via [`SplineError::code`], usable with a diagnostic sink.
//! * **Deterministic**: all errors derive from the inputs alone. None are
//!   transient, so there is no retry logic anywhere in the crate.
//! * **no_std**: `Display` is implemented by hand against `core::fmt`.
//!
//! ## Key concepts
//!
//! * **Argument errors** (codes 1xx): rejected before any computation.
//! * **Solver errors** (codes 2xx): raised by the incremental reduction
//!   engine during row submission or finalization.

// External dependencies
use core::fmt;

// ============================================================================
// SplineError
// ============================================================================

/// Errors produced by spline fitting, evaluation, and the incremental solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplineError {
    /// Dimensionality outside the supported range [1, 4].
    InvalidDimensions {
        /// Requested number of dimensions.
        got: usize,
    },

    /// A per-dimension node count below the minimum of 4.
    TooFewNodes {
        /// Offending dimension (0-based).
        dim: usize,
        /// Requested node count.
        got: usize,
    },

    /// A degenerate axis with equal lower and upper bounds.
    DegenerateAxis {
        /// Offending dimension (0-based).
        dim: usize,
    },

    /// Coefficient buffer smaller than the grid's coefficient count.
    CoefficientBufferTooSmall {
        /// Provided buffer length.
        got: usize,
        /// Required length (product of node counts).
        need: usize,
    },

    /// No data points were supplied.
    EmptyInput,

    /// Flattened point array length inconsistent with value array length.
    MismatchedInputs {
        /// Length of the flattened point array.
        x_len: usize,
        /// Length of the value array.
        y_len: usize,
    },

    /// Derivative order outside the supported set {0, 1, 2}.
    InvalidDerivative {
        /// Offending dimension (0-based).
        dim: usize,
        /// Requested order.
        got: usize,
    },

    /// Solver scratch buffer smaller than `n*(n+5)/2 + 1`.
    ScratchTooSmall {
        /// Provided capacity.
        got: usize,
        /// Required capacity.
        need: usize,
    },

    /// Row submitted with an index other than previous + 1.
    RowOutOfSequence {
        /// Submitted row index.
        got: usize,
        /// Expected row index.
        expected: usize,
    },

    /// Fewer total rows than columns at finalization (under-determined).
    TooFewRows {
        /// Rows processed.
        got: usize,
        /// Column count of the system.
        need: usize,
    },

    /// A (numerically) zero diagonal pivot at finalization.
    SingularSystem {
        /// Column of the offending pivot (0-based).
        column: usize,
    },
}

impl SplineError {
    /// Stable numeric code for this error.
    ///
    /// Argument-validation errors are 1xx, solver errors are 2xx. Intended
    /// for routing through a
    /// [`DiagnosticSink`](crate::primitives::diagnostics::DiagnosticSink).
    pub fn code(&self) -> u32 {
        match self {
            SplineError::InvalidDimensions { .. } => 101,
            SplineError::TooFewNodes { .. } => 102,
            SplineError::DegenerateAxis { .. } => 103,
            SplineError::CoefficientBufferTooSmall { .. } => 104,
            SplineError::EmptyInput => 105,
            SplineError::MismatchedInputs { .. } => 106,
            SplineError::InvalidDerivative { .. } => 107,
            SplineError::ScratchTooSmall { .. } => 201,
            SplineError::RowOutOfSequence { .. } => 202,
            SplineError::TooFewRows { .. } => 203,
            SplineError::SingularSystem { .. } => 204,
        }
    }
}

impl fmt::Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplineError::InvalidDimensions { got } => {
                write!(f, "Invalid dimensions: {} (must be in [1, 4])", got)
            }
            SplineError::TooFewNodes { dim, got } => {
                write!(
                    f,
                    "Too few nodes in dimension {}: got {}, need at least 4",
                    dim, got
                )
            }
            SplineError::DegenerateAxis { dim } => {
                write!(f, "Degenerate axis {}: xmin equals xmax", dim)
            }
            SplineError::CoefficientBufferTooSmall { got, need } => {
                write!(
                    f,
                    "Coefficient buffer too small: got {}, need {}",
                    got, need
                )
            }
            SplineError::EmptyInput => write!(f, "Input arrays are empty"),
            SplineError::MismatchedInputs { x_len, y_len } => {
                write!(
                    f,
                    "Length mismatch: points array has {} entries, values has {}",
                    x_len, y_len
                )
            }
            SplineError::InvalidDerivative { dim, got } => {
                write!(
                    f,
                    "Invalid derivative order in dimension {}: {} (must be 0, 1, or 2)",
                    dim, got
                )
            }
            SplineError::ScratchTooSmall { got, need } => {
                write!(f, "Scratch buffer too small: got {}, need {}", got, need)
            }
            SplineError::RowOutOfSequence { got, expected } => {
                write!(f, "Row out of sequence: got {}, expected {}", got, expected)
            }
            SplineError::TooFewRows { got, need } => {
                write!(
                    f,
                    "Too few rows: processed {}, need at least {} (under-determined system)",
                    got, need
                )
            }
            SplineError::SingularSystem { column } => {
                write!(f, "Singular system: zero pivot in column {}", column)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SplineError {}
