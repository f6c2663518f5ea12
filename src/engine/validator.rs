//! Input validation shared by fitting and evaluation.
//!
//! ## Purpose
//!
//! This module checks the caller-supplied arrays against the grid before any
//! computation runs. Grid parameters themselves are validated by
//! `NodeGrid::new`; the checks here cover everything that arrives alongside
//! the grid.
//!
//! ## Design notes
//!
//! * **First failure wins**: checks run in a fixed documented order and stop
//!   at the first violation.
//! * **Standalone evaluation**: the evaluator validates its inputs with the
//!   same routines, so an evaluation call never depends on having run a fit
//!   in the same process.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::grid::NodeGrid;
use crate::primitives::errors::SplineError;

// ============================================================================
// Validator
// ============================================================================

/// Static validation routines for fit and evaluation inputs.
pub struct Validator;

impl Validator {
    /// Validate the data arrays of a fit call.
    ///
    /// `points` is flattened row-major with `ndim` coordinates per point.
    ///
    /// # Errors
    /// * `EmptyInput` if there are no data points
    /// * `MismatchedInputs` if `points` does not hold exactly `ndim`
    ///   coordinates per value, or a weight array disagrees in length
    pub fn validate_fit_inputs<T: Float>(
        grid: &NodeGrid<T>,
        points: &[T],
        values: &[T],
        weights: Option<&[T]>,
    ) -> Result<(), SplineError> {
        if values.is_empty() {
            return Err(SplineError::EmptyInput);
        }
        let need = values.len() * grid.ndim();
        if points.len() != need {
            return Err(SplineError::MismatchedInputs {
                x_len: points.len(),
                y_len: need,
            });
        }
        if let Some(w) = weights {
            if w.len() != values.len() {
                return Err(SplineError::MismatchedInputs {
                    x_len: w.len(),
                    y_len: values.len(),
                });
            }
        }
        Ok(())
    }

    /// Validate a query point against the grid dimensionality.
    ///
    /// # Errors
    /// * `MismatchedInputs` if `point.len() != ndim`
    pub fn validate_point<T: Float>(grid: &NodeGrid<T>, point: &[T]) -> Result<(), SplineError> {
        if point.len() != grid.ndim() {
            return Err(SplineError::MismatchedInputs {
                x_len: point.len(),
                y_len: grid.ndim(),
            });
        }
        Ok(())
    }

    /// Validate a per-dimension derivative-order vector.
    ///
    /// # Errors
    /// * `MismatchedInputs` if `deriv.len() != ndim`
    /// * `InvalidDerivative` if any order is outside {0, 1, 2}
    pub fn validate_derivatives<T: Float>(
        grid: &NodeGrid<T>,
        deriv: &[usize],
    ) -> Result<(), SplineError> {
        if deriv.len() != grid.ndim() {
            return Err(SplineError::MismatchedInputs {
                x_len: deriv.len(),
                y_len: grid.ndim(),
            });
        }
        for (dim, &d) in deriv.iter().enumerate() {
            if d > 2 {
                return Err(SplineError::InvalidDerivative { dim, got: d });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> NodeGrid<f64> {
        NodeGrid::new(&[0.0, 0.0], &[1.0, 1.0], &[4, 4]).unwrap()
    }

    #[test]
    fn accepts_consistent_fit_inputs() {
        let g = grid();
        let points = [0.1, 0.2, 0.3, 0.4];
        let values = [1.0, 2.0];
        assert!(Validator::validate_fit_inputs(&g, &points, &values, None).is_ok());
        let weights = [1.0, 0.5];
        assert!(Validator::validate_fit_inputs(&g, &points, &values, Some(&weights)).is_ok());
    }

    #[test]
    fn rejects_empty_and_mismatched_fit_inputs() {
        let g = grid();
        assert_eq!(
            Validator::validate_fit_inputs(&g, &[], &[], None).unwrap_err(),
            SplineError::EmptyInput
        );
        assert_eq!(
            Validator::validate_fit_inputs(&g, &[0.1, 0.2, 0.3], &[1.0, 2.0], None).unwrap_err(),
            SplineError::MismatchedInputs { x_len: 3, y_len: 4 }
        );
        assert_eq!(
            Validator::validate_fit_inputs(&g, &[0.1, 0.2, 0.3, 0.4], &[1.0, 2.0], Some(&[1.0]))
                .unwrap_err(),
            SplineError::MismatchedInputs { x_len: 1, y_len: 2 }
        );
    }

    #[test]
    fn rejects_bad_points_and_derivatives() {
        let g = grid();
        assert_eq!(
            Validator::validate_point(&g, &[0.5]).unwrap_err(),
            SplineError::MismatchedInputs { x_len: 1, y_len: 2 }
        );
        assert!(Validator::validate_point(&g, &[0.5, 0.5]).is_ok());
        assert_eq!(
            Validator::validate_derivatives(&g, &[0, 3]).unwrap_err(),
            SplineError::InvalidDerivative { dim: 1, got: 3 }
        );
        assert!(Validator::validate_derivatives(&g, &[2, 1]).is_ok());
    }
}
