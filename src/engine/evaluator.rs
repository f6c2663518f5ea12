//! Standalone evaluator over a fitted coefficient vector.
//!
//! ## Purpose
//!
//! This module reconstructs values and partial derivatives of the fitted
//! function from a coefficient vector. It performs the same nonzero-support
//! traversal as the fit driver, accumulating `Σ coefficients[icol] · basis`.
//!
//! ## Design notes
//!
//! * **Standalone**: a surface can be rebuilt from raw grid parameters plus
//!   a stored coefficient vector via [`SplineSurface::from_parts`], which
//!   re-validates the grid exactly like a fit does. Nothing about a fit call
//!   is needed at evaluation time.
//! * **Extrapolation**: points outside the grid fall into a boundary support
//!   window whose boundary basis functions extend linearly, so evaluation
//!   degrades to a linear, curvature-free extension instead of failing.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::basis::tensor_basis;
use crate::math::grid::{NodeGrid, MAX_DIMS};
use crate::primitives::errors::SplineError;

// ============================================================================
// SplineSurface
// ============================================================================

/// A fitted spline: the node grid plus its coefficient vector.
#[derive(Debug, Clone)]
pub struct SplineSurface<T: Float> {
    grid: NodeGrid<T>,
    coefficients: Vec<T>,
}

impl<T: Float> SplineSurface<T> {
    /// Attach a coefficient vector to a grid.
    ///
    /// # Errors
    /// * `CoefficientBufferTooSmall` if the vector holds fewer than `ncol`
    ///   entries
    pub fn new(grid: NodeGrid<T>, coefficients: Vec<T>) -> Result<Self, SplineError> {
        if coefficients.len() < grid.ncol() {
            return Err(SplineError::CoefficientBufferTooSmall {
                got: coefficients.len(),
                need: grid.ncol(),
            });
        }
        Ok(Self { grid, coefficients })
    }

    /// Rebuild a surface from raw grid parameters and stored coefficients.
    ///
    /// The grid parameters are validated exactly as a fit call validates
    /// them; the coefficient layout must be the mixed-radix linearization
    /// with dimension 0 varying fastest.
    ///
    /// # Errors
    /// Any grid-construction error, or `CoefficientBufferTooSmall` as in
    /// [`SplineSurface::new`].
    pub fn from_parts(
        xmin: &[T],
        xmax: &[T],
        nodes: &[usize],
        coefficients: Vec<T>,
    ) -> Result<Self, SplineError> {
        let grid = NodeGrid::new(xmin, xmax, nodes)?;
        Self::new(grid, coefficients)
    }

    /// The node grid this surface was fitted on.
    #[inline]
    pub fn grid(&self) -> &NodeGrid<T> {
        &self.grid
    }

    /// The fitted coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Take the surface apart into its grid and coefficient vector.
    pub fn into_parts(self) -> (NodeGrid<T>, Vec<T>) {
        (self.grid, self.coefficients)
    }

    /// Value of the fitted function at `point`.
    ///
    /// # Errors
    /// * `MismatchedInputs` if `point.len() != ndim`
    pub fn evaluate(&self, point: &[T]) -> Result<T, SplineError> {
        let zero_deriv = [0_usize; MAX_DIMS];
        self.evaluate_derivative(point, &zero_deriv[..self.grid.ndim()])
    }

    /// Partial derivative of the fitted function at `point`.
    ///
    /// `deriv` gives the derivative order per dimension; an all-zero vector
    /// reproduces [`SplineSurface::evaluate`] exactly.
    ///
    /// # Errors
    /// * `MismatchedInputs` if `point` or `deriv` disagree with `ndim`
    /// * `InvalidDerivative` if any order is outside {0, 1, 2}
    pub fn evaluate_derivative(&self, point: &[T], deriv: &[usize]) -> Result<T, SplineError> {
        Validator::validate_point(&self.grid, point)?;
        Validator::validate_derivatives(&self.grid, deriv)?;

        let window = self.grid.support_window(point);
        let mut ib = window.start();
        let mut sum = T::zero();
        loop {
            let (icol, basis) = tensor_basis(&self.grid, point, deriv, &ib)?;
            sum = sum + self.coefficients[icol] * basis;
            if !ib.advance(&window) {
                break;
            }
        }
        Ok(sum)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::basis::{basis_1d, BasisKind};
    use approx::assert_relative_eq;

    #[test]
    fn rejects_short_coefficient_vectors() {
        let err = SplineSurface::from_parts(&[0.0], &[9.0], &[10], vec![0.0; 9]).unwrap_err();
        assert_eq!(
            err,
            SplineError::CoefficientBufferTooSmall { got: 9, need: 10 }
        );
    }

    #[test]
    fn from_parts_revalidates_the_grid() {
        let err = SplineSurface::from_parts(&[0.0], &[0.0], &[10], vec![0.0; 10]).unwrap_err();
        assert_eq!(err, SplineError::DegenerateAxis { dim: 0 });
    }

    #[test]
    fn zero_coefficients_evaluate_to_zero() {
        let s = SplineSurface::from_parts(&[0.0], &[9.0], &[10], vec![0.0; 10]).unwrap();
        assert_eq!(s.evaluate(&[4.2]).unwrap(), 0.0);
        assert_eq!(s.evaluate_derivative(&[4.2], &[2]).unwrap(), 0.0);
    }

    #[test]
    fn single_coefficient_reproduces_its_basis_function() {
        let mut coeffs = vec![0.0; 10];
        coeffs[5] = 2.0;
        let s = SplineSurface::from_parts(&[0.0], &[9.0], &[10], coeffs).unwrap();
        for &x in &[3.5, 4.0, 5.0, 5.9, 6.8] {
            let expected = 2.0 * basis_1d(BasisKind::Interior, 0, x, 5.0, 1.0);
            assert_relative_eq!(s.evaluate(&[x]).unwrap(), expected, epsilon = 1e-12);
            let expected_d = 2.0 * basis_1d(BasisKind::Interior, 1, x, 5.0, 1.0);
            assert_relative_eq!(
                s.evaluate_derivative(&[x], &[1]).unwrap(),
                expected_d,
                epsilon = 1e-12
            );
        }
        // Outside the support of node 5 the surface is flat zero.
        assert_eq!(s.evaluate(&[1.0]).unwrap(), 0.0);
    }

    #[test]
    fn zero_derivative_orders_match_plain_evaluation() {
        let coeffs: Vec<f64> = (0..16).map(|i| (i as f64 * 0.37).sin()).collect();
        let s = SplineSurface::from_parts(&[0.0, 0.0], &[3.0, 3.0], &[4, 4], coeffs).unwrap();
        for &p in &[[0.3, 2.4], [1.5, 1.5], [2.9, 0.1]] {
            assert_relative_eq!(
                s.evaluate(&p).unwrap(),
                s.evaluate_derivative(&p, &[0, 0]).unwrap(),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn validates_query_arguments() {
        let s = SplineSurface::from_parts(&[0.0], &[9.0], &[10], vec![0.0; 10]).unwrap();
        assert_eq!(
            s.evaluate(&[1.0, 2.0]).unwrap_err(),
            SplineError::MismatchedInputs { x_len: 2, y_len: 1 }
        );
        assert_eq!(
            s.evaluate_derivative(&[1.0], &[3]).unwrap_err(),
            SplineError::InvalidDerivative { dim: 0, got: 3 }
        );
    }
}
