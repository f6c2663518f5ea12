//! Fit driver streaming rows into the incremental solver.
//!
//! ## Purpose
//!
//! This module turns validated data arrays into a coefficient vector. For
//! every data point it assembles one least-squares row over the basis
//! functions with nonzero support at that point and submits it to the
//! incremental solver; with a nonzero smoothing weight it additionally scans
//! the grid for data-sparse nodes and submits derivative-penalty rows there,
//! then finalizes the solver.
//!
//! ## Design notes
//!
//! * **One dense row buffer**: rows are mostly zero, so the driver reuses a
//!   single `ncol`-length buffer and re-zeroes only the entries the support
//!   window touched.
//! * **Zero-weight points are skipped entirely**: they produce no row and do
//!   not count toward the sparseness accounting.
//! * **Partial results on failure**: finalization failures are surfaced as a
//!   [`FitFailure`] carrying whatever coefficients were back-substituted
//!   before the failure. Callers must treat the error as fatal; the partial
//!   vector exists for post-mortem inspection only.
//!
//! ## Invariants
//!
//! * Data rows are submitted in point order, then constraint rows in node
//!   order; row indices are consecutive from 1.
//! * A constraint row always has a zero right-hand side.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::smoothing::{constraint_specs, SparsityMap};
use crate::algorithms::solver::IncrementalSolver;
use crate::engine::validator::Validator;
use crate::math::basis::tensor_basis;
use crate::math::grid::{NodeGrid, MAX_DIMS};
use crate::primitives::errors::SplineError;
use crate::primitives::scratch::SolverScratch;

// ============================================================================
// Fit outcome types
// ============================================================================

/// Successful fit: the coefficient vector and solver summary figures.
#[derive(Debug, Clone)]
pub struct FitOutput<T> {
    /// Fitted coefficients, one per grid node, mixed-radix linearized with
    /// dimension 0 varying fastest.
    pub coefficients: Vec<T>,
    /// Euclidean norm of the least-squares residual.
    pub residual_norm: T,
    /// Total rows streamed through the solver, constraint rows included.
    pub rows_processed: usize,
}

/// Failed fit: the error plus whatever partial coefficients were computed.
///
/// The partial vector holds the components back-substituted before the
/// failure (zeros elsewhere). It must not be trusted as a fit result.
#[derive(Debug, Clone)]
pub struct FitFailure<T> {
    /// The underlying error.
    pub error: SplineError,
    /// Partially back-substituted coefficients, for inspection only.
    pub partial: Vec<T>,
}

impl<T> FitFailure<T> {
    /// A failure with no partial result.
    fn bare(error: SplineError) -> Self {
        Self {
            error,
            partial: Vec::new(),
        }
    }
}

impl<T> From<FitFailure<T>> for SplineError {
    fn from(failure: FitFailure<T>) -> Self {
        failure.error
    }
}

impl<T> core::fmt::Display for FitFailure<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.error, f)
    }
}

// ============================================================================
// SplineFitter
// ============================================================================

/// Static driver for the row-streaming least-squares fit.
pub struct SplineFitter;

impl SplineFitter {
    /// Fit spline coefficients to weighted scattered data.
    ///
    /// `points` is flattened row-major with `ndim` coordinates per point;
    /// `weights` defaults to all ones. With `smoothing` nonzero, data-sparse
    /// nodes receive derivative-penalty rows scaled by their weight
    /// shortfall. The solver reduces rows inside `scratch`, whose length the
    /// caller controls; at least `n(n+5)/2 + 1` entries are required for
    /// `n` coefficients, and any excess widens the staged-row batches.
    ///
    /// # Errors
    /// Validation errors ([`SplineError::EmptyInput`],
    /// [`SplineError::MismatchedInputs`], [`SplineError::ScratchTooSmall`])
    /// carry an empty partial vector; finalization errors
    /// ([`SplineError::TooFewRows`], [`SplineError::SingularSystem`]) carry
    /// the partially solved coefficients.
    pub fn fit<T: Float>(
        grid: &NodeGrid<T>,
        points: &[T],
        values: &[T],
        weights: Option<&[T]>,
        smoothing: T,
        scratch: &mut SolverScratch<T>,
    ) -> Result<FitOutput<T>, FitFailure<T>> {
        Validator::validate_fit_inputs(grid, points, values, weights)
            .map_err(FitFailure::bare)?;

        let ndim = grid.ndim();
        let n = grid.ncol();
        let mut solver =
            IncrementalSolver::begin(n, scratch.as_mut_slice()).map_err(FitFailure::bare)?;

        let mut row = vec![T::zero(); n];
        let mut touched: Vec<usize> = Vec::with_capacity(1 << (2 * ndim));
        let zero_deriv = [0_usize; MAX_DIMS];

        // One row per data point, all derivative orders zero.
        for (k, &value) in values.iter().enumerate() {
            let w = weights.map_or(T::one(), |ws| ws[k]);
            if w == T::zero() {
                continue;
            }
            let point = &points[k * ndim..(k + 1) * ndim];
            Self::submit_basis_row(
                &mut solver,
                grid,
                &mut row,
                &mut touched,
                point,
                &zero_deriv[..ndim],
                w,
                w * value,
            )
            .map_err(FitFailure::bare)?;
        }

        if smoothing != T::zero() {
            Self::submit_constraint_rows(
                &mut solver,
                grid,
                &mut row,
                &mut touched,
                points,
                values.len(),
                weights,
                smoothing,
            )
            .map_err(FitFailure::bare)?;
        }

        let rows_processed = solver.rows_seen();
        let mut coefficients = vec![T::zero(); n];
        match solver.finish(&mut coefficients) {
            Ok(residual_norm) => Ok(FitOutput {
                coefficients,
                residual_norm,
                rows_processed,
            }),
            Err(error) => Err(FitFailure {
                error,
                partial: coefficients,
            }),
        }
    }

    /// Scan for data-sparse nodes and submit their penalty rows.
    #[allow(clippy::too_many_arguments)]
    fn submit_constraint_rows<T: Float>(
        solver: &mut IncrementalSolver<'_, T>,
        grid: &NodeGrid<T>,
        row: &mut [T],
        touched: &mut Vec<usize>,
        points: &[T],
        npoints: usize,
        weights: Option<&[T]>,
        smoothing: T,
    ) -> Result<(), SplineError> {
        let ndim = grid.ndim();
        let mut map = SparsityMap::new(grid);
        for k in 0..npoints {
            let w = weights.map_or(T::one(), |ws| ws[k]);
            if w == T::zero() {
                continue;
            }
            map.accumulate(grid, &points[k * ndim..(k + 1) * ndim], w);
        }

        for icol in 0..grid.ncol() {
            let ib = grid.node_from_index(icol);
            let deficiency = match map.deficiency(grid, &ib) {
                Some(d) => d,
                None => continue,
            };
            let mut node_point = [T::zero(); MAX_DIMS];
            for i in 0..ndim {
                node_point[i] = grid.node_position(i, ib.get(i));
            }
            for spec in constraint_specs(grid, &ib, deficiency, smoothing) {
                Self::submit_basis_row(
                    solver,
                    grid,
                    row,
                    touched,
                    &node_point[..ndim],
                    &spec.deriv[..ndim],
                    spec.weight,
                    T::zero(),
                )?;
            }
        }
        Ok(())
    }

    /// Assemble one weighted basis row at `point` and submit it.
    ///
    /// Only the support-window entries of `row` are written; they are
    /// re-zeroed before returning, so the buffer stays all-zero between
    /// calls.
    #[allow(clippy::too_many_arguments)]
    fn submit_basis_row<T: Float>(
        solver: &mut IncrementalSolver<'_, T>,
        grid: &NodeGrid<T>,
        row: &mut [T],
        touched: &mut Vec<usize>,
        point: &[T],
        deriv: &[usize],
        weight: T,
        rhs: T,
    ) -> Result<(), SplineError> {
        let window = grid.support_window(point);
        let mut ib = window.start();
        touched.clear();
        loop {
            let (icol, basis) = tensor_basis(grid, point, deriv, &ib)?;
            row[icol] = weight * basis;
            touched.push(icol);
            if !ib.advance(&window) {
                break;
            }
        }
        let result = solver.submit_row(solver.rows_seen() + 1, row, rhs);
        for &icol in touched.iter() {
            row[icol] = T::zero();
        }
        result
    }
}

// ============================================================================
// Tests
// ============================================================================
