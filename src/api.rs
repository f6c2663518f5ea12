//! High-level fluent API for spline fitting.
//!
//! ## Purpose
//!
//! This module provides the public entry points: a builder that validates
//! grid parameters up front, a model that runs fits, and a fit result that
//! evaluates the fitted function.
//!
//! ## Design notes
//!
//! * **Validate at build**: every grid parameter is checked once in
//!   [`NatSplineBuilder::build`]; a constructed [`SplineModel`] can only
//!   fail on data-dependent conditions.
//! * **Model reuse**: a model borrows nothing and holds no fit state, so one
//!   model can run any number of fits, and independent models can fit on
//!   independent threads without locking.
//! * **Scratch sizing**: the solver workspace is sized automatically from
//!   the coefficient count. Callers can override it; oversizing widens the
//!   solver's staged-row batches, undersizing is rejected by the solver and
//!   is a supported way to probe the capacity requirement.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::solver::IncrementalSolver;
use crate::engine::evaluator::SplineSurface;
use crate::engine::fitter::{FitFailure, SplineFitter};
use crate::math::grid::{NodeGrid, MAX_DIMS};
use crate::primitives::diagnostics::DiagnosticSink;
use crate::primitives::errors::SplineError;
use crate::primitives::scratch::SolverScratch;

/// Entry point for configuring a spline fit.
///
/// An alias for [`NatSplineBuilder`] with the scalar type defaulting to
/// `f64`:
///
/// ```rust
/// use natspline_rs::prelude::*;
///
/// let model = NatSpline::new()
///     .dimensions(1)
///     .bounds(&[0.0], &[1.0])
///     .nodes(&[4])
///     .build()?;
/// # Result::<(), SplineError>::Ok(())
/// ```
pub type NatSpline<T = f64> = NatSplineBuilder<T>;

// ============================================================================
// NatSplineBuilder
// ============================================================================

/// Fluent builder for a [`SplineModel`].
#[derive(Debug, Clone)]
pub struct NatSplineBuilder<T: Float> {
    dimensions: usize,
    xmin: Vec<T>,
    xmax: Vec<T>,
    nodes: Vec<usize>,
    smoothing: T,
    scratch_capacity: Option<usize>,
}

impl<T: Float> NatSplineBuilder<T> {
    /// Start a builder with default parameters: one dimension, zero
    /// smoothing, automatic scratch sizing. Bounds and node counts have no
    /// default and must be set before [`NatSplineBuilder::build`].
    pub fn new() -> Self {
        Self {
            dimensions: 1,
            xmin: Vec::new(),
            xmax: Vec::new(),
            nodes: Vec::new(),
            smoothing: T::zero(),
            scratch_capacity: None,
        }
    }

    /// Number of independent variables, in [1, 4].
    pub fn dimensions(mut self, ndim: usize) -> Self {
        self.dimensions = ndim;
        self
    }

    /// Grid extent per dimension. `xmin[i]` must differ from `xmax[i]`.
    pub fn bounds(mut self, xmin: &[T], xmax: &[T]) -> Self {
        self.xmin = xmin.to_vec();
        self.xmax = xmax.to_vec();
        self
    }

    /// Node count per dimension, at least 4 each.
    pub fn nodes(mut self, nodes: &[usize]) -> Self {
        self.nodes = nodes.to_vec();
        self
    }

    /// Weight of the data-sparse derivative constraints. Zero (the default)
    /// disables them entirely.
    pub fn smoothing(mut self, weight: T) -> Self {
        self.smoothing = weight;
        self
    }

    /// Override the solver workspace length in scalars. The solver needs at
    /// least `n(n+5)/2 + 1` for `n` coefficients; excess capacity widens
    /// its staged-row batches.
    pub fn scratch_capacity(mut self, capacity: usize) -> Self {
        self.scratch_capacity = Some(capacity);
        self
    }

    /// Validate the configuration and construct the model.
    ///
    /// # Errors
    /// * `InvalidDimensions` if `dimensions` is outside [1, 4]
    /// * `MismatchedInputs` if the bounds or node arrays disagree with
    ///   `dimensions`
    /// * `TooFewNodes` / `DegenerateAxis` for bad per-axis parameters
    pub fn build(self) -> Result<SplineModel<T>, SplineError> {
        if self.dimensions == 0 || self.dimensions > MAX_DIMS {
            return Err(SplineError::InvalidDimensions {
                got: self.dimensions,
            });
        }
        if self.nodes.len() != self.dimensions {
            return Err(SplineError::MismatchedInputs {
                x_len: self.nodes.len(),
                y_len: self.dimensions,
            });
        }
        let grid = NodeGrid::new(&self.xmin, &self.xmax, &self.nodes)?;
        let auto = IncrementalSolver::<T>::required_scratch(grid.ncol());
        Ok(SplineModel {
            grid,
            smoothing: self.smoothing,
            scratch_capacity: self.scratch_capacity.unwrap_or(auto),
        })
    }
}

impl<T: Float> Default for NatSplineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SplineModel
// ============================================================================

/// A validated fit configuration, ready to run fits.
#[derive(Debug, Clone)]
pub struct SplineModel<T: Float> {
    grid: NodeGrid<T>,
    smoothing: T,
    scratch_capacity: usize,
}

impl<T: Float> SplineModel<T> {
    /// Number of coefficients a fit will produce (product of node counts).
    #[inline]
    pub fn coefficient_count(&self) -> usize {
        self.grid.ncol()
    }

    /// Fit with unit weights.
    ///
    /// `points` is flattened row-major with `dimensions` coordinates per
    /// point.
    pub fn fit(&self, points: &[T], values: &[T]) -> Result<SplineFitResult<T>, SplineError> {
        self.run_fit(points, values, None).map_err(SplineError::from)
    }

    /// Fit with an explicit weight per data point. Zero-weight points are
    /// skipped entirely.
    pub fn fit_weighted(
        &self,
        points: &[T],
        values: &[T],
        weights: &[T],
    ) -> Result<SplineFitResult<T>, SplineError> {
        self.run_fit(points, values, Some(weights))
            .map_err(SplineError::from)
    }

    /// Fit, routing any failure through a diagnostic sink before returning
    /// it.
    ///
    /// The sink receives the stable error code and the rendered message; it
    /// never affects control flow.
    pub fn fit_with_diagnostics(
        &self,
        points: &[T],
        values: &[T],
        weights: Option<&[T]>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<SplineFitResult<T>, SplineError> {
        self.run_fit(points, values, weights).map_err(|failure| {
            sink.report(failure.error.code(), &format!("{}", failure.error));
            failure.error
        })
    }

    /// Fit reusing a caller-owned scratch buffer.
    ///
    /// The buffer is grown to the model's configured capacity when shorter
    /// (never shrunk), so a scratch shared across repeated fits keeps them
    /// allocation-free apart from the coefficient vector itself.
    pub fn fit_with_scratch(
        &self,
        points: &[T],
        values: &[T],
        weights: Option<&[T]>,
        scratch: &mut SolverScratch<T>,
    ) -> Result<SplineFitResult<T>, SplineError> {
        scratch.ensure_len(self.scratch_capacity);
        self.run_fit_in(points, values, weights, scratch)
            .map_err(SplineError::from)
    }

    fn run_fit(
        &self,
        points: &[T],
        values: &[T],
        weights: Option<&[T]>,
    ) -> Result<SplineFitResult<T>, FitFailure<T>> {
        let mut scratch = SolverScratch::with_len(self.scratch_capacity);
        self.run_fit_in(points, values, weights, &mut scratch)
    }

    fn run_fit_in(
        &self,
        points: &[T],
        values: &[T],
        weights: Option<&[T]>,
        scratch: &mut SolverScratch<T>,
    ) -> Result<SplineFitResult<T>, FitFailure<T>> {
        let out = SplineFitter::fit(
            &self.grid,
            points,
            values,
            weights,
            self.smoothing,
            scratch,
        )?;
        let surface = SplineSurface::new(self.grid.clone(), out.coefficients)
            .map_err(|error| FitFailure {
                error,
                partial: Vec::new(),
            })?;
        Ok(SplineFitResult {
            surface,
            residual_norm: out.residual_norm,
            rows_processed: out.rows_processed,
        })
    }
}

// ============================================================================
// SplineFitResult
// ============================================================================

/// Outcome of a successful fit.
#[derive(Debug, Clone)]
pub struct SplineFitResult<T: Float> {
    surface: SplineSurface<T>,
    residual_norm: T,
    rows_processed: usize,
}

impl<T: Float> SplineFitResult<T> {
    /// Value of the fitted function at `point`.
    pub fn evaluate(&self, point: &[T]) -> Result<T, SplineError> {
        self.surface.evaluate(point)
    }

    /// Partial derivative of the fitted function at `point`, with one order
    /// in {0, 1, 2} per dimension.
    pub fn evaluate_derivative(&self, point: &[T], deriv: &[usize]) -> Result<T, SplineError> {
        self.surface.evaluate_derivative(point, deriv)
    }

    /// The fitted coefficients, mixed-radix linearized with dimension 0
    /// varying fastest.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        self.surface.coefficients()
    }

    /// Euclidean norm of the least-squares residual.
    #[inline]
    pub fn residual_norm(&self) -> T {
        self.residual_norm
    }

    /// Total rows streamed through the solver, constraint rows included.
    #[inline]
    pub fn rows_processed(&self) -> usize {
        self.rows_processed
    }

    /// Borrow the underlying surface.
    #[inline]
    pub fn surface(&self) -> &SplineSurface<T> {
        &self.surface
    }

    /// Extract the underlying surface, discarding the fit summary.
    pub fn into_surface(self) -> SplineSurface<T> {
        self.surface
    }
}
