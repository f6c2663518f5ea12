//! # natspline — Tensor-Product Natural-Spline Least Squares for Rust
//!
//! Fits a smooth multidimensional function to scattered, weighted data points
//! by least squares, using a tensor-product cubic natural-spline basis defined
//! on a regular node grid, and evaluates the fitted function (or its partial
//! derivatives) at arbitrary points afterward.
//!
//! ## What does it do?
//!
//! Given scattered observations `(p_k, y_k)` in up to four dimensions, the
//! crate finds the coefficient vector `c` minimizing `‖W(A·c − y)‖²`, where
//! each row of `A` holds the handful of compactly supported basis functions
//! that are nonzero at `p_k`. The basis is a tensor product of one-dimensional
//! piecewise cubics whose second derivative vanishes at the grid boundary
//! (the "natural" condition), which also yields a well-behaved linear
//! extrapolation outside the data range.
//!
//! **Key properties:**
//! - Streaming solver: rows are reduced one at a time (Givens rotations) or in
//!   small batches (Householder reflections), so memory stays `O(n²)` in the
//!   coefficient count no matter how many data points are submitted.
//! - Data-sparse regularization: regions of the grid with too little data
//!   receive curvature-penalty constraint rows, keeping the system well posed.
//! - Derivative evaluation: any mixed partial up to second order per axis.
//! - No global state: grids and fits are plain values; independent fits can
//!   run on independent threads without locking.
//!
//! ## Quick Start
//!
//! ```rust
//! use natspline_rs::prelude::*;
//!
//! // Scattered 1-D data on [0, 3].
//! let points = vec![0.0, 1.0, 2.0, 3.0];
//! let values = vec![0.0, 1.0, 0.0, 1.0];
//!
//! // Build the model
//! let model = NatSpline::new()
//!     .dimensions(1)
//!     .bounds(&[0.0], &[3.0])
//!     .nodes(&[4])
//!     .build()?;
//!
//! // Fit, then evaluate anywhere
//! let fit = model.fit(&points, &values)?;
//! let y = fit.evaluate(&[1.5])?;
//! let dy = fit.evaluate_derivative(&[1.5], &[1])?;
//! println!("f(1.5) = {y}, f'(1.5) = {dy}");
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ## Multidimensional fits
//!
//! Points are passed flattened, row-major: `[p0_x, p0_y, p1_x, p1_y, ...]`.
//!
//! ```rust
//! use natspline_rs::prelude::*;
//!
//! // 16 samples of f(x, y) = x + y on the unit square.
//! let mut points = Vec::new();
//! let mut values = Vec::new();
//! for i in 0..4 {
//!     for j in 0..4 {
//!         let (x, y) = (i as f64 / 3.0, j as f64 / 3.0);
//!         points.extend_from_slice(&[x, y]);
//!         values.push(x + y);
//!     }
//! }
//!
//! let model = NatSpline::new()
//!     .dimensions(2)
//!     .bounds(&[0.0, 0.0], &[1.0, 1.0])
//!     .nodes(&[4, 4])
//!     .build()?;
//!
//! let fit = model.fit(&points, &values)?;
//! let v = fit.evaluate(&[0.25, 0.5])?;
//! assert!((v - 0.75).abs() < 1e-6);
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ## Weights and smoothing
//!
//! Each point may carry a weight (zero-weight points are skipped). When parts
//! of the grid see little or no data, a nonzero `smoothing` weight injects
//! second-derivative penalty rows there so the fit stays bounded:
//!
//! ```rust
//! use natspline_rs::prelude::*;
//!
//! let points = vec![0.0, 0.5, 9.5, 10.0];
//! let values = vec![1.0, 1.2, 3.1, 3.0];
//! let weights = vec![1.0, 2.0, 2.0, 1.0];
//!
//! let model = NatSpline::<f64>::new()
//!     .dimensions(1)
//!     .bounds(&[0.0], &[10.0])
//!     .nodes(&[8])
//!     .smoothing(1.0)
//!     .build()?;
//!
//! let fit = model.fit_weighted(&points, &values, &weights)?;
//! assert!(fit.evaluate(&[5.0])?.is_finite());
//! # Result::<(), SplineError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter            | Default | Range          | Description                                   |
//! |----------------------|---------|----------------|-----------------------------------------------|
//! | **dimensions**       | 1       | [1, 4]         | Number of independent variables               |
//! | **bounds**           | —       | `xmin != xmax` | Grid extent per dimension                     |
//! | **nodes**            | —       | ≥ 4 per axis   | Node count per dimension                      |
//! | **smoothing**        | 0       | any finite     | Weight of data-sparse curvature constraints   |
//! | **scratch_capacity** | auto    | ≥ n(n+5)/2 + 1 | Solver workspace size (n = coefficient count) |
//!
//! ## Result and Error Handling
//!
//! Every fallible operation returns `Result<_, SplineError>`. Errors carry a
//! stable numeric code (see `SplineError::code`) for routing through a
//! [`prelude::DiagnosticSink`]; none are transient, so a caller encountering
//! any error must discard the result.
//!
//! Deliberately under-determined fits — zero smoothing over a data-sparse
//! grid — fail with `SingularSystem` or `TooFewRows`. That is a supported way
//! of probing conditioning, not a bug.
//!
//! ## Persisted coefficients
//!
//! The coefficient vector is the only durable artifact. Its layout is
//! mixed-radix with dimension 0 varying fastest; a vector stored elsewhere can
//! be re-attached with `SplineSurface::from_parts`, which re-validates the
//! grid description.
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! ```toml
//! [dependencies]
//! natspline_rs = { version = "0.1", default-features = false }
//! ```
//!
//! All numeric code is generic over `f32`/`f64` via `num_traits::Float`.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the crate-wide error type, the diagnostic collaborator trait,
// and the reusable solver workspace buffer.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the node-grid description, multi-index traversal, and the
// closed-form piecewise-cubic basis functions with their derivatives.
mod math;

// Layer 3: Algorithms - core numerical algorithms.
//
// Contains the incremental least-squares solver (Givens/Householder
// orthogonal reduction) and the data-sparseness accounting used for
// smoothing constraints.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains input validation, the fit driver that streams rows into the
// solver, and the standalone surface evaluator.
mod engine;

// High-level fluent API for spline fitting.
//
// Provides the `NatSpline` builder for configuring and running fits.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard natspline prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use natspline_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{NatSpline, NatSplineBuilder, SplineFitResult, SplineModel};
    pub use crate::engine::evaluator::SplineSurface;
    pub use crate::engine::fitter::FitFailure;
    pub use crate::primitives::diagnostics::{
        DiagnosticSink, RecordingDiagnostics, SilentDiagnostics,
    };
    pub use crate::primitives::errors::SplineError;
    pub use crate::primitives::scratch::SolverScratch;

    #[cfg(feature = "std")]
    pub use crate::primitives::diagnostics::StderrDiagnostics;
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing
/// purposes. It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change
/// without notice. Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
