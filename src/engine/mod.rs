//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a fit from validated inputs to a coefficient
//! vector, and reconstructs function values from fitted coefficients:
//! - Input validation shared by fitting and evaluation
//! - The fit driver that streams data and constraint rows into the solver
//! - The standalone surface evaluator
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input validation shared by fitting and evaluation.
pub mod validator;

/// Fit driver streaming rows into the incremental solver.
pub mod fitter;

/// Standalone evaluator over a fitted coefficient vector.
pub mod evaluator;
