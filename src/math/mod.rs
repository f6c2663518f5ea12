//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical building blocks of the crate:
//! - The regular node-grid description and multi-index arithmetic
//! - The closed-form piecewise-cubic basis functions and their derivatives
//!
//! Everything here is stateless and side-effect free; the fit driver and the
//! evaluator both call into this layer with explicit grid and index values,
//! so no data is shared between independent calls.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Node grid description, multi-index traversal, and support windows.
pub mod grid;

/// Piecewise-cubic natural-spline basis functions.
pub mod basis;
