//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the core numerical algorithms:
//! - The incremental least-squares solver (orthogonal row reduction)
//! - Data-sparseness accounting for smoothing constraints
//!
//! These operate on explicit buffers and grid values supplied by the engine
//! layer; they perform no validation of their own beyond their documented
//! contracts.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Incremental least-squares reduction engine.
pub mod solver;

/// Data-sparseness accounting for smoothing constraints.
pub mod smoothing;
