//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental building blocks used throughout the
//! crate:
//! - The crate-wide error type with stable numeric codes
//! - The diagnostic collaborator trait for textual error reporting
//! - The reusable solver workspace buffer
//!
//! These carry no numerical logic of their own.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Crate-wide error type and numeric error codes.
pub mod errors;

/// Diagnostic reporting collaborator.
pub mod diagnostics;

/// Reusable solver workspace buffer.
pub mod scratch;
