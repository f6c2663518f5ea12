//! Reusable workspace buffer for the incremental solver.
//!
//! ## Purpose
//!
//! This module provides [`SolverScratch`], the caller-owned workspace the
//! incremental least-squares solver reduces rows into. Owning the buffer at
//! the call site keeps repeated fits allocation-free and makes the memory
//! ceiling explicit: the solver never allocates behind the caller's back.
//!
//! ## Design notes
//!
//! * **Grow-only**: `ensure_len` grows the buffer on demand but never
//!   shrinks it, so a scratch reused across fits stabilizes at the largest
//!   required size.
//! * **Explicit capacity**: the solver checks the buffer length against its
//!   workspace formula and fails with `ScratchTooSmall` rather than growing
//!   it itself. Undersizing on purpose is a supported way to probe the
//!   capacity requirement.
//!
//! ## Invariants
//!
//! * Length is monotonically non-decreasing across `ensure_len` calls.
//! * Contents are zeroed on `reset`, not on every use.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// SolverScratch
// ============================================================================

/// Caller-owned workspace buffer for the incremental solver.
#[derive(Debug, Clone)]
pub struct SolverScratch<T> {
    buf: Vec<T>,
}

impl<T: Float> SolverScratch<T> {
    /// Create an empty scratch buffer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create a scratch buffer with exactly `len` zeroed entries.
    pub fn with_len(len: usize) -> Self {
        let mut s = Self::new();
        s.ensure_len(len);
        s
    }

    /// Grow the buffer to at least `len` zeroed entries; never shrinks.
    pub fn ensure_len(&mut self, len: usize) {
        if self.buf.len() < len {
            self.buf.resize(len, T::zero());
        }
    }

    /// Current usable length.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer currently holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Zero the contents without changing the length.
    pub fn reset(&mut self) {
        for v in self.buf.iter_mut() {
            *v = T::zero();
        }
    }

    /// View the full buffer as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: Float> Default for SolverScratch<T> {
    fn default() -> Self {
        Self::new()
    }
}
