//! Incremental least-squares reduction engine.
//!
//! ## Purpose
//!
//! This module solves `min ‖W(A·c − b)‖²` for systems whose rows arrive one
//! at a time and may vastly outnumber the columns. Rows are folded into a
//! packed upper-triangular factor by orthogonal transforms as they arrive,
//! so memory stays `O(n²)` in the column count no matter how many rows are
//! submitted — the defining engineering property of this solver.
//!
//! ## Design notes
//!
//! * **Two-phase protocol**: rows are fed through [`IncrementalSolver::submit_row`]
//!   and the system is solved by [`IncrementalSolver::finish`]. The two
//!   operations are explicit; there is no sentinel row index.
//! * **Dual reduction strategy**: a single staged row is rotated into the
//!   factor with Givens rotations; when several rows are staged, one block
//!   Householder reflector per pivot column zeroes them all at once. Both
//!   preserve the residual norm, which accumulates as a sum of squared
//!   projections.
//! * **Caller-owned storage**: the packed factor and the row staging area
//!   live in a scratch buffer supplied at `begin`; capacity below
//!   `n(n+5)/2 + 1` is rejected up front.
//! * **Numeric policy**: a zero `hypot` during reduction means the incoming
//!   row has nothing to contribute in that column and is skipped, not
//!   treated as singular. Singularity is only diagnosed at `finish` against
//!   a small absolute tolerance on the pivots.
//!
//! ## Key concepts
//!
//! * **Packed triangle**: row `i` of the factor stores columns `i..n` plus
//!   the augmented right-hand side, giving `n(n+3)/2` entries in total.
//! * **Staging area**: the scratch capacity beyond the triangle holds
//!   incoming rows densely; a flush triangularizes them and frees the space.
//!
//! ## Invariants
//!
//! * Row indices increase by exactly 1 per submission, starting at 1.
//! * At most `n` rows are active in triangularized form at any time.
//! * The residual accumulator only ever grows.
//!
//! ## Non-goals
//!
//! * This is not a general-purpose linear-algebra module; it is specialized
//!   to the row-streaming least-squares use case.
//! * No rank-revealing pivoting; column order is fixed by the caller.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SplineError;

/// Absolute tolerance on diagonal pivots at finalization.
const PIVOT_TOLERANCE: f64 = 1e-18;

// ============================================================================
// IncrementalSolver
// ============================================================================

/// Streaming least-squares solver over a caller-owned scratch buffer.
///
/// Created by [`IncrementalSolver::begin`], consumed by
/// [`IncrementalSolver::finish`].
#[derive(Debug)]
pub struct IncrementalSolver<'a, T: Float> {
    /// Column count of the system.
    n: usize,
    /// Length of the packed triangle (including the RHS column).
    tri_len: usize,
    /// Staged-row capacity of the scratch area beyond the triangle.
    max_staged: usize,
    /// Rows currently staged and not yet triangularized.
    staged: usize,
    /// Total rows accepted so far.
    rows_seen: usize,
    /// Accumulated sum of squared residual projections.
    residual_ssq: T,
    /// Caller-owned workspace: packed triangle followed by the staging area.
    scratch: &'a mut [T],
}

impl<'a, T: Float> IncrementalSolver<'a, T> {
    /// Minimum scratch length for a system with `n` columns.
    ///
    /// The packed triangle with its augmented RHS column takes `n(n+3)/2`
    /// entries; at least one full staged row of `n + 1` entries must fit
    /// behind it, for `n(n+5)/2 + 1` in total.
    #[inline]
    pub fn required_scratch(n: usize) -> usize {
        n * (n + 5) / 2 + 1
    }

    /// Initialize the solver over `scratch` for an `n`-column system.
    ///
    /// # Errors
    /// * `ScratchTooSmall` if `scratch.len() < n(n+5)/2 + 1`
    pub fn begin(n: usize, scratch: &'a mut [T]) -> Result<Self, SplineError> {
        let need = Self::required_scratch(n);
        if scratch.len() < need {
            return Err(SplineError::ScratchTooSmall {
                got: scratch.len(),
                need,
            });
        }
        let tri_len = n * (n + 3) / 2;
        let max_staged = (scratch.len() - tri_len) / (n + 1);
        for v in scratch[..tri_len].iter_mut() {
            *v = T::zero();
        }
        Ok(Self {
            n,
            tri_len,
            max_staged,
            staged: 0,
            rows_seen: 0,
            residual_ssq: T::zero(),
            scratch,
        })
    }

    /// Total rows accepted so far.
    #[inline]
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Submit one least-squares row.
    ///
    /// `index` must be exactly one greater than the previous submission
    /// (the first row carries index 1). The row is staged; when the staging
    /// area fills, the staged rows are triangularized against the factor
    /// and the space is reclaimed.
    ///
    /// # Errors
    /// * `RowOutOfSequence` if `index != rows_seen + 1`
    /// * `MismatchedInputs` if `coefficients.len() != n`
    pub fn submit_row(
        &mut self,
        index: usize,
        coefficients: &[T],
        rhs: T,
    ) -> Result<(), SplineError> {
        if index != self.rows_seen + 1 {
            return Err(SplineError::RowOutOfSequence {
                got: index,
                expected: self.rows_seen + 1,
            });
        }
        if coefficients.len() != self.n {
            return Err(SplineError::MismatchedInputs {
                x_len: coefficients.len(),
                y_len: self.n,
            });
        }

        let width = self.n + 1;
        let off = self.tri_len + self.staged * width;
        self.scratch[off..off + self.n].copy_from_slice(coefficients);
        self.scratch[off + self.n] = rhs;
        self.staged += 1;
        self.rows_seen += 1;

        if self.staged == self.max_staged {
            self.flush();
        }
        Ok(())
    }

    /// Flush staged rows, verify the system is determined, back-substitute.
    ///
    /// Writes the coefficient vector into `solution` (progressively, from
    /// the last component backwards, so a singular failure leaves the
    /// components solved so far in place) and returns the residual norm.
    ///
    /// # Errors
    /// * `CoefficientBufferTooSmall` if `solution.len() < n`
    /// * `TooFewRows` if fewer than `n` rows were submitted in total
    /// * `SingularSystem` on a (numerically) zero diagonal pivot
    pub fn finish(mut self, solution: &mut [T]) -> Result<T, SplineError> {
        if solution.len() < self.n {
            return Err(SplineError::CoefficientBufferTooSmall {
                got: solution.len(),
                need: self.n,
            });
        }
        self.flush();
        if self.rows_seen < self.n {
            return Err(SplineError::TooFewRows {
                got: self.rows_seen,
                need: self.n,
            });
        }

        let n = self.n;
        let tol = T::from(PIVOT_TOLERANCE).unwrap();
        for i in (0..n).rev() {
            let row = Self::tri_offset(n, i);
            let pivot = self.scratch[row];
            if pivot.abs() <= tol {
                return Err(SplineError::SingularSystem { column: i });
            }
            let mut sum = self.scratch[row + (n - i)];
            for j in (i + 1)..n {
                sum = sum - self.scratch[row + (j - i)] * solution[j];
            }
            solution[i] = sum / pivot;
        }
        Ok(self.residual_ssq.sqrt())
    }

    // ========================================================================
    // Reduction
    // ========================================================================

    /// Offset of factor row `i` in the packed triangle.
    ///
    /// Row `i` holds columns `i..n` followed by the RHS entry.
    #[inline]
    fn tri_offset(n: usize, i: usize) -> usize {
        i * (2 * n + 3 - i) / 2
    }

    /// Triangularize all staged rows into the factor.
    fn flush(&mut self) {
        match self.staged {
            0 => {}
            1 => self.reduce_givens(),
            k => self.reduce_householder(k),
        }
        self.staged = 0;
    }

    /// Fold a single staged row into the factor with Givens rotations.
    fn reduce_givens(&mut self) {
        let n = self.n;
        let (tri, stage) = self.scratch.split_at_mut(self.tri_len);
        let row = &mut stage[..n + 1];

        for j in 0..n {
            let a = row[j];
            if a == T::zero() {
                continue;
            }
            let base = Self::tri_offset(n, j);
            let d = tri[base];
            let s = d.hypot(a);
            if s == T::zero() {
                continue;
            }
            let c = d / s;
            let sn = a / s;
            tri[base] = s;
            for col in (j + 1)..=n {
                let r = tri[base + (col - j)];
                let v = row[col];
                tri[base + (col - j)] = c * r + sn * v;
                row[col] = c * v - sn * r;
            }
            row[j] = T::zero();
        }
        // Whatever survives in the RHS slot is orthogonal to the column
        // space processed so far.
        self.residual_ssq = self.residual_ssq + row[n] * row[n];
    }

    /// Fold `k` staged rows into the factor with one Householder reflector
    /// per pivot column.
    fn reduce_householder(&mut self, k: usize) {
        let n = self.n;
        let width = n + 1;
        let (tri, stage) = self.scratch.split_at_mut(self.tri_len);

        for j in 0..n {
            let base = Self::tri_offset(n, j);
            let pivot = tri[base];

            let mut ssq = pivot * pivot;
            for i in 0..k {
                let u = stage[i * width + j];
                ssq = ssq + u * u;
            }
            if ssq == T::zero() {
                continue;
            }
            // Sign chosen against cancellation: a positive pivot gets a
            // negated new diagonal.
            let alpha = if pivot > T::zero() {
                -ssq.sqrt()
            } else {
                ssq.sqrt()
            };
            let v0 = pivot - alpha;
            let beta = alpha * v0;
            if beta == T::zero() {
                continue;
            }
            tri[base] = alpha;

            for col in (j + 1)..=n {
                let c0 = tri[base + (col - j)];
                let mut t = c0 * v0;
                for i in 0..k {
                    t = t + stage[i * width + col] * stage[i * width + j];
                }
                t = t / beta;
                tri[base + (col - j)] = c0 + t * v0;
                for i in 0..k {
                    stage[i * width + col] =
                        stage[i * width + col] + t * stage[i * width + j];
                }
            }
            for i in 0..k {
                stage[i * width + j] = T::zero();
            }
        }

        for i in 0..k {
            let r = stage[i * width + n];
            self.residual_ssq = self.residual_ssq + r * r;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
