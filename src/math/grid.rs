//! Regular node grid and multi-index arithmetic.
//!
//! ## Purpose
//!
//! This module describes the regular lattice of nodes that anchors the basis
//! functions: per-dimension bounds, node counts, and derived spacings. It
//! also provides the multi-index type used to identify a single node and to
//! walk the cartesian product of per-dimension index windows.
//!
//! ## Design notes
//!
//! * **Fixed dimension cap**: the design is bounded to at most 4 independent
//!   variables. The bound is checked at construction, never assumed; the
//!   solver's workspace formulas and the boundary-type logic are written for
//!   small fixed-size per-dimension arrays.
//! * **Local fixed-size copies**: grid data is held in `[_; MAX_DIMS]`
//!   arrays inside the struct, so evaluation never chases references.
//! * **Explicit values, no shared state**: the grid and the multi-index are
//!   plain values passed into and out of the basis evaluator, which keeps
//!   concurrent fits on independent grids safe without locking.
//!
//! ## Invariants
//!
//! * `1 <= ndim <= MAX_DIMS`, every `nodes[i] >= 4`.
//! * Every spacing `dx[i]` is finite and nonzero.
//! * Linearization is mixed-radix with dimension 0 varying fastest.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SplineError;

/// Maximum number of independent variables.
///
/// An explicit structural limit: the packed-storage formulas of the solver
/// and the boundary-type logic assume small fixed-size per-dimension arrays.
pub const MAX_DIMS: usize = 4;

// ============================================================================
// NodeGrid
// ============================================================================

/// Immutable description of a regular node lattice.
///
/// Constructed once per fit, reused unchanged across evaluation calls for as
/// long as the same coefficient vector is used.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGrid<T: Float> {
    ndim: usize,
    xmin: [T; MAX_DIMS],
    dx: [T; MAX_DIMS],
    nodes: [usize; MAX_DIMS],
}

impl<T: Float> NodeGrid<T> {
    /// Build a grid description from per-dimension bounds and node counts.
    ///
    /// # Errors
    /// * `InvalidDimensions` if `nodes.len()` is outside [1, 4]
    /// * `MismatchedInputs` if the bound slices disagree with `nodes.len()`
    /// * `TooFewNodes` if any dimension has fewer than 4 nodes
    /// * `DegenerateAxis` if any axis has `xmin == xmax` or a non-finite span
    pub fn new(xmin: &[T], xmax: &[T], nodes: &[usize]) -> Result<Self, SplineError> {
        let ndim = nodes.len();
        if ndim == 0 || ndim > MAX_DIMS {
            return Err(SplineError::InvalidDimensions { got: ndim });
        }
        if xmin.len() != ndim || xmax.len() != ndim {
            return Err(SplineError::MismatchedInputs {
                x_len: xmin.len().min(xmax.len()),
                y_len: ndim,
            });
        }

        let mut xmin_local = [T::zero(); MAX_DIMS];
        let mut dx_local = [T::zero(); MAX_DIMS];
        let mut nodes_local = [0_usize; MAX_DIMS];

        for i in 0..ndim {
            if nodes[i] < 4 {
                return Err(SplineError::TooFewNodes {
                    dim: i,
                    got: nodes[i],
                });
            }
            if xmin[i] == xmax[i] {
                return Err(SplineError::DegenerateAxis { dim: i });
            }
            let span = xmax[i] - xmin[i];
            let dx = span / T::from(nodes[i] - 1).unwrap();
            if !dx.is_finite() || dx == T::zero() {
                return Err(SplineError::DegenerateAxis { dim: i });
            }
            xmin_local[i] = xmin[i];
            dx_local[i] = dx;
            nodes_local[i] = nodes[i];
        }

        Ok(Self {
            ndim,
            xmin: xmin_local,
            dx: dx_local,
            nodes: nodes_local,
        })
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Node count along `dim`.
    #[inline]
    pub fn nodes(&self, dim: usize) -> usize {
        self.nodes[dim]
    }

    /// Node spacing along `dim`.
    #[inline]
    pub fn spacing(&self, dim: usize) -> T {
        self.dx[dim]
    }

    /// Lower bound along `dim`.
    #[inline]
    pub fn origin(&self, dim: usize) -> T {
        self.xmin[dim]
    }

    /// Total coefficient count: the product of all node counts.
    pub fn ncol(&self) -> usize {
        self.nodes[..self.ndim].iter().product()
    }

    /// Number of grid cells: the product of `nodes[i] - 1`.
    pub fn ncells(&self) -> usize {
        self.nodes[..self.ndim].iter().map(|&n| n - 1).product()
    }

    /// Coordinate of node `ib` along `dim`.
    #[inline]
    pub fn node_position(&self, dim: usize, ib: usize) -> T {
        self.xmin[dim] + self.dx[dim] * T::from(ib).unwrap()
    }

    /// Linearize a multi-index into a coefficient index.
    ///
    /// Mixed-radix (Horner) encoding with dimension 0 varying fastest:
    /// accumulating `icol = nodes[k] * icol + ib[k]` from the highest
    /// dimension down.
    pub fn linear_index(&self, ib: &MultiIndex) -> usize {
        let mut icol = 0;
        for k in (0..self.ndim).rev() {
            icol = icol * self.nodes[k] + ib.get(k);
        }
        icol
    }

    /// Multi-index of the node with linearized coefficient index `icol`.
    ///
    /// Inverse of [`NodeGrid::linear_index`].
    pub fn node_from_index(&self, mut icol: usize) -> MultiIndex {
        let mut ib = MultiIndex::zero(self.ndim);
        for k in 0..self.ndim {
            ib.set(k, icol % self.nodes[k]);
            icol /= self.nodes[k];
        }
        ib
    }

    /// Per-dimension index window of nodes whose basis function has nonzero
    /// support at `point`.
    ///
    /// Derived from the point's fractional grid coordinate, clamped to the
    /// valid range; spans at most 4 nodes per dimension. Points outside the
    /// grid clamp to the window anchored at the nearest boundary cell, which
    /// contains every function that is nonzero there (the boundary functions
    /// extend linearly beyond the grid).
    pub fn support_window(&self, point: &[T]) -> SupportWindow {
        let mut lo = [0_usize; MAX_DIMS];
        let mut hi = [0_usize; MAX_DIMS];
        for i in 0..self.ndim {
            let t = (point[i] - self.xmin[i]) / self.dx[i];
            let cell = match <isize as num_traits::NumCast>::from(t.floor()) {
                Some(c) => c.max(0) as usize,
                None => 0,
            };
            let cell = cell.min(self.nodes[i] - 2);
            lo[i] = cell.saturating_sub(1);
            hi[i] = (cell + 2).min(self.nodes[i] - 1);
        }
        SupportWindow {
            lo,
            hi,
            ndim: self.ndim,
        }
    }

    /// Multi-index of the node nearest to `point`, or `None` when the point
    /// lies more than half a spacing outside the node lattice along some
    /// axis.
    pub fn nearest_node(&self, point: &[T]) -> Option<MultiIndex> {
        let mut ib = MultiIndex::zero(self.ndim);
        for i in 0..self.ndim {
            let t = (point[i] - self.xmin[i]) / self.dx[i];
            let r = <isize as num_traits::NumCast>::from(t.round())?;
            if r < 0 || r as usize > self.nodes[i] - 1 {
                return None;
            }
            ib.set(i, r as usize);
        }
        Some(ib)
    }
}

// ============================================================================
// MultiIndex
// ============================================================================

/// Integer vector identifying one grid node, one component per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiIndex {
    idx: [usize; MAX_DIMS],
    ndim: usize,
}

impl MultiIndex {
    /// The all-zero index in `ndim` dimensions.
    pub fn zero(ndim: usize) -> Self {
        Self {
            idx: [0; MAX_DIMS],
            ndim,
        }
    }

    /// Build from explicit components.
    pub fn from_slice(components: &[usize]) -> Self {
        let mut idx = [0; MAX_DIMS];
        idx[..components.len()].copy_from_slice(components);
        Self {
            idx,
            ndim: components.len(),
        }
    }

    /// Component along `dim`.
    #[inline]
    pub fn get(&self, dim: usize) -> usize {
        self.idx[dim]
    }

    /// Set the component along `dim`.
    #[inline]
    pub fn set(&mut self, dim: usize, value: usize) {
        self.idx[dim] = value;
    }

    /// Advance to the next index within `window`, dimension 0 fastest.
    ///
    /// Returns `false` once the window is exhausted (the index is left at
    /// the window start in that case).
    pub fn advance(&mut self, window: &SupportWindow) -> bool {
        for i in 0..self.ndim {
            if self.idx[i] < window.hi[i] {
                self.idx[i] += 1;
                return true;
            }
            self.idx[i] = window.lo[i];
        }
        false
    }
}

// ============================================================================
// SupportWindow
// ============================================================================

/// Per-dimension inclusive index range `[lo, hi]` of nonzero-support nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportWindow {
    lo: [usize; MAX_DIMS],
    hi: [usize; MAX_DIMS],
    ndim: usize,
}

impl SupportWindow {
    /// Lower bound along `dim`.
    #[inline]
    pub fn lo(&self, dim: usize) -> usize {
        self.lo[dim]
    }

    /// Upper bound (inclusive) along `dim`.
    #[inline]
    pub fn hi(&self, dim: usize) -> usize {
        self.hi[dim]
    }

    /// Multi-index positioned at the window start.
    pub fn start(&self) -> MultiIndex {
        MultiIndex {
            idx: self.lo,
            ndim: self.ndim,
        }
    }

    /// Total number of nodes in the window.
    pub fn node_count(&self) -> usize {
        (0..self.ndim).map(|i| self.hi[i] - self.lo[i] + 1).product()
    }
}

// ============================================================================
// Tests
// ============================================================================
