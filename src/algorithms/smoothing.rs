//! Data-sparseness accounting for smoothing constraints.
//!
//! ## Purpose
//!
//! This module decides where the grid needs regularization. It buckets the
//! weight of every data point at its nearest node, compares each node's
//! observed weight against its statistically expected share, and describes
//! the curvature-penalty rows the fit driver should inject at nodes that
//! come up short.
//!
//! ## Key concepts
//!
//! * **Observed weight**: the sum of the weights of all data points whose
//!   nearest node is this one. Points more than half a spacing outside the
//!   lattice along any axis are excluded from this accounting only; they
//!   still produce an ordinary fit row.
//! * **Expected weight**: total accumulated weight divided by the number of
//!   grid cells, halved once per grid-boundary side the node touches, since
//!   boundary nodes preside over smaller cells.
//! * **Sparse node**: observed weight below 0.75 of expected. The penalty
//!   strength scales with the shortfall, so barely sparse nodes are nudged
//!   while empty regions are pinned down.
//!
//! ## Invariants
//!
//! * Constraint rows cover exactly the upper triangle of the node's Hessian:
//!   one row per axis pair `(i, j)` with `i <= j`.
//! * A second-derivative constraint is never issued along an axis on which
//!   the node sits at the grid boundary; the boundary condition already
//!   pins that derivative to zero, so a first-derivative row is issued
//!   instead.

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
use crate::math::grid::{MultiIndex, NodeGrid, MAX_DIMS};

/// A node is sparse when its observed weight falls below this fraction of
/// its expected weight.
const SPARSE_FRACTION: f64 = 0.75;

// ============================================================================
// SparsityMap
// ============================================================================

/// Per-node accumulated data weight, used to locate data-sparse regions.
#[derive(Debug, Clone)]
pub struct SparsityMap<T> {
    observed: Vec<T>,
    total: T,
}

impl<T: Float> SparsityMap<T> {
    /// Create an all-zero map over the nodes of `grid`.
    pub fn new(grid: &NodeGrid<T>) -> Self {
        Self {
            observed: vec![T::zero(); grid.ncol()],
            total: T::zero(),
        }
    }

    /// Bucket `weight` at the node nearest to `point`.
    ///
    /// Points more than half a spacing outside the node lattice along some
    /// axis have no nearest node and are ignored here.
    pub fn accumulate(&mut self, grid: &NodeGrid<T>, point: &[T], weight: T) {
        if let Some(ib) = grid.nearest_node(point) {
            let icol = grid.linear_index(&ib);
            self.observed[icol] = self.observed[icol] + weight;
            self.total = self.total + weight;
        }
    }

    /// Total weight accumulated so far.
    #[inline]
    pub fn total_weight(&self) -> T {
        self.total
    }

    /// Observed weight bucketed at node `ib`.
    #[inline]
    pub fn observed(&self, grid: &NodeGrid<T>, ib: &MultiIndex) -> T {
        self.observed[grid.linear_index(ib)]
    }

    /// Expected weight for node `ib`: the per-cell share of the total,
    /// halved once per grid-boundary side the node touches.
    pub fn expected(&self, grid: &NodeGrid<T>, ib: &MultiIndex) -> T {
        let half = T::from(0.5).unwrap();
        let mut expect = self.total / T::from(grid.ncells()).unwrap();
        for i in 0..grid.ndim() {
            if ib.get(i) == 0 {
                expect = expect * half;
            }
            if ib.get(i) == grid.nodes(i) - 1 {
                expect = expect * half;
            }
        }
        expect
    }

    /// Weight shortfall at node `ib`, or `None` when the node has seen
    /// enough data to need no regularization.
    pub fn deficiency(&self, grid: &NodeGrid<T>, ib: &MultiIndex) -> Option<T> {
        let expect = self.expected(grid, ib);
        let observed = self.observed(grid, ib);
        if observed < T::from(SPARSE_FRACTION).unwrap() * expect {
            Some(expect - observed)
        } else {
            None
        }
    }
}

// ============================================================================
// Constraint rows
// ============================================================================

/// One derivative-penalty row to inject at a sparse node: the derivative
/// orders to evaluate the basis with, and the row weight. The right-hand
/// side of a constraint row is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSpec<T> {
    /// Per-dimension derivative order for the basis evaluation.
    pub deriv: [usize; MAX_DIMS],
    /// Row weight, already scaled by the shortfall and the smoothing weight.
    pub weight: T,
}

/// Describe the constraint rows for a sparse node with the given weight
/// shortfall.
///
/// One row per upper-triangle entry `(i, j)`, `i <= j`, of the node's
/// Hessian. Diagonal entries penalize the plain second derivative along
/// axis `i` at weight `deficiency * smoothing`; off-diagonal entries
/// penalize the mixed first derivative along axes `i` and `j` at twice
/// that weight, matching the Hessian's symmetric double count. Where the
/// node sits on the grid boundary along axis `i`, the diagonal row demotes
/// to a first-derivative penalty.
pub fn constraint_specs<T: Float>(
    grid: &NodeGrid<T>,
    ib: &MultiIndex,
    deficiency: T,
    smoothing: T,
) -> Vec<ConstraintSpec<T>> {
    let two = T::from(2.0).unwrap();
    let base = deficiency * smoothing;
    let mut specs = Vec::new();
    for i in 0..grid.ndim() {
        for j in i..grid.ndim() {
            let mut deriv = [0_usize; MAX_DIMS];
            let weight;
            if i == j {
                let on_edge = ib.get(i) == 0 || ib.get(i) == grid.nodes(i) - 1;
                deriv[i] = if on_edge { 1 } else { 2 };
                weight = base;
            } else {
                deriv[i] = 1;
                deriv[j] = 1;
                weight = two * base;
            }
            specs.push(ConstraintSpec { deriv, weight });
        }
    }
    specs
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_1d() -> NodeGrid<f64> {
        NodeGrid::new(&[0.0], &[9.0], &[10]).unwrap()
    }

    #[test]
    fn buckets_weight_at_nearest_node() {
        let g = grid_1d();
        let mut map = SparsityMap::new(&g);
        map.accumulate(&g, &[4.4], 2.0);
        map.accumulate(&g, &[3.6], 1.0);
        map.accumulate(&g, &[0.1], 0.5);
        assert_relative_eq!(map.observed(&g, &MultiIndex::from_slice(&[4])), 3.0);
        assert_relative_eq!(map.observed(&g, &MultiIndex::from_slice(&[0])), 0.5);
        assert_relative_eq!(map.total_weight(), 3.5);
    }

    #[test]
    fn far_outside_points_are_not_counted() {
        let g = grid_1d();
        let mut map = SparsityMap::new(&g);
        map.accumulate(&g, &[9.6], 1.0);
        map.accumulate(&g, &[-0.7], 1.0);
        assert_eq!(map.total_weight(), 0.0);
        // Just within half a spacing still lands on the edge node.
        map.accumulate(&g, &[9.4], 1.0);
        assert_relative_eq!(map.observed(&g, &MultiIndex::from_slice(&[9])), 1.0);
        assert_relative_eq!(map.total_weight(), 1.0);
    }

    #[test]
    fn expected_weight_halves_at_boundaries() {
        let g = NodeGrid::new(&[0.0, 0.0], &[3.0, 3.0], &[4, 4]).unwrap();
        let mut map = SparsityMap::new(&g);
        map.accumulate(&g, &[1.0, 1.0], 9.0);
        // 9 cells, so one unit per cell in the interior.
        assert_relative_eq!(map.expected(&g, &MultiIndex::from_slice(&[1, 1])), 1.0);
        // Edge node: one boundary side touched.
        assert_relative_eq!(map.expected(&g, &MultiIndex::from_slice(&[0, 2])), 0.5);
        // Corner node: two sides touched.
        assert_relative_eq!(map.expected(&g, &MultiIndex::from_slice(&[3, 0])), 0.25);
    }

    #[test]
    fn sparse_threshold_uses_expected_fraction() {
        let g = grid_1d();
        let mut map = SparsityMap::new(&g);
        // Nine units over nine cells: expected 1.0 at interior nodes.
        for _ in 0..9 {
            map.accumulate(&g, &[4.0], 1.0);
        }
        let starved = MultiIndex::from_slice(&[7]);
        let fed = MultiIndex::from_slice(&[4]);
        assert_relative_eq!(map.deficiency(&g, &starved).unwrap(), 1.0);
        assert!(map.deficiency(&g, &fed).is_none());
    }

    #[test]
    fn one_dimensional_constraints() {
        let g = grid_1d();
        let interior = constraint_specs(&g, &MultiIndex::from_slice(&[5]), 1.0, 0.5);
        assert_eq!(interior.len(), 1);
        assert_eq!(interior[0].deriv[0], 2);
        assert_relative_eq!(interior[0].weight, 0.5);
        // Boundary node demotes to a slope penalty.
        let edge = constraint_specs(&g, &MultiIndex::from_slice(&[0]), 1.0, 0.5);
        assert_eq!(edge[0].deriv[0], 1);
    }

    #[test]
    fn two_dimensional_constraints_cover_upper_triangle() {
        let g = NodeGrid::new(&[0.0, 0.0], &[5.0, 5.0], &[6, 6]).unwrap();
        let specs = constraint_specs(&g, &MultiIndex::from_slice(&[2, 3]), 2.0, 1.0);
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].deriv[..2], [2, 0]);
        assert_relative_eq!(specs[0].weight, 2.0);
        assert_eq!(specs[1].deriv[..2], [1, 1]);
        assert_relative_eq!(specs[1].weight, 4.0);
        assert_eq!(specs[2].deriv[..2], [0, 2]);
        assert_relative_eq!(specs[2].weight, 2.0);
    }

    #[test]
    fn mixed_boundary_node_demotes_only_the_edge_axis() {
        let g = NodeGrid::new(&[0.0, 0.0], &[5.0, 5.0], &[6, 6]).unwrap();
        let specs = constraint_specs(&g, &MultiIndex::from_slice(&[0, 3]), 1.0, 1.0);
        assert_eq!(specs[0].deriv[..2], [1, 0]);
        assert_eq!(specs[1].deriv[..2], [1, 1]);
        assert_eq!(specs[2].deriv[..2], [0, 2]);
    }
}
