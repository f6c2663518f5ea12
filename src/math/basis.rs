//! Piecewise-cubic natural-spline basis functions.
//!
//! ## Purpose
//!
//! This module evaluates the tensor-product basis function associated with a
//! grid node: the value, or a requested partial derivative, of the product
//! of one-dimensional C² piecewise cubics centered on the node.
//!
//! ## Design notes
//!
//! * **Three function kinds**: a node's one-dimensional factor depends only
//!   on its position along the axis. The two nodes nearest each edge carry
//!   boundary-constrained cubics; all others carry the compactly supported
//!   interior "chapeau" cubic.
//! * **Enum dispatch**: the kind × derivative-order selection is an explicit
//!   `match` over [`BasisKind`] and the order, not a derived numeric branch
//!   code.
//! * **Natural boundary condition**: the boundary cubics are identically
//!   zero (with zero curvature) on their outward side and become exactly
//!   linear beyond their node, which pins the second derivative to zero at
//!   the grid edge and yields a linear, curvature-free extrapolation outside
//!   the data range.
//! * **Pure**: no state beyond the grid description and the multi-index
//!   being evaluated; both are explicit arguments.
//!
//! ## Key concepts
//!
//! * **Local coordinate**: each factor is evaluated in `z`, the offset from
//!   the node location scaled by the inverse spacing. Odd derivative orders
//!   pick up sign flips from the chain rule on `z`.
//! * **Support**: interior factors vanish for `|x - xb| >= 2*dx`; boundary
//!   factors vanish on one side only.
//!
//! ## Invariants
//!
//! * Derivative orders are restricted to {0, 1, 2}; anything else is
//!   rejected, never silently mapped onto an out-of-range formula.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::grid::{MultiIndex, NodeGrid};
use crate::primitives::errors::SplineError;

// ============================================================================
// BasisKind
// ============================================================================

/// One-dimensional basis function family, determined by node position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisKind {
    /// One of the two nodes nearest the lower grid edge.
    LeftBoundary,
    /// A node at least two spacings from either edge.
    Interior,
    /// One of the two nodes nearest the upper grid edge.
    RightBoundary,
}

impl BasisKind {
    /// Classify node `ib` on an axis with `nodes` nodes.
    ///
    /// On a 4-node axis every node is a boundary node, two per edge.
    #[inline]
    pub fn for_node(ib: usize, nodes: usize) -> Self {
        if ib + 2 >= nodes {
            BasisKind::RightBoundary
        } else if ib < 2 {
            BasisKind::LeftBoundary
        } else {
            BasisKind::Interior
        }
    }
}

// ============================================================================
// One-dimensional factors
// ============================================================================

/// Interior ("chapeau") cubic: value or derivative of order `deriv` at `x`
/// for a node at `xb` with spacing `dx`.
///
/// In `z = |x - xb|/dx - 2` the value is `-z³/4` for `z < 0`, plus `(z+1)³`
/// when `z + 1 < 0`; the function and its first derivative vanish for
/// `|x - xb| >= 2*dx`.
fn interior<T: Float>(deriv: usize, x: T, xb: T, dx: T) -> T {
    let four = T::from(4.0).unwrap();
    let u = (x - xb).abs() / dx;
    let z = u - T::from(2.0).unwrap();
    if z >= T::zero() {
        return T::zero();
    }
    let z1 = z + T::one();
    match deriv {
        0 => {
            let mut v = -z * z * z / four;
            if z1 < T::zero() {
                v = v + z1 * z1 * z1;
            }
            v
        }
        1 => {
            // d/du, then the chain rule sign of d|x-xb|/dx.
            let mut d = -T::from(0.75).unwrap() * z * z;
            if z1 < T::zero() {
                d = d + T::from(3.0).unwrap() * z1 * z1;
            }
            let s = if x < xb { -T::one() } else { T::one() };
            s * d / dx
        }
        _ => {
            let mut d = -T::from(1.5).unwrap() * z;
            if z1 < T::zero() {
                d = d + T::from(6.0).unwrap() * z1;
            }
            d / (dx * dx)
        }
    }
}

/// Right-boundary cubic in `z = (x - xb)/dx + 2`: zero for `z <= 0`,
/// `z³/2 - (z-1)³⁺` for `0 < z < 2`, and exactly linear (`3z - 3`) for
/// `z >= 2`.
fn right_boundary<T: Float>(deriv: usize, z: T, dx: T) -> T {
    let two = T::from(2.0).unwrap();
    let three = T::from(3.0).unwrap();
    if z <= T::zero() {
        return T::zero();
    }
    if z >= two {
        return match deriv {
            0 => three * z - three,
            1 => three / dx,
            _ => T::zero(),
        };
    }
    let z1 = z - T::one();
    match deriv {
        0 => {
            let mut v = z * z * z / two;
            if z1 > T::zero() {
                v = v - z1 * z1 * z1;
            }
            v
        }
        1 => {
            let mut d = T::from(1.5).unwrap() * z * z;
            if z1 > T::zero() {
                d = d - three * z1 * z1;
            }
            d / dx
        }
        _ => {
            let mut d = three * z;
            if z1 > T::zero() {
                d = d - T::from(6.0).unwrap() * z1;
            }
            d / (dx * dx)
        }
    }
}

/// One-dimensional factor for a node of the given kind.
///
/// The left-boundary factor is the mirror image of the right-boundary one;
/// odd derivative orders pick up a sign flip from the chain rule.
pub fn basis_1d<T: Float>(kind: BasisKind, deriv: usize, x: T, xb: T, dx: T) -> T {
    let two = T::from(2.0).unwrap();
    match kind {
        BasisKind::Interior => interior(deriv, x, xb, dx),
        BasisKind::RightBoundary => {
            let z = (x - xb) / dx + two;
            right_boundary(deriv, z, dx)
        }
        BasisKind::LeftBoundary => {
            let z = (xb - x) / dx + two;
            let v = right_boundary(deriv, z, dx);
            if deriv == 1 {
                -v
            } else {
                v
            }
        }
    }
}

// ============================================================================
// Tensor product
// ============================================================================

/// Evaluate the multidimensional basis function of node `ib` at `point`.
///
/// Returns the linearized coefficient index for `ib` together with the
/// product of the one-dimensional factors, each taken at the derivative
/// order requested for its dimension.
///
/// # Errors
/// * `InvalidDerivative` if any requested order is outside {0, 1, 2}
pub fn tensor_basis<T: Float>(
    grid: &NodeGrid<T>,
    point: &[T],
    deriv: &[usize],
    ib: &MultiIndex,
) -> Result<(usize, T), SplineError> {
    let mut value = T::one();
    for k in 0..grid.ndim() {
        if deriv[k] > 2 {
            return Err(SplineError::InvalidDerivative {
                dim: k,
                got: deriv[k],
            });
        }
        let kind = BasisKind::for_node(ib.get(k), grid.nodes(k));
        let xb = grid.node_position(k, ib.get(k));
        value = value * basis_1d(kind, deriv[k], point[k], xb, grid.spacing(k));
    }
    Ok((grid.linear_index(ib), value))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn classification_by_position() {
        assert_eq!(BasisKind::for_node(0, 10), BasisKind::LeftBoundary);
        assert_eq!(BasisKind::for_node(1, 10), BasisKind::LeftBoundary);
        assert_eq!(BasisKind::for_node(2, 10), BasisKind::Interior);
        assert_eq!(BasisKind::for_node(7, 10), BasisKind::Interior);
        assert_eq!(BasisKind::for_node(8, 10), BasisKind::RightBoundary);
        assert_eq!(BasisKind::for_node(9, 10), BasisKind::RightBoundary);
        // On a 4-node axis all nodes are boundary-constrained.
        assert_eq!(BasisKind::for_node(1, 4), BasisKind::LeftBoundary);
        assert_eq!(BasisKind::for_node(2, 4), BasisKind::RightBoundary);
    }

    #[test]
    fn interior_closed_form_values() {
        // At the node: -(-2)³/4 + (-1)³ = 2 - 1 = 1.
        assert_relative_eq!(basis_1d(BasisKind::Interior, 0, 5.0, 5.0, 1.0), 1.0);
        // One spacing away: -(-1)³/4 = 0.25.
        assert_relative_eq!(basis_1d(BasisKind::Interior, 0, 6.0, 5.0, 1.0), 0.25);
        assert_relative_eq!(basis_1d(BasisKind::Interior, 0, 4.0, 5.0, 1.0), 0.25);
        // Compact support: zero at and beyond two spacings.
        assert_eq!(basis_1d(BasisKind::Interior, 0, 7.0, 5.0, 1.0), 0.0);
        assert_eq!(basis_1d(BasisKind::Interior, 0, 2.9, 5.0, 1.0), 0.0);
        // Smooth peak: first derivative zero at the node.
        assert_relative_eq!(basis_1d(BasisKind::Interior, 1, 5.0, 5.0, 1.0), 0.0);
        // Odd symmetry of the first derivative.
        let d = basis_1d(BasisKind::Interior, 1, 5.7, 5.0, 1.0);
        assert_relative_eq!(basis_1d(BasisKind::Interior, 1, 4.3, 5.0, 1.0), -d);
    }

    #[test]
    fn interior_derivatives_match_finite_differences() {
        let h = 1e-6;
        for &x in &[3.3, 4.1, 4.9, 5.0, 5.5, 6.2, 6.9] {
            let f = |x: f64| basis_1d(BasisKind::Interior, 0, x, 5.0, 1.0);
            let d1 = basis_1d(BasisKind::Interior, 1, x, 5.0, 1.0);
            let d2 = basis_1d(BasisKind::Interior, 2, x, 5.0, 1.0);
            assert_relative_eq!(d1, (f(x + h) - f(x - h)) / (2.0 * h), epsilon = 1e-5);
            assert_relative_eq!(
                d2,
                (f(x + h) - 2.0 * f(x) + f(x - h)) / (h * h),
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn boundary_linear_extension() {
        // Right-boundary node at xb = 9, dx = 1: linear for x >= xb.
        for &x in &[9.0, 9.5, 11.0] {
            let z = (x - 9.0) + 2.0;
            assert_relative_eq!(
                basis_1d(BasisKind::RightBoundary, 0, x, 9.0, 1.0),
                3.0 * z - 3.0
            );
            assert_relative_eq!(basis_1d(BasisKind::RightBoundary, 1, x, 9.0, 1.0), 3.0);
            assert_eq!(basis_1d(BasisKind::RightBoundary, 2, x, 9.0, 1.0), 0.0);
        }
        // Identically zero two spacings to the left.
        assert_eq!(basis_1d(BasisKind::RightBoundary, 0, 6.9, 9.0, 1.0), 0.0);
        assert_eq!(basis_1d(BasisKind::RightBoundary, 1, 6.9, 9.0, 1.0), 0.0);
    }

    #[test]
    fn boundary_is_c2_at_the_seams() {
        let h = 1e-6;
        // Value, slope, and curvature continuous where the pieces meet.
        for &x in &[7.0, 8.0, 9.0] {
            for deriv in 0..=2 {
                let below = basis_1d(BasisKind::RightBoundary, deriv, x - h, 9.0, 1.0);
                let above = basis_1d(BasisKind::RightBoundary, deriv, x + h, 9.0, 1.0);
                assert_relative_eq!(below, above, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn left_boundary_mirrors_right() {
        // Node 0 at x = 0, dx = 1 mirrors a right-boundary node.
        for &off in &[-1.5, -0.5, 0.0, 0.7, 1.9] {
            let l = basis_1d(BasisKind::LeftBoundary, 0, off, 0.0, 1.0);
            let r = basis_1d(BasisKind::RightBoundary, 0, -off, 0.0, 1.0);
            assert_relative_eq!(l, r);
            let ld = basis_1d(BasisKind::LeftBoundary, 1, off, 0.0, 1.0);
            let rd = basis_1d(BasisKind::RightBoundary, 1, -off, 0.0, 1.0);
            assert_relative_eq!(ld, -rd);
        }
    }

    #[test]
    fn tensor_product_multiplies_factors() {
        let grid = NodeGrid::new(&[0.0, 0.0], &[9.0, 9.0], &[10, 10]).unwrap();
        let ib = MultiIndex::from_slice(&[5, 4]);
        let point = [5.3, 4.6];
        let (icol, v) = tensor_basis(&grid, &point, &[0, 0], &ib).unwrap();
        assert_eq!(icol, 45);
        let fx = basis_1d(BasisKind::Interior, 0, 5.3, 5.0, 1.0);
        let fy = basis_1d(BasisKind::Interior, 0, 4.6, 4.0, 1.0);
        assert_relative_eq!(v, fx * fy);
    }

    #[test]
    fn rejects_out_of_range_derivative_order() {
        let grid = NodeGrid::new(&[0.0], &[9.0], &[10]).unwrap();
        let ib = MultiIndex::from_slice(&[5]);
        let err = tensor_basis(&grid, &[5.0], &[3], &ib).unwrap_err();
        assert_eq!(err, SplineError::InvalidDerivative { dim: 0, got: 3 });
    }
}
