use approx::assert_relative_eq;
use natspline_rs::prelude::*;

fn fitted_1d() -> SplineFitResult<f64> {
    NatSpline::new()
        .dimensions(1)
        .bounds(&[0.0], &[3.0])
        .nodes(&[4])
        .build()
        .unwrap()
        .fit(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0])
        .unwrap()
}

#[test]
fn test_end_to_end_1d_node_interpolation() {
    let fit = fitted_1d();
    assert_relative_eq!(fit.residual_norm(), 0.0, epsilon = 1e-9);
    for (x, y) in [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)] {
        assert_relative_eq!(fit.evaluate(&[x]).unwrap(), y, epsilon = 1e-9);
    }
}

#[test]
fn test_end_to_end_2d_affine_recovery() {
    // f(x, y) = x + y lies in the natural-spline space, so sampling it at
    // the 16 grid nodes recovers it exactly everywhere.
    let mut points = Vec::new();
    let mut values = Vec::new();
    for j in 0..4 {
        for i in 0..4 {
            let (x, y) = (i as f64 / 3.0, j as f64 / 3.0);
            points.extend_from_slice(&[x, y]);
            values.push(x + y);
        }
    }
    let fit = NatSpline::new()
        .dimensions(2)
        .bounds(&[0.0, 0.0], &[1.0, 1.0])
        .nodes(&[4, 4])
        .build()
        .unwrap()
        .fit(&points, &values)
        .unwrap();

    assert_relative_eq!(fit.residual_norm(), 0.0, epsilon = 1e-6);
    for (x, y) in [(0.25, 0.5), (0.1, 0.7), (2.0 / 3.0, 1.0 / 3.0), (0.9, 0.9)] {
        assert_relative_eq!(fit.evaluate(&[x, y]).unwrap(), x + y, epsilon = 1e-6);
    }
    // Partial derivatives of an affine function are constants.
    assert_relative_eq!(
        fit.evaluate_derivative(&[0.4, 0.6], &[1, 0]).unwrap(),
        1.0,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        fit.evaluate_derivative(&[0.4, 0.6], &[0, 1]).unwrap(),
        1.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_zero_derivative_orders_equal_plain_evaluation() {
    let fit = fitted_1d();
    for &x in &[0.0, 0.3, 1.5, 2.8, 3.0, 4.2, -0.7] {
        assert_eq!(
            fit.evaluate(&[x]).unwrap(),
            fit.evaluate_derivative(&[x], &[0]).unwrap()
        );
    }
}

#[test]
fn test_first_derivative_matches_finite_differences() {
    let fit = fitted_1d();
    let h = 1e-6;
    for &x in &[0.4, 1.1, 1.5, 2.6] {
        let fd = (fit.evaluate(&[x + h]).unwrap() - fit.evaluate(&[x - h]).unwrap()) / (2.0 * h);
        assert_relative_eq!(
            fit.evaluate_derivative(&[x], &[1]).unwrap(),
            fd,
            epsilon = 1e-4
        );
    }
}

#[test]
fn test_natural_boundary_condition() {
    let fit = fitted_1d();
    assert_relative_eq!(
        fit.evaluate_derivative(&[0.0], &[2]).unwrap(),
        0.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        fit.evaluate_derivative(&[3.0], &[2]).unwrap(),
        0.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_linear_extrapolation_outside_the_grid() {
    let fit = fitted_1d();

    // Continuous across the boundary.
    let h = 1e-7;
    assert_relative_eq!(
        fit.evaluate(&[3.0 - h]).unwrap(),
        fit.evaluate(&[3.0 + h]).unwrap(),
        epsilon = 1e-5
    );

    // Exactly linear beyond it: value follows the boundary slope, the
    // second derivative vanishes on both sides.
    let f3 = fit.evaluate(&[3.0]).unwrap();
    let d3 = fit.evaluate_derivative(&[3.0], &[1]).unwrap();
    for &t in &[0.5, 1.0, 2.5] {
        assert_relative_eq!(fit.evaluate(&[3.0 + t]).unwrap(), f3 + t * d3, epsilon = 1e-9);
        assert_relative_eq!(
            fit.evaluate_derivative(&[3.0 + t], &[1]).unwrap(),
            d3,
            epsilon = 1e-9
        );
        assert_eq!(fit.evaluate_derivative(&[3.0 + t], &[2]).unwrap(), 0.0);
    }

    let f0 = fit.evaluate(&[0.0]).unwrap();
    let d0 = fit.evaluate_derivative(&[0.0], &[1]).unwrap();
    assert_relative_eq!(fit.evaluate(&[-1.5]).unwrap(), f0 - 1.5 * d0, epsilon = 1e-9);
}

#[test]
fn test_point_weights_match_row_duplication() {
    // A weight of sqrt(2) contributes to the normal equations exactly like
    // submitting the same point twice at unit weight.
    let model = NatSpline::new()
        .dimensions(1)
        .bounds(&[0.0], &[3.0])
        .nodes(&[4])
        .build()
        .unwrap();

    let duplicated = model
        .fit(
            &[0.0, 1.0, 2.0, 3.0, 1.5, 1.5],
            &[0.0, 1.0, 0.0, 1.0, 0.5, 0.5],
        )
        .unwrap();
    let weighted = model
        .fit_weighted(
            &[0.0, 1.0, 2.0, 3.0, 1.5],
            &[0.0, 1.0, 0.0, 1.0, 0.5],
            &[1.0, 1.0, 1.0, 1.0, f64::sqrt(2.0)],
        )
        .unwrap();
    for (a, b) in duplicated
        .coefficients()
        .iter()
        .zip(weighted.coefficients().iter())
    {
        assert_relative_eq!(a, b, epsilon = 1e-9);
    }
    assert_relative_eq!(
        duplicated.residual_norm(),
        weighted.residual_norm(),
        epsilon = 1e-9
    );
}

#[test]
fn test_sparse_data_needs_smoothing() {
    // Data only near the ends leaves the middle basis columns empty.
    let points = [0.0, 0.1, 0.2, 0.3, 0.4, 6.6, 6.7, 6.8, 6.9, 7.0];
    let values = [1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0];

    let bare = NatSpline::new()
        .dimensions(1)
        .bounds(&[0.0], &[7.0])
        .nodes(&[8])
        .build()
        .unwrap();
    let err = bare.fit(&points, &values).unwrap_err();
    assert!(matches!(err, SplineError::SingularSystem { .. }));
    assert_eq!(err.code(), 204);

    let smoothed = NatSpline::new()
        .dimensions(1)
        .bounds(&[0.0], &[7.0])
        .nodes(&[8])
        .smoothing(1.0)
        .build()
        .unwrap()
        .fit(&points, &values)
        .unwrap();
    assert!(smoothed.rows_processed() > points.len());
    for k in 0..=70 {
        let v = smoothed.evaluate(&[k as f64 * 0.1]).unwrap();
        assert!(v.is_finite() && v > 0.0 && v < 3.0);
    }
}

#[test]
fn test_underdetermined_fit_fails_cleanly() {
    let model = NatSpline::new()
        .dimensions(1)
        .bounds(&[0.0], &[3.0])
        .nodes(&[4])
        .build()
        .unwrap();
    let err = model.fit(&[1.5], &[1.0]).unwrap_err();
    assert_eq!(err, SplineError::TooFewRows { got: 1, need: 4 });
    assert_eq!(err.code(), 203);
}

#[test]
fn test_derivative_order_validation_at_query_time() {
    let fit = fitted_1d();
    let err = fit.evaluate_derivative(&[1.0], &[3]).unwrap_err();
    assert_eq!(err, SplineError::InvalidDerivative { dim: 0, got: 3 });
    assert_eq!(err.code(), 107);

    let err = fit.evaluate(&[1.0, 2.0]).unwrap_err();
    assert_eq!(err, SplineError::MismatchedInputs { x_len: 2, y_len: 1 });
}

#[test]
fn test_f32_fits_run_end_to_end() {
    let fit = NatSpline::<f32>::new()
        .dimensions(1)
        .bounds(&[0.0], &[3.0])
        .nodes(&[4])
        .build()
        .unwrap()
        .fit(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0])
        .unwrap();
    for (x, y) in [(0.0_f32, 0.0_f32), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)] {
        assert_relative_eq!(fit.evaluate(&[x]).unwrap(), y, epsilon = 1e-4);
    }
}
