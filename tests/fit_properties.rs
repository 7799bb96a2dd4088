//! End-to-end behaviour of the fitting pipeline.

mod common;

use approx::assert_relative_eq;
use benchfit::prelude::*;
use common::{generate_scaling_records, geometric_sizes, records_from, sort_records};

fn fit(
    records: &[MeasurementRecord],
    text: &str,
    solver: SolverType,
) -> Result<(Vec<Formula>, FittedOls), RegressionError> {
    let expressions = parse_list(text, "N")?;
    let sample = SampleBuilder::default().build(records, &expressions)?;
    let fitted = OlsRegressor::builder().solver(solver).build()?.fit(&sample)?;
    Ok((expressions, fitted))
}

// ============================================================================
// Pinned values
// ============================================================================

#[test]
fn test_sort_benchmark_linear_fit() {
    let (expressions, fitted) = fit(&sort_records(), "N", SolverType::Svd).unwrap();

    // β = ΣNy / ΣN² with ΣN² = 101010100
    assert_relative_eq!(
        fitted.model().coefficients()[0],
        194.671299998713,
        max_relative = 1e-10
    );
    let report = fitted.report();
    assert_eq!(report.residual_df, 3);
    assert_relative_eq!(report.r_squared, 0.9995073595154779, max_relative = 1e-10);
    assert_relative_eq!(report.mse, 628914353.9944234, max_relative = 1e-8);
    assert_relative_eq!(report.t_critical, 3.182446305284263, max_relative = 1e-9);
    assert_relative_eq!(report.xtx_inverse[(0, 0)], 1.0 / 101010100.0, max_relative = 1e-10);

    let coefficients = fitted.coefficients(&expressions);
    assert_eq!(coefficients.len(), 1);
    assert_eq!(coefficients[0].expression, "N");
    assert_relative_eq!(coefficients[0].half_width, 7.940986136898471, max_relative = 1e-8);
}

#[test]
fn test_sort_benchmark_band_is_linear_in_n() {
    let (expressions, fitted) = fit(&sort_records(), "N", SolverType::Svd).unwrap();
    let grid = GridEvaluator::new(0.0, 10000.0, 11)
        .unwrap()
        .evaluate(&expressions);
    let band = fitted.predict(&grid).unwrap();

    assert_eq!(band.len(), 11);
    assert_eq!(band[0].y_hat, 0.0);
    assert_eq!(band[0].half_width, 0.0);
    // With a single N column the band width is |x| times the coefficient half-width.
    let coef_hw = fitted.report().half_widths[0];
    for point in &band {
        assert_relative_eq!(point.half_width, point.x * coef_hw, max_relative = 1e-9, epsilon = 1e-12);
    }
}

#[test]
fn test_solvers_agree_on_sort_benchmark() {
    let (_, svd) = fit(&sort_records(), "N, 1", SolverType::Svd).unwrap();
    let (_, normal) = fit(&sort_records(), "N, 1", SolverType::NormalEquations).unwrap();
    for j in 0..2 {
        assert_relative_eq!(
            svd.model().coefficients()[j],
            normal.model().coefficients()[j],
            max_relative = 1e-8
        );
    }
    assert_relative_eq!(svd.report().mse, normal.report().mse, max_relative = 1e-8);
}

// ============================================================================
// Recovery and rank
// ============================================================================

#[test]
fn test_exact_recovery_of_n_log_n() {
    let sizes = geometric_sizes(16.0, 2.0, 10);
    let records = generate_scaling_records(&sizes, [3.0, 2.0, 5.0], 0.0, 1);

    for solver in [SolverType::Svd, SolverType::NormalEquations] {
        let (_, fitted) = fit(&records, "N * log(N), N, 1", solver).unwrap();
        let beta = fitted.model().to_vec();
        assert_relative_eq!(beta[0], 3.0, max_relative = 1e-6);
        assert_relative_eq!(beta[1], 2.0, max_relative = 1e-6);
        assert_relative_eq!(beta[2], 5.0, max_relative = 1e-4);
        assert!(fitted.report().r_squared > 1.0 - 1e-12);
    }
}

#[test]
fn test_noisy_recovery_within_confidence_width() {
    let sizes = geometric_sizes(10.0, 1.5, 25);
    let records = generate_scaling_records(&sizes, [0.0, 40.0, 1000.0], 50.0, 7);
    let (expressions, fitted) = fit(&records, "N, 1", SolverType::Svd).unwrap();

    let coefficients = fitted.coefficients(&expressions);
    assert!((coefficients[0].beta - 40.0).abs() < 3.0 * coefficients[0].half_width);
    assert!(coefficients.iter().all(|c| c.half_width > 0.0));
}

#[test]
fn test_go_style_default_transform() {
    let sizes = geometric_sizes(10.0, 10.0, 4);
    let records = records_from(&sizes, |n| 2.5 * n * n.ln() + 100.0);
    let (expressions, fitted) = fit(&records, "math.Log(N) * N, 1.0", SolverType::Svd).unwrap();

    assert_eq!(expressions[0].render(), "log(N) * N");
    assert_relative_eq!(fitted.model().coefficients()[0], 2.5, max_relative = 1e-8);
    assert_relative_eq!(fitted.model().coefficients()[1], 100.0, max_relative = 1e-6);
}

#[test]
fn test_collinear_columns_rejected() {
    let records = records_from(&[1.0, 2.0, 3.0, 4.0], |n| n);
    for solver in [SolverType::Svd, SolverType::NormalEquations] {
        let err = fit(&records, "N, 2 * N", solver).unwrap_err();
        assert!(
            matches!(err, RegressionError::SingularDesignMatrix(_)),
            "{:?} gave {:?}",
            solver,
            err
        );
    }
}

#[test]
fn test_perfect_fit_has_no_degrees_of_freedom() {
    let records = records_from(&[10.0, 20.0], |n| 3.0 * n + 1.0);
    let err = fit(&records, "N, 1", SolverType::Svd).unwrap_err();
    assert!(matches!(
        err,
        RegressionError::InsufficientDegreesOfFreedom { .. }
    ));
}

#[test]
fn test_underdetermined_rejected() {
    let records = records_from(&[10.0], |n| n);
    let err = fit(&records, "N, 1", SolverType::Svd).unwrap_err();
    assert!(matches!(
        err,
        RegressionError::InsufficientDegreesOfFreedom { .. }
    ));
}

#[test]
fn test_non_finite_basis_rejected() {
    // log(0) = -inf
    let records = records_from(&[0.0, 1.0, 2.0, 3.0], |n| n);
    let err = fit(&records, "log(N), 1", SolverType::Svd).unwrap_err();
    assert_eq!(err.field(), "data");
}

// ============================================================================
// Bands and grids
// ============================================================================

#[test]
fn test_band_widens_away_from_data() {
    let sizes = geometric_sizes(100.0, 2.0, 8);
    let records = generate_scaling_records(&sizes, [0.0, 12.0, 300.0], 25.0, 3);
    let (expressions, fitted) = fit(&records, "N, 1", SolverType::Svd).unwrap();

    let grid = GridEvaluator::new(20000.0, 100000.0, 50)
        .unwrap()
        .evaluate(&expressions);
    let band = fitted.predict(&grid).unwrap();
    for pair in band.windows(2) {
        assert!(pair[1].half_width > pair[0].half_width);
    }
    assert!(band.iter().all(|p| p.lower() <= p.y_hat && p.y_hat <= p.upper()));

    let inside = GridEvaluator::new(3000.0, 3000.0, 1)
        .unwrap()
        .evaluate(&expressions);
    assert!(fitted.predict(&inside).unwrap()[0].half_width < band[0].half_width);
}

#[test]
fn test_higher_confidence_gives_wider_band() {
    let sizes = geometric_sizes(10.0, 3.0, 6);
    let records = generate_scaling_records(&sizes, [0.0, 5.0, 80.0], 10.0, 11);
    let expressions = parse_list("N, 1", "N").unwrap();
    let sample = SampleBuilder::default().build(&records, &expressions).unwrap();

    let narrow = OlsRegressor::builder()
        .confidence_level(0.90)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();
    let wide = OlsRegressor::builder()
        .confidence_level(0.99)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    assert_eq!(narrow.model().to_vec(), wide.model().to_vec());
    for j in 0..2 {
        assert!(wide.report().half_widths[j] > narrow.report().half_widths[j]);
    }
}

#[test]
fn test_predict_rejects_mismatched_grid() {
    let (_, fitted) = fit(&sort_records(), "N", SolverType::Svd).unwrap();
    let no_terms: Vec<Formula> = Vec::new();
    let grid = GridEvaluator::new(0.0, 10000.0, 11)
        .unwrap()
        .evaluate(&no_terms);
    assert_eq!(
        fitted.predict(&grid).unwrap_err(),
        RegressionError::ColumnCountMismatch {
            columns: 0,
            coefficients: 1
        }
    );

    let extra = parse_list("N, 1", "N").unwrap();
    let grid = GridEvaluator::new(0.0, 10000.0, 11).unwrap().evaluate(&extra);
    let err = fitted.predict(&grid).unwrap_err();
    assert_eq!(err.field(), "data");
    assert!(prediction_band(fitted.model(), fitted.report(), &grid).is_err());
}

#[test]
fn test_out_of_range_confidence_is_an_options_error() {
    let err = OlsRegressor::builder()
        .confidence_level(1.5)
        .build()
        .unwrap_err();
    assert_eq!(err, OptionsError::InvalidConfidenceLevel(1.5));

    // options assembled without the builder are checked at fit time
    let sample = SampleBuilder::default()
        .build(&sort_records(), &parse_list("N", "N").unwrap())
        .unwrap();
    let options = FitOptions {
        confidence_level: 1.5,
        ..FitOptions::default()
    };
    let err = OlsRegressor::new(options.clone()).fit(&sample).unwrap_err();
    assert_eq!(
        err,
        RegressionError::InvalidOptions(OptionsError::InvalidConfidenceLevel(1.5))
    );
    assert_eq!(err.field(), "options");

    let model = OlsRegressor::default().estimate(&sample).unwrap();
    assert!(matches!(
        compute_fit_statistics(&model, &sample, &options),
        Err(RegressionError::InvalidOptions(_))
    ));
}

#[test]
fn test_grid_endpoints_exact() {
    let grid = GridEvaluator::new(0.1, 0.7, 7).unwrap();
    let points = grid.points();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0], 0.1);
    assert_eq!(points[6], 0.7);

    assert_eq!(GridEvaluator::new(3.0, 9.0, 1).unwrap().points(), vec![3.0]);
}

#[test]
fn test_zero_steps_rejected() {
    let err = GridEvaluator::new(0.0, 1.0, 0).unwrap_err();
    assert!(matches!(err, RegressionError::InvalidStepCount(_)));
    assert_eq!(err.field(), "nlinesteps");
}

#[test]
fn test_reversed_bounds_descend() {
    let points = GridEvaluator::new(10.0, 0.0, 3).unwrap().points();
    assert_eq!(points, vec![10.0, 5.0, 0.0]);
}
