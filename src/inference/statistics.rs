//! Goodness of fit, residual variance and the inverse Gram matrix.

use super::coefficient::coefficient_half_widths;
use crate::core::{FitOptions, FitReport, Model, Sample};
use crate::diagnostics::{diagnose_singular_values, ConditionSeverity};
use crate::distributions::t_critical;
use crate::solvers::svd::ScaledSvd;
use crate::solvers::RegressionError;

/// Compute fit statistics for `model` on the sample it was fit on.
///
/// R² is uncentered: `1 − RSS / Σy²`. The mean-centered form is reported
/// alongside as `centered_r_squared`.
pub fn compute_fit_statistics(
    model: &Model,
    sample: &Sample,
    options: &FitOptions,
) -> Result<FitReport, RegressionError> {
    options.validate()?;
    check_model(model, sample)?;
    let svd = ScaledSvd::new(sample.x(), options.rcond)?;
    fit_statistics(model, sample, options, &svd)
}

/// Residual degrees of freedom, once `model` is known to match the sample.
fn check_model(model: &Model, sample: &Sample) -> Result<usize, RegressionError> {
    if model.len() != sample.n_parameters() {
        return Err(RegressionError::ColumnCountMismatch {
            columns: sample.n_parameters(),
            coefficients: model.len(),
        });
    }
    sample.degrees_of_freedom()
}

/// Fit statistics reusing the decomposition `svd` of `sample.x()`.
pub(crate) fn fit_statistics(
    model: &Model,
    sample: &Sample,
    options: &FitOptions,
    svd: &ScaledSvd,
) -> Result<FitReport, RegressionError> {
    let x = sample.x();
    let y = sample.y();
    let n = sample.n_observations();
    let p = sample.n_parameters();
    let residual_df = check_model(model, sample)?;

    let mut rss = 0.0;
    let mut yss = 0.0;
    let mut y_sum = 0.0;
    for i in 0..n {
        let y_hat = model.predict_row(x, i);
        rss += (y_hat - y[i]) * (y_hat - y[i]);
        yss += y[i] * y[i];
        y_sum += y[i];
    }
    let y_mean = y_sum / n as f64;
    let tss: f64 = (0..n).map(|i| (y[i] - y_mean) * (y[i] - y_mean)).sum();

    let mse = rss / residual_df as f64;

    let xtx_inverse = svd.gram_inverse();
    let t = t_critical(options.confidence_level, residual_df).ok_or(
        RegressionError::InsufficientDegreesOfFreedom {
            observations: n,
            parameters: p,
        },
    )?;
    let half_widths = coefficient_half_widths(&xtx_inverse, mse, t);

    let diagnostic = diagnose_singular_values(svd.singular_values().to_vec());
    if matches!(
        diagnostic.severity,
        ConditionSeverity::High | ConditionSeverity::Severe
    ) {
        if let Some(warning) = &diagnostic.warning {
            tracing::warn!(condition_number = diagnostic.condition_number, "{}", warning);
        }
    }

    Ok(FitReport {
        r_squared: explained_fraction(rss, yss),
        centered_r_squared: explained_fraction(rss, tss),
        rss,
        mse,
        residual_df,
        xtx_inverse,
        half_widths,
        t_critical: t,
        confidence_level: options.confidence_level,
        condition_number: diagnostic.condition_number,
    })
}

/// `1 − rss / total`, with a zero-residual fit of an all-zero total counted as perfect.
fn explained_fraction(rss: f64, total: f64) -> f64 {
    if total > 0.0 {
        1.0 - rss / total
    } else if rss == 0.0 {
        1.0
    } else {
        f64::NAN
    }
}
