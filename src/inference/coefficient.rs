//! Per-coefficient confidence half-widths.

use crate::core::{CoefficientReport, FitReport, Model};
use crate::distributions::half_width;
use crate::expression::Expression;
use faer::Mat;

/// `t · sqrt(MSE · (X'X)⁻¹ⱼⱼ)` for every coefficient `j`.
pub fn coefficient_half_widths(xtx_inverse: &Mat<f64>, mse: f64, t_critical: f64) -> Vec<f64> {
    (0..xtx_inverse.nrows())
        .map(|j| {
            let variance = (mse * xtx_inverse[(j, j)]).max(0.0);
            half_width(t_critical, variance.sqrt())
        })
        .collect()
}

/// Pair each coefficient with the rendered expression it multiplies.
pub fn coefficient_report<E: Expression>(
    model: &Model,
    report: &FitReport,
    expressions: &[E],
) -> Vec<CoefficientReport> {
    expressions
        .iter()
        .zip(model.coefficients().iter())
        .zip(report.half_widths.iter())
        .map(|((expression, &beta), &half_width)| CoefficientReport {
            expression: expression.render(),
            beta,
            half_width,
        })
        .collect()
}
