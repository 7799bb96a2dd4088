//! Confidence bands for the fitted mean at arbitrary covariates.
//!
//! At a covariate row `x₀` the half-width is `t · sqrt(MSE · x₀ (X'X)⁻¹ x₀ᵀ)`,
//! the per-coefficient formula generalised from unit basis vectors to any
//! point, inside or outside the fitted range.

use crate::core::{FitReport, Grid, Model, PredictionPoint};
use crate::distributions::half_width;
use crate::solvers::RegressionError;
use faer::Mat;

/// `row_i(design) · m · row_i(design)ᵀ`.
pub(crate) fn quadratic_form(m: &Mat<f64>, design: &Mat<f64>, i: usize) -> f64 {
    let p = m.nrows();
    let mut sum = 0.0;
    for a in 0..p {
        let mut inner = 0.0;
        for b in 0..p {
            inner += m[(a, b)] * design[(i, b)];
        }
        sum += design[(i, a)] * inner;
    }
    sum
}

/// Combines a fitted model and its statistics into prediction bands.
#[derive(Debug, Clone, Copy)]
pub struct PredictionBander<'a> {
    model: &'a Model,
    mse: f64,
    xtx_inverse: &'a Mat<f64>,
    t_critical: f64,
}

impl<'a> PredictionBander<'a> {
    pub fn new(model: &'a Model, report: &'a FitReport) -> Self {
        Self {
            model,
            mse: report.mse,
            xtx_inverse: &report.xtx_inverse,
            t_critical: report.t_critical,
        }
    }

    fn half_width_at(&self, design: &Mat<f64>, i: usize) -> f64 {
        let leverage = quadratic_form(self.xtx_inverse, design, i).max(0.0);
        half_width(self.t_critical, (self.mse * leverage).sqrt())
    }

    /// Predicted value and half-width at every grid point, in grid order.
    ///
    /// The grid must be evaluated with the expressions the model was fit on.
    pub fn band(&self, grid: &Grid) -> Result<Vec<PredictionPoint>, RegressionError> {
        let design = grid.design();
        let coefficients = self.model.len();
        for columns in [design.ncols(), self.xtx_inverse.nrows(), self.xtx_inverse.ncols()] {
            if columns != coefficients {
                return Err(RegressionError::ColumnCountMismatch {
                    columns,
                    coefficients,
                });
            }
        }
        Ok(grid
            .points()
            .iter()
            .enumerate()
            .map(|(i, &x)| PredictionPoint {
                x,
                y_hat: self.model.predict_row(design, i),
                half_width: self.half_width_at(design, i),
            })
            .collect())
    }
}

/// Prediction band of `model` over `grid`.
pub fn prediction_band(
    model: &Model,
    report: &FitReport,
    grid: &Grid,
) -> Result<Vec<PredictionPoint>, RegressionError> {
    PredictionBander::new(model, report).band(grid)
}
