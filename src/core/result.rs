//! Fitted model, fit statistics and prediction output types.

use faer::{Col, Mat};
use serde::{Deserialize, Serialize};

/// Fitted coefficients, one per explanatory expression, in expression order.
#[derive(Debug, Clone)]
pub struct Model {
    coefficients: Col<f64>,
}

impl Model {
    pub fn new(coefficients: Col<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &Col<f64> {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Predicted response for row `i` of a design matrix with `len()` columns.
    pub(crate) fn predict_row(&self, design: &Mat<f64>, i: usize) -> f64 {
        let mut y_hat = 0.0;
        for j in 0..self.len() {
            y_hat += design[(i, j)] * self.coefficients[j];
        }
        y_hat
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.coefficients.iter().copied().collect()
    }
}

/// Goodness-of-fit statistics for a fitted model.
#[derive(Debug, Clone)]
pub struct FitReport {
    /// `1 − RSS / Σy²`. Uncentered: the total sum of squares is taken about zero.
    pub r_squared: f64,
    /// `1 − RSS / Σ(y − ȳ)²`.
    pub centered_r_squared: f64,
    /// Residual sum of squares.
    pub rss: f64,
    /// Mean squared error, `RSS / residual_df`.
    pub mse: f64,
    /// `rows − cols`.
    pub residual_df: usize,
    /// `(X'X)⁻¹`, retained for confidence widths at arbitrary covariates.
    pub xtx_inverse: Mat<f64>,
    /// Per-coefficient confidence half-widths.
    pub half_widths: Vec<f64>,
    /// Two-sided t quantile used for every half-width.
    pub t_critical: f64,
    pub confidence_level: f64,
    /// Condition number of the design matrix.
    pub condition_number: f64,
}

/// Fitted value and confidence band at one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Yhat")]
    pub y_hat: f64,
    #[serde(rename = "ConfWidth")]
    pub half_width: f64,
}

impl PredictionPoint {
    pub fn lower(&self) -> f64 {
        self.y_hat - self.half_width
    }

    pub fn upper(&self) -> f64 {
        self.y_hat + self.half_width
    }
}

/// One coefficient of the model with the expression it multiplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientReport {
    #[serde(rename = "ExpressionText")]
    pub expression: String,
    #[serde(rename = "Beta")]
    pub beta: f64,
    #[serde(rename = "ConfWidth")]
    pub half_width: f64,
}
