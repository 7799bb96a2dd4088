//! Design matrix and response vector construction.

use super::record::{MeasurementRecord, ResponseVariable};
use crate::expression::{evaluate_row, Expression};
use crate::solvers::RegressionError;
use faer::{Col, Mat};

/// A regression sample: design matrix X (one row per observation, one column
/// per explanatory expression) and response vector y.
#[derive(Debug, Clone)]
pub struct Sample {
    x: Mat<f64>,
    y: Col<f64>,
}

impl Sample {
    /// Create a sample from an existing design matrix and response.
    pub fn new(x: Mat<f64>, y: Col<f64>) -> Result<Self, RegressionError> {
        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }
        Ok(Self { x, y })
    }

    /// Create a sample from a flattened row-major design matrix.
    pub fn from_row_major(x: &[f64], y: &[f64], cols: usize) -> Result<Self, RegressionError> {
        let rows = y.len();
        if cols == 0 || x.len() != rows * cols {
            return Err(RegressionError::DimensionMismatch {
                x_rows: if cols == 0 { 0 } else { x.len() / cols },
                y_len: rows,
            });
        }
        let x = Mat::from_fn(rows, cols, |i, j| x[i * cols + j]);
        let y = Col::from_fn(rows, |i| y[i]);
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Mat<f64> {
        &self.x
    }

    pub fn y(&self) -> &Col<f64> {
        &self.y
    }

    /// Number of observations (rows).
    pub fn n_observations(&self) -> usize {
        self.x.nrows()
    }

    /// Number of model terms (columns).
    pub fn n_parameters(&self) -> usize {
        self.x.ncols()
    }

    /// Residual degrees of freedom, `rows − cols`, when positive.
    pub fn degrees_of_freedom(&self) -> Result<usize, RegressionError> {
        let n = self.n_observations();
        let p = self.n_parameters();
        if n <= p {
            return Err(RegressionError::InsufficientDegreesOfFreedom {
                observations: n,
                parameters: p,
            });
        }
        Ok(n - p)
    }
}

/// Builds a [`Sample`] from measurement records and explanatory expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleBuilder {
    response: ResponseVariable,
}

impl SampleBuilder {
    pub fn new(response: ResponseVariable) -> Self {
        Self { response }
    }

    /// Create a builder from a response variable name such as `NsPerOp`.
    pub fn for_response(name: &str) -> Result<Self, RegressionError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn response(&self) -> ResponseVariable {
        self.response
    }

    /// Evaluate the expressions at every record's size and collect the
    /// selected response.
    ///
    /// Row `i` of X and `y[i]` always come from the same record.
    pub fn build<E: Expression>(
        &self,
        records: &[MeasurementRecord],
        expressions: &[E],
    ) -> Result<Sample, RegressionError> {
        if expressions.is_empty() {
            return Err(RegressionError::ExpressionSyntax {
                position: 0,
                message: "no explanatory expressions".to_string(),
            });
        }
        let cols = expressions.len();

        let mut x = Vec::with_capacity(records.len() * cols);
        let mut y = Vec::with_capacity(records.len());
        for record in records {
            let response = record.response(self.response);
            if !response.is_finite() {
                return Err(RegressionError::malformed(
                    "data",
                    format!("{} of `{}` is not finite", self.response, record.name),
                ));
            }
            y.push(response);

            let start = x.len();
            evaluate_row(expressions, record.size, &mut x);
            if let Some(j) = x[start..].iter().position(|v| !v.is_finite()) {
                return Err(RegressionError::malformed(
                    "data",
                    format!(
                        "`{}` is not finite at {}",
                        expressions[j].render(),
                        record.size
                    ),
                ));
            }
        }

        tracing::debug!(
            rows = y.len(),
            cols,
            response = %self.response,
            "built regression sample"
        );
        Sample::from_row_major(&x, &y, cols)
    }
}
