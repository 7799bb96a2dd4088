//! Solver trait and the error type shared by every fitting stage.

use crate::core::{OptionsError, Sample};
use faer::Col;
use thiserror::Error;

/// Errors that can occur while building, fitting or evaluating a model.
///
/// Every variant is an input validation failure: a rejected request produces
/// no partial result and re-running it with the same inputs fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// The explanatory expression list could not be parsed.
    #[error("syntax error at position {position}: {message}")]
    ExpressionSyntax { position: usize, message: String },

    /// The response selector is not one of the known response fields.
    #[error("unknown response variable `{0}`")]
    UnknownResponseVariable(String),

    /// The evaluation grid step count is below one or above
    /// [`GridEvaluator::MAX_STEPS`](crate::core::GridEvaluator::MAX_STEPS).
    #[error("invalid number of line steps: `{0}`")]
    InvalidStepCount(String),

    /// Too few observations relative to the number of model terms.
    #[error(
        "insufficient degrees of freedom: {observations} observations for {parameters} parameters"
    )]
    InsufficientDegreesOfFreedom {
        observations: usize,
        parameters: usize,
    },

    /// The design matrix is rank deficient or the solve did not converge.
    #[error("singular design matrix: {0}")]
    SingularDesignMatrix(String),

    /// A request field could not be decoded.
    #[error("malformed {field}: {message}")]
    MalformedInputData { field: String, message: String },

    /// The response vector does not line up with the design matrix.
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    /// A design matrix was paired with a model fit on a different expression list.
    #[error("design has {columns} columns but the model has {coefficients} coefficients")]
    ColumnCountMismatch { columns: usize, coefficients: usize },

    /// The fit options failed validation.
    #[error("invalid fit options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

impl RegressionError {
    pub(crate) fn malformed(field: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedInputData {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Name of the request input responsible for the failure.
    pub fn field(&self) -> &str {
        match self {
            Self::ExpressionSyntax { .. } => "xtransform",
            Self::UnknownResponseVariable(_) => "yvar",
            Self::InvalidStepCount(_) => "nlinesteps",
            Self::MalformedInputData { field, .. } => field,
            Self::InvalidOptions(_) => "options",
            Self::InsufficientDegreesOfFreedom { .. }
            | Self::SingularDesignMatrix(_)
            | Self::DimensionMismatch { .. }
            | Self::ColumnCountMismatch { .. } => "data",
        }
    }
}

/// A linear least-squares solver: finds β minimising `‖Xβ − y‖₂`.
///
/// Implementations must not modify the sample and must report a failed solve
/// as [`RegressionError::SingularDesignMatrix`].
pub trait LeastSquaresSolver {
    /// Solve for the coefficient vector, one entry per design column.
    fn solve(&self, sample: &Sample) -> Result<Col<f64>, RegressionError>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Check the shape preconditions shared by every solver.
pub(crate) fn validate_shape(sample: &Sample) -> Result<(), RegressionError> {
    let x = sample.x();
    let y = sample.y();
    if x.nrows() != y.nrows() {
        return Err(RegressionError::DimensionMismatch {
            x_rows: x.nrows(),
            y_len: y.nrows(),
        });
    }
    if x.ncols() == 0 || x.nrows() < x.ncols() {
        return Err(RegressionError::InsufficientDegreesOfFreedom {
            observations: x.nrows(),
            parameters: x.ncols(),
        });
    }
    Ok(())
}
