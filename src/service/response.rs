//! Wire encoding of fit results and rejections.

use crate::core::{CoefficientReport, PredictionPoint};
use crate::solvers::RegressionError;
use serde::{Deserialize, Serialize};

/// Successful fit: the prediction band, the coefficient table and fit quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResponse {
    #[serde(rename = "ResultLine")]
    pub result_line: Vec<PredictionPoint>,
    #[serde(rename = "ResultModel")]
    pub result_model: Vec<CoefficientReport>,
    #[serde(rename = "R2")]
    pub r_squared: f64,
    #[serde(rename = "CenteredR2")]
    pub centered_r_squared: f64,
    #[serde(rename = "MSE")]
    pub mse: f64,
}

/// A rejected request: which input failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRequest {
    #[serde(rename = "Field")]
    pub field: String,
    #[serde(rename = "Error")]
    pub error: String,
}

impl From<&RegressionError> for RejectedRequest {
    fn from(err: &RegressionError) -> Self {
        Self {
            field: err.field().to_string(),
            error: err.to_string(),
        }
    }
}

/// Transport-independent response: status code, content type and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ServiceResponse {
    pub(crate) fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(e) => Self {
                status: 500,
                content_type: "text/plain",
                body: format!("failed to encode response: {e}"),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 400 for undecodable fields, 422 for data that cannot be fit, 500 for bad
/// server-side options.
pub(crate) fn status_for(err: &RegressionError) -> u16 {
    match err {
        RegressionError::InsufficientDegreesOfFreedom { .. }
        | RegressionError::SingularDesignMatrix(_)
        | RegressionError::DimensionMismatch { .. }
        | RegressionError::ColumnCountMismatch { .. } => 422,
        RegressionError::InvalidOptions(_) => 500,
        _ => 400,
    }
}
