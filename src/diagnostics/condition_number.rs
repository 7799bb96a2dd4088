//! Condition number diagnostics for design matrices.
//!
//! The condition number is a measure of how sensitive a matrix is to numerical
//! errors. A high condition number indicates that small changes in the input
//! can lead to large changes in the output, making the regression numerically
//! unstable.
//!
//! Columns are scaled to unit norm first, so a term such as `N·log(N)` next to
//! a constant `1` is not penalised for its magnitude alone, only for
//! collinearity.
//!
//! # Interpretation
//!
//! - κ < 30: Well-conditioned, stable
//! - 30 ≤ κ < 100: Moderate collinearity
//! - 100 ≤ κ < 1000: High collinearity, potential instability
//! - κ ≥ 1000: Severe collinearity, numerical instability likely
//!
//! # References
//!
//! - Belsley, D.A., Kuh, E. and Welsch, R.E. (1980). Regression Diagnostics.

use faer::Mat;

/// Condition number severity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionSeverity {
    /// κ < 30: Well-conditioned
    WellConditioned,
    /// 30 ≤ κ < 100: Moderate collinearity
    Moderate,
    /// 100 ≤ κ < 1000: High collinearity
    High,
    /// κ ≥ 1000: Severe collinearity
    Severe,
}

impl ConditionSeverity {
    /// Get a human-readable description of the severity.
    pub fn description(&self) -> &'static str {
        match self {
            Self::WellConditioned => "Well-conditioned: numerically stable",
            Self::Moderate => "Moderate collinearity: some instability possible",
            Self::High => "High collinearity: numerical instability likely",
            Self::Severe => "Severe collinearity: coefficients may be unreliable",
        }
    }
}

/// Result of condition number analysis.
#[derive(Debug, Clone)]
pub struct ConditionDiagnostic {
    /// Condition number of the scaled design matrix.
    pub condition_number: f64,
    /// Singular values of the scaled design matrix (sorted descending).
    pub singular_values: Vec<f64>,
    /// Severity classification.
    pub severity: ConditionSeverity,
    /// Warning message if condition number is problematic.
    pub warning: Option<String>,
}

fn unit_norm_columns(x: &Mat<f64>) -> Mat<f64> {
    let n = x.nrows();
    let norms: Vec<f64> = (0..x.ncols())
        .map(|j| (0..n).map(|i| x[(i, j)] * x[(i, j)]).sum::<f64>().sqrt())
        .collect();
    Mat::from_fn(n, x.ncols(), |i, j| {
        if norms[j] > 0.0 {
            x[(i, j)] / norms[j]
        } else {
            0.0
        }
    })
}

fn sorted_descending(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    values
}

/// Singular values of the column-scaled matrix, sorted descending.
fn scaled_singular_values(x: &Mat<f64>) -> Option<Vec<f64>> {
    let svd = unit_norm_columns(x).svd().ok()?;
    let s_col = svd.S().column_vector();
    Some(sorted_descending(
        (0..s_col.nrows()).map(|i| s_col[i]).collect(),
    ))
}

/// Compute the condition number `σ_max / σ_min` of the column-scaled design matrix.
///
/// Returns `f64::INFINITY` if the matrix is rank deficient or empty.
pub fn condition_number(x: &Mat<f64>) -> f64 {
    match scaled_singular_values(x) {
        Some(s) if !s.is_empty() => ratio(&s),
        _ => f64::INFINITY,
    }
}

fn ratio(singular_values: &[f64]) -> f64 {
    let s_max = singular_values[0];
    let s_min = singular_values[singular_values.len() - 1];
    if s_min > 0.0 {
        s_max / s_min
    } else {
        f64::INFINITY
    }
}

/// Compute condition number diagnostics with a severity classification.
///
/// # Example
///
/// ```rust,ignore
/// use benchfit::diagnostics::condition_diagnostic;
///
/// let diag = condition_diagnostic(sample.x());
/// if let Some(warning) = &diag.warning {
///     eprintln!("Warning: {}", warning);
/// }
/// ```
pub fn condition_diagnostic(x: &Mat<f64>) -> ConditionDiagnostic {
    match scaled_singular_values(x) {
        Some(s) => diagnose_singular_values(s),
        None => ConditionDiagnostic {
            condition_number: f64::INFINITY,
            singular_values: vec![],
            severity: ConditionSeverity::Severe,
            warning: Some("SVD computation failed".to_string()),
        },
    }
}

/// Diagnostics from singular values already computed for the column-scaled
/// design matrix, in any order.
pub fn diagnose_singular_values(singular_values: Vec<f64>) -> ConditionDiagnostic {
    if singular_values.is_empty() {
        return ConditionDiagnostic {
            condition_number: f64::INFINITY,
            singular_values,
            severity: ConditionSeverity::Severe,
            warning: Some("Empty design matrix".to_string()),
        };
    }
    let singular_values = sorted_descending(singular_values);

    let condition_number = ratio(&singular_values);
    let severity = classify_condition_number(condition_number);

    let warning = match severity {
        ConditionSeverity::WellConditioned => None,
        ConditionSeverity::Moderate => Some(format!(
            "Moderate collinearity between expressions (κ = {:.1}).",
            condition_number
        )),
        ConditionSeverity::High => Some(format!(
            "High collinearity between expressions (κ = {:.1}). Coefficients may be unstable.",
            condition_number
        )),
        ConditionSeverity::Severe => Some(format!(
            "Severe collinearity between expressions (κ = {:.1}). \
             Coefficients are likely unreliable; drop or rewrite a term.",
            condition_number
        )),
    };

    ConditionDiagnostic {
        condition_number,
        singular_values,
        severity,
        warning,
    }
}

/// Classify the condition number into severity levels.
pub fn classify_condition_number(cond: f64) -> ConditionSeverity {
    if cond < 30.0 {
        ConditionSeverity::WellConditioned
    } else if cond < 100.0 {
        ConditionSeverity::Moderate
    } else if cond < 1000.0 {
        ConditionSeverity::High
    } else {
        ConditionSeverity::Severe
    }
}
