//! Ordinary least squares with confidence bands.

use super::normal_equations::NormalEquationSolver;
use super::svd::ScaledSvd;
use super::traits::{validate_shape, LeastSquaresSolver, RegressionError};
use crate::core::{
    CoefficientReport, FitOptions, FitReport, Grid, Model, OptionsError, PredictionPoint, Sample,
    SolverType,
};
use crate::expression::Expression;
use crate::inference::{coefficient_report, fit_statistics, prediction_band};

/// Ordinary least squares estimator over a prepared [`Sample`].
///
/// # Example
///
/// ```rust,ignore
/// use benchfit::prelude::*;
///
/// let terms = parse_list("N * log(N), 1", "N")?;
/// let sample = SampleBuilder::new(ResponseVariable::NsPerOp).build(&records, &terms)?;
/// let fitted = OlsRegressor::builder()
///     .confidence_level(0.95)
///     .build()?
///     .fit(&sample)?;
///
/// println!("R² = {}", fitted.report().r_squared);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OlsRegressor {
    options: FitOptions,
}

impl OlsRegressor {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Solve for β, reusing `svd` when one has already been computed.
    fn solve(&self, sample: &Sample, svd: Option<&ScaledSvd>) -> Result<Model, RegressionError> {
        tracing::debug!(
            solver = ?self.options.solver,
            rows = sample.n_observations(),
            cols = sample.n_parameters(),
            "solving least squares"
        );
        let coefficients = match (self.options.solver, svd) {
            (SolverType::Svd, Some(svd)) => svd.solve(sample.y()),
            (SolverType::Svd, None) => {
                ScaledSvd::new(sample.x(), self.options.rcond)?.solve(sample.y())
            }
            (SolverType::NormalEquations, _) => {
                NormalEquationSolver::with_rcond(self.options.rcond).solve(sample)?
            }
        };
        if coefficients.iter().any(|b| !b.is_finite()) {
            return Err(RegressionError::SingularDesignMatrix(
                "solver produced non-finite coefficients".to_string(),
            ));
        }
        Ok(Model::new(coefficients))
    }

    /// Estimate coefficients only.
    pub fn estimate(&self, sample: &Sample) -> Result<Model, RegressionError> {
        self.options.validate()?;
        validate_shape(sample)?;
        self.solve(sample, None)
    }

    /// Estimate coefficients and compute fit statistics.
    ///
    /// X is decomposed once; the solve, `(X'X)⁻¹` and the condition number
    /// all come from the same SVD.
    pub fn fit(&self, sample: &Sample) -> Result<FittedOls, RegressionError> {
        self.options.validate()?;
        validate_shape(sample)?;
        let svd = ScaledSvd::new(sample.x(), self.options.rcond)?;
        let model = self.solve(sample, Some(&svd))?;
        let report = fit_statistics(&model, sample, &self.options, &svd)?;
        Ok(FittedOls { model, report })
    }
}

/// Builder for [`OlsRegressor`].
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    options: FitOptions,
}

impl OlsRegressorBuilder {
    pub fn options(mut self, options: FitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    pub fn solver(mut self, solver: SolverType) -> Self {
        self.options.solver = solver;
        self
    }

    pub fn rcond(mut self, rcond: f64) -> Self {
        self.options.rcond = rcond;
        self
    }

    pub fn build(self) -> Result<OlsRegressor, OptionsError> {
        self.options.validate()?;
        Ok(OlsRegressor::new(self.options))
    }
}

/// A fitted OLS model with its statistics.
#[derive(Debug, Clone)]
pub struct FittedOls {
    model: Model,
    report: FitReport,
}

impl FittedOls {
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn report(&self) -> &FitReport {
        &self.report
    }

    /// Fitted mean and confidence half-width at every grid point.
    ///
    /// Fails with [`RegressionError::ColumnCountMismatch`] when the grid was
    /// evaluated with a different number of expressions than the fit.
    pub fn predict(&self, grid: &Grid) -> Result<Vec<PredictionPoint>, RegressionError> {
        prediction_band(&self.model, &self.report, grid)
    }

    /// Coefficients paired with the expressions they multiply.
    pub fn coefficients<E: Expression>(&self, expressions: &[E]) -> Vec<CoefficientReport> {
        coefficient_report(&self.model, &self.report, expressions)
    }
}
