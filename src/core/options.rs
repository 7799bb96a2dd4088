//! Fit configuration.

use super::grid::GridEvaluator;
use crate::expression::is_reserved;
use thiserror::Error;

/// Least-squares solver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverType {
    /// Column-scaled singular value decomposition of X.
    #[default]
    Svd,
    /// Cholesky factorization of the normal equations `X'X β = X'y`.
    NormalEquations,
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("confidence level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),

    #[error("default step count must be between 1 and {max}, got {0}", max = GridEvaluator::MAX_STEPS)]
    InvalidDefaultSteps(usize),

    #[error("rcond must be in [0, 1), got {0}")]
    InvalidRcond(f64),

    #[error("invalid variable name `{0}`")]
    InvalidVariableName(String),
}

/// Options shared by every fit request.
///
/// Passed explicitly into each stage; nothing here is global.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Confidence level of the reported half-widths.
    pub confidence_level: f64,
    /// Name of the free variable in explanatory expressions.
    pub variable_name: String,
    /// Grid size used when a request does not specify one.
    pub default_steps: usize,
    /// Relative singular value cutoff below which X is treated as rank deficient.
    pub rcond: f64,
    pub solver: SolverType,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            variable_name: "N".to_string(),
            default_steps: 1000,
            rcond: 1e-12,
            solver: SolverType::Svd,
        }
    }
}

impl FitOptions {
    pub fn builder() -> FitOptionsBuilder {
        FitOptionsBuilder::default()
    }

    /// Check every field; the fields are public, so options built without
    /// the builder are validated again before a fit.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(OptionsError::InvalidConfidenceLevel(self.confidence_level));
        }
        if !(1..=GridEvaluator::MAX_STEPS).contains(&self.default_steps) {
            return Err(OptionsError::InvalidDefaultSteps(self.default_steps));
        }
        if !(0.0..1.0).contains(&self.rcond) {
            return Err(OptionsError::InvalidRcond(self.rcond));
        }
        let name = &self.variable_name;
        let valid_name = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name || is_reserved(name) {
            return Err(OptionsError::InvalidVariableName(name.clone()));
        }
        Ok(())
    }
}

/// Builder for [`FitOptions`].
#[derive(Debug, Clone, Default)]
pub struct FitOptionsBuilder {
    options: FitOptions,
}

impl FitOptionsBuilder {
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    pub fn variable_name(mut self, name: impl Into<String>) -> Self {
        self.options.variable_name = name.into();
        self
    }

    pub fn default_steps(mut self, steps: usize) -> Self {
        self.options.default_steps = steps;
        self
    }

    pub fn rcond(mut self, rcond: f64) -> Self {
        self.options.rcond = rcond;
        self
    }

    pub fn solver(mut self, solver: SolverType) -> Self {
        self.options.solver = solver;
        self
    }

    pub fn build(self) -> Result<FitOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
