//! Fit request decoding and execution.

use super::response::FitResponse;
use crate::core::{FitOptions, GridEvaluator, MeasurementRecord, ResponseVariable, SampleBuilder};
use crate::expression::{parse_list, Formula};
use crate::solvers::{OlsRegressor, RegressionError};
use std::collections::HashMap;

/// A validated fit request for one family of measurements.
#[derive(Debug, Clone)]
pub struct FitRequest {
    pub response: ResponseVariable,
    /// Lower bound of the evaluation grid.
    pub lower: f64,
    /// Upper bound of the evaluation grid.
    pub upper: f64,
    pub expressions: Vec<Formula>,
    /// Number of grid points.
    pub steps: usize,
    pub records: Vec<MeasurementRecord>,
}

impl FitRequest {
    /// Decode a request from its form fields and JSON body.
    ///
    /// Fields: `xlb`, `xub`, `xtransform`, `yvar` and optionally `nlinesteps`.
    /// Every field is validated, in that order, before the body is decoded;
    /// the first failure is returned.
    pub fn from_form(
        form: &HashMap<String, String>,
        body: &str,
        options: &FitOptions,
    ) -> Result<Self, RegressionError> {
        let lower = parse_bound(form, "xlb")?;
        let upper = parse_bound(form, "xub")?;

        let expressions = parse_list(required(form, "xtransform")?, &options.variable_name)?;
        let response = required(form, "yvar")?.parse::<ResponseVariable>()?;

        let steps = match form.get("nlinesteps") {
            None => options.default_steps,
            Some(raw) => parse_steps(raw)?,
        };

        let records: Vec<MeasurementRecord> =
            serde_json::from_str(body).map_err(|e| RegressionError::malformed("body", e))?;

        Ok(Self {
            response,
            lower,
            upper,
            expressions,
            steps,
            records,
        })
    }

    /// Fit the records and evaluate the prediction band over the grid.
    pub fn execute(&self, options: &FitOptions) -> Result<FitResponse, RegressionError> {
        options.validate()?;
        let grid = GridEvaluator::new(self.lower, self.upper, self.steps)?;
        let sample = SampleBuilder::new(self.response).build(&self.records, &self.expressions)?;

        let fitted = OlsRegressor::new(options.clone()).fit(&sample)?;
        let report = fitted.report();
        tracing::debug!(
            observations = sample.n_observations(),
            r_squared = report.r_squared,
            mse = report.mse,
            "fit complete"
        );

        let band = fitted.predict(&grid.evaluate(&self.expressions))?;
        Ok(FitResponse {
            result_line: band,
            result_model: fitted.coefficients(&self.expressions),
            r_squared: report.r_squared,
            centered_r_squared: report.centered_r_squared,
            mse: report.mse,
        })
    }
}

fn required<'a>(form: &'a HashMap<String, String>, field: &str) -> Result<&'a str, RegressionError> {
    form.get(field)
        .map(String::as_str)
        .ok_or_else(|| RegressionError::malformed(field, "missing"))
}

fn parse_bound(form: &HashMap<String, String>, field: &str) -> Result<f64, RegressionError> {
    let raw = required(form, field)?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| RegressionError::malformed(field, format!("`{raw}` is not a number")))?;
    if !value.is_finite() {
        return Err(RegressionError::malformed(
            field,
            format!("`{raw}` is not finite"),
        ));
    }
    Ok(value)
}

fn parse_steps(raw: &str) -> Result<usize, RegressionError> {
    let steps = raw.trim().parse::<i64>().map_err(|_| {
        RegressionError::malformed("nlinesteps", format!("`{raw}` is not an integer"))
    })?;
    match usize::try_from(steps) {
        Ok(steps) if (1..=GridEvaluator::MAX_STEPS).contains(&steps) => Ok(steps),
        _ => Err(RegressionError::InvalidStepCount(raw.to_string())),
    }
}
