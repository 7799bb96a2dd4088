//! Least-squares scaling fits for benchmark measurements.
//!
//! Given a set of measurements of one benchmark family at different sizes,
//! fit `y ≈ β₁·f₁(N) + … + βₖ·fₖ(N)` for a user-supplied list of basis
//! expressions, report the coefficients with confidence half-widths and
//! evaluate the fitted curve and its confidence band over a grid of sizes.
//!
//! # Example
//!
//! ```rust,ignore
//! use benchfit::prelude::*;
//!
//! let expressions = parse_list("N * log(N), 1", "N")?;
//! let sample = SampleBuilder::default().build(&records, &expressions)?;
//!
//! let fitted = OlsRegressor::builder()
//!     .confidence_level(0.95)
//!     .build()?
//!     .fit(&sample)?;
//!
//! let grid = GridEvaluator::new(10.0, 10_000.0, 100)?.evaluate(&expressions);
//! for point in fitted.predict(&grid)? {
//!     println!("{} {} ± {}", point.x, point.y_hat, point.half_width);
//! }
//! println!("R² = {}", fitted.report().r_squared);
//! ```

pub mod benchmark;
pub mod cli;
pub mod core;
pub mod diagnostics;
pub mod distributions;
pub mod expression;
pub mod inference;
pub mod service;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CoefficientReport, FitOptions, FitOptionsBuilder, FitReport, Grid, GridEvaluator,
        MeasurementRecord, Model, OptionsError, PredictionPoint, ResponseVariable, Sample,
        SampleBuilder, SolverType,
    };
    pub use crate::diagnostics::{condition_diagnostic, ConditionDiagnostic, ConditionSeverity};
    pub use crate::expression::{parse_list, Expression, Formula};
    pub use crate::inference::{compute_fit_statistics, prediction_band, PredictionBander};
    pub use crate::service::{handle_fit, FitRequest, FitResponse};
    pub use crate::solvers::{
        FittedOls, LeastSquaresSolver, NormalEquationSolver, OlsRegressor, RegressionError,
        SvdSolver,
    };
}

pub use crate::core::{FitOptions, SolverType};
pub use crate::solvers::{FittedOls, OlsRegressor, RegressionError};
