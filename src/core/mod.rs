//! Core types for benchmark regression.

mod grid;
mod options;
mod record;
mod result;
mod sample;

pub use grid::{Grid, GridEvaluator};
pub use options::{FitOptions, FitOptionsBuilder, OptionsError, SolverType};
pub use record::{MeasurementRecord, ResponseVariable};
pub use result::{CoefficientReport, FitReport, Model, PredictionPoint};
pub use sample::{Sample, SampleBuilder};
