//! Statistical inference: fit statistics, coefficient and prediction confidence widths.

mod coefficient;
mod prediction;
mod statistics;

pub use coefficient::{coefficient_half_widths, coefficient_report};
pub use prediction::{prediction_band, PredictionBander};
pub use statistics::compute_fit_statistics;
pub(crate) use statistics::fit_statistics;
