//! Least-squares solvers.

mod normal_equations;
mod ols;
pub(crate) mod svd;
mod traits;

pub use normal_equations::NormalEquationSolver;
pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use svd::SvdSolver;
pub use traits::{LeastSquaresSolver, RegressionError};
