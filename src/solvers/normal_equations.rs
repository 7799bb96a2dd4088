//! Least squares through the normal equations `X'X β = X'y`.
//!
//! Cheaper than the SVD but squares the condition number of X. The Gram
//! matrix is equilibrated to a unit diagonal before the Cholesky factorization
//! and a pivot at or below `pivot_tolerance` is reported as singular.

use super::traits::{validate_shape, LeastSquaresSolver, RegressionError};
use crate::core::Sample;
use faer::{Col, Mat};

#[derive(Debug, Clone, Copy)]
pub struct NormalEquationSolver {
    pivot_tolerance: f64,
}

impl NormalEquationSolver {
    pub fn new(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }

    /// Pivot tolerance matching the SVD rank cutoff `rcond`.
    ///
    /// The equilibrated Gram matrix has eigenvalues `σ²`, so the cutoff is
    /// squared. It never drops below the default tolerance.
    pub fn with_rcond(rcond: f64) -> Self {
        Self::new((rcond * rcond).max(Self::default().pivot_tolerance))
    }

    /// Solve symmetric positive definite system Ax = b using Cholesky decomposition.
    fn solve_symmetric(&self, a: &Mat<f64>, b: &Col<f64>) -> Result<Col<f64>, RegressionError> {
        let n = a.nrows();

        // Cholesky decomposition: A = LL'
        let mut l: Mat<f64> = Mat::zeros(n, n);
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[(j, k)].powi(2);
            }
            let diag = a[(j, j)] - sum;
            if diag.is_nan() || diag <= self.pivot_tolerance {
                return Err(RegressionError::SingularDesignMatrix(format!(
                    "normal equations are not positive definite at pivot {j}"
                )));
            }
            l[(j, j)] = diag.sqrt();

            for i in (j + 1)..n {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += l[(i, k)] * l[(j, k)];
                }
                l[(i, j)] = (a[(i, j)] - sum) / l[(j, j)];
            }
        }

        // Forward substitution: Ly = b
        let mut y_sol = Col::zeros(n);
        for i in 0..n {
            let mut sum = b[i];
            for j in 0..i {
                sum -= l[(i, j)] * y_sol[j];
            }
            y_sol[i] = sum / l[(i, i)];
        }

        // Backward substitution: L'x = y
        let mut x = Col::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y_sol[i];
            for j in (i + 1)..n {
                sum -= l[(j, i)] * x[j];
            }
            x[i] = sum / l[(i, i)];
        }

        Ok(x)
    }
}

impl Default for NormalEquationSolver {
    fn default() -> Self {
        Self::new(1e-10)
    }
}

impl LeastSquaresSolver for NormalEquationSolver {
    fn solve(&self, sample: &Sample) -> Result<Col<f64>, RegressionError> {
        validate_shape(sample)?;
        let x = sample.x();
        let y = sample.y();
        let n = x.nrows();
        let p = x.ncols();

        // Compute X'X
        let mut xtx = Mat::zeros(p, p);
        for i in 0..p {
            for j in 0..p {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += x[(k, i)] * x[(k, j)];
                }
                xtx[(i, j)] = sum;
            }
        }

        // Compute X'y
        let mut xty = Col::zeros(p);
        for j in 0..p {
            let mut sum = 0.0;
            for i in 0..n {
                sum += x[(i, j)] * y[i];
            }
            xty[j] = sum;
        }

        // Equilibrate: D X'X D z = D X'y with D = diag(1/sqrt(X'X_jj)), β = D z
        let mut scales = vec![0.0; p];
        for (j, scale) in scales.iter_mut().enumerate() {
            let d = xtx[(j, j)];
            if d <= 0.0 || !d.is_finite() {
                return Err(RegressionError::SingularDesignMatrix(format!(
                    "column {j} has squared norm {d}"
                )));
            }
            *scale = 1.0 / d.sqrt();
        }
        let scaled = Mat::from_fn(p, p, |i, j| xtx[(i, j)] * scales[i] * scales[j]);
        let rhs = Col::from_fn(p, |j| xty[j] * scales[j]);

        let z = self.solve_symmetric(&scaled, &rhs)?;
        Ok(Col::from_fn(p, |j| z[j] * scales[j]))
    }

    fn name(&self) -> &'static str {
        "normal-equations"
    }
}
