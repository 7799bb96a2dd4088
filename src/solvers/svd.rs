//! Least squares via the singular value decomposition of a column-scaled X.
//!
//! Columns are scaled to unit Euclidean norm before decomposing, so terms of
//! very different magnitude (`N·log(N)` next to a constant `1`) do not look
//! rank deficient. With `X̃ = X·D`, `D = diag(1/‖xⱼ‖)`:
//!
//! - `β = D·V·S⁻¹·Uᵀ·y`
//! - `(X'X)⁻¹ = D·V·S⁻²·Vᵀ·D`
//!
//! Rank deficiency (`σ_min ≤ rcond·σ_max` on X̃) is reported as an error
//! rather than resolved with a minimum-norm solution.

use super::traits::{validate_shape, LeastSquaresSolver, RegressionError};
use crate::core::Sample;
use faer::{Col, Mat};

/// SVD of a column-scaled design matrix.
#[derive(Debug, Clone)]
pub(crate) struct ScaledSvd {
    scales: Vec<f64>,
    u: Mat<f64>,
    s: Vec<f64>,
    v: Mat<f64>,
}

impl ScaledSvd {
    /// Decompose `x`, failing if it is rank deficient at tolerance `rcond`.
    ///
    /// Requires `x.nrows() >= x.ncols()`.
    pub fn new(x: &Mat<f64>, rcond: f64) -> Result<Self, RegressionError> {
        let n = x.nrows();
        let p = x.ncols();

        let mut scales = vec![0.0; p];
        for (j, scale) in scales.iter_mut().enumerate() {
            let norm = (0..n).map(|i| x[(i, j)] * x[(i, j)]).sum::<f64>().sqrt();
            if norm == 0.0 || !norm.is_finite() {
                return Err(RegressionError::SingularDesignMatrix(format!(
                    "column {j} has norm {norm}"
                )));
            }
            *scale = 1.0 / norm;
        }
        let scaled = Mat::from_fn(n, p, |i, j| x[(i, j)] * scales[j]);

        let svd = scaled.svd().map_err(|_| {
            RegressionError::SingularDesignMatrix(
                "singular value decomposition did not converge".to_string(),
            )
        })?;
        let s_col = svd.S().column_vector();
        let s: Vec<f64> = (0..s_col.nrows()).map(|i| s_col[i]).collect();

        let s_max = s.iter().copied().fold(0.0_f64, f64::max);
        let rank = s.iter().filter(|&&si| si > rcond * s_max).count();
        if rank < p {
            return Err(RegressionError::SingularDesignMatrix(format!(
                "design matrix has rank {rank} but {p} columns"
            )));
        }

        Ok(Self {
            scales,
            u: svd.U().to_owned(),
            s,
            v: svd.V().to_owned(),
        })
    }

    fn n_params(&self) -> usize {
        self.scales.len()
    }

    /// Singular values of the column-scaled X, as returned by the decomposition.
    pub fn singular_values(&self) -> &[f64] {
        &self.s
    }

    /// Minimise `‖Xβ − y‖₂`.
    pub fn solve(&self, y: &Col<f64>) -> Col<f64> {
        let p = self.n_params();
        let n = y.nrows();

        // c = S⁻¹ Uᵀ y over the leading p singular directions
        let mut c = vec![0.0; p];
        for (k, ck) in c.iter_mut().enumerate() {
            let mut dot = 0.0;
            for i in 0..n {
                dot += self.u[(i, k)] * y[i];
            }
            *ck = dot / self.s[k];
        }

        Col::from_fn(p, |j| {
            let mut beta = 0.0;
            for (k, ck) in c.iter().enumerate() {
                beta += self.v[(j, k)] * ck;
            }
            beta * self.scales[j]
        })
    }

    /// `(X'X)⁻¹`, symmetric `p × p`.
    pub fn gram_inverse(&self) -> Mat<f64> {
        let p = self.n_params();
        Mat::from_fn(p, p, |a, b| {
            let mut sum = 0.0;
            for k in 0..p {
                sum += self.v[(a, k)] * self.v[(b, k)] / (self.s[k] * self.s[k]);
            }
            sum * self.scales[a] * self.scales[b]
        })
    }
}

/// Least squares via column-scaled SVD.
#[derive(Debug, Clone, Copy)]
pub struct SvdSolver {
    rcond: f64,
}

impl SvdSolver {
    pub fn new(rcond: f64) -> Self {
        Self { rcond }
    }
}

impl Default for SvdSolver {
    fn default() -> Self {
        Self::new(1e-12)
    }
}

impl LeastSquaresSolver for SvdSolver {
    fn solve(&self, sample: &Sample) -> Result<Col<f64>, RegressionError> {
        validate_shape(sample)?;
        let svd = ScaledSvd::new(sample.x(), self.rcond)?;
        Ok(svd.solve(sample.y()))
    }

    fn name(&self) -> &'static str {
        "svd"
    }
}
