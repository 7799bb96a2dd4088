//! Evenly spaced evaluation grids for drawing fitted curves.

use crate::expression::Expression;
use crate::solvers::RegressionError;
use faer::Mat;

/// Grid points and the design matrix evaluated at them.
#[derive(Debug, Clone)]
pub struct Grid {
    points: Vec<f64>,
    design: Mat<f64>,
}

impl Grid {
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// `points.len() × expressions.len()` design matrix.
    pub fn design(&self) -> &Mat<f64> {
        &self.design
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Produces `steps` evenly spaced points from `lower` to `upper` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridEvaluator {
    lower: f64,
    upper: f64,
    steps: usize,
}

impl GridEvaluator {
    /// Largest accepted step count.
    pub const MAX_STEPS: usize = 1_000_000;

    pub fn new(lower: f64, upper: f64, steps: usize) -> Result<Self, RegressionError> {
        if !(1..=Self::MAX_STEPS).contains(&steps) {
            return Err(RegressionError::InvalidStepCount(steps.to_string()));
        }
        if !lower.is_finite() {
            return Err(RegressionError::malformed("xlb", format!("{lower} is not finite")));
        }
        if !upper.is_finite() {
            return Err(RegressionError::malformed("xub", format!("{upper} is not finite")));
        }
        Ok(Self {
            lower,
            upper,
            steps,
        })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The input values. A single step yields just the lower bound.
    pub fn points(&self) -> Vec<f64> {
        if self.steps == 1 {
            return vec![self.lower];
        }
        let last = self.steps - 1;
        let step = (self.upper - self.lower) / last as f64;
        (0..self.steps)
            .map(|i| {
                if i == last {
                    self.upper
                } else {
                    self.lower + step * i as f64
                }
            })
            .collect()
    }

    /// Evaluate every expression at every grid point.
    pub fn evaluate<E: Expression>(&self, expressions: &[E]) -> Grid {
        let points = self.points();
        let design = Mat::from_fn(points.len(), expressions.len(), |i, j| {
            expressions[j].evaluate(points[i])
        });
        Grid { points, design }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{parse_list, Formula};

    #[test]
    fn test_grid_points_inclusive() {
        let grid = GridEvaluator::new(0.0, 10.0, 11).unwrap();
        let points = grid.points();
        assert_eq!(points.len(), 11);
        for (i, p) in points.iter().enumerate() {
            assert!((p - i as f64).abs() < 1e-12);
        }
        assert_eq!(points[10], 10.0);
    }

    #[test]
    fn test_grid_descending() {
        let points = GridEvaluator::new(1.0, -1.0, 3).unwrap().points();
        assert_eq!(points, vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_single_step() {
        let points = GridEvaluator::new(5.0, 9.0, 1).unwrap().points();
        assert_eq!(points, vec![5.0]);
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert_eq!(
            GridEvaluator::new(0.0, 1.0, 0).unwrap_err(),
            RegressionError::InvalidStepCount("0".to_string())
        );
    }

    #[test]
    fn test_step_count_upper_bound() {
        assert!(GridEvaluator::new(0.0, 1.0, GridEvaluator::MAX_STEPS).is_ok());
        assert_eq!(
            GridEvaluator::new(0.0, 1.0, usize::MAX).unwrap_err(),
            RegressionError::InvalidStepCount(usize::MAX.to_string())
        );
        assert_eq!(
            GridEvaluator::new(0.0, 1.0, GridEvaluator::MAX_STEPS + 1)
                .unwrap_err()
                .field(),
            "nlinesteps"
        );
    }

    #[test]
    fn test_evaluate_without_expressions() {
        let grid = GridEvaluator::new(0.0, 1.0, 4).unwrap().evaluate::<Formula>(&[]);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.design().ncols(), 0);
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        assert_eq!(
            GridEvaluator::new(f64::NAN, 1.0, 2).unwrap_err().field(),
            "xlb"
        );
        assert_eq!(
            GridEvaluator::new(0.0, f64::INFINITY, 2)
                .unwrap_err()
                .field(),
            "xub"
        );
    }

    #[test]
    fn test_evaluate_matches_direct_evaluation() {
        let terms = parse_list("N * log(N), 1", "N").unwrap();
        let grid = GridEvaluator::new(1.0, 100.0, 5).unwrap().evaluate(&terms);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.design().ncols(), 2);
        for (i, &p) in grid.points().iter().enumerate() {
            for (j, term) in terms.iter().enumerate() {
                assert_eq!(grid.design()[(i, j)], term.evaluate(p));
            }
        }
    }
}
