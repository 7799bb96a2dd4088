//! Explanatory expressions over a single free variable.
//!
//! Each expression defines one column of the design matrix. A list such as
//! `N * log(N), 1` fits `y = β₀·N·log(N) + β₁`.
//!
//! # Example
//!
//! ```rust,ignore
//! use benchfit::expression::{parse_list, Expression};
//!
//! let terms = parse_list("N * log(N), 1", "N")?;
//! assert_eq!(terms.len(), 2);
//! assert_eq!(terms[1].evaluate(42.0), 1.0);
//! println!("{}", terms[0].render()); // N * log(N)
//! ```

mod ast;
mod lexer;
mod parser;

use crate::solvers::RegressionError;
use ast::Node;
use parser::Parser;
use std::fmt;

/// A scalar formula over one free variable.
///
/// Anything that can be evaluated at a point and rendered back to text can
/// serve as a design column.
pub trait Expression: fmt::Debug + Send + Sync {
    /// Evaluate with the free variable bound to `value`.
    fn evaluate(&self, value: f64) -> f64;

    /// Canonical textual form.
    fn render(&self) -> String;
}

impl<E: Expression + ?Sized> Expression for Box<E> {
    fn evaluate(&self, value: f64) -> f64 {
        (**self).evaluate(value)
    }

    fn render(&self) -> String {
        (**self).render()
    }
}

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    root: Node,
    variable: String,
}

impl Formula {
    /// Parse a single formula.
    pub fn parse(text: &str, variable: &str) -> Result<Self, RegressionError> {
        let mut formulas = parse_list(text, variable)?;
        if formulas.len() != 1 {
            return Err(RegressionError::ExpressionSyntax {
                position: 0,
                message: format!("expected one expression, found {}", formulas.len()),
            });
        }
        Ok(formulas.remove(0))
    }

    /// Name of the free variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl Expression for Formula {
    fn evaluate(&self, value: f64) -> f64 {
        self.root.eval(value)
    }

    fn render(&self) -> String {
        let mut out = String::new();
        self.root.render(&self.variable, &mut out);
        out
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Parse a comma-separated list of formulas referencing `variable`.
pub fn parse_list(text: &str, variable: &str) -> Result<Vec<Formula>, RegressionError> {
    let nodes = Parser::new(text, variable)?.parse_list()?;
    Ok(nodes
        .into_iter()
        .map(|root| Formula {
            root,
            variable: variable.to_string(),
        })
        .collect())
}

/// Whether `name` is reserved by the expression language.
pub(crate) fn is_reserved(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let bare = lower.strip_prefix("math.").unwrap_or(&lower);
    ast::Function::lookup(bare).is_some() || ast::Constant::lookup(bare).is_some()
}

/// Evaluate every expression at `value`, appending the results to `out`.
pub(crate) fn evaluate_row<E: Expression>(expressions: &[E], value: f64, out: &mut Vec<f64>) {
    out.extend(expressions.iter().map(|e| e.evaluate(value)));
}
