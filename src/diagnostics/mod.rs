//! Design matrix diagnostics.
//!
//! Ill-conditioning is checked on every fit and reported through `tracing`;
//! it is not an error unless the matrix is numerically rank deficient.
//!
//! ```rust,ignore
//! use benchfit::diagnostics::condition_diagnostic;
//!
//! let cond = condition_diagnostic(sample.x());
//! if let Some(warning) = &cond.warning {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```

mod condition_number;

pub use condition_number::{
    classify_condition_number, condition_diagnostic, condition_number, diagnose_singular_values,
    ConditionDiagnostic, ConditionSeverity,
};
