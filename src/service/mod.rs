//! The fit request/response surface.
//!
//! Decodes a request (form fields plus a JSON array of records), runs the
//! fit and encodes either the result or a rejection. HTTP routing is left to
//! the embedding server; [`handle_fit`] only needs the decoded form and body.

mod request;
mod response;

pub use request::FitRequest;
pub use response::{FitResponse, RejectedRequest, ServiceResponse};

use crate::core::FitOptions;
use crate::solvers::RegressionError;
use std::collections::HashMap;

/// Handle one fit request end to end.
///
/// A rejected request never carries partial results: the body is a
/// [`RejectedRequest`] naming the offending input.
pub fn handle_fit(
    form: &HashMap<String, String>,
    body: &str,
    options: &FitOptions,
) -> ServiceResponse {
    let result = options
        .validate()
        .map_err(RegressionError::from)
        .and_then(|()| FitRequest::from_form(form, body, options))
        .and_then(|request| request.execute(options));
    match result {
        Ok(response) => ServiceResponse::json(200, &response),
        Err(err) => {
            tracing::warn!(field = err.field(), error = %err, "rejected fit request");
            ServiceResponse::json(response::status_for(&err), &RejectedRequest::from(&err))
        }
    }
}
