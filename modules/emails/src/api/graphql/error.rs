use async_graphql::{ErrorExtensions, Value};
use axum::http::StatusCode;

use crate::contract::error::EmailsError;

pub const CODE_VALIDATION: &str = "VALIDATION";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_CONFLICT: &str = "CONFLICT";
pub const CODE_INTERNAL: &str = "INTERNAL";

/// Stable machine-readable code for a contract error.
pub fn error_code(e: &EmailsError) -> &'static str {
    match e {
        EmailsError::Validation { .. } => CODE_VALIDATION,
        EmailsError::NotFound { .. } => CODE_NOT_FOUND,
        EmailsError::Conflict { .. } => CODE_CONFLICT,
        EmailsError::Internal => CODE_INTERNAL,
    }
}

/// Map a contract error to a GraphQL error carrying `extensions.code`
/// and, for validation failures, `extensions.violations`.
pub fn map_emails_error(e: EmailsError) -> async_graphql::Error {
    let code = error_code(&e);
    let violations = match &e {
        EmailsError::Validation { violations } => async_graphql::to_value(violations).ok(),
        _ => None,
    };

    async_graphql::Error::new(e.to_string()).extend_with(move |_, ext| {
        ext.set("code", code);
        if let Some(v) = violations {
            ext.set("violations", v);
        }
    })
}

/// HTTP status for an executed GraphQL response.
///
/// The first error decides; errors without a code come from request parsing
/// or schema validation and are reported as bad requests.
pub fn status_for(resp: &async_graphql::Response) -> StatusCode {
    let Some(first) = resp.errors.first() else {
        return StatusCode::OK;
    };

    let code = first
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .and_then(|v| match v {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        });

    match code {
        Some(CODE_VALIDATION) => StatusCode::BAD_REQUEST,
        Some(CODE_NOT_FOUND) => StatusCode::NOT_FOUND,
        Some(CODE_CONFLICT) => StatusCode::CONFLICT,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
        None => StatusCode::BAD_REQUEST,
    }
}
