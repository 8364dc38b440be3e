//! Actix rendering of domain errors.
//!
//! Handlers return [`crate::domain::Error`]; this module decides the status
//! line, echoes the trace id header, and strips server faults down to a
//! generic message before they reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const REDACTED_MESSAGE: &str = "Internal server error";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        // Empty shares 404 with NotFound but keeps its own wire code.
        ErrorCode::NotFound | ErrorCode::Empty => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload a client is allowed to see for `error`.
fn client_payload(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let generic = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(trace_id) => generic.with_trace_id(trace_id),
        None => generic,
    }
}

fn log_failure(error: &Error, status: StatusCode) {
    let code = error.code();
    let trace_id = error.trace_id();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        warn!(?code, trace_id, message = error.message(), "dependency unavailable");
    } else if status.is_server_error() {
        error!(?code, trace_id, message = error.message(), "request failed");
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log_failure(self, status);

        let mut response = HttpResponse::build(status);
        if let Some(trace_id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id.to_owned()));
        }
        response.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in a joke handler");
        Error::internal(REDACTED_MESSAGE)
    }
}
