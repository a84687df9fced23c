//! Domain errors rendered as actix-web responses.
//!
//! Every failure becomes a JSON `Error` body, echoes the trace id header when
//! one was captured, and withholds `details` on internal failures.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by the user handlers.
pub type ApiResult<T> = Result<T, Error>;

/// The body a client may see for `error`.
///
/// Client-side failures pass through untouched. Internal failures keep the
/// operation message and trace id only.
fn client_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError || error.details().is_none() {
        return Cow::Borrowed(error);
    }
    let stripped = Error::internal(error.message());
    Cow::Owned(match error.trace_id() {
        Some(id) => stripped.with_trace_id(id),
        None => stripped,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            // Duplicate emails stay 400 for existing clients.
            ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id));
        }
        response.json(client_view(self).as_ref())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced as internal error");
        Error::internal("Internal server error")
    }
}
