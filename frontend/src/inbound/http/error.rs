//! HTTP adapter mapping for domain and page errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting handlers
//! turn failures into consistent responses. JSON endpoints answer with the
//! error payload; page handlers additionally turn a failed session guard
//! into a redirect to the right login form.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, Role};
use crate::middleware::TRACE_ID_HEADER;

use super::accounts::login_path;

/// Result alias for JSON handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Result alias for page handlers.
pub type PageResult<T> = Result<T, PageError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let redacted = Error::new(ErrorCode::InternalError, "Internal server error");
        match error.trace_id() {
            Some(id) => redacted.with_trace_id(id.to_owned()),
            None => redacted,
        }
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

/// Failure of a page handler.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The session does not hold an identity with the required role.
    #[error("login required for {0} pages")]
    LoginRequired(Role),
    /// Any other failure.
    #[error(transparent)]
    Domain(#[from] Error),
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::LoginRequired(_) => StatusCode::SEE_OTHER,
            Self::Domain(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::LoginRequired(role) => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, login_path(*role)))
                .finish(),
            Self::Domain(error) => error.error_response(),
        }
    }
}
