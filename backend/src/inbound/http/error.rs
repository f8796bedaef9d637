//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn engagement failures into consistent JSON responses and
//! status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{DomainError, ErrorCode};

/// Every code maps to exactly one status.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::IncorrectParameters => StatusCode::BAD_REQUEST,
        ErrorCode::AlreadyExisting => StatusCode::CONFLICT,
        ErrorCode::DependencyNotSatisfied | ErrorCode::NotExistingEntity => StatusCode::NOT_FOUND,
        ErrorCode::NotValidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::PasswordUnableToHash | ErrorCode::Unknown => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn redact_if_unknown(error: &DomainError) -> DomainError {
    if matches!(error.code(), ErrorCode::Unknown) {
        DomainError::unknown("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_unknown(self))
    }
}

#[cfg(test)]
mod tests;
