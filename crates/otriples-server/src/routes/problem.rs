use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use otriples_core::{Failure, FailureClass, ServiceError, StorageError, ValidationError};

/// A service error rendered as an HTTP problem response.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

#[derive(Debug, Serialize)]
struct Problem {
    title: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    errors: BTreeMap<String, Vec<String>>,
}

/// HTTP status for each failure class and cause.
pub fn status_for(error: &ServiceError) -> StatusCode {
    match (error.class(), error.cause()) {
        (FailureClass::Validation, Failure::Validation(ValidationError::NotFound { .. })) => {
            StatusCode::NOT_FOUND
        }
        (FailureClass::Validation, _) => StatusCode::BAD_REQUEST,
        (FailureClass::DependencyValidation, Failure::Storage(StorageError::DuplicateKey(_))) => {
            StatusCode::CONFLICT
        }
        (FailureClass::DependencyValidation, _) => StatusCode::LOCKED,
        (FailureClass::Dependency, _) | (FailureClass::Service, _) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Client-facing detail. Storage messages stay in the logs.
fn detail_for(error: &ServiceError) -> Option<String> {
    let entity = error.entity();
    match error.cause() {
        Failure::Validation(cause) => Some(cause.to_string()),
        Failure::Storage(StorageError::DuplicateKey(_)) => {
            Some(format!("{} with the same key already exists", entity))
        }
        Failure::Storage(StorageError::Conflict(_)) => Some(format!(
            "{} was changed by another request, reload and try again",
            entity
        )),
        Failure::Storage(_) => None,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        let detail = detail_for(&self.0);

        let errors = match self.0.cause() {
            Failure::Validation(ValidationError::Invalid(invalid)) => invalid.data(),
            _ => BTreeMap::new(),
        };

        let problem = Problem {
            title: self.0.to_string(),
            status: status.as_u16(),
            detail,
            errors,
        };

        (status, Json(problem)).into_response()
    }
}
