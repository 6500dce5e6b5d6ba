//! Maps operation failures onto the service error taxonomy.

use crate::brokers::LoggingBroker;
use crate::error::{Failure, ServiceError, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// The caller sent something invalid or referenced a missing record.
    Validation,
    /// Storage refused the request because of its current state.
    DependencyValidation,
    /// Storage is unreachable or broken.
    Dependency,
    /// Anything not anticipated.
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Critical,
}

/// A failure tagged with its class and the severity it must be logged at.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFailure {
    pub class: FailureClass,
    pub severity: Severity,
    pub cause: Failure,
}

impl ClassifiedFailure {
    /// Wrap the cause in the outer error matching its class.
    pub fn into_service_error(self, entity: &'static str) -> ServiceError {
        let cause = self.cause;
        match self.class {
            FailureClass::Validation => ServiceError::Validation { entity, cause },
            FailureClass::DependencyValidation => ServiceError::DependencyValidation { entity, cause },
            FailureClass::Dependency => ServiceError::Dependency { entity, cause },
            FailureClass::Service => ServiceError::Service { entity, cause },
        }
    }
}

/// Classify a failure. Arms are checked in priority order.
pub fn classify(cause: Failure) -> ClassifiedFailure {
    let (class, severity) = match &cause {
        Failure::Validation(_) => (FailureClass::Validation, Severity::Error),
        Failure::Storage(StorageError::Unavailable(_)) => {
            (FailureClass::Dependency, Severity::Critical)
        }
        Failure::Storage(StorageError::Conflict(_)) => {
            (FailureClass::DependencyValidation, Severity::Error)
        }
        Failure::Storage(StorageError::DuplicateKey(_)) => {
            (FailureClass::DependencyValidation, Severity::Error)
        }
        Failure::Storage(StorageError::Rejected(_)) => (FailureClass::Dependency, Severity::Error),
        Failure::Storage(StorageError::Unexpected(_)) => (FailureClass::Service, Severity::Error),
    };

    ClassifiedFailure {
        class,
        severity,
        cause,
    }
}

/// Classify, wrap and log a failure exactly once.
pub fn translate<L>(entity: &'static str, cause: Failure, logging: &L) -> ServiceError
where
    L: LoggingBroker + ?Sized,
{
    let classified = classify(cause);
    let severity = classified.severity;
    let error = classified.into_service_error(entity);

    match severity {
        Severity::Critical => logging.log_critical(&error),
        Severity::Error => logging.log_error(&error),
    }

    error
}
