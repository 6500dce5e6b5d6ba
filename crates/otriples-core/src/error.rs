use std::collections::BTreeMap;

use thiserror::Error;

use crate::translator::FailureClass;

/// Failures raised by a storage broker.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The store could not be reached (connection, pool, transport).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The record changed or vanished between read and write.
    #[error("Record was changed concurrently: {0}")]
    Conflict(String),

    #[error("Record already exists: {0}")]
    DuplicateKey(String),

    /// The store refused the change for a reason other than a conflict.
    #[error("Storage rejected the change: {0}")]
    Rejected(String),

    #[error("Unexpected storage failure: {0}")]
    Unexpected(String),
}

/// One failed rule: the offending parameter and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub parameter: String,
    pub message: String,
}

/// Every violation found in one validation pass over an entity.
///
/// Never empty. Only [`crate::validation::Validator`] builds one.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid {entity}, fix the errors and try again")]
pub struct InvalidEntity {
    entity: &'static str,
    violations: Vec<Violation>,
}

impl InvalidEntity {
    pub(crate) fn from_violations(entity: &'static str, violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { entity, violations })
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Violations in the order their rules were supplied.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Messages recorded against a single parameter.
    pub fn messages_for(&self, parameter: &str) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.parameter == parameter)
            .map(|v| v.message.as_str())
            .collect()
    }

    /// Violations grouped by parameter, for problem responses.
    pub fn data(&self) -> BTreeMap<String, Vec<String>> {
        let mut data: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for v in &self.violations {
            data.entry(v.parameter.clone())
                .or_default()
                .push(v.message.clone());
        }
        data
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is null")]
    NullEntity(&'static str),

    #[error(transparent)]
    Invalid(#[from] InvalidEntity),

    #[error("Couldn't find {entity} with id: {key}")]
    NotFound { entity: &'static str, key: String },
}

/// Anything a service operation can fail with before classification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<InvalidEntity> for Failure {
    fn from(e: InvalidEntity) -> Self {
        Failure::Validation(ValidationError::Invalid(e))
    }
}

/// The error every foundation service operation returns.
///
/// One variant per failure class; each keeps the underlying cause.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{entity} validation error occurred, fix the errors and try again")]
    Validation {
        entity: &'static str,
        #[source]
        cause: Failure,
    },

    #[error("{entity} dependency validation error occurred, fix the errors and try again")]
    DependencyValidation {
        entity: &'static str,
        #[source]
        cause: Failure,
    },

    #[error("{entity} dependency error occurred, contact support")]
    Dependency {
        entity: &'static str,
        #[source]
        cause: Failure,
    },

    #[error("{entity} service error occurred, contact support")]
    Service {
        entity: &'static str,
        #[source]
        cause: Failure,
    },
}

impl ServiceError {
    pub fn entity(&self) -> &'static str {
        match self {
            ServiceError::Validation { entity, .. }
            | ServiceError::DependencyValidation { entity, .. }
            | ServiceError::Dependency { entity, .. }
            | ServiceError::Service { entity, .. } => entity,
        }
    }

    pub fn cause(&self) -> &Failure {
        match self {
            ServiceError::Validation { cause, .. }
            | ServiceError::DependencyValidation { cause, .. }
            | ServiceError::Dependency { cause, .. }
            | ServiceError::Service { cause, .. } => cause,
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            ServiceError::Validation { .. } => FailureClass::Validation,
            ServiceError::DependencyValidation { .. } => FailureClass::DependencyValidation,
            ServiceError::Dependency { .. } => FailureClass::Dependency,
            ServiceError::Service { .. } => FailureClass::Service,
        }
    }
}
