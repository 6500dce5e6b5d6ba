//! OtripleS Core - Entities, broker contracts, and the foundation service pipeline.
//!
//! Every entity goes through the same steps: validate, call storage, and
//! translate any failure into a [`ServiceError`] logged at the matching
//! severity. This crate has no dependencies on other OtripleS crates.

pub mod audit;
pub mod brokers;
pub mod entity;
pub mod error;
pub mod models;
pub mod service;
pub mod translator;
pub mod validation;

// Re-exports for convenience
pub use audit::ValidationConfig;
pub use brokers::{
    Brokers, ClockBroker, LoggingBroker, StorageBroker, SystemClock, TracingLoggingBroker,
};
pub use entity::{AuditFields, Entity, EntityKey};
pub use error::{Failure, InvalidEntity, ServiceError, StorageError, ValidationError, Violation};
pub use models::{
    Calendar, Contact, Registration, RegistrationStatus, StudentAttachment, StudentAttachmentKey,
    Teacher, TeacherGender, TeacherStatus,
};
pub use service::FoundationService;
pub use translator::{classify, ClassifiedFailure, FailureClass, Severity};
pub use validation::{Rule, Validator};

#[cfg(any(test, feature = "test-utils"))]
pub use brokers::memory::{
    FixedClock, InMemoryStorageBroker, LogEntry, RecordingLoggingBroker, StorageCall, StorageOp,
};
