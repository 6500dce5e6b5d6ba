use std::sync::Arc;

use axum::extract::FromRef;

use otriples_core::{
    Brokers, Calendar, Contact, Entity, FoundationService, Registration, StudentAttachment,
    SystemClock, Teacher, TracingLoggingBroker, ValidationConfig,
};
use otriples_db::{SqlitePool, SqliteStorageBroker};

/// Foundation service wired to SQLite, tracing and the system clock.
pub type Service<E> =
    FoundationService<E, SqliteStorageBroker<E>, TracingLoggingBroker, SystemClock>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Service<Contact>,
    pub teachers: Service<Teacher>,
    pub calendars: Service<Calendar>,
    pub registrations: Service<Registration>,
    pub student_attachments: Service<StudentAttachment>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: ValidationConfig) -> Self {
        let logging = Arc::new(TracingLoggingBroker);
        let clock = Arc::new(SystemClock);

        Self {
            contacts: build_service(&pool, &logging, &clock, config),
            teachers: build_service(&pool, &logging, &clock, config),
            calendars: build_service(&pool, &logging, &clock, config),
            registrations: build_service(&pool, &logging, &clock, config),
            student_attachments: build_service(&pool, &logging, &clock, config),
        }
    }
}

fn build_service<E: Entity>(
    pool: &SqlitePool,
    logging: &Arc<TracingLoggingBroker>,
    clock: &Arc<SystemClock>,
    config: ValidationConfig,
) -> Service<E> {
    FoundationService::new(
        Brokers::new(
            Arc::new(SqliteStorageBroker::new(pool.clone())),
            logging.clone(),
            clock.clone(),
        ),
        config,
    )
}

impl FromRef<AppState> for Service<Contact> {
    fn from_ref(state: &AppState) -> Self {
        state.contacts.clone()
    }
}

impl FromRef<AppState> for Service<Teacher> {
    fn from_ref(state: &AppState) -> Self {
        state.teachers.clone()
    }
}

impl FromRef<AppState> for Service<Calendar> {
    fn from_ref(state: &AppState) -> Self {
        state.calendars.clone()
    }
}

impl FromRef<AppState> for Service<Registration> {
    fn from_ref(state: &AppState) -> Self {
        state.registrations.clone()
    }
}

impl FromRef<AppState> for Service<StudentAttachment> {
    fn from_ref(state: &AppState) -> Self {
        state.student_attachments.clone()
    }
}
