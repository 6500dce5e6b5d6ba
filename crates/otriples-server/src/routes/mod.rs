pub mod entities;
pub mod health;
pub mod problem;

use axum::Router;

use otriples_core::{Calendar, Contact, Registration, StudentAttachment, Teacher};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(entities::routes::<Contact>("/api/contacts"))
        .merge(entities::routes::<Teacher>("/api/teachers"))
        .merge(entities::routes::<Calendar>("/api/calendars"))
        .merge(entities::routes::<Registration>("/api/registrations"))
        .merge(entities::routes::<StudentAttachment>("/api/studentattachments"))
        .with_state(state)
}
