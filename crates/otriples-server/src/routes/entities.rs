//! CRUD endpoints shared by every entity.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use otriples_core::{Entity, StudentAttachmentKey};

use crate::routes::problem::ApiError;
use crate::state::{AppState, Service};

/// Path segments that address one entity by key.
pub trait KeyPath {
    const SEGMENTS: &'static str;
}

impl KeyPath for Uuid {
    const SEGMENTS: &'static str = "/{id}";
}

impl KeyPath for StudentAttachmentKey {
    const SEGMENTS: &'static str = "/{student_id}/{attachment_id}";
}

/// `base` serves list/create/modify, `base/<key>` serves get/delete.
pub fn routes<E>(base: &str) -> Router<AppState>
where
    E: Entity,
    E::Key: KeyPath,
    Service<E>: FromRef<AppState>,
{
    let item = format!("{}{}", base, <E::Key as KeyPath>::SEGMENTS);

    Router::new()
        .route(
            base,
            get(retrieve_all::<E>).post(add::<E>).put(modify::<E>),
        )
        .route(
            &item,
            get(retrieve_by_id::<E>).delete(remove_by_id::<E>),
        )
}

/// POST - a JSON `null` body is passed on as an absent entity.
async fn add<E: Entity>(
    State(service): State<Service<E>>,
    Json(entity): Json<Option<E>>,
) -> Response {
    match service.add(entity).await {
        Ok(added) => (StatusCode::CREATED, Json(added)).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn retrieve_all<E: Entity>(State(service): State<Service<E>>) -> Response {
    match service.retrieve_all().await {
        Ok(entities) => Json(entities).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn retrieve_by_id<E: Entity>(
    State(service): State<Service<E>>,
    Path(key): Path<E::Key>,
) -> Response {
    match service.retrieve_by_id(key).await {
        Ok(entity) => Json(entity).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn modify<E: Entity>(
    State(service): State<Service<E>>,
    Json(entity): Json<Option<E>>,
) -> Response {
    match service.modify(entity).await {
        Ok(modified) => Json(modified).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn remove_by_id<E: Entity>(
    State(service): State<Service<E>>,
    Path(key): Path<E::Key>,
) -> Response {
    match service.remove_by_id(key).await {
        Ok(removed) => Json(removed).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
