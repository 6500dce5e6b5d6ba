use std::marker::PhantomData;

use sqlx::SqlitePool;

use otriples_core::{Entity, StorageBroker, StorageError};

/// SQLite implementation of StorageBroker.
///
/// Every entity type shares the `records` table, partitioned by
/// [`Entity::NAME`] and keyed by the entity key's display form.
pub struct SqliteStorageBroker<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SqliteStorageBroker<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for SqliteStorageBroker<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Whether an SQLite result code (primary or extended) means the database
/// stayed busy or locked past the busy timeout.
fn is_contention(code: Option<&str>) -> bool {
    match code.and_then(|c| c.parse::<i32>().ok()) {
        Some(code) => matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED),
        None => false,
    }
}

/// Map a driver error onto the storage failure categories.
pub(crate) fn storage_error(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StorageError::DuplicateKey(db.message().to_string())
        }
        sqlx::Error::Database(db) if is_contention(db.code().as_deref()) => {
            StorageError::Unavailable(e.to_string())
        }
        sqlx::Error::Database(_) => StorageError::Rejected(e.to_string()),
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StorageError::Unavailable(e.to_string()),
        _ => StorageError::Unexpected(e.to_string()),
    }
}

fn encode<E: Entity>(entity: &E) -> Result<String, StorageError> {
    serde_json::to_string(entity).map_err(|e| StorageError::Unexpected(e.to_string()))
}

fn decode<E: Entity>(body: &str) -> Result<E, StorageError> {
    serde_json::from_str(body).map_err(|e| StorageError::Unexpected(e.to_string()))
}

impl<E: Entity> StorageBroker<E> for SqliteStorageBroker<E> {
    async fn insert(&self, entity: E) -> Result<E, StorageError> {
        let body = encode(&entity)?;

        sqlx::query("INSERT INTO records (kind, key, body) VALUES (?, ?, ?)")
            .bind(E::NAME)
            .bind(entity.key().to_string())
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(entity)
    }

    async fn select_by_id(&self, key: E::Key) -> Result<Option<E>, StorageError> {
        let body: Option<String> =
            sqlx::query_scalar("SELECT body FROM records WHERE kind = ? AND key = ?")
                .bind(E::NAME)
                .bind(key.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;

        body.as_deref().map(|body| decode(body)).transpose()
    }

    async fn select_all(&self) -> Result<Vec<E>, StorageError> {
        let bodies: Vec<String> =
            sqlx::query_scalar("SELECT body FROM records WHERE kind = ? ORDER BY rowid ASC")
                .bind(E::NAME)
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;

        bodies.iter().map(|body| decode(body)).collect()
    }

    async fn update(&self, entity: E) -> Result<E, StorageError> {
        let key = entity.key().to_string();
        let body = encode(&entity)?;

        let result = sqlx::query("UPDATE records SET body = ? WHERE kind = ? AND key = ?")
            .bind(body)
            .bind(E::NAME)
            .bind(&key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        // The row vanished after it was read.
        if result.rows_affected() == 0 {
            return Err(StorageError::Conflict(format!(
                "{} {} was removed before the update",
                E::NAME,
                key
            )));
        }

        Ok(entity)
    }

    async fn delete(&self, entity: E) -> Result<E, StorageError> {
        let key = entity.key().to_string();

        let result = sqlx::query("DELETE FROM records WHERE kind = ? AND key = ?")
            .bind(E::NAME)
            .bind(&key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Conflict(format!(
                "{} {} was removed before the delete",
                E::NAME,
                key
            )));
        }

        Ok(entity)
    }
}
