//! The foundation service: one generic pipeline for every entity.
//!
//! Each operation runs validate -> storage -> post-validate and hands any
//! failure to the translator, which logs it once and wraps it. A failed
//! call is never retried.

use std::marker::PhantomData;

use crate::audit::{self, ValidationConfig};
use crate::brokers::{Brokers, ClockBroker, LoggingBroker, StorageBroker};
use crate::entity::Entity;
use crate::error::{Failure, ServiceError, ValidationError};
use crate::translator;

pub struct FoundationService<E, S, L, C> {
    brokers: Brokers<S, L, C>,
    config: ValidationConfig,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S, L, C> Clone for FoundationService<E, S, L, C> {
    fn clone(&self) -> Self {
        Self {
            brokers: self.brokers.clone(),
            config: self.config,
            _entity: PhantomData,
        }
    }
}

impl<E, S, L, C> FoundationService<E, S, L, C>
where
    E: Entity,
    S: StorageBroker<E>,
    L: LoggingBroker,
    C: ClockBroker,
{
    pub fn new(brokers: Brokers<S, L, C>, config: ValidationConfig) -> Self {
        Self {
            brokers,
            config,
            _entity: PhantomData,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a new entity and insert it.
    pub async fn add(&self, entity: Option<E>) -> Result<E, ServiceError> {
        self.try_add(entity).await.map_err(|f| self.fail(f))
    }

    /// Validate a changed entity against itself and its stored version, then update it.
    pub async fn modify(&self, entity: Option<E>) -> Result<E, ServiceError> {
        self.try_modify(entity).await.map_err(|f| self.fail(f))
    }

    pub async fn retrieve_by_id(&self, key: E::Key) -> Result<E, ServiceError> {
        self.try_retrieve_by_id(key).await.map_err(|f| self.fail(f))
    }

    pub async fn remove_by_id(&self, key: E::Key) -> Result<E, ServiceError> {
        self.try_remove_by_id(key).await.map_err(|f| self.fail(f))
    }

    /// All stored entities. An empty store is logged as a warning, not an error.
    pub async fn retrieve_all(&self) -> Result<Vec<E>, ServiceError> {
        let entities = self
            .brokers
            .storage
            .select_all()
            .await
            .map_err(|e| self.fail(e.into()))?;

        if entities.is_empty() {
            self.brokers
                .logging
                .log_warning(&format!("No {} records found in storage.", E::NAME));
        }

        Ok(entities)
    }

    async fn try_add(&self, entity: Option<E>) -> Result<E, Failure> {
        let entity = audit::require(entity)?;
        audit::validate_on_add(&entity, self.brokers.clock.now(), &self.config)?;

        tracing::debug!(entity = E::NAME, key = %entity.key(), "inserting");
        Ok(self.brokers.storage.insert(entity).await?)
    }

    async fn try_modify(&self, entity: Option<E>) -> Result<E, Failure> {
        let entity = audit::require(entity)?;
        audit::validate_on_modify(&entity, self.brokers.clock.now(), &self.config)?;

        let key = entity.key();
        let stored = self.select_existing(key).await?;
        audit::validate_against_storage(&entity, &stored)?;

        tracing::debug!(entity = E::NAME, key = %key, "updating");
        Ok(self.brokers.storage.update(entity).await?)
    }

    async fn try_retrieve_by_id(&self, key: E::Key) -> Result<E, Failure> {
        audit::validate_key::<E>(&key)?;
        self.select_existing(key).await
    }

    async fn try_remove_by_id(&self, key: E::Key) -> Result<E, Failure> {
        audit::validate_key::<E>(&key)?;
        let stored = self.select_existing(key).await?;

        tracing::debug!(entity = E::NAME, key = %key, "deleting");
        Ok(self.brokers.storage.delete(stored).await?)
    }

    async fn select_existing(&self, key: E::Key) -> Result<E, Failure> {
        match self.brokers.storage.select_by_id(key).await? {
            Some(stored) => Ok(stored),
            None => Err(ValidationError::NotFound {
                entity: E::NAME,
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn fail(&self, cause: Failure) -> ServiceError {
        translator::translate(E::NAME, cause, self.brokers.logging.as_ref())
    }
}
