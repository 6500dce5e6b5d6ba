use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::Rule;

/// Who created and last changed a record, and when.
///
/// Missing fields read as the nil id or the epoch so validation reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditFields {
    pub created_by: Uuid,
    pub created_date: DateTime<Utc>,
    pub updated_by: Uuid,
    pub updated_date: DateTime<Utc>,
}

impl AuditFields {
    /// Audit fields for a record created by `actor` at `at`.
    pub fn created(actor: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            created_by: actor,
            created_date: at,
            updated_by: actor,
            updated_date: at,
        }
    }

    /// Copy of these fields recording a change by `actor` at `at`.
    pub fn touched(&self, actor: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            updated_by: actor,
            updated_date: at,
            ..*self
        }
    }
}

/// Identifier of a stored entity.
pub trait EntityKey:
    Copy + fmt::Debug + fmt::Display + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Rules rejecting empty identifier components.
    fn rules(&self) -> Vec<Rule>;
}

impl EntityKey for Uuid {
    fn rules(&self) -> Vec<Rule> {
        vec![Rule::id("id", *self)]
    }
}

/// A domain record managed by a foundation service.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Display name used in errors and logs.
    const NAME: &'static str;

    type Key: EntityKey;

    fn key(&self) -> Self::Key;

    fn audit(&self) -> &AuditFields;

    /// Rules for domain-specific fields.
    fn field_rules(&self) -> Vec<Rule> {
        Vec::new()
    }
}
