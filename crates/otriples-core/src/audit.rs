//! Identity and audit-field invariants shared by every entity.
//!
//! Each phase builds one rule list (key, domain fields, audit fields) and
//! hands it to [`Validator`], so all violations surface together.

use chrono::{DateTime, Duration, Utc};

use crate::entity::{Entity, EntityKey};
use crate::error::{InvalidEntity, ValidationError};
use crate::validation::{Rule, Validator};

/// Tunables for audit validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// How far a timestamp may sit from the clock, either way, and still be recent.
    pub recent_window: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            recent_window: Duration::minutes(1),
        }
    }
}

impl ValidationConfig {
    pub fn with_recent_window(recent_window: Duration) -> Self {
        Self { recent_window }
    }
}

/// Whether `date` lies within `window` of `now`. The boundary counts as recent.
pub fn is_recent(date: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now.signed_duration_since(date).abs() <= window
}

/// Reject an absent entity before any field rule runs.
pub fn require<E: Entity>(entity: Option<E>) -> Result<E, ValidationError> {
    entity.ok_or(ValidationError::NullEntity(E::NAME))
}

pub fn validate_key<E: Entity>(key: &E::Key) -> Result<(), InvalidEntity> {
    Validator::validate(E::NAME, key.rules())
}

/// Rules for the checks that apply on every write.
fn presence_rules<E: Entity>(entity: &E) -> Vec<Rule> {
    let audit = entity.audit();
    let mut rules = entity.key().rules();
    rules.extend(entity.field_rules());
    rules.extend([
        Rule::id("created_by", audit.created_by),
        Rule::id("updated_by", audit.updated_by),
        Rule::date("created_date", audit.created_date),
        Rule::date("updated_date", audit.updated_date),
    ]);
    rules
}

/// A new entity has not been updated yet and was created just now.
pub fn validate_on_add<E: Entity>(
    entity: &E,
    now: DateTime<Utc>,
    config: &ValidationConfig,
) -> Result<(), InvalidEntity> {
    let audit = entity.audit();
    let mut rules = presence_rules(entity);
    rules.extend([
        Rule::new(
            audit.updated_by != audit.created_by,
            "updated_by",
            "Id is not the same as created_by",
        ),
        Rule::new(
            audit.updated_date != audit.created_date,
            "updated_date",
            "Date is not the same as created_date",
        ),
        Rule::new(
            !is_recent(audit.created_date, now, config.recent_window),
            "created_date",
            "Date is not recent",
        ),
    ]);
    Validator::validate(E::NAME, rules)
}

/// A modified entity records a change made just now.
pub fn validate_on_modify<E: Entity>(
    entity: &E,
    now: DateTime<Utc>,
    config: &ValidationConfig,
) -> Result<(), InvalidEntity> {
    let audit = entity.audit();
    let mut rules = presence_rules(entity);
    rules.extend([
        Rule::new(
            audit.updated_date == audit.created_date,
            "updated_date",
            "Date is the same as created_date",
        ),
        Rule::new(
            !is_recent(audit.updated_date, now, config.recent_window),
            "updated_date",
            "Date is not recent",
        ),
    ]);
    Validator::validate(E::NAME, rules)
}

/// Creation fields are immutable and the update timestamp must advance.
pub fn validate_against_storage<E: Entity>(input: &E, stored: &E) -> Result<(), InvalidEntity> {
    let input = input.audit();
    let stored = stored.audit();
    Validator::validate(
        E::NAME,
        [
            Rule::new(
                input.created_date != stored.created_date,
                "created_date",
                "Date is not the same as stored created_date",
            ),
            Rule::new(
                input.created_by != stored.created_by,
                "created_by",
                "Id is not the same as stored created_by",
            ),
            Rule::new(
                input.updated_date == stored.updated_date,
                "updated_date",
                "Date is the same as stored updated_date",
            ),
        ],
    )
}
