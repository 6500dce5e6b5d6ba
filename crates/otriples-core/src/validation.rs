use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{InvalidEntity, Violation};

/// A single validation rule, already evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// True when the rule is violated.
    pub condition: bool,
    pub parameter: String,
    pub message: String,
}

impl Rule {
    pub fn new(condition: bool, parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            condition,
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Identifier must not be the nil UUID.
    pub fn id(parameter: impl Into<String>, id: Uuid) -> Self {
        Self::new(id.is_nil(), parameter, "Id is required")
    }

    /// Text must contain something other than whitespace.
    pub fn text(parameter: impl Into<String>, text: &str) -> Self {
        Self::new(text.trim().is_empty(), parameter, "Text is required")
    }

    /// Date must not be the default (Unix epoch) value.
    pub fn date(parameter: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::new(date == DateTime::<Utc>::default(), parameter, "Date is required")
    }
}

/// Rule aggregator shared by every foundation service.
pub struct Validator;

impl Validator {
    /// Evaluate every rule and fail once with all violations, in order.
    pub fn validate(
        entity: &'static str,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Result<(), InvalidEntity> {
        let violations: Vec<Violation> = rules
            .into_iter()
            .filter(|rule| rule.condition)
            .map(|rule| Violation {
                parameter: rule.parameter,
                message: rule.message,
            })
            .collect();

        match InvalidEntity::from_violations(entity, violations) {
            Some(invalid) => Err(invalid),
            None => Ok(()),
        }
    }
}
