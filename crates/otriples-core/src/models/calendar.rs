use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{AuditFields, Entity};
use crate::validation::Rule;

/// A named school calendar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Calendar {
    pub id: Uuid,
    pub label: String,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Entity for Calendar {
    const NAME: &'static str = "Calendar";
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn field_rules(&self) -> Vec<Rule> {
        vec![Rule::text("label", &self.label)]
    }
}
