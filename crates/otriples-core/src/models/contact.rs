use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{AuditFields, Entity};
use crate::validation::Rule;

/// A piece of contact information (phone, address, email) and notes on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: Uuid,
    pub information: String,
    pub notes: String,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Entity for Contact {
    const NAME: &'static str = "Contact";
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn field_rules(&self) -> Vec<Rule> {
        vec![
            Rule::text("information", &self.information),
            Rule::text("notes", &self.notes),
        ]
    }
}
