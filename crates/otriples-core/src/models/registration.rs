use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{AuditFields, Entity};
use crate::validation::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Active,
    Inactive,
}

/// A student registration request and who submitted it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub student_phone: String,
    pub submitter_name: String,
    pub submitter_email: String,
    pub submitter_phone: String,
    pub status: RegistrationStatus,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Entity for Registration {
    const NAME: &'static str = "Registration";
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn field_rules(&self) -> Vec<Rule> {
        vec![
            Rule::text("student_name", &self.student_name),
            Rule::text("student_email", &self.student_email),
            Rule::text("student_phone", &self.student_phone),
            Rule::text("submitter_name", &self.submitter_name),
            Rule::text("submitter_email", &self.submitter_email),
            Rule::text("submitter_phone", &self.submitter_phone),
        ]
    }
}
