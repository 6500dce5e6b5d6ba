use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{AuditFields, Entity};
use crate::validation::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherGender {
    #[default]
    Female,
    Male,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Teacher {
    pub id: Uuid,
    pub user_id: String,
    pub employee_number: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: TeacherGender,
    pub status: TeacherStatus,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Entity for Teacher {
    const NAME: &'static str = "Teacher";
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn field_rules(&self) -> Vec<Rule> {
        vec![
            Rule::text("user_id", &self.user_id),
            Rule::text("employee_number", &self.employee_number),
            Rule::text("first_name", &self.first_name),
            Rule::text("last_name", &self.last_name),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_middle_name_is_optional() {
        let teacher = Teacher {
            id: Uuid::new_v4(),
            user_id: "u-17".to_string(),
            employee_number: "E-1001".to_string(),
            first_name: "Ada".to_string(),
            middle_name: None,
            last_name: "Lovelace".to_string(),
            gender: TeacherGender::Female,
            status: TeacherStatus::Active,
            audit: AuditFields::created(Uuid::new_v4(), Utc::now()),
        };

        assert!(teacher.field_rules().iter().all(|r| !r.condition));
    }
}
