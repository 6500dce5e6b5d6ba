use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{AuditFields, Entity, EntityKey};
use crate::validation::Rule;

/// Composite key: the owning student and the attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentAttachmentKey {
    pub student_id: Uuid,
    pub attachment_id: Uuid,
}

impl StudentAttachmentKey {
    pub fn new(student_id: Uuid, attachment_id: Uuid) -> Self {
        Self {
            student_id,
            attachment_id,
        }
    }
}

impl fmt::Display for StudentAttachmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.student_id, self.attachment_id)
    }
}

impl EntityKey for StudentAttachmentKey {
    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::id("student_id", self.student_id),
            Rule::id("attachment_id", self.attachment_id),
        ]
    }
}

/// Links an uploaded attachment to a student.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentAttachment {
    pub student_id: Uuid,
    pub attachment_id: Uuid,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Entity for StudentAttachment {
    const NAME: &'static str = "StudentAttachment";
    type Key = StudentAttachmentKey;

    fn key(&self) -> StudentAttachmentKey {
        StudentAttachmentKey::new(self.student_id, self.attachment_id)
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }
}
