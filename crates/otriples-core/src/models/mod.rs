//! Domain records served by the foundation services.

pub mod calendar;
pub mod contact;
pub mod registration;
pub mod student_attachment;
pub mod teacher;

pub use calendar::Calendar;
pub use contact::Contact;
pub use registration::{Registration, RegistrationStatus};
pub use student_attachment::{StudentAttachment, StudentAttachmentKey};
pub use teacher::{Teacher, TeacherGender, TeacherStatus};
