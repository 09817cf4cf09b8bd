/// Data models module
///
/// This module defines the core data structures used throughout the
/// application. Field names follow the persisted document contract (the
/// Portuguese names the original data files carry); where a Rust name
/// differs, a serde rename pins the wire name.

// Re-export all model types
mod student;
pub use student::{RawStudent, Student, StudentStatus};

mod payment;
pub use payment::{Payment, PaymentMethod, PaymentStatus};

mod task;
pub use task::{Task, TaskStatus};

mod class_schedule;
pub use class_schedule::ClassSchedule;

mod document;
pub use document::{RawDocument, StudentDocument, DOCUMENT_VERSION};
pub(crate) use document::max_assigned_seq;

mod ids;
pub use ids::{generate_entity_id, student_id_from_seq, student_id_suffix};

mod dates;
pub use dates::{fifth_of_next_month, one_month_after, parse_wire_date};
