use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Student, student_id_suffix};

/// Version literal written into every persisted document
pub const DOCUMENT_VERSION: &str = "1.0";

/// The persisted document, the unit of storage and atomicity
///
/// Every mutation loads the whole document, changes it in memory, and writes
/// the whole document back. `last_student_seq` is the id-assignment
/// high-water mark; it only grows, so deleting the highest-numbered student
/// never frees its number for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDocument {
    pub students: Vec<Student>,

    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,

    pub version: String,

    #[serde(rename = "lastStudentSeq", default)]
    pub last_student_seq: u32,
}

impl StudentDocument {
    /// Builds a document around `students`, seeding the sequence from the
    /// highest id already present
    pub fn new(students: Vec<Student>) -> Self {
        let last_student_seq = max_assigned_seq(&students);
        Self {
            students,
            last_updated: Utc::now(),
            version: DOCUMENT_VERSION.to_string(),
            last_student_seq,
        }
    }

    /// The next id sequence to assign
    ///
    /// Takes the maximum of the persisted high-water mark and a fresh scan,
    /// so documents written before the mark existed still assign correctly.
    pub fn next_seq(&self) -> u32 {
        self.last_student_seq.max(max_assigned_seq(&self.students)) + 1
    }

    /// Refreshes the last-updated timestamp
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

/// Highest numeric id suffix among `students` (0 when empty)
pub(crate) fn max_assigned_seq(students: &[Student]) -> u32 {
    students
        .iter()
        .filter_map(|s| student_id_suffix(&s.id))
        .max()
        .unwrap_or(0)
}

/// The persisted document as read from storage, before normalization
///
/// `students` stays untyped here; the repository decides between seeding
/// (missing or non-array) and per-record normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub students: Option<serde_json::Value>,

    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(rename = "lastStudentSeq", default)]
    pub last_student_seq: Option<u32>,
}
