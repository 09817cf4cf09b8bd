use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::generate_entity_id;

/// Progress state of a task
///
/// Status only changes when explicitly set; there is no automatic transition
/// to `atrasada` when the scheduled date passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pendente,
    EmAndamento,
    Concluida,
    Atrasada,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pendente => "pendente",
            TaskStatus::EmAndamento => "em_andamento",
            TaskStatus::Concluida => "concluida",
            TaskStatus::Atrasada => "atrasada",
        };
        write!(f, "{}", s)
    }
}

/// A dated assignment owned by one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (`TASK-<millis>-<suffix>`)
    pub id: String,

    #[serde(rename = "studentId")]
    pub student_id: String,

    /// The date the task is scheduled for
    pub date: NaiveDate,

    pub title: String,

    /// Rich-text (HTML) description
    #[serde(default)]
    pub description: String,

    pub status: TaskStatus,

    /// Reference image for the artwork
    #[serde(rename = "artImage", default, skip_serializing_if = "Option::is_none")]
    pub art_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a generated id and matching timestamps
    pub fn new(
        student_id: String,
        date: NaiveDate,
        title: String,
        description: String,
        status: TaskStatus,
        art_image: Option<String>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: generate_entity_id("TASK"),
            student_id,
            date,
            title,
            description,
            status,
            art_image,
            notes,
            created_at: now,
            updated_at: now,
        }
    }
}
