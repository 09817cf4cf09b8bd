use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::generate_entity_id;

/// A weekly recurring class slot owned by one student
///
/// `time` is kept as an `HH:MM` string to match the persisted document shape;
/// the input layer validates the format along with the day-of-week and
/// duration bounds. The repository stores whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSchedule {
    /// Unique identifier (`SCH-<millis>-<suffix>`)
    pub id: String,

    #[serde(rename = "studentId")]
    pub student_id: String,

    /// 0 = Sunday .. 6 = Saturday
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: u8,

    /// Fixed time of day, `HH:MM`
    pub time: String,

    /// Duration in minutes
    pub duration: u32,

    /// Subject taught in this slot
    pub subject: String,

    #[serde(rename = "isActive")]
    pub is_active: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ClassSchedule {
    pub fn new(
        student_id: String,
        day_of_week: u8,
        time: String,
        duration: u32,
        subject: String,
        is_active: bool,
    ) -> Self {
        Self {
            id: generate_entity_id("SCH"),
            student_id,
            day_of_week,
            time,
            duration,
            subject,
            is_active,
            created_at: Utc::now(),
        }
    }

    /// Human-readable weekday name for the slot
    pub fn day_name(&self) -> &'static str {
        match self.day_of_week {
            0 => "domingo",
            1 => "segunda-feira",
            2 => "terca-feira",
            3 => "quarta-feira",
            4 => "quinta-feira",
            5 => "sexta-feira",
            6 => "sabado",
            _ => "?",
        }
    }
}
