use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    ClassSchedule, Payment, PaymentMethod, PaymentStatus, StudentStatus, Task, TaskStatus,
};

/// Payload for creating a new student
///
/// The id, empty collections, and `nextPaymentDue` are assigned by the
/// repository; a missing due date defaults to the 5th of next month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub nome: String,
    pub status: StudentStatus,
    pub mensalidade: f64,
    pub cidade: String,
    pub email: String,
    pub telefone: String,
    pub nasc: Option<NaiveDate>,
    pub vencimento_mensalidade: Option<NaiveDate>,
}

/// Patch for updating a student
///
/// Omitted fields keep their stored value; in particular the payment ledger,
/// `nextPaymentDue`, the class schedule, and tasks survive any patch that
/// does not carry them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateStudent {
    pub nome: Option<String>,
    pub status: Option<StudentStatus>,
    pub mensalidade: Option<f64>,
    pub cidade: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub nasc: Option<NaiveDate>,
    pub vencimento_mensalidade: Option<NaiveDate>,
    pub last_payment_date: Option<NaiveDate>,
    pub next_payment_due: Option<NaiveDate>,
    pub payments: Option<Vec<Payment>>,
    pub class_schedule: Option<Vec<ClassSchedule>>,
    pub tasks: Option<Vec<Task>>,
}

/// Payload for registering a payment against a student's ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub student_id: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub due_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub observation: Option<String>,
    pub receipt: Option<String>,
}

/// Payload for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub art_image: Option<String>,
    pub notes: Option<String>,
}

/// Patch for updating a task; `updatedAt` is refreshed on every update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateTask {
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub art_image: Option<String>,
    pub notes: Option<String>,
}

/// A class slot as supplied by the caller (no id yet)
///
/// Used both for single-slot creation and for bulk replacement of a
/// student's whole schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day_of_week: u8,
    pub time: String,
    pub duration: u32,
    pub subject: String,
    pub is_active: bool,
}

impl ScheduleSlot {
    /// Validates the slot at the input boundary
    ///
    /// The repository stores slots as given; day-of-week, time format, and
    /// the 15 to 240 minute duration range are enforced here.
    pub fn validate(&self) -> Result<(), String> {
        if self.day_of_week > 6 {
            return Err(format!(
                "day of week must be 0 (Sunday) to 6 (Saturday), got {}",
                self.day_of_week
            ));
        }
        if !(15..=240).contains(&self.duration) {
            return Err(format!(
                "duration must be between 15 and 240 minutes, got {}",
                self.duration
            ));
        }
        validate_time(&self.time)
    }
}

/// Patch for updating a single class slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateClassSchedule {
    pub day_of_week: Option<u8>,
    pub time: Option<String>,
    pub duration: Option<u32>,
    pub subject: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateClassSchedule {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(day) = self.day_of_week {
            if day > 6 {
                return Err(format!(
                    "day of week must be 0 (Sunday) to 6 (Saturday), got {}",
                    day
                ));
            }
        }
        if let Some(duration) = self.duration {
            if !(15..=240).contains(&duration) {
                return Err(format!(
                    "duration must be between 15 and 240 minutes, got {}",
                    duration
                ));
            }
        }
        match &self.time {
            Some(time) => validate_time(time),
            None => Ok(()),
        }
    }
}

/// Checks an `HH:MM` time string
fn validate_time(time: &str) -> Result<(), String> {
    let valid = match time.split_once(':') {
        Some((h, m)) if h.len() == 2 && m.len() == 2 => {
            let hour: Option<u8> = h.parse().ok();
            let minute: Option<u8> = m.parse().ok();
            matches!((hour, minute), (Some(h), Some(m)) if h < 24 && m < 60)
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(format!("time must be HH:MM, got {:?}", time))
    }
}
