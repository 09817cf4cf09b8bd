use atelie::dto::{ScheduleSlot, UpdateClassSchedule};
use atelie::errors::AppError;
use atelie::repo;
use atelie::store::DocumentStore;
use clap::Subcommand;

use crate::output::{self, OutputConfig};

/// Class schedule commands
#[derive(Subcommand, Debug)]
pub enum ScheduleCommands {
    /// Add a weekly class slot to a student
    Add {
        /// The student id
        #[clap(long)]
        student: String,
        /// Day of week (0 = Sunday .. 6 = Saturday)
        #[clap(long)]
        day: u8,
        /// Time of day (HH:MM)
        #[clap(long)]
        time: String,
        /// Duration in minutes (15-240)
        #[clap(long, default_value_t = 60)]
        duration: u32,
        /// Subject taught in the slot
        #[clap(long)]
        subject: String,
        /// Create the slot as inactive
        #[clap(long)]
        inactive: bool,
    },
    /// Update a class slot; omitted fields keep their values
    Update {
        /// The slot id
        id: String,
        #[clap(long)]
        day: Option<u8>,
        #[clap(long)]
        time: Option<String>,
        #[clap(long)]
        duration: Option<u32>,
        #[clap(long)]
        subject: Option<String>,
        /// Set whether the slot is active
        #[clap(long)]
        active: Option<bool>,
    },
    /// Replace a student's entire weekly schedule
    ///
    /// Every `--slot` is `day,HH:MM,duration,subject`; all previous slots
    /// (and their ids) are discarded.
    Set {
        /// The student id
        #[clap(long)]
        student: String,
        /// Slot spec, repeatable: day,HH:MM,duration,subject
        #[clap(long = "slot")]
        slots: Vec<String>,
    },
    /// Remove a class slot
    Remove {
        /// The slot id
        id: String,
    },
    /// List a student's weekly schedule
    List {
        /// The student id
        student: String,
    },
}

/// Parses a `day,HH:MM,duration,subject` slot spec
fn parse_slot_spec(spec: &str) -> Result<ScheduleSlot, AppError> {
    let parts: Vec<&str> = spec.splitn(4, ',').collect();
    if parts.len() != 4 {
        return Err(AppError::InvalidInput(format!(
            "slot must be day,HH:MM,duration,subject, got {:?}",
            spec
        )));
    }
    let day_of_week: u8 = parts[0]
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("invalid day of week {:?}", parts[0])))?;
    let duration: u32 = parts[2]
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("invalid duration {:?}", parts[2])))?;

    let slot = ScheduleSlot {
        day_of_week,
        time: parts[1].trim().to_string(),
        duration,
        subject: parts[3].trim().to_string(),
        is_active: true,
    };
    slot.validate().map_err(AppError::InvalidInput)?;
    Ok(slot)
}

/// Executes a schedule command
pub fn execute(
    store: &dyn DocumentStore,
    cmd: ScheduleCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ScheduleCommands::Add {
            student,
            day,
            time,
            duration,
            subject,
            inactive,
        } => {
            let slot = ScheduleSlot {
                day_of_week: day,
                time,
                duration,
                subject,
                is_active: !inactive,
            };
            slot.validate().map_err(AppError::InvalidInput)?;

            let slot_id = repo::create_class_schedule(store, &student, slot)?
                .ok_or_else(|| AppError::NotFound("student", student.clone()))?;

            let schedule = repo::get_student_class_schedule(store, &student)?;
            let created: Vec<_> = schedule.into_iter().filter(|s| s.id == slot_id).collect();
            output::print_schedules(&created, config);
        }
        ScheduleCommands::Update {
            id,
            day,
            time,
            duration,
            subject,
            active,
        } => {
            let patch = UpdateClassSchedule {
                day_of_week: day,
                time,
                duration,
                subject,
                is_active: active,
            };
            patch.validate().map_err(AppError::InvalidInput)?;

            if !repo::update_class_schedule(store, &id, patch)? {
                return Err(AppError::NotFound("class slot", id).into());
            }
            output::print_success("Class slot updated.", config);
        }
        ScheduleCommands::Set { student, slots } => {
            let parsed: Result<Vec<ScheduleSlot>, AppError> =
                slots.iter().map(|spec| parse_slot_spec(spec)).collect();
            let parsed = parsed?;

            if !repo::replace_student_schedule(store, &student, parsed)? {
                return Err(AppError::NotFound("student", student).into());
            }
            output::print_success("Schedule replaced.", config);
        }
        ScheduleCommands::Remove { id } => {
            if !repo::delete_class_schedule(store, &id)? {
                return Err(AppError::NotFound("class slot", id).into());
            }
            output::print_success("Class slot removed.", config);
        }
        ScheduleCommands::List { student } => {
            let schedule = repo::get_student_class_schedule(store, &student)?;
            output::print_schedules(&schedule, config);
        }
    }
    Ok(())
}
