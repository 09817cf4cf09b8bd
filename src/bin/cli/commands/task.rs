use atelie::dto::{NewTask, UpdateTask};
use atelie::errors::AppError;
use atelie::models::TaskStatus;
use atelie::repo;
use atelie::store::DocumentStore;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::output::{self, OutputConfig};

/// Task commands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Assign a task to a student
    Add {
        /// The student id
        #[clap(long)]
        student: String,
        /// Scheduled date (YYYY-MM-DD)
        #[clap(long)]
        date: NaiveDate,
        /// Task title
        #[clap(long)]
        title: String,
        /// Rich-text (HTML) description
        #[clap(long, default_value = "")]
        description: String,
        #[clap(long, value_enum, default_value_t = TaskStatus::Pendente)]
        status: TaskStatus,
        /// Reference image for the artwork
        #[clap(long)]
        art_image: Option<String>,
        #[clap(long)]
        notes: Option<String>,
    },
    /// Update a task; omitted fields keep their values
    Update {
        /// The task id
        id: String,
        #[clap(long)]
        date: Option<NaiveDate>,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        description: Option<String>,
        #[clap(long, value_enum)]
        status: Option<TaskStatus>,
        #[clap(long)]
        art_image: Option<String>,
        #[clap(long)]
        notes: Option<String>,
    },
    /// Remove a task
    Remove {
        /// The task id
        id: String,
    },
    /// List a student's tasks
    List {
        /// The student id
        student: String,
        /// Only show tasks in this status
        #[clap(long, value_enum)]
        status: Option<TaskStatus>,
    },
}

/// Executes a task command
pub fn execute(
    store: &dyn DocumentStore,
    cmd: TaskCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        TaskCommands::Add {
            student,
            date,
            title,
            description,
            status,
            art_image,
            notes,
        } => {
            let task_id = repo::create_task(
                store,
                &student,
                NewTask {
                    date,
                    title,
                    description,
                    status,
                    art_image,
                    notes,
                },
            )?
            .ok_or_else(|| AppError::NotFound("student", student.clone()))?;

            let tasks = repo::get_student_tasks(store, &student)?;
            let task = tasks
                .into_iter()
                .find(|t| t.id == task_id)
                .ok_or_else(|| AppError::NotFound("task", task_id))?;
            output::print_tasks(&[task], config);
        }
        TaskCommands::Update {
            id,
            date,
            title,
            description,
            status,
            art_image,
            notes,
        } => {
            let patch = UpdateTask {
                date,
                title,
                description,
                status,
                art_image,
                notes,
            };
            if !repo::update_task(store, &id, patch)? {
                return Err(AppError::NotFound("task", id).into());
            }
            output::print_success("Task updated.", config);
        }
        TaskCommands::Remove { id } => {
            if !repo::delete_task(store, &id)? {
                return Err(AppError::NotFound("task", id).into());
            }
            output::print_success("Task removed.", config);
        }
        TaskCommands::List { student, status } => {
            let tasks = match status {
                Some(status) => repo::get_student_tasks_by_status(store, &student, status)?,
                None => repo::get_student_tasks(store, &student)?,
            };
            output::print_tasks(&tasks, config);
        }
    }
    Ok(())
}
