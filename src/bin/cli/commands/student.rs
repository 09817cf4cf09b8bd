use atelie::dto::{NewStudent, UpdateStudent};
use atelie::errors::AppError;
use atelie::models::StudentStatus;
use atelie::repo;
use atelie::store::DocumentStore;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::output::{self, OutputConfig};

/// Student management commands
#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Enroll a new student
    Add {
        /// Student name
        #[clap(long)]
        nome: String,
        /// Enrollment status
        #[clap(long, value_enum, default_value_t = StudentStatus::Ativo)]
        status: StudentStatus,
        /// Monthly fee amount
        #[clap(long)]
        mensalidade: f64,
        #[clap(long, default_value = "")]
        cidade: String,
        #[clap(long, default_value = "")]
        email: String,
        #[clap(long, default_value = "")]
        telefone: String,
        /// Birth date (YYYY-MM-DD)
        #[clap(long)]
        nasc: Option<NaiveDate>,
        /// Monthly due date (defaults to the 5th of next month)
        #[clap(long)]
        vencimento: Option<NaiveDate>,
    },
    /// List all students
    List,
    /// Show one student
    Show {
        /// The student id
        id: String,
    },
    /// Update a student; omitted fields keep their values
    Update {
        /// The student id
        id: String,
        #[clap(long)]
        nome: Option<String>,
        #[clap(long, value_enum)]
        status: Option<StudentStatus>,
        #[clap(long)]
        mensalidade: Option<f64>,
        #[clap(long)]
        cidade: Option<String>,
        #[clap(long)]
        email: Option<String>,
        #[clap(long)]
        telefone: Option<String>,
        /// Birth date (YYYY-MM-DD)
        #[clap(long)]
        nasc: Option<NaiveDate>,
        /// Monthly due date (YYYY-MM-DD)
        #[clap(long)]
        vencimento: Option<NaiveDate>,
    },
    /// Remove a student and everything it owns
    Remove {
        /// The student id
        id: String,
    },
}

/// Executes a student command
pub fn execute(
    store: &dyn DocumentStore,
    cmd: StudentCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        StudentCommands::Add {
            nome,
            status,
            mensalidade,
            cidade,
            email,
            telefone,
            nasc,
            vencimento,
        } => {
            if mensalidade < 0.0 {
                return Err(AppError::InvalidInput(
                    "mensalidade must not be negative".to_string(),
                )
                .into());
            }
            let id = repo::create_student(
                store,
                NewStudent {
                    nome,
                    status,
                    mensalidade,
                    cidade,
                    email,
                    telefone,
                    nasc,
                    vencimento_mensalidade: vencimento,
                },
            )?;
            let student = repo::get_student(store, &id)?
                .ok_or_else(|| AppError::NotFound("student", id))?;
            output::print_student(&student, config);
        }
        StudentCommands::List => {
            let students = repo::get_all_students(store)?;
            output::print_students(&students, config);
        }
        StudentCommands::Show { id } => {
            let student =
                repo::get_student(store, &id)?.ok_or_else(|| AppError::NotFound("student", id))?;
            output::print_student(&student, config);
        }
        StudentCommands::Update {
            id,
            nome,
            status,
            mensalidade,
            cidade,
            email,
            telefone,
            nasc,
            vencimento,
        } => {
            let patch = UpdateStudent {
                nome,
                status,
                mensalidade,
                cidade,
                email,
                telefone,
                nasc,
                vencimento_mensalidade: vencimento,
                ..Default::default()
            };
            if !repo::update_student(store, &id, patch)? {
                return Err(AppError::NotFound("student", id).into());
            }
            let student = repo::get_student(store, &id)?
                .ok_or_else(|| AppError::NotFound("student", id))?;
            output::print_student(&student, config);
        }
        StudentCommands::Remove { id } => {
            if !repo::delete_student(store, &id)? {
                return Err(AppError::NotFound("student", id).into());
            }
            output::print_success("Student removed.", config);
        }
    }
    Ok(())
}
