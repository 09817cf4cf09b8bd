use atelie::dto::NewPayment;
use atelie::errors::AppError;
use atelie::models::{PaymentMethod, PaymentStatus};
use atelie::repo;
use atelie::store::DocumentStore;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::output::{self, OutputConfig};

/// Payment commands
#[derive(Subcommand, Debug)]
pub enum PaymentCommands {
    /// Register a payment on a student's ledger
    Register {
        /// The student id
        #[clap(long)]
        student: String,
        /// Amount paid
        #[clap(long)]
        amount: f64,
        /// Payment date (YYYY-MM-DD)
        #[clap(long)]
        date: NaiveDate,
        /// The due date being settled (YYYY-MM-DD)
        #[clap(long)]
        due_date: NaiveDate,
        /// Payment method
        #[clap(long, value_enum)]
        method: PaymentMethod,
        /// Payment status
        #[clap(long, value_enum, default_value_t = PaymentStatus::Pago)]
        status: PaymentStatus,
        /// Free-form note
        #[clap(long)]
        observation: Option<String>,
        /// Receipt as a data URI
        #[clap(long)]
        receipt: Option<String>,
    },
    /// List a student's payment ledger
    List {
        /// The student id
        student: String,
    },
    /// Show a student's financial status for the current cycle
    Status {
        /// The student id
        student: String,
    },
}

/// Executes a payment command
pub fn execute(
    store: &dyn DocumentStore,
    cmd: PaymentCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        PaymentCommands::Register {
            student,
            amount,
            date,
            due_date,
            method,
            status,
            observation,
            receipt,
        } => {
            if amount < 0.0 {
                return Err(
                    AppError::InvalidInput("amount must not be negative".to_string()).into()
                );
            }
            let registered = repo::register_payment(
                store,
                NewPayment {
                    student_id: student.clone(),
                    amount,
                    payment_date: date,
                    due_date,
                    payment_method: method,
                    status,
                    observation,
                    receipt,
                },
            )?;
            if !registered {
                return Err(AppError::NotFound("student", student).into());
            }
            output::print_success("Payment registered.", config);
        }
        PaymentCommands::List { student } => {
            let payments = repo::get_student_payments(store, &student)?;
            output::print_payments(&payments, config);
        }
        PaymentCommands::Status { student } => {
            let status = repo::get_student_financial_status(store, &student)?
                .ok_or_else(|| AppError::NotFound("student", student))?;
            output::print_financial_status(&status, config);
        }
    }
    Ok(())
}
