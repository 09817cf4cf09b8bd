use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, instrument};

use super::document;
use crate::dto::NewPayment;
use crate::models::{Payment, StudentStatus, one_month_after};
use crate::reports::{self, FinancialStatus};
use crate::store::DocumentStore;

/// Registers a payment against a student's ledger
///
/// Appends an immutable ledger entry and updates the cached payment fields:
/// `lastPaymentDate` takes the payment date, `nextPaymentDue` advances by
/// exactly one calendar month from its previous value (never from today),
/// and a `pendente` student flips to `ativo`.
///
/// ### Arguments
///
/// * `store` - The document store backing the repository
/// * `payment` - The payment fields supplied by the caller
///
/// ### Returns
///
/// A Result containing `true` if the student existed, `false` otherwise
#[instrument(skip(store, payment), fields(student_id = %payment.student_id, amount = %payment.amount))]
pub fn register_payment(store: &dyn DocumentStore, payment: NewPayment) -> Result<bool> {
    debug!("Registering payment");

    let mut doc = document::load(store)?;
    let Some(student) = doc.students.iter_mut().find(|s| s.id == payment.student_id) else {
        debug!("Student not found");
        return Ok(false);
    };

    let entry = Payment::new(
        payment.student_id.clone(),
        payment.amount,
        payment.payment_date,
        payment.due_date,
        payment.payment_method,
        payment.status,
        payment.observation,
        payment.receipt,
    );
    let entry_id = entry.id.clone();

    student.payments.push(entry);
    student.last_payment_date = Some(payment.payment_date);
    student.next_payment_due = one_month_after(student.next_payment_due);
    if student.status == StudentStatus::Pendente {
        student.status = StudentStatus::Ativo;
    }

    document::persist(store, &mut doc)?;
    info!("Registered payment {} for student {}", entry_id, payment.student_id);
    Ok(true)
}

/// Returns a student's payment ledger in entry order
///
/// An unknown student yields an empty ledger rather than an error.
#[instrument(skip(store), fields(student_id = %student_id))]
pub fn get_student_payments(store: &dyn DocumentStore, student_id: &str) -> Result<Vec<Payment>> {
    let students = document::load(store)?.students;
    Ok(students
        .into_iter()
        .find(|s| s.id == student_id)
        .map(|s| s.payments)
        .unwrap_or_default())
}

/// Computes the financial status of one student against today's date
#[instrument(skip(store), fields(student_id = %student_id))]
pub fn get_student_financial_status(
    store: &dyn DocumentStore,
    student_id: &str,
) -> Result<Option<FinancialStatus>> {
    let students = document::load(store)?.students;
    let today = Utc::now().date_naive();
    Ok(students
        .iter()
        .find(|s| s.id == student_id)
        .map(|s| reports::student_financial_status(s, today)))
}
