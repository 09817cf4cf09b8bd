use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, instrument};

use super::document;
use crate::dto::{NewStudent, UpdateStudent};
use crate::models::{Student, fifth_of_next_month, student_id_from_seq};
use crate::store::DocumentStore;

/// Retrieves every student from the document
///
/// Seeds the illustrative dataset when no usable document exists and applies
/// per-record normalization before returning; see `document::load` for the
/// exact rules.
///
/// ### Arguments
///
/// * `store` - The document store backing the repository
///
/// ### Returns
///
/// A Result containing all students in document order
#[instrument(skip(store))]
pub fn get_all_students(store: &dyn DocumentStore) -> Result<Vec<Student>> {
    debug!("Loading all students");
    Ok(document::load(store)?.students)
}

/// Retrieves a student by id
///
/// ### Arguments
///
/// * `store` - The document store backing the repository
/// * `id` - The student id to look up
///
/// ### Returns
///
/// A Result containing an Option with the Student if found, or None if not found
#[instrument(skip(store), fields(student_id = %id))]
pub fn get_student(store: &dyn DocumentStore, id: &str) -> Result<Option<Student>> {
    debug!("Retrieving student by id");
    let students = get_all_students(store)?;
    Ok(students.into_iter().find(|s| s.id == id))
}

/// Creates a new student and returns its assigned id
///
/// The id is `ALU-` followed by the next sequence number; the sequence is a
/// persisted high-water mark, so numbers are never reused even after the
/// highest-numbered student is deleted. A missing due date defaults to the
/// 5th of next month; collections start empty and `nextPaymentDue` starts at
/// the due date.
///
/// ### Arguments
///
/// * `store` - The document store backing the repository
/// * `new_student` - The student fields supplied by the caller
///
/// ### Returns
///
/// A Result containing the id assigned to the new student
#[instrument(skip(store, new_student), fields(nome = %new_student.nome))]
pub fn create_student(store: &dyn DocumentStore, new_student: NewStudent) -> Result<String> {
    debug!("Creating new student");

    let mut doc = document::load(store)?;

    let seq = doc.next_seq();
    let id = student_id_from_seq(seq);

    let vencimento = new_student
        .vencimento_mensalidade
        .unwrap_or_else(|| fifth_of_next_month(Utc::now().date_naive()));

    let student = Student::new(
        id.clone(),
        new_student.nome,
        new_student.status,
        new_student.mensalidade,
        new_student.cidade,
        new_student.email,
        new_student.telefone,
        new_student.nasc,
        vencimento,
    );

    doc.students.push(student);
    doc.last_student_seq = seq;
    document::persist(store, &mut doc)?;

    info!("Created student {}", id);
    Ok(id)
}

/// Applies a patch to a student
///
/// Omitted fields keep their stored values. The payment ledger, the cached
/// payment dates, the class schedule, and the task list are only replaced
/// when the patch explicitly carries them.
///
/// ### Arguments
///
/// * `store` - The document store backing the repository
/// * `id` - The student id to update
/// * `patch` - The fields to change
///
/// ### Returns
///
/// A Result containing `true` if the student existed, `false` otherwise
#[instrument(skip(store, patch), fields(student_id = %id))]
pub fn update_student(store: &dyn DocumentStore, id: &str, patch: UpdateStudent) -> Result<bool> {
    debug!("Updating student");

    let mut doc = document::load(store)?;
    let Some(student) = doc.students.iter_mut().find(|s| s.id == id) else {
        debug!("Student not found");
        return Ok(false);
    };

    if let Some(nome) = patch.nome {
        student.nome = nome;
    }
    if let Some(status) = patch.status {
        student.status = status;
    }
    if let Some(mensalidade) = patch.mensalidade {
        student.mensalidade = mensalidade;
    }
    if let Some(cidade) = patch.cidade {
        student.cidade = cidade;
    }
    if let Some(email) = patch.email {
        student.email = email;
    }
    if let Some(telefone) = patch.telefone {
        student.telefone = telefone;
    }
    if let Some(nasc) = patch.nasc {
        student.nasc = Some(nasc);
    }
    if let Some(vencimento) = patch.vencimento_mensalidade {
        student.vencimento_mensalidade = vencimento;
    }
    if let Some(last_payment_date) = patch.last_payment_date {
        student.last_payment_date = Some(last_payment_date);
    }
    if let Some(next_payment_due) = patch.next_payment_due {
        student.next_payment_due = next_payment_due;
    }
    if let Some(payments) = patch.payments {
        student.payments = payments;
    }
    if let Some(class_schedule) = patch.class_schedule {
        student.class_schedule = class_schedule;
    }
    if let Some(tasks) = patch.tasks {
        student.tasks = tasks;
    }

    document::persist(store, &mut doc)?;
    info!("Updated student {}", id);
    Ok(true)
}

/// Deletes a student by id
///
/// Owned payments, tasks, and schedule slots are embedded in the record, so
/// they vanish with it.
///
/// ### Arguments
///
/// * `store` - The document store backing the repository
/// * `id` - The student id to delete
///
/// ### Returns
///
/// A Result containing `true` if the student existed, `false` otherwise
#[instrument(skip(store), fields(student_id = %id))]
pub fn delete_student(store: &dyn DocumentStore, id: &str) -> Result<bool> {
    debug!("Deleting student");

    let mut doc = document::load(store)?;
    let before = doc.students.len();
    doc.students.retain(|s| s.id != id);

    if doc.students.len() == before {
        debug!("Student not found");
        return Ok(false);
    }

    document::persist(store, &mut doc)?;
    info!("Deleted student {}", id);
    Ok(true)
}

/// Whether a document with at least one student exists
pub fn has_data(store: &dyn DocumentStore) -> Result<bool> {
    document::has_data(store)
}

/// Removes the primary document entirely; backups are untouched
#[instrument(skip(store))]
pub fn clear_data(store: &dyn DocumentStore) -> Result<bool> {
    info!("Clearing primary document");
    document::clear(store)
}

#[cfg(test)]
mod tests;
