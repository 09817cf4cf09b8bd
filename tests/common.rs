/// Common test utilities for Ateliê integration tests
///
/// This file contains shared functions for all integration tests: store
/// setup and helpers for creating common test records.

use atelie::dto::{NewPayment, NewStudent};
use atelie::models::{PaymentMethod, PaymentStatus, StudentDocument, StudentStatus};
use atelie::repo::{self, PRIMARY_KEY};
use atelie::store::{DocumentStore, MemoryStore};
use chrono::NaiveDate;

/// Creates an in-memory store holding an empty document
///
/// A store with no document at all seeds the illustrative demo dataset on
/// first read; pre-writing an empty document gives tests a clean slate.
pub fn create_test_store() -> MemoryStore {
    let store = MemoryStore::new();
    let doc = StudentDocument::new(vec![]);
    store
        .write(PRIMARY_KEY, &serde_json::to_string(&doc).unwrap())
        .unwrap();
    store
}

/// Builds a date without the Option dance
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A complete enrollment payload with the given name
pub fn sample_student(nome: &str) -> NewStudent {
    NewStudent {
        nome: nome.to_string(),
        status: StudentStatus::Ativo,
        mensalidade: 150.0,
        cidade: "São Paulo".to_string(),
        email: "aluno@email.com".to_string(),
        telefone: "(11) 90000-0000".to_string(),
        nasc: Some(date(2010, 5, 15)),
        vencimento_mensalidade: Some(date(2024, 3, 5)),
    }
}

/// Enrolls a student and returns the assigned id
pub fn enroll(store: &MemoryStore, nome: &str) -> String {
    repo::create_student(store, sample_student(nome)).unwrap()
}

/// A payment payload settling the March 2024 due date
pub fn sample_payment(student_id: &str, amount: f64, paid_on: NaiveDate) -> NewPayment {
    NewPayment {
        student_id: student_id.to_string(),
        amount,
        payment_date: paid_on,
        due_date: date(2024, 3, 5),
        payment_method: PaymentMethod::Pix,
        status: PaymentStatus::Pago,
        observation: None,
        receipt: None,
    }
}
