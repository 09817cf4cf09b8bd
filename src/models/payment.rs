use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::generate_entity_id;

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Dinheiro,
    Pix,
    Cartao,
    Transferencia,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMethod::Dinheiro => "dinheiro",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cartao => "cartao",
            PaymentMethod::Transferencia => "transferencia",
        };
        write!(f, "{}", s)
    }
}

/// Settlement state of a single payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pago,
    Pendente,
    Vencido,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pago => "pago",
            PaymentStatus::Pendente => "pendente",
            PaymentStatus::Vencido => "vencido",
        };
        write!(f, "{}", s)
    }
}

/// A single entry in a student's payment ledger
///
/// Payments are created through payment registration and never modified or
/// deleted afterwards; the ledger is append-only in entry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier (`PAY-<millis>-<suffix>`)
    pub id: String,

    /// Back-reference to the owning student
    #[serde(rename = "studentId")]
    pub student_id: String,

    /// Amount paid
    pub amount: f64,

    /// The date the payment was made
    #[serde(rename = "paymentDate")]
    pub payment_date: NaiveDate,

    /// The due date the payment settles
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,

    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,

    pub status: PaymentStatus,

    /// Free-form note about the payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,

    /// Receipt as a data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,

    /// When this record was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new ledger entry with a generated id and creation timestamp
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_id: String,
        amount: f64,
        payment_date: NaiveDate,
        due_date: NaiveDate,
        payment_method: PaymentMethod,
        status: PaymentStatus,
        observation: Option<String>,
        receipt: Option<String>,
    ) -> Self {
        Self {
            id: generate_entity_id("PAY"),
            student_id,
            amount,
            payment_date,
            due_date,
            payment_method,
            status,
            observation,
            receipt,
            created_at: Utc::now(),
        }
    }
}
