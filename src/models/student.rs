use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::{ClassSchedule, Payment, Task, parse_wire_date, student_id_from_seq};

/// Enrollment lifecycle of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Ativo,
    Pendente,
    Trancado,
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StudentStatus::Ativo => "ativo",
            StudentStatus::Pendente => "pendente",
            StudentStatus::Trancado => "trancado",
        };
        write!(f, "{}", s)
    }
}

/// A fully normalized student record, the root entity of the document
///
/// `last_payment_date` and `next_payment_due` are cached values mutated only
/// by payment registration; a general update preserves them when the patch
/// omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier (`ALU-NNNN`)
    pub id: String,

    pub nome: String,

    pub status: StudentStatus,

    /// Monthly fee amount
    pub mensalidade: f64,

    pub cidade: String,

    pub email: String,

    pub telefone: String,

    /// Birth date; absent in some legacy records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasc: Option<NaiveDate>,

    /// Monthly due date anchor
    #[serde(rename = "vencimentoMensalidade")]
    pub vencimento_mensalidade: NaiveDate,

    /// Append-only payment ledger, in entry order
    pub payments: Vec<Payment>,

    #[serde(rename = "lastPaymentDate", default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<NaiveDate>,

    /// Next due date; advanced one month per registered payment
    #[serde(rename = "nextPaymentDue")]
    pub next_payment_due: NaiveDate,

    /// Weekly recurring class slots
    #[serde(rename = "classSchedule")]
    pub class_schedule: Vec<ClassSchedule>,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Student {
    /// Creates a new student record with empty collections
    ///
    /// `next_payment_due` starts at the monthly due date; payment
    /// registration advances it from there.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        nome: String,
        status: StudentStatus,
        mensalidade: f64,
        cidade: String,
        email: String,
        telefone: String,
        nasc: Option<NaiveDate>,
        vencimento_mensalidade: NaiveDate,
    ) -> Self {
        Self {
            id,
            nome,
            status,
            mensalidade,
            cidade,
            email,
            telefone,
            nasc,
            vencimento_mensalidade,
            payments: Vec::new(),
            last_payment_date: None,
            next_payment_due: vencimento_mensalidade,
            class_schedule: Vec::new(),
            tasks: Vec::new(),
        }
    }
}

/// A student record as read from storage, before normalization
///
/// Every field is optional and dates are plain strings; `normalize` turns
/// this into a `Student`, filling missing fields with their documented
/// defaults. Collections tolerate non-array values and entries that fail
/// typed parsing (both are dropped with a warning).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStudent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub mensalidade: Option<f64>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub nasc: Option<String>,
    #[serde(rename = "vencimentoMensalidade", default)]
    pub vencimento_mensalidade: Option<String>,
    #[serde(default)]
    pub payments: Option<serde_json::Value>,
    #[serde(rename = "lastPaymentDate", default)]
    pub last_payment_date: Option<String>,
    #[serde(rename = "nextPaymentDue", default)]
    pub next_payment_due: Option<String>,
    #[serde(rename = "classSchedule", default)]
    pub class_schedule: Option<serde_json::Value>,
    #[serde(default)]
    pub tasks: Option<serde_json::Value>,
}

impl RawStudent {
    /// Normalizes a raw record into a `Student`
    ///
    /// `fallback_vencimento` fills a missing `vencimentoMensalidade` (the 5th
    /// of next month at the call site). The returned flag reports whether
    /// normalization changed anything relative to the raw input, which tells
    /// the repository whether the document needs to be rewritten.
    pub fn normalize(self, fallback_vencimento: NaiveDate) -> (Student, bool) {
        let mut changed = false;

        let id = match self.id {
            Some(id) => id,
            None => {
                changed = true;
                student_id_from_seq(1)
            }
        };

        let status = match self.status.as_deref() {
            Some("ativo") => StudentStatus::Ativo,
            Some("pendente") => StudentStatus::Pendente,
            Some("trancado") => StudentStatus::Trancado,
            other => {
                if let Some(value) = other {
                    warn!("Student {}: unknown status {:?}, defaulting to ativo", id, value);
                }
                changed = true;
                StudentStatus::Ativo
            }
        };

        let nasc = normalize_date(self.nasc, &mut changed);

        let vencimento_mensalidade = match normalize_date(self.vencimento_mensalidade, &mut changed)
        {
            Some(date) => date,
            None => {
                changed = true;
                fallback_vencimento
            }
        };

        let last_payment_date = normalize_date(self.last_payment_date, &mut changed);

        let next_payment_due = match normalize_date(self.next_payment_due, &mut changed) {
            Some(date) => date,
            None => {
                changed = true;
                vencimento_mensalidade
            }
        };

        let payments = normalize_entries::<Payment>(&id, "payments", self.payments, &mut changed);
        let class_schedule =
            normalize_entries::<ClassSchedule>(&id, "classSchedule", self.class_schedule, &mut changed);
        let tasks = normalize_entries::<Task>(&id, "tasks", self.tasks, &mut changed);

        let student = Student {
            id,
            nome: fill_string(self.nome, &mut changed),
            status,
            mensalidade: self.mensalidade.unwrap_or_else(|| {
                changed = true;
                0.0
            }),
            cidade: fill_string(self.cidade, &mut changed),
            email: fill_string(self.email, &mut changed),
            telefone: fill_string(self.telefone, &mut changed),
            nasc,
            vencimento_mensalidade,
            payments,
            last_payment_date,
            next_payment_due,
            class_schedule,
            tasks,
        };

        (student, changed)
    }
}

fn fill_string(value: Option<String>, changed: &mut bool) -> String {
    value.unwrap_or_else(|| {
        *changed = true;
        String::new()
    })
}

/// Parses an optional wire date, marking `changed` when the stored text would
/// be rewritten (unparseable values are dropped, timestamps lose their time
/// part)
fn normalize_date(raw: Option<String>, changed: &mut bool) -> Option<NaiveDate> {
    let raw = raw?;
    match parse_wire_date(&raw) {
        Some(date) => {
            if raw != date.format("%Y-%m-%d").to_string() {
                *changed = true;
            }
            Some(date)
        }
        None => {
            *changed = true;
            None
        }
    }
}

/// Parses a nested collection, defaulting to empty and dropping entries that
/// fail typed parsing
fn normalize_entries<T: serde::de::DeserializeOwned>(
    student_id: &str,
    field: &str,
    raw: Option<serde_json::Value>,
    changed: &mut bool,
) -> Vec<T> {
    match raw {
        Some(serde_json::Value::Array(entries)) => {
            let mut parsed = Vec::with_capacity(entries.len());
            for entry in entries {
                match serde_json::from_value::<T>(entry) {
                    Ok(value) => parsed.push(value),
                    Err(e) => {
                        warn!("Student {}: dropping malformed {} entry: {}", student_id, field, e);
                        *changed = true;
                    }
                }
            }
            parsed
        }
        Some(_) => {
            warn!("Student {}: {} is not an array, resetting", student_id, field);
            *changed = true;
            Vec::new()
        }
        None => {
            *changed = true;
            Vec::new()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fallback() -> NaiveDate {
        date(2024, 4, 5)
    }

    #[test]
    fn test_new_student_defaults() {
        let student = Student::new(
            "ALU-0001".to_string(),
            "Maria Silva".to_string(),
            StudentStatus::Ativo,
            150.0,
            "São Paulo".to_string(),
            "maria@email.com".to_string(),
            "(11) 99999-9999".to_string(),
            Some(date(2010, 5, 15)),
            date(2024, 3, 5),
        );

        assert!(student.payments.is_empty());
        assert!(student.class_schedule.is_empty());
        assert!(student.tasks.is_empty());
        assert_eq!(student.last_payment_date, None);
        assert_eq!(student.next_payment_due, student.vencimento_mensalidade);
    }

    #[test]
    fn test_wire_shape_uses_document_names() {
        let student = Student::new(
            "ALU-0001".to_string(),
            "Maria".to_string(),
            StudentStatus::Ativo,
            150.0,
            String::new(),
            String::new(),
            String::new(),
            None,
            date(2024, 3, 5),
        );
        let json = serde_json::to_value(&student).unwrap();

        assert_eq!(json["status"], "ativo");
        assert_eq!(json["vencimentoMensalidade"], "2024-03-05");
        assert_eq!(json["nextPaymentDue"], "2024-03-05");
        assert!(json.get("classSchedule").is_some());
        assert!(json.get("tasks").is_some());
        // Optional fields stay off the wire when unset
        assert!(json.get("nasc").is_none());
        assert!(json.get("lastPaymentDate").is_none());
    }

    #[test]
    fn test_normalize_fills_missing_fields() {
        let raw: RawStudent = serde_json::from_value(json!({
            "id": "ALU-0007",
            "nome": "João",
        }))
        .unwrap();

        let (student, changed) = raw.normalize(fallback());

        assert!(changed);
        assert_eq!(student.id, "ALU-0007");
        assert_eq!(student.status, StudentStatus::Ativo);
        assert_eq!(student.mensalidade, 0.0);
        assert_eq!(student.vencimento_mensalidade, fallback());
        assert_eq!(student.next_payment_due, fallback());
        assert!(student.payments.is_empty());
        assert!(student.tasks.is_empty());
    }

    #[test]
    fn test_normalize_next_due_falls_back_to_vencimento() {
        let raw: RawStudent = serde_json::from_value(json!({
            "id": "ALU-0002",
            "nome": "Ana",
            "status": "ativo",
            "mensalidade": 160.0,
            "cidade": "Campinas",
            "email": "ana@email.com",
            "telefone": "(19) 77777-7777",
            "nasc": "2012-07-10",
            "vencimentoMensalidade": "2024-03-10",
            "payments": [],
            "classSchedule": [],
            "tasks": [],
        }))
        .unwrap();

        let (student, changed) = raw.normalize(fallback());

        assert!(changed);
        assert_eq!(student.next_payment_due, date(2024, 3, 10));
    }

    #[test]
    fn test_normalize_complete_record_is_unchanged() {
        let raw: RawStudent = serde_json::from_value(json!({
            "id": "ALU-0001",
            "nome": "Maria",
            "status": "pendente",
            "mensalidade": 150.0,
            "cidade": "São Paulo",
            "email": "maria@email.com",
            "telefone": "(11) 99999-9999",
            "nasc": "2010-05-15",
            "vencimentoMensalidade": "2024-03-05",
            "payments": [],
            "nextPaymentDue": "2024-04-05",
            "classSchedule": [],
            "tasks": [],
        }))
        .unwrap();

        let (student, changed) = raw.normalize(fallback());

        assert!(!changed);
        assert_eq!(student.status, StudentStatus::Pendente);
        assert_eq!(student.next_payment_due, date(2024, 4, 5));
    }

    #[test]
    fn test_normalize_drops_malformed_entries() {
        let raw: RawStudent = serde_json::from_value(json!({
            "id": "ALU-0003",
            "nome": "Pedro",
            "status": "ativo",
            "mensalidade": 100.0,
            "cidade": "Santos",
            "email": "p@email.com",
            "telefone": "1",
            "nasc": "2011-01-01",
            "vencimentoMensalidade": "2024-03-05",
            "nextPaymentDue": "2024-03-05",
            "payments": [{"garbage": true}],
            "classSchedule": "not an array",
            "tasks": [],
        }))
        .unwrap();

        let (student, changed) = raw.normalize(fallback());

        assert!(changed);
        assert!(student.payments.is_empty());
        assert!(student.class_schedule.is_empty());
    }

    #[test]
    fn test_normalize_truncates_timestamp_dates() {
        let raw: RawStudent = serde_json::from_value(json!({
            "id": "ALU-0004",
            "nome": "Lia",
            "status": "ativo",
            "mensalidade": 120.0,
            "cidade": "",
            "email": "",
            "telefone": "",
            "nasc": "2010-05-15T00:00:00.000Z",
            "vencimentoMensalidade": "2024-03-05",
            "nextPaymentDue": "2024-03-05",
            "payments": [],
            "classSchedule": [],
            "tasks": [],
        }))
        .unwrap();

        let (student, changed) = raw.normalize(fallback());

        assert!(changed);
        assert_eq!(student.nasc, Some(date(2010, 5, 15)));
    }

    #[test]
    fn test_normalize_unknown_status_defaults_to_ativo() {
        let raw: RawStudent = serde_json::from_value(json!({
            "id": "ALU-0005",
            "nome": "Bia",
            "status": "matriculado",
            "mensalidade": 90.0,
            "cidade": "",
            "email": "",
            "telefone": "",
            "vencimentoMensalidade": "2024-03-05",
            "nextPaymentDue": "2024-03-05",
            "payments": [],
            "classSchedule": [],
            "tasks": [],
        }))
        .unwrap();

        let (student, changed) = raw.normalize(fallback());

        assert!(changed);
        assert_eq!(student.status, StudentStatus::Ativo);
    }
}
