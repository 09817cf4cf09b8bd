use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{
    ClassSchedule, DOCUMENT_VERSION, RawDocument, RawStudent, Student, StudentDocument,
    StudentStatus, fifth_of_next_month,
};
use crate::store::DocumentStore;

/// Key the primary document is stored under
pub const PRIMARY_KEY: &str = "alunos_data";

/// Loads the persisted document, seeding and normalizing as needed
///
/// A missing blob, a blob that fails to parse, or a document whose
/// `students` key is not an array all trigger a reseed with the illustrative
/// dataset. Otherwise every record goes through normalization, and the
/// document is rewritten only when normalization actually changed something,
/// so back-to-back loads with no intervening writes leave the stored bytes
/// untouched.
pub(crate) fn load(store: &dyn DocumentStore) -> Result<StudentDocument> {
    let raw_doc = match store.read(PRIMARY_KEY)? {
        None => {
            info!("No persisted document found, seeding");
            return seed(store);
        }
        Some(text) => match serde_json::from_str::<RawDocument>(&text) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Persisted document is malformed ({}), reseeding", e);
                return seed(store);
            }
        },
    };

    let entries = match raw_doc.students {
        Some(Value::Array(entries)) => entries,
        _ => {
            warn!("Persisted document has no students array, reseeding");
            return seed(store);
        }
    };

    let fallback_vencimento = fifth_of_next_month(Utc::now().date_naive());
    let mut changed = false;
    let mut students = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<RawStudent>(entry) {
            Ok(raw) => {
                let (student, student_changed) = raw.normalize(fallback_vencimento);
                changed |= student_changed;
                students.push(student);
            }
            Err(e) => {
                warn!("Dropping unreadable student record: {}", e);
                changed = true;
            }
        }
    }

    let last_student_seq = raw_doc.last_student_seq.unwrap_or_else(|| scan_seq(&students));

    let mut doc = StudentDocument {
        students,
        last_updated: raw_doc.last_updated.unwrap_or_else(Utc::now),
        version: raw_doc.version.unwrap_or_else(|| DOCUMENT_VERSION.to_string()),
        last_student_seq,
    };

    if changed {
        debug!("Normalization changed student records, rewriting document");
        persist(store, &mut doc)?;
    }

    Ok(doc)
}

/// Writes the whole document back, refreshing its timestamp
pub(crate) fn persist(store: &dyn DocumentStore, doc: &mut StudentDocument) -> Result<()> {
    doc.touch();
    let text = serde_json::to_string(doc)?;
    store.write(PRIMARY_KEY, &text)?;
    debug!("Persisted document with {} students", doc.students.len());
    Ok(())
}

/// Highest numeric id suffix among the given students
pub(crate) fn scan_seq(students: &[Student]) -> u32 {
    crate::models::max_assigned_seq(students)
}

/// Whether a document with at least one student exists
pub(crate) fn has_data(store: &dyn DocumentStore) -> Result<bool> {
    let Some(text) = store.read(PRIMARY_KEY)? else {
        return Ok(false);
    };
    let raw: RawDocument = match serde_json::from_str(&text) {
        Ok(raw) => raw,
        Err(_) => return Ok(false),
    };
    Ok(matches!(raw.students, Some(Value::Array(entries)) if !entries.is_empty()))
}

/// Removes the primary document; backup snapshots are untouched
pub(crate) fn clear(store: &dyn DocumentStore) -> Result<bool> {
    store.remove(PRIMARY_KEY)
}

fn seed(store: &dyn DocumentStore) -> Result<StudentDocument> {
    let mut doc = StudentDocument::new(seed_students(Utc::now().date_naive()));
    persist(store, &mut doc)?;
    info!("Seeded document with {} illustrative students", doc.students.len());
    Ok(doc)
}

/// The illustrative dataset written when no usable document exists
///
/// Three students with demo class schedules; due dates land on the 5th of
/// the month after `today`.
pub(crate) fn seed_students(today: NaiveDate) -> Vec<Student> {
    let vencimento = fifth_of_next_month(today);
    let now = Utc::now();

    let demo_slot = |id: &str, student_id: &str, day: u8, time: &str, duration: u32, subject: &str| {
        ClassSchedule {
            id: id.to_string(),
            student_id: student_id.to_string(),
            day_of_week: day,
            time: time.to_string(),
            duration,
            subject: subject.to_string(),
            is_active: true,
            created_at: now,
        }
    };

    let mut maria = Student::new(
        "ALU-0001".to_string(),
        "Maria Silva".to_string(),
        StudentStatus::Ativo,
        150.0,
        "São Paulo".to_string(),
        "maria@email.com".to_string(),
        "(11) 99999-9999".to_string(),
        NaiveDate::from_ymd_opt(2010, 5, 15),
        vencimento,
    );
    maria.class_schedule = vec![
        demo_slot("SCH-001", "ALU-0001", 1, "14:00", 60, "Desenho"),
        demo_slot("SCH-002", "ALU-0001", 3, "16:00", 60, "Pintura"),
    ];

    let mut joao = Student::new(
        "ALU-0002".to_string(),
        "João Santos".to_string(),
        StudentStatus::Ativo,
        180.0,
        "São Paulo".to_string(),
        "joao@email.com".to_string(),
        "(11) 88888-8888".to_string(),
        NaiveDate::from_ymd_opt(2008, 3, 20),
        vencimento,
    );
    joao.class_schedule = vec![
        demo_slot("SCH-003", "ALU-0002", 2, "15:00", 90, "Arte Digital"),
        demo_slot("SCH-004", "ALU-0002", 4, "17:00", 60, "Escultura"),
    ];

    let mut ana = Student::new(
        "ALU-0003".to_string(),
        "Ana Costa".to_string(),
        StudentStatus::Ativo,
        160.0,
        "Campinas".to_string(),
        "ana@email.com".to_string(),
        "(19) 77777-7777".to_string(),
        NaiveDate::from_ymd_opt(2012, 7, 10),
        vencimento,
    );
    ana.class_schedule = vec![demo_slot("SCH-005", "ALU-0003", 1, "16:00", 60, "Desenho")];

    vec![maria, joao, ana]
}
