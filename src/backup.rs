use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::models::{RawStudent, StudentDocument, parse_wire_date};
use crate::repo::document;
use crate::reports;
use crate::store::DocumentStore;

/// Prefix under which backup snapshots are stored, in the same namespace as
/// the primary document
pub const BACKUP_PREFIX: &str = "alunos_backup_";

/// Outcome of an import or restore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    #[serde(rename = "importedCount")]
    pub imported_count: usize,
}

impl ImportResult {
    fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            imported_count: 0,
        }
    }
}

/// Outcome of creating a backup snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupResult {
    pub success: bool,
    /// Key the snapshot was stored under
    pub key: String,
}

/// Serializes the whole document as pretty-printed JSON
///
/// The export carries the document fields plus an `exportDate` stamp and the
/// stats computed at export time.
#[instrument(skip(store))]
pub fn export_database(store: &dyn DocumentStore) -> Result<String> {
    let doc = document::load(store)?;
    let stats = reports::compute_stats(&doc.students, Utc::now().date_naive());

    let mut export = serde_json::to_value(&doc)?;
    let map = export
        .as_object_mut()
        .expect("a document always serializes to an object");
    map.insert("exportDate".to_string(), serde_json::to_value(Utc::now())?);
    map.insert("stats".to_string(), serde_json::to_value(&stats)?);

    debug!("Exported document with {} students", doc.students.len());
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Default filename for an export written today
pub fn export_filename() -> String {
    format!("alunos_export_{}.json", Utc::now().format("%Y-%m-%d"))
}

/// Imports a document, replacing the current one
///
/// Records failing structural validation are silently dropped; if none
/// survive, the import is rejected and the stored document is untouched.
/// Otherwise the store is replaced wholesale with the valid subset and the
/// id sequence restarts from the highest imported id.
#[instrument(skip(store, json_data))]
pub fn import_database(store: &dyn DocumentStore, json_data: &str) -> Result<ImportResult> {
    let parsed: Value = match serde_json::from_str(json_data) {
        Ok(value) => value,
        Err(e) => {
            warn!("Import file is not valid JSON: {}", e);
            return Ok(ImportResult::rejected("Erro ao processar arquivo de importação"));
        }
    };

    let Some(entries) = parsed.get("students").and_then(Value::as_array) else {
        return Ok(ImportResult::rejected("Formato de arquivo inválido"));
    };

    let fallback_vencimento =
        crate::models::fifth_of_next_month(Utc::now().date_naive());

    let mut students = Vec::new();
    for entry in entries {
        if !validate_student(entry) {
            debug!("Dropping structurally invalid student record");
            continue;
        }
        let raw: RawStudent = serde_json::from_value(entry.clone())?;
        let (student, _) = raw.normalize(fallback_vencimento);
        students.push(student);
    }

    if students.is_empty() {
        return Ok(ImportResult::rejected("Nenhum aluno válido encontrado no arquivo"));
    }

    let imported_count = students.len();
    let mut doc = StudentDocument::new(students);
    document::persist(store, &mut doc)?;

    info!("Imported {} students, document replaced", imported_count);
    Ok(ImportResult {
        success: true,
        message: format!(
            "Importação realizada com sucesso! {} alunos importados.",
            imported_count
        ),
        imported_count,
    })
}

/// Structural validation applied to each imported record
///
/// Required scalars must be present with the right type, dates must parse,
/// and `payments`/`classSchedule` must be arrays. `tasks` may be absent.
pub fn validate_student(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    let is_string = |key: &str| obj.get(key).map(Value::is_string).unwrap_or(false);
    let is_date = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .and_then(parse_wire_date)
            .is_some()
    };

    let status_valid = matches!(
        obj.get("status").and_then(Value::as_str),
        Some("ativo") | Some("pendente") | Some("trancado")
    );

    let mensalidade_valid = obj
        .get("mensalidade")
        .and_then(Value::as_f64)
        .map(|m| m >= 0.0)
        .unwrap_or(false);

    is_string("id")
        && is_string("nome")
        && status_valid
        && mensalidade_valid
        && is_string("cidade")
        && is_string("email")
        && is_string("telefone")
        && is_date("nasc")
        && is_date("vencimentoMensalidade")
        && is_date("nextPaymentDue")
        && obj.get("payments").map(Value::is_array).unwrap_or(false)
        && obj.get("classSchedule").map(Value::is_array).unwrap_or(false)
}

/// Snapshots the current export under a timestamped backup key
#[instrument(skip(store))]
pub fn create_backup(store: &dyn DocumentStore) -> Result<BackupResult> {
    let data = export_database(store)?;

    let timestamp = Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    let key = format!("{}{}", BACKUP_PREFIX, timestamp);

    store.write(&key, &data)?;
    info!("Created backup {}", key);

    Ok(BackupResult { success: true, key })
}

/// Lists backup keys, newest first
pub fn list_backups(store: &dyn DocumentStore) -> Result<Vec<String>> {
    let mut backups: Vec<String> = store
        .keys()?
        .into_iter()
        .filter(|k| k.starts_with(BACKUP_PREFIX))
        .collect();
    backups.sort();
    backups.reverse();
    Ok(backups)
}

/// Restores a backup snapshot by delegating to the import path
#[instrument(skip(store), fields(key = %key))]
pub fn restore_backup(store: &dyn DocumentStore, key: &str) -> Result<ImportResult> {
    let Some(data) = store.read(key)? else {
        return Ok(ImportResult::rejected("Backup não encontrado"));
    };
    import_database(store, &data)
}

/// Deletes all but the newest `keep` snapshots, returning how many were removed
#[instrument(skip(store))]
pub fn prune_backups(store: &dyn DocumentStore, keep: usize) -> Result<usize> {
    let backups = list_backups(store)?;
    let mut removed = 0;
    for key in backups.iter().skip(keep) {
        if store.remove(key)? {
            removed += 1;
        }
    }
    if removed > 0 {
        info!("Pruned {} old backups", removed);
    }
    Ok(removed)
}

/// Summary of the store, shown by the `info` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(rename = "storageType")]
    pub storage_type: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub version: String,
    #[serde(rename = "totalStudents")]
    pub total_students: usize,
    #[serde(rename = "storageSize")]
    pub storage_size: String,
    pub backups: usize,
}

/// Collects storage details for display
pub fn system_info(store: &dyn DocumentStore) -> Result<SystemInfo> {
    let doc = document::load(store)?;
    let size = store
        .read(document::PRIMARY_KEY)?
        .map(|text| text.len() as u64)
        .unwrap_or(0);

    Ok(SystemInfo {
        storage_type: store.kind().to_string(),
        last_updated: doc.last_updated.to_rfc3339(),
        version: doc.version,
        total_students: doc.students.len(),
        storage_size: format_bytes(size),
        backups: list_backups(store)?.len(),
    })
}

/// Formats a byte count with binary units and two decimals
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let exponent = (bytes as f64).log(1024.0).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    if exponent == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[exponent])
    }
}
