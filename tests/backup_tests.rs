/// Integration tests for export, import, and backup snapshots

use atelie::backup;
use atelie::repo;
use serde_json::json;

mod common;
use common::*;

#[test]
fn test_export_then_import_round_trip() {
    let store = create_test_store();
    let id = enroll(&store, "Maria");
    repo::register_payment(&store, sample_payment(&id, 150.0, date(2024, 3, 3))).unwrap();

    let export = backup::export_database(&store).unwrap();

    // Import into a second, unrelated store
    let other = create_test_store();
    let result = backup::import_database(&other, &export).unwrap();

    assert!(result.success);
    assert_eq!(result.imported_count, 1);

    let students = repo::get_all_students(&other).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].nome, "Maria");
    assert_eq!(students[0].payments.len(), 1);
    assert_eq!(students[0].payments[0].amount, 150.0);
}

#[test]
fn test_import_drops_invalid_and_keeps_valid() {
    let store = create_test_store();

    let valid = |id: &str, nome: &str| {
        json!({
            "id": id,
            "nome": nome,
            "status": "ativo",
            "mensalidade": 150.0,
            "cidade": "São Paulo",
            "email": "a@email.com",
            "telefone": "(11) 90000-0000",
            "nasc": "2010-01-01",
            "vencimentoMensalidade": "2024-03-05",
            "payments": [],
            "nextPaymentDue": "2024-03-05",
            "classSchedule": [],
        })
    };

    let payload = json!({
        "students": [
            valid("ALU-0001", "Um"),
            valid("ALU-0002", "Dois"),
            {"id": "ALU-0003"},
            valid("ALU-0004", "Quatro"),
            {"nome": false},
        ]
    });

    let result = backup::import_database(&store, &payload.to_string()).unwrap();

    assert!(result.success);
    assert_eq!(result.imported_count, 3);

    let students = repo::get_all_students(&store).unwrap();
    let names: Vec<&str> = students.iter().map(|s| s.nome.as_str()).collect();
    assert_eq!(names, vec!["Um", "Dois", "Quatro"]);
}

#[test]
fn test_import_with_zero_valid_records_changes_nothing() {
    let store = create_test_store();
    enroll(&store, "Existente");

    let payload = json!({ "students": [ {"id": 1}, "garbage" ] });
    let result = backup::import_database(&store, &payload.to_string()).unwrap();

    assert!(!result.success);
    assert_eq!(result.imported_count, 0);
    assert_eq!(repo::get_all_students(&store).unwrap().len(), 1);
}

#[test]
fn test_backup_create_list_restore() {
    let store = create_test_store();
    enroll(&store, "Antes");

    let created = backup::create_backup(&store).unwrap();
    assert!(created.success);

    let backups = backup::list_backups(&store).unwrap();
    assert_eq!(backups, vec![created.key.clone()]);

    // Change the data, then roll back
    let extra = enroll(&store, "Depois");
    repo::delete_student(&store, &extra).unwrap();
    enroll(&store, "Outra");
    assert_eq!(repo::get_all_students(&store).unwrap().len(), 2);

    let restored = backup::restore_backup(&store, &created.key).unwrap();
    assert!(restored.success);

    let students = repo::get_all_students(&store).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].nome, "Antes");
}

#[test]
fn test_clear_data_leaves_backups_behind() {
    let store = create_test_store();
    enroll(&store, "Maria");
    let created = backup::create_backup(&store).unwrap();

    assert!(repo::clear_data(&store).unwrap());
    assert!(!repo::has_data(&store).unwrap());

    // The snapshot still restores after the wipe
    let restored = backup::restore_backup(&store, &created.key).unwrap();
    assert!(restored.success);
    assert_eq!(repo::get_all_students(&store).unwrap().len(), 1);
}
