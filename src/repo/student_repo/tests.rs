use crate::dto::{NewStudent, UpdateStudent};
use crate::models::StudentStatus;
use crate::repo::tests::setup_test_store;
use crate::repo::{self, PRIMARY_KEY};
use crate::store::{DocumentStore, MemoryStore};
use chrono::NaiveDate;

fn new_student(nome: &str) -> NewStudent {
    NewStudent {
        nome: nome.to_string(),
        status: StudentStatus::Ativo,
        mensalidade: 150.0,
        cidade: "São Paulo".to_string(),
        email: "aluno@email.com".to_string(),
        telefone: "(11) 90000-0000".to_string(),
        nasc: NaiveDate::from_ymd_opt(2010, 1, 1),
        vencimento_mensalidade: NaiveDate::from_ymd_opt(2024, 3, 5),
    }
}

#[test]
fn test_create_student_assigns_sequential_ids() {
    let store = setup_test_store();

    let first = repo::create_student(&store, new_student("A")).unwrap();
    let second = repo::create_student(&store, new_student("B")).unwrap();

    assert_eq!(first, "ALU-0001");
    assert_eq!(second, "ALU-0002");
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let store = setup_test_store();

    let first = repo::create_student(&store, new_student("A")).unwrap();
    assert!(repo::delete_student(&store, &first).unwrap());

    let second = repo::create_student(&store, new_student("B")).unwrap();
    assert_eq!(second, "ALU-0002");
}

#[test]
fn test_get_student() {
    let store = setup_test_store();
    let id = repo::create_student(&store, new_student("Maria")).unwrap();

    let student = repo::get_student(&store, &id).unwrap().unwrap();
    assert_eq!(student.nome, "Maria");
    assert_eq!(student.next_payment_due, student.vencimento_mensalidade);

    assert!(repo::get_student(&store, "ALU-9999").unwrap().is_none());
}

#[test]
fn test_create_defaults_vencimento_when_absent() {
    let store = setup_test_store();
    let mut payload = new_student("Sem Vencimento");
    payload.vencimento_mensalidade = None;

    let id = repo::create_student(&store, payload).unwrap();
    let student = repo::get_student(&store, &id).unwrap().unwrap();

    // Defaulted to the 5th of some month in the future
    assert_eq!(student.vencimento_mensalidade.format("%d").to_string(), "05");
    assert_eq!(student.next_payment_due, student.vencimento_mensalidade);
}

#[test]
fn test_update_merges_patch_and_reports_missing() {
    let store = setup_test_store();
    let id = repo::create_student(&store, new_student("Antes")).unwrap();

    let patch = UpdateStudent {
        nome: Some("Depois".to_string()),
        status: Some(StudentStatus::Trancado),
        ..Default::default()
    };
    assert!(repo::update_student(&store, &id, patch).unwrap());

    let student = repo::get_student(&store, &id).unwrap().unwrap();
    assert_eq!(student.nome, "Depois");
    assert_eq!(student.status, StudentStatus::Trancado);
    // Untouched fields keep their values
    assert_eq!(student.mensalidade, 150.0);

    assert!(!repo::update_student(&store, "ALU-9999", UpdateStudent::default()).unwrap());
}

#[test]
fn test_update_preserves_collections_and_cached_dates() {
    let store = setup_test_store();
    let id = repo::create_student(&store, new_student("Com Pagamentos")).unwrap();

    repo::register_payment(
        &store,
        crate::dto::NewPayment {
            student_id: id.clone(),
            amount: 150.0,
            payment_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            payment_method: crate::models::PaymentMethod::Pix,
            status: crate::models::PaymentStatus::Pago,
            observation: None,
            receipt: None,
        },
    )
    .unwrap();

    let before = repo::get_student(&store, &id).unwrap().unwrap();

    let patch = UpdateStudent {
        nome: Some("Renomeado".to_string()),
        ..Default::default()
    };
    assert!(repo::update_student(&store, &id, patch).unwrap());

    let after = repo::get_student(&store, &id).unwrap().unwrap();
    assert_eq!(after.payments, before.payments);
    assert_eq!(after.class_schedule, before.class_schedule);
    assert_eq!(after.tasks, before.tasks);
    assert_eq!(after.next_payment_due, before.next_payment_due);
    assert_eq!(after.last_payment_date, before.last_payment_date);
}

#[test]
fn test_delete_student() {
    let store = setup_test_store();
    let id = repo::create_student(&store, new_student("Temporário")).unwrap();

    assert!(repo::delete_student(&store, &id).unwrap());
    assert!(repo::get_student(&store, &id).unwrap().is_none());
    assert!(!repo::delete_student(&store, &id).unwrap());
}

#[test]
fn test_empty_store_seeds_demo_data() {
    let store = MemoryStore::new();

    let students = repo::get_all_students(&store).unwrap();

    assert_eq!(students.len(), 3);
    assert_eq!(students[0].id, "ALU-0001");
    assert_eq!(students[0].nome, "Maria Silva");
    assert_eq!(students[1].class_schedule.len(), 2);
    // A created student continues the sequence after the seed
    let id = repo::create_student(&store, new_student("Quarto")).unwrap();
    assert_eq!(id, "ALU-0004");
}

#[test]
fn test_corrupt_document_reseeds() {
    let store = MemoryStore::new();
    store.write(PRIMARY_KEY, "{ not json").unwrap();

    let students = repo::get_all_students(&store).unwrap();
    assert_eq!(students.len(), 3);
}

#[test]
fn test_students_not_an_array_reseeds() {
    let store = MemoryStore::new();
    store
        .write(PRIMARY_KEY, r#"{"students": "oops", "version": "1.0"}"#)
        .unwrap();

    let students = repo::get_all_students(&store).unwrap();
    assert_eq!(students.len(), 3);
}

#[test]
fn test_get_all_is_idempotent() {
    let store = setup_test_store();
    repo::create_student(&store, new_student("Estável")).unwrap();

    let first = repo::get_all_students(&store).unwrap();
    let raw_after_first = store.read(PRIMARY_KEY).unwrap().unwrap();

    let second = repo::get_all_students(&store).unwrap();
    let raw_after_second = store.read(PRIMARY_KEY).unwrap().unwrap();

    assert_eq!(first, second);
    // The second load must not rewrite the stored bytes
    assert_eq!(raw_after_first, raw_after_second);
}

#[test]
fn test_legacy_record_is_migrated_once() {
    let store = MemoryStore::new();
    // A record in the shape older app versions wrote: no nextPaymentDue, no
    // tasks, no lastStudentSeq on the document
    store
        .write(
            PRIMARY_KEY,
            r#"{
                "students": [{
                    "id": "ALU-0009",
                    "nome": "Legado",
                    "status": "ativo",
                    "mensalidade": 120,
                    "cidade": "Santos",
                    "email": "l@email.com",
                    "telefone": "(13) 98888-7777",
                    "nasc": "2009-09-09",
                    "vencimentoMensalidade": "2024-02-10",
                    "payments": [],
                    "classSchedule": []
                }],
                "lastUpdated": "2024-02-01T10:00:00Z",
                "version": "1.0"
            }"#,
        )
        .unwrap();

    let students = repo::get_all_students(&store).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(
        students[0].next_payment_due,
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
    );
    assert!(students[0].tasks.is_empty());

    // The rewrite filled the fields in storage too
    let raw = store.read(PRIMARY_KEY).unwrap().unwrap();
    assert!(raw.contains("nextPaymentDue"));
    assert!(raw.contains("lastStudentSeq"));

    // The sequence picked up the migrated id
    let id = repo::create_student(&store, new_student("Novo")).unwrap();
    assert_eq!(id, "ALU-0010");
}

#[test]
fn test_has_data_and_clear_data() {
    let store = MemoryStore::new();
    assert!(!repo::has_data(&store).unwrap());

    repo::get_all_students(&store).unwrap(); // seeds
    assert!(repo::has_data(&store).unwrap());

    assert!(repo::clear_data(&store).unwrap());
    assert!(!repo::has_data(&store).unwrap());
    assert!(!repo::clear_data(&store).unwrap());
}
