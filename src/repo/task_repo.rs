use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, instrument};

use super::document;
use crate::dto::{NewTask, UpdateTask};
use crate::models::{Task, TaskStatus};
use crate::store::DocumentStore;

/// Creates a task for a student and returns its id, or None when the
/// student does not exist
#[instrument(skip(store, task), fields(student_id = %student_id, title = %task.title))]
pub fn create_task(
    store: &dyn DocumentStore,
    student_id: &str,
    task: NewTask,
) -> Result<Option<String>> {
    debug!("Creating task");

    let mut doc = document::load(store)?;
    let Some(student) = doc.students.iter_mut().find(|s| s.id == student_id) else {
        debug!("Student not found");
        return Ok(None);
    };

    let entry = Task::new(
        student_id.to_string(),
        task.date,
        task.title,
        task.description,
        task.status,
        task.art_image,
        task.notes,
    );
    let task_id = entry.id.clone();
    student.tasks.push(entry);

    document::persist(store, &mut doc)?;
    info!("Created task {} for student {}", task_id, student_id);
    Ok(Some(task_id))
}

/// Applies a patch to a task, refreshing `updatedAt`
///
/// The owning student is located by scanning for the first task list that
/// contains the id. Status never changes on its own; `atrasada` only appears
/// when a caller sets it here.
#[instrument(skip(store, patch), fields(task_id = %task_id))]
pub fn update_task(store: &dyn DocumentStore, task_id: &str, patch: UpdateTask) -> Result<bool> {
    debug!("Updating task");

    let mut doc = document::load(store)?;
    let Some(task) = doc
        .students
        .iter_mut()
        .flat_map(|s| s.tasks.iter_mut())
        .find(|t| t.id == task_id)
    else {
        debug!("Task not found");
        return Ok(false);
    };

    if let Some(date) = patch.date {
        task.date = date;
    }
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(art_image) = patch.art_image {
        task.art_image = Some(art_image);
    }
    if let Some(notes) = patch.notes {
        task.notes = Some(notes);
    }
    task.updated_at = Utc::now();

    document::persist(store, &mut doc)?;
    info!("Updated task {}", task_id);
    Ok(true)
}

/// Deletes a task by id
#[instrument(skip(store), fields(task_id = %task_id))]
pub fn delete_task(store: &dyn DocumentStore, task_id: &str) -> Result<bool> {
    debug!("Deleting task");

    let mut doc = document::load(store)?;
    let mut found = false;
    for student in doc.students.iter_mut() {
        let before = student.tasks.len();
        student.tasks.retain(|t| t.id != task_id);
        if student.tasks.len() != before {
            found = true;
            break;
        }
    }

    if !found {
        debug!("Task not found");
        return Ok(false);
    }

    document::persist(store, &mut doc)?;
    info!("Deleted task {}", task_id);
    Ok(true)
}

/// Returns a student's tasks; empty when the student is unknown
#[instrument(skip(store), fields(student_id = %student_id))]
pub fn get_student_tasks(store: &dyn DocumentStore, student_id: &str) -> Result<Vec<Task>> {
    let students = document::load(store)?.students;
    Ok(students
        .into_iter()
        .find(|s| s.id == student_id)
        .map(|s| s.tasks)
        .unwrap_or_default())
}

/// Convenience for listing only tasks in a given status
pub fn get_student_tasks_by_status(
    store: &dyn DocumentStore,
    student_id: &str,
    status: TaskStatus,
) -> Result<Vec<Task>> {
    let tasks = get_student_tasks(store, student_id)?;
    Ok(tasks.into_iter().filter(|t| t.status == status).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::NewStudent;
    use crate::models::StudentStatus;
    use crate::repo::{self, tests::setup_test_store};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn enroll(store: &crate::store::MemoryStore) -> String {
        repo::create_student(
            store,
            NewStudent {
                nome: "Aluno".to_string(),
                status: StudentStatus::Ativo,
                mensalidade: 100.0,
                cidade: String::new(),
                email: String::new(),
                telefone: String::new(),
                nasc: None,
                vencimento_mensalidade: Some(date(2024, 3, 5)),
            },
        )
        .unwrap()
    }

    fn sample_task() -> NewTask {
        NewTask {
            date: date(2024, 3, 10),
            title: "Estudo de cor".to_string(),
            description: "<p>Paleta complementar</p>".to_string(),
            status: TaskStatus::Pendente,
            art_image: None,
            notes: None,
        }
    }

    #[test]
    fn test_create_and_list_tasks() {
        let store = setup_test_store();
        let student_id = enroll(&store);

        let task_id = create_task(&store, &student_id, sample_task()).unwrap().unwrap();
        assert!(task_id.starts_with("TASK-"));

        let tasks = get_student_tasks(&store, &student_id).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Estudo de cor");
    }

    #[test]
    fn test_create_task_unknown_student() {
        let store = setup_test_store();
        assert!(create_task(&store, "ALU-9999", sample_task()).unwrap().is_none());
    }

    #[test]
    fn test_update_task_refreshes_updated_at() {
        let store = setup_test_store();
        let student_id = enroll(&store);
        let task_id = create_task(&store, &student_id, sample_task()).unwrap().unwrap();

        let created = get_student_tasks(&store, &student_id).unwrap()[0].clone();

        let patch = UpdateTask {
            status: Some(TaskStatus::Concluida),
            notes: Some("entregue".to_string()),
            ..Default::default()
        };
        assert!(update_task(&store, &task_id, patch).unwrap());

        let updated = get_student_tasks(&store, &student_id).unwrap()[0].clone();
        assert_eq!(updated.status, TaskStatus::Concluida);
        assert_eq!(updated.notes.as_deref(), Some("entregue"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        // Fields missing from the patch are untouched
        assert_eq!(updated.title, created.title);
    }

    #[test]
    fn test_update_task_not_found() {
        let store = setup_test_store();
        assert!(!update_task(&store, "TASK-0-x", UpdateTask::default()).unwrap());
    }

    #[test]
    fn test_delete_task() {
        let store = setup_test_store();
        let student_id = enroll(&store);
        let task_id = create_task(&store, &student_id, sample_task()).unwrap().unwrap();

        assert!(delete_task(&store, &task_id).unwrap());
        assert!(get_student_tasks(&store, &student_id).unwrap().is_empty());
        assert!(!delete_task(&store, &task_id).unwrap());
    }

    #[test]
    fn test_filter_tasks_by_status() {
        let store = setup_test_store();
        let student_id = enroll(&store);
        create_task(&store, &student_id, sample_task()).unwrap();
        let mut done = sample_task();
        done.status = TaskStatus::Concluida;
        create_task(&store, &student_id, done).unwrap();

        let pending =
            get_student_tasks_by_status(&store, &student_id, TaskStatus::Pendente).unwrap();
        assert_eq!(pending.len(), 1);
    }
}
