/// Repository module
///
/// This module provides the data access layer for the application. It is the
/// sole authority over the persisted student document: every operation loads
/// the full document from the injected store, mutates it in memory, and
/// persists the full document back.
///
/// The repository pattern abstracts away the details of document access
/// and provides a clean API for the rest of the application to use.

pub(crate) mod document;

mod student_repo;
mod payment_repo;
mod task_repo;
mod schedule_repo;

// Re-export all repository functions
pub use student_repo::*;
pub use payment_repo::*;
pub use task_repo::*;
pub use schedule_repo::*;

pub use document::PRIMARY_KEY;

#[cfg(test)]
pub mod tests {
    use crate::models::StudentDocument;
    use crate::store::{DocumentStore, MemoryStore};

    /// Sets up an in-memory store holding an empty document
    ///
    /// A store with no document at all would seed the illustrative demo
    /// dataset on first read; pre-writing an empty document gives tests a
    /// clean slate while still exercising the normal load path.
    pub fn setup_test_store() -> MemoryStore {
        let store = MemoryStore::new();
        let doc = StudentDocument::new(vec![]);
        store
            .write(
                super::document::PRIMARY_KEY,
                &serde_json::to_string(&doc).expect("empty document serializes"),
            )
            .expect("writing to a fresh memory store succeeds");
        store
    }
}
