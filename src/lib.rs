/// Ateliê: an art-school student management library
///
/// This library provides the core functionality for managing art-school
/// students: enrollment records, monthly-fee payment tracking, weekly class
/// scheduling, per-student task assignment, and reporting aggregates.
///
/// Persistence is a single JSON document held in a key-value document store.
/// Every operation loads the full document, mutates it in memory, and writes
/// the full document back; the document is the atomicity boundary.
///
/// ### Modules
///
/// - `store`: Document store backends (file-based and in-memory)
/// - `models`: Data structures for students, payments, tasks, and schedules
/// - `repo`: Repository layer, the sole authority over the persisted document
/// - `reports`: Derived aggregates computed fresh on every call
/// - `backup`: Export, import, and backup snapshots
/// - `config`: Application configuration

/// Document store module
pub mod store;

/// Data models module
pub mod models;

/// Repository module for document operations
pub mod repo;

/// Derived aggregates module
pub mod reports;

/// Backup and export module
pub mod backup;

/// Data transfer objects for create/update operations
pub mod dto;

/// Application error types
pub mod errors;

/// Configuration management
pub mod config;

#[cfg(test)]
pub mod test_utils;
