use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

/// Generates an entity id of the form `PREFIX-<millis>-<suffix>`
///
/// The suffix is nine random lowercase alphanumeric characters. Uniqueness is
/// probabilistic, which is acceptable for a single-writer local store; the
/// format matches the ids already present in existing data files.
pub fn generate_entity_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("{}-{}-{}", prefix, millis, suffix)
}

/// Formats a student id from its numeric sequence (`ALU-0042`)
pub fn student_id_from_seq(seq: u32) -> String {
    format!("ALU-{:04}", seq)
}

/// Extracts the numeric suffix of a student id
///
/// Returns None for ids that don't carry a parseable `ALU-` suffix; callers
/// treat those as sequence 0 when scanning for the maximum.
pub fn student_id_suffix(id: &str) -> Option<u32> {
    id.strip_prefix("ALU-")?.parse().ok()
}
