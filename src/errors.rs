use thiserror::Error;

/// Errors surfaced at the CLI boundary
///
/// Repository operations report "not found" as a plain boolean or `None`;
/// the command layer turns that into `NotFound` so the user sees which id
/// missed. Store failures bubble up through `Store`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = AppError::NotFound("student", "ALU-0099".to_string());
        assert_eq!(err.to_string(), "student not found: ALU-0099");
    }

    #[test]
    fn test_invalid_input_message() {
        let err = AppError::InvalidInput("duration must be between 15 and 240 minutes".to_string());
        assert_eq!(
            err.to_string(),
            "invalid input: duration must be between 15 and 240 minutes"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: AppError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }
}
