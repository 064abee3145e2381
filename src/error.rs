use thiserror::Error;

pub type PxwindResult<T> = Result<T, PxwindError>;

#[derive(Error, Debug, Clone)]
pub enum PxwindError {
    #[error("Invalid custom scale entry '{name}': {reason}")]
    InvalidScaleEntry { name: String, reason: String },

    #[error("Edit batch was not applied after {attempts} attempts")]
    ApplyFailed { attempts: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
