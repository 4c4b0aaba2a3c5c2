use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoverError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("CSV load error: {message}")]
    LoadError { message: String },

    #[error("Unable to get {operation} :- {message}")]
    TransportError { operation: String, message: String },

    #[error("Unable to read {operation} :- {message}")]
    DecodeError { operation: String, message: String },

    #[error("Unable to get {operation} :- {message}")]
    RemoteError { operation: String, message: String },

    #[error("Dry Run => Skipping {operation}")]
    DryRunSkipped { operation: String },
}

impl RemoverError {
    /// Configuration and load failures stop the run before any remote work.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            RemoverError::TransportError { .. }
                | RemoverError::DecodeError { .. }
                | RemoverError::RemoteError { .. }
                | RemoverError::DryRunSkipped { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RemoverError::ConfigError { message } => message.clone(),
            RemoverError::MissingConfigError { field } => format!("No {} set", field),
            RemoverError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            RemoverError::LoadError { .. }
            | RemoverError::CsvError(_)
            | RemoverError::IoError(_) => {
                format!("Issues with loading the CSV file: {}", self)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RemoverError>;
