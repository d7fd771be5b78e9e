use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortizeError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<serde_json::Error> for AmortizeError {
    fn from(e: serde_json::Error) -> Self {
        AmortizeError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for AmortizeError {
    fn from(e: std::io::Error) -> Self {
        AmortizeError::ExportError(e.to_string())
    }
}

#[cfg(feature = "export")]
impl From<csv::Error> for AmortizeError {
    fn from(e: csv::Error) -> Self {
        AmortizeError::ExportError(e.to_string())
    }
}
