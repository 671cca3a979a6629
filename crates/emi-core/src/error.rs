use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl EmiError {
    /// Shorthand for the calculator's single domain failure.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EmiError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input, if this is an input failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            EmiError::InvalidInput { field, .. } => Some(field),
            EmiError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for EmiError {
    fn from(e: serde_json::Error) -> Self {
        EmiError::SerializationError(e.to_string())
    }
}
