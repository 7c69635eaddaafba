use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    /// Shorthand for the precondition failures raised by input validation.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Decimal arithmetic left the representable range.
    pub fn overflow(context: &str) -> Self {
        MortgageError::ComputationError(format!("{context} overflows decimal range"))
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}
