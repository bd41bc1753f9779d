use thiserror::Error;

/// Recoverable handler failures. Each variant renders to a customer-facing
/// response via [`AgentError::user_message`]; none of these terminate the
/// session. Panics are the only remaining failure class and are caught at
/// the dispatch boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("missing parameter ({prompt})")]
    MissingParameter { prompt: String },
    #[error("unknown reference ({message})")]
    NotFound { message: String },
    #[error("ambiguous product reference `{name}`")]
    AmbiguousProduct { name: String, candidates: Vec<String> },
    #[error("policy violation ({denial})")]
    PolicyViolation { denial: String },
    #[error("invalid numeric value `{value}`")]
    InvalidFormat { value: String },
}

impl AgentError {
    pub fn missing(prompt: impl Into<String>) -> Self {
        Self::MissingParameter { prompt: prompt.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn policy(denial: impl Into<String>) -> Self {
        Self::PolicyViolation { denial: denial.into() }
    }

    /// The exact text shown to the customer.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingParameter { prompt } => prompt.clone(),
            Self::NotFound { message } => message.clone(),
            Self::AmbiguousProduct { candidates, .. } => {
                format!("Multiple matches: {}. Please specify.", candidates.join(", "))
            }
            Self::PolicyViolation { denial } => denial.clone(),
            Self::InvalidFormat { .. } => {
                "Invalid price format. Please use a number like $100.".to_string()
            }
        }
    }
}
