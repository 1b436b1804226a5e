use thiserror::Error;

/// Validation failures raised by the expense form before anything is dispatched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("All fields are required")]
    IncompleteFields,
    #[error("That expense exceeds the remaining budget ({requested:.2} requested, {remaining:.2} left)")]
    BudgetExceeded { requested: f64, remaining: f64 },
}

impl FormError {
    /// Short machine-friendly label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FormError::IncompleteFields => "incomplete_fields",
            FormError::BudgetExceeded { .. } => "budget_exceeded",
        }
    }
}

/// Error type for loading and saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// User-facing shell error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
