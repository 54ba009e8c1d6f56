use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid {field}: must be {bound}")]
    Validation { field: &'static str, bound: String },

    #[error("Invalid {field}: '{value}'{}", suggestion_hint(.suggestion))]
    InvalidArgument {
        field: &'static str,
        value: String,
        suggestion: Option<&'static str>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("No profile cached in session")]
    NoProfile,
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

impl PlanError {
    pub fn validation(field: &'static str, bound: impl Into<String>) -> Self {
        PlanError::Validation {
            field,
            bound: bound.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
