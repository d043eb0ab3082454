use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid value `{value}` for `{field}` (expected {expected})")]
    InvalidValue { field: String, value: String, expected: String },
    #[error("rating must be in range 1..=5, got {0}")]
    RatingOutOfRange(u8),
    #[error("safety rating must be in range 1..=5, got {0}")]
    SafetyRatingOutOfRange(u8),
}

impl DomainError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue { field: field.into(), value: value.into(), expected: expected.into() }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in operator output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_input",
            Self::Persistence(_) => "persistence",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The request could not be processed. Check inputs and try again.",
            Self::Persistence(_) => "Stored personalization data is unavailable.",
            Self::Configuration(_) => "The configuration is invalid.",
        }
    }
}
