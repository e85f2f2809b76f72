use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InsightError {
    #[error("could not load movie data from `{path}`: {message}")]
    DataLoad { path: PathBuf, message: String },
    #[error("malformed value `{value}` in field `{field}`")]
    DataFormat { field: &'static str, value: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("division by zero: {0}")]
    DivisionByZero(String),
}

impl InsightError {
    pub fn data_format(field: &'static str, value: impl Into<String>) -> Self {
        Self::DataFormat { field, value: value.into() }
    }

    pub fn no_matches(predicate: impl Into<String>) -> Self {
        Self::DivisionByZero(format!("no records matched {}", predicate.into()))
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check your selections and try again."
            }
            Self::ServiceUnavailable { .. } => {
                "The movie dataset is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl InsightError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<InsightError> for InterfaceError {
    fn from(value: InsightError) -> Self {
        let message = value.to_string();
        let correlation_id = "unassigned".to_owned();
        match value {
            InsightError::InvalidInput(_) | InsightError::DivisionByZero(_) => {
                Self::BadRequest { message, correlation_id }
            }
            InsightError::DataLoad { .. } => Self::ServiceUnavailable { message, correlation_id },
            InsightError::DataFormat { .. } => Self::Internal { message, correlation_id },
        }
    }
}
