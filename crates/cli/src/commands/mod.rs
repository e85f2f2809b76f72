pub mod doctor;
pub mod predict;
pub mod search;
pub mod summary;

use boxoffice_core::config::{AppConfig, LoadOptions};
use boxoffice_core::errors::InsightError;
use boxoffice_core::store::RecordStore;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    /// Success carrying a structured result under `data`.
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: &impl Serialize,
    ) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => {
                let payload = CommandOutcome {
                    command: command.to_string(),
                    status: "ok".to_string(),
                    error_class: None,
                    message: message.into(),
                    data: Some(value),
                };
                Self { exit_code: 0, output: serialize_payload(payload) }
            }
            Err(error) => Self::failure(command, "serialization", error.to_string(), 6),
        }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps an analytics failure onto its error class and exit code.
    pub fn from_insight(command: &str, error: InsightError) -> Self {
        let (error_class, exit_code) = match &error {
            InsightError::DataLoad { .. } => ("data_load", 3),
            InsightError::InvalidInput(_) => ("invalid_input", 4),
            InsightError::DivisionByZero(_) => ("no_matching_records", 4),
            InsightError::DataFormat { .. } => ("data_format", 5),
        };
        Self::failure(command, error_class, error.to_string(), exit_code)
    }
}

/// Loads config and the dataset it points at, or the failure to report.
pub(crate) fn load_dataset(command: &str) -> Result<RecordStore, CommandResult> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })?;

    RecordStore::load(&config.data.movie_data_path)
        .map_err(|error| CommandResult::from_insight(command, error))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
