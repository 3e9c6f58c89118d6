pub mod catalog;
pub mod config;
pub mod doctor;
pub mod recommend;
pub mod similar;
pub mod upsell;

mod context;

use chrono::Utc;
use scentwise_core::errors::{ApplicationError, InterfaceError};
use serde::Serialize;
use serde_json::Value;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_RUNTIME: u8 = 3;
pub const EXIT_CATALOG: u8 = 4;
pub const EXIT_REQUEST: u8 = 5;

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
    data: Option<Value>,
}

/// `(error_class, message, exit_code)`
pub(crate) type CommandFailure = (&'static str, String, u8);

impl CommandResult {
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), EXIT_RUNTIME)
            }
        };

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
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

    pub(crate) fn from_failure(command: &str, failure: CommandFailure) -> Self {
        let (error_class, message, exit_code) = failure;
        Self::failure(command, error_class, message, exit_code)
    }
}

/// Maps a service error onto the CLI's error classes and exit codes.
pub(crate) fn application_failure(command: &str, error: ApplicationError) -> CommandFailure {
    let correlation_id = format!("cli-{command}-{}", Utc::now().timestamp_millis());
    let interface = error.into_interface(correlation_id);
    let (error_class, exit_code) = match &interface {
        InterfaceError::BadRequest { .. } => ("bad_request", EXIT_REQUEST),
        InterfaceError::NotFound { .. } => ("not_found", EXIT_REQUEST),
        InterfaceError::ServiceUnavailable { .. } => ("catalog_unavailable", EXIT_CATALOG),
        InterfaceError::Internal { .. } => ("internal", EXIT_RUNTIME),
    };

    let detail = match &interface {
        InterfaceError::BadRequest { message, .. }
        | InterfaceError::NotFound { message, .. }
        | InterfaceError::ServiceUnavailable { message, .. }
        | InterfaceError::Internal { message, .. } => message.clone(),
    };

    let message = format!(
        "{} {detail} (correlation id: {})",
        interface.user_message(),
        interface.correlation_id()
    );
    (error_class, message, exit_code)
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\",\"data\":null}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
