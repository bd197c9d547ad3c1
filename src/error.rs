//! Error types for the Crowdax client

use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages from a 422 response
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'crowdax init' first.")]
    ConfigNotFound,

    #[error("{}", join_field_errors(.0))]
    Validation(FieldErrors),

    /// The session has already been cleared by the time this surfaces.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{message}")]
    Server { status: u16, message: String },

    /// Backend-provided `error`/`message`/`flash` string, surfaced verbatim
    #[error("{0}")]
    Api(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Field-level messages, when this is a validation error
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Join a field-error map as `"field: msg1, msg2; field2: msg3"`.
/// BTreeMap iteration keeps the field order stable.
fn join_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn field_map(entries: &[(&str, &[&str])]) -> FieldErrors {
        entries
            .iter()
            .map(|(field, messages)| {
                (
                    field.to_string(),
                    messages.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_validation_error_joins_fields() {
        let errors = field_map(&[
            ("email", &["is invalid"][..]),
            ("password", &["too short"][..]),
        ]);
        let e = Error::Validation(errors);
        assert_eq!(e.to_string(), "email: is invalid; password: too short");
    }

    #[test]
    fn test_validation_error_joins_multiple_messages() {
        let errors = field_map(&[("email", &["is invalid", "is taken"][..])]);
        let e = Error::Validation(errors);
        assert_eq!(e.to_string(), "email: is invalid, is taken");
    }

    #[test]
    fn test_validation_field_order_is_stable() {
        // Inserted out of order; BTreeMap sorts alphabetically
        let mut errors = FieldErrors::new();
        errors.insert("password".to_string(), vec!["too short".to_string()]);
        errors.insert("email".to_string(), vec!["is invalid".to_string()]);
        let e = Error::Validation(errors);
        assert_eq!(e.to_string(), "email: is invalid; password: too short");
    }

    #[test]
    fn test_api_error_is_verbatim() {
        let e = Error::Api("Invalid email or password".to_string());
        assert_eq!(e.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_server_error_display() {
        let e = Error::Server {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(e.to_string(), "Internal Server Error");
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: Error = io_err.into();
        assert!(e.to_string().contains("file missing"));
    }

    #[test]
    fn test_field_errors_accessor() {
        let e = Error::Validation(field_map(&[("email", &["is invalid"][..])]));
        assert!(e.field_errors().is_some());
        assert!(Error::Unauthorized.field_errors().is_none());
    }
}
