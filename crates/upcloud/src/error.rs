//! UpCloud client error types

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpCloudError {
    /// Rejected locally; no request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UpCloudError {
    /// Build the error for a non-2xx response.
    ///
    /// The API reports failures as `{"error": {"error_code", "error_message"}}`;
    /// bodies that don't follow that shape fall back to the raw text.
    pub fn from_response(status: u16, body: &[u8], path: &str) -> Self {
        let parsed = serde_json::from_slice::<ApiErrorBody>(body).ok();
        let (code, message) = match parsed {
            Some(ApiErrorBody { error }) => (Some(error.error_code), error.error_message),
            None => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    (None, format!("{} returned status {}", path, status))
                } else {
                    (None, text)
                }
            }
        };

        if status == 404 {
            return UpCloudError::NotFound(format!("{} ({})", path, message));
        }

        UpCloudError::Api {
            status,
            code,
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UpCloudError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, UpCloudError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, UpCloudError>;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    error_code: String,
    error_message: String,
}
