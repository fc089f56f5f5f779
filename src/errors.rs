/*!
 * Error types for the answer-checker application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised locally while checking a form, before any network activity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field or file is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The selected file is not a PDF document
    #[error("Not a PDF file: {0}")]
    NotPdf(String),
}

/// Errors that can occur when talking to the evaluation backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Error when sending the request fails
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Error when the response body is not a valid evaluation result
    #[error("Failed to parse backend response: {0}")]
    ParseError(String),

    /// Non-success status returned by the backend
    #[error("Backend responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Response body, if any
        message: String,
    },

    /// Error establishing a connection to the backend
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Reasons a submission can be refused by the view
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The form is incomplete
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A submission is already in flight
    #[error("A submission is already in progress")]
    Busy,

    /// The result has replaced the form; only a reset brings it back
    #[error("The form is closed until the view is reset")]
    FormClosed,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the form
    #[error("Form error: {0}")]
    View(#[from] ViewError),

    /// Error from the backend
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::View(ViewError::Validation(error))
    }
}
