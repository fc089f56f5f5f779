/*!
 * # answer-checker - Answer paper submission client
 *
 * A Rust library and CLI that submit a student's answer paper to an external
 * grading service and display the returned score summary.
 *
 * ## Features
 *
 * - Collect student name, subject and PDF uploads (flags or interactive prompts)
 * - Two form variants:
 *   - `paired`: answer script plus solution set
 *   - `single`: answer script only, identity echoed into the result
 * - One multipart POST per valid submission, no retries
 * - Busy indicator while the request is in flight
 * - Optional download of the review PDF
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `submission`: Form model, attachments and multipart layout
 * - `evaluation`: The score summary returned by the service
 * - `backend`: Clients for the grading service:
 *   - `backend::http`: reqwest multipart client
 *   - `backend::mock`: Scripted backend for tests
 * - `view`: Submission view state machine and rendering
 * - `prompt`: Terminal prompts for missing fields
 * - `review`: Review PDF download
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod backend;
pub mod errors;
pub mod evaluation;
pub mod prompt;
pub mod review;
pub mod submission;
pub mod view;

// Re-export main types for easier usage
pub use app_config::Config;
pub use backend::{EvaluationBackend, HttpBackend, MockBackend};
pub use errors::{AppError, BackendError, ValidationError, ViewError};
pub use evaluation::EvaluationResult;
pub use submission::{Attachment, FormVariant, Submission, SubmissionForm};
pub use view::{SubmissionView, ViewStatus};
