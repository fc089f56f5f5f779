/*!
 * Backend implementations for the evaluation service.
 *
 * This module contains the clients a submission view can talk to:
 * - Http: multipart POST to the grading service
 * - Mock: scripted outcomes for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::BackendError;
use crate::evaluation::EvaluationResult;
use crate::submission::Submission;

/// Common trait for all evaluation backends
///
/// The view issues exactly one `evaluate` call per valid submission and
/// never retries.
#[async_trait]
pub trait EvaluationBackend: Send + Sync + Debug {
    /// Send the submission and parse the score summary
    ///
    /// # Arguments
    /// * `submission` - A validated submission
    ///
    /// # Returns
    /// * `Result<EvaluationResult, BackendError>` - The parsed result or an error
    async fn evaluate(&self, submission: &Submission) -> Result<EvaluationResult, BackendError>;

    /// Address submissions are sent to, for logging
    fn endpoint(&self) -> &str;
}

pub mod http;
pub mod mock;

pub use http::HttpBackend;
pub use mock::{MockBackend, MockBehavior};
