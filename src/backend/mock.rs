/*!
 * Mock backend for testing.
 *
 * - `MockBackend::working(result)` - Always answers with the given result
 * - `MockBackend::unreachable()` - Fails as if nothing listens on the port
 * - `MockBackend::server_error(status)` - Responds with a non-2xx status
 * - `MockBackend::malformed()` - Responds with a body that is not a result
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::EvaluationBackend;
use crate::errors::BackendError;
use crate::evaluation::EvaluationResult;
use crate::submission::Submission;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Responds 200 with the given result
    Working(EvaluationResult),
    /// Connection refused
    Unreachable,
    /// Responds with the given status and a plain-text body
    ServerError { status_code: u16 },
    /// Responds 200 with a body that does not parse
    Malformed,
}

/// Mock backend recording every submission it receives
#[derive(Debug, Clone)]
pub struct MockBackend {
    behavior: MockBehavior,
    /// Simulated latency before answering
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<Submission>>>,
}

impl MockBackend {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working(result: EvaluationResult) -> Self {
        Self::new(MockBehavior::Working(result))
    }

    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    pub fn server_error(status_code: u16) -> Self {
        Self::new(MockBehavior::ServerError { status_code })
    }

    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of submissions received
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Most recent submission received
    pub fn last_submission(&self) -> Option<Submission> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl EvaluationBackend for MockBackend {
    async fn evaluate(&self, submission: &Submission) -> Result<EvaluationResult, BackendError> {
        self.calls.lock().push(submission.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::Working(result) => Ok(result.clone()),
            MockBehavior::Unreachable => Err(BackendError::ConnectionError(
                "Connection refused (mock)".to_string(),
            )),
            MockBehavior::ServerError { status_code } => {
                // A form that ignores the status goes on to parse the error page
                if submission.variant.checks_status() {
                    Err(BackendError::ApiError {
                        status_code: *status_code,
                        message: "Internal Server Error".to_string(),
                    })
                } else {
                    Err(BackendError::ParseError(format!(
                        "expected value at line 1 column 1 (status {})",
                        status_code
                    )))
                }
            }
            MockBehavior::Malformed => Err(BackendError::ParseError(
                "missing field `totalMarks` (mock)".to_string(),
            )),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://evaluate"
    }
}
