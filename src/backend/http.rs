use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::app_config::Config;
use crate::backend::EvaluationBackend;
use crate::errors::BackendError;
use crate::evaluation::EvaluationResult;
use crate::submission::Submission;

/// Client posting submissions to the grading service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// HTTP client for API requests
    client: Client,
    /// Evaluation endpoint
    endpoint: Url,
}

impl HttpBackend {
    /// Create a new backend; without a timeout the transport default applies
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// Create a backend from the endpoint and timeout in the configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let endpoint = config.endpoint_url()?;
        let timeout = config.timeout_secs.map(Duration::from_secs);
        Ok(Self::new(endpoint, timeout)?)
    }

    /// Underlying client, shared with review downloads
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EvaluationBackend for HttpBackend {
    async fn evaluate(&self, submission: &Submission) -> Result<EvaluationResult, BackendError> {
        let form = submission.to_multipart()?;

        debug!(
            "POST {} fields={:?} attached={} bytes",
            self.endpoint,
            submission.field_names(),
            submission.upload_size()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if submission.variant.checks_status() && !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Evaluation backend error ({}): {}", status, error_text);
            return Err(BackendError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.bytes().await?;
        let result = serde_json::from_slice::<EvaluationResult>(&body)
            .map_err(|e| BackendError::ParseError(format!("{} (status {})", e, status)))?;

        debug!(
            "Evaluation received: {}/{} marks",
            result.obtained_marks, result.total_marks
        );

        Ok(result)
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}
