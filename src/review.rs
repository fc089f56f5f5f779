use log::{debug, info};
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::{AppError, BackendError};
use crate::evaluation::EvaluationResult;

// @module: Review document download

const DEFAULT_REVIEW_FILE: &str = "review.pdf";

/// Resolve the review location; relative references are taken against the endpoint
pub fn resolve_review_url(endpoint: &Url, review: &str) -> Result<Url, AppError> {
    endpoint
        .join(review)
        .map_err(|e| AppError::Unknown(format!("Invalid review URL '{}': {}", review, e)))
}

/// Local file name for a review URL: its last path segment, or `review.pdf`
pub fn review_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .unwrap_or_else(|| DEFAULT_REVIEW_FILE.to_string())
}

/// Fetch the review PDF of `result` into `dir`
///
/// Returns `Ok(None)` when the result carries no review URL.
pub async fn download_review(
    client: &Client,
    endpoint: &Url,
    result: &EvaluationResult,
    dir: &Path,
) -> Result<Option<PathBuf>, AppError> {
    let Some(review) = result.review_url() else {
        debug!("No review document in evaluation result");
        return Ok(None);
    };

    let url = resolve_review_url(endpoint, review)?;
    debug!("GET {}", url);

    let response = client.get(url.clone()).send().await.map_err(BackendError::from)?;
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::ApiError {
            status_code: status.as_u16(),
            message: format!("Review download failed: {}", url),
        }
        .into());
    }

    let content = response.bytes().await.map_err(BackendError::from)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(review_file_name(&url));
    fs::write(&path, &content)?;

    info!("Review saved: {}", path.display());
    Ok(Some(path))
}
