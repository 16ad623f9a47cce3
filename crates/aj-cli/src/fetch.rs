//! Filter list retrieval
//!
//! One HTTP GET per run, no retry, no timeout at this layer.

use thiserror::Error;

/// AdGuard Base filter (chromium build), the list this tool reads.
pub const FILTER_LIST_URL: &str = "https://filters.adtidy.org/extension/chromium/filters/2.txt";

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("filter list fetch failed: HTTP {status}")]
    Status { status: u16 },
    #[error("filter list fetch failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Downloads the filter list and returns the response body as text.
/// Any non-2xx status fails with the observed status code.
pub async fn fetch_filter_list(url: &str) -> Result<String, RetrievalError> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RetrievalError::Status {
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}
