use thiserror::Error;

use crate::refinery::tables::ExtractError;

// * Unified Error type for the upstream fetch.
// * This is the only failure that escapes the refinery core.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    #[error("Invalid request header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Empty response body")]
    EmptyDocument,

    #[error("Table extraction did not complete: {0}")]
    Extraction(#[source] tokio::task::JoinError),
}

impl From<ExtractError<reqwest::Error>> for UpstreamError {
    fn from(e: ExtractError<reqwest::Error>) -> Self {
        match e {
            ExtractError::Stream(e) => UpstreamError::Reqwest(e),
            ExtractError::Worker(e) => UpstreamError::Extraction(e),
        }
    }
}

impl UpstreamError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Reqwest(e) if e.is_timeout() => "timeout",
            UpstreamError::Reqwest(e) if e.is_connect() => "connect",
            UpstreamError::Reqwest(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Header(_) => "config",
            UpstreamError::EmptyDocument => "empty",
            UpstreamError::Extraction(_) => "extraction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancelled_extraction_is_an_upstream_failure() {
        let task = tokio::spawn(std::future::pending::<()>());
        task.abort();
        let join_err = task.await.unwrap_err();
        assert!(join_err.is_cancelled());

        let err = UpstreamError::from(ExtractError::<reqwest::Error>::Worker(join_err));
        assert!(matches!(err, UpstreamError::Extraction(_)));
        assert_eq!(err.kind(), "extraction");
    }
}
