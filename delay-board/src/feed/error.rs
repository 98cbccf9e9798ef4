//! Feed client error types.

/// Errors from the vehicle-position feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned a non-success status code
    #[error("feed error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but `data.vehiclePositions` was absent
    #[error("response has no vehiclePositions data")]
    MissingData,

    /// A configured header value could not be encoded
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// Reading a saved feed response from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not complete.
    Transport,
    /// The request completed but the body was unusable.
    Format,
}

impl FeedError {
    /// Classify this error as a transport or a format failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            FeedError::Http(_)
            | FeedError::Status { .. }
            | FeedError::InvalidHeader(_)
            | FeedError::Io(_) => FailureKind::Transport,
            FeedError::Json { .. } | FeedError::MissingData => FailureKind::Format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::Status {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "feed error 503: Service Unavailable");

        let err = FeedError::MissingData;
        assert_eq!(err.to_string(), "response has no vehiclePositions data");

        let err = FeedError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn failure_kinds() {
        let status = FeedError::Status {
            status: 502,
            message: String::new(),
        };
        assert_eq!(status.kind(), FailureKind::Transport);
        assert_eq!(FeedError::MissingData.kind(), FailureKind::Format);

        let json = FeedError::Json {
            message: "eof".into(),
            body: None,
        };
        assert_eq!(json.kind(), FailureKind::Format);
    }
}
