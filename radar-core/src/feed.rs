use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::RadarSnapshot;

pub mod http;

/// Why a single poll failed. All variants collapse to one generic
/// user-visible message; the distinction exists for diagnostics only.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Endpoint unreachable, connection reset, or timed out.
    #[error("radar feed unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("radar feed returned status {status}: {body}")]
    Protocol {
        status: reqwest::StatusCode,
        /// Response body, truncated for log hygiene.
        body: String,
    },

    /// The body was not a valid snapshot document.
    #[error("radar feed body is not a valid snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Short class name used when logging the failure taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Protocol { .. } => "protocol",
            FetchError::Parse(_) => "parse",
        }
    }
}

/// Anything the poller can fetch a snapshot from.
///
/// [`http::HttpFeed`] is the production implementation; tests substitute
/// in-process fakes.
#[async_trait]
pub trait SnapshotSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<RadarSnapshot, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_match_taxonomy() {
        let protocol = FetchError::Protocol {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        assert_eq!(protocol.kind(), "protocol");
        assert!(protocol.to_string().contains("500"));

        let parse_err = serde_json::from_str::<RadarSnapshot>("not json").unwrap_err();
        let parse = FetchError::from(parse_err);
        assert_eq!(parse.kind(), "parse");
    }
}
