use std::fmt;

use thiserror::Error;

use crate::report::ReportError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "undecodable response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// A page body did not have the expected item list or page count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected response shape from {endpoint}: {message}")]
pub struct ResponseShapeError {
    pub endpoint: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("redirect for {url_mapping} rejected with status {status}")]
    Status { url_mapping: String, status: u16 },
    #[error("redirect for {url_mapping} failed: {source}")]
    Transport {
        url_mapping: String,
        #[source]
        source: TransportError,
    },
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    ResponseShape(#[from] ResponseShapeError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
