use std::time::Duration;
use thiserror::Error;

/// Failure of a single measured leg. A leg that fails is left out of the
/// comparison instead of aborting it.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Cannot parse URL: {0}")]
    InvalidUrl(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Request error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),
    #[error("Cannot read response body: {0}")]
    Body(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Cannot decode {coding} body: {source}")]
    Corrupted {
        coding: &'static str,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("Archive leg failed: {0}")]
    ArchiveUnavailable(#[source] TransferError),
    #[error("All negotiated legs failed")]
    NoEncodedResults,
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cannot create HTTP client")]
    CannotCreateClient(#[source] reqwest::Error),
    #[error("Cannot serialize results")]
    CannotSerialize(#[from] serde_json::Error),
}
