use std::time::Duration;
use thiserror::Error;

/// Fatal analysis errors. Only these escape the aggregator; everything else
/// is absorbed into a verdict field so callers always receive a complete
/// report or a clear failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("transcript is empty or unparseable: {0}")]
    InvalidTranscript(String),
    #[error("analysis did not complete within {0:?}")]
    Timeout(Duration),
}

/// Failures talking to a language-understanding or web-search backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0} backend is not configured")]
    NotConfigured(&'static str),
    #[error("backend unreachable: {0}")]
    Unavailable(String),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend response could not be decoded: {0}")]
    Decode(String),
}

/// One analysis procedure failed. The aggregator converts these into FAIL
/// verdicts carrying the error message as reasoning.
#[derive(Debug, Error)]
pub enum ProcedureError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("{profile} response does not match the expected schema: {detail}")]
    Malformed { profile: String, detail: String },
}
