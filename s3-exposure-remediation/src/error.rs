//! Crate-level error taxonomy.
//!
//! Startup failures (`Configuration`) are kept apart from per-event failures
//! (`MalformedEvent`, `UpstreamService`) so that the entry point can report
//! them differently. None of these are recovered locally.

use crate::aws::AwsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemediationError {
    /// Missing or malformed whitelist configuration. Fatal for the process.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The inbound event does not have the expected shape. Aborts one invocation.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// The identity or storage control service failed. Aborts one invocation.
    #[error("Upstream service error: {0}")]
    UpstreamService(#[from] AwsError),
}

impl RemediationError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }

    /// True for errors that should stop the whole process rather than one event.
    pub fn is_startup_failure(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type RemediationResult<T> = Result<T, RemediationError>;
