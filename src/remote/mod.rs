// remote/mod.rs
use std::sync::Arc;
use thiserror::Error;

use crate::domain::Report;
use crate::store::StoredImage;

mod client;
mod payload;

pub use client::HttpAccidentSink;
pub use payload::{AccidentPayload, CreatedAccident};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote client setup failed: {0}")]
    Setup(String),
    #[error("network error during {stage}: {message}")]
    Network { stage: &'static str, message: String },
    #[error("{stage} rejected with HTTP {status}")]
    Status { stage: &'static str, status: u16 },
    #[error("could not decode backend response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

/// Somewhere accepted reports are forwarded to.
pub trait AccidentSink: Send + Sync {
    /// Sends the report and its photos, returning the backend's accident id.
    fn submit(&self, report: &Report, images: &[Arc<StoredImage>]) -> Result<String, RemoteError>;
}
