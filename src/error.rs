//! Run-level errors.
//!
//! Only resource-acquisition failures surface here. A malformed record
//! stream is not an error: it ends the run early and is reported through
//! [`crate::record::StreamEnd`].

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::encoder::EncodeError;

/// Errors that abort a conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open input '{path}': {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open output '{path}': {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoder initialization failed: {0}")]
    EncoderInit(#[source] EncodeError),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
