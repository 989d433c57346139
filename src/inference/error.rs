//! Inference error types.
//!
//! None of these reach the UI directly: `InferenceClient::analyze` folds
//! every variant into the fallback result.

use thiserror::Error;

pub type InferenceResult<T> = Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("No API key configured")]
    MissingCredential,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Inference service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Inference service returned no text")]
    EmptyResponse,

    #[error("Malformed analysis payload: {0}")]
    Decode(#[from] serde_json::Error),
}
