//! crates/najm_core/src/error.rs
//!
//! Caller-visible failures of the stores. None of them are fatal to the session.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required form field was empty. Nothing was changed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Content creation was attempted without a signed-up visitor.
    #[error("No active identity; sign up before uploading")]
    NoActiveIdentity,

    /// The storage backend refused a write.
    #[error("Storage error: {0}")]
    Port(#[from] PortError),
}

pub type StoreResult<T> = Result<T, StoreError>;
