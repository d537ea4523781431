//! crates/najm_core/src/ports.rs
//!
//! Defines the service contracts (traits) the session coordinator depends on.
//! These traits form the boundary of the hexagonal architecture, so the stores and
//! the chat session stay independent of the concrete storage backend, the
//! presentation layer, and the generative-language API.

use async_trait::async_trait;
use crate::domain::{Language, Theme};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., file system, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable string key/value storage, the equivalent of browser-local storage.
///
/// Every call completes before returning. There is no transaction or locking:
/// a read-modify-write sequence by two writers ends with the last write winning.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written or was removed.
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> PortResult<()>;
}

/// The presentation layer's global display state.
pub trait DisplayHost: Send + Sync {
    /// The host's ambient colour-scheme hint (e.g. `prefers-color-scheme: dark`).
    fn prefers_dark_scheme(&self) -> bool;

    /// Applies the root-level theme flag. Must take effect before the next paint.
    fn apply_theme(&self, theme: Theme);
}

#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Answers a free-text travel question, replying in the given language.
    async fn get_travel_advice(&self, prompt: &str, language: Language) -> PortResult<String>;
}
