//! services/site/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::RootClassDisplay;
use najm_core::SiteCoordinator;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The service hosts a single page session: every request sees the same
/// preferences, visitor, feed, and conversation.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteCoordinator>,
    pub display: Arc<RootClassDisplay>,
}
