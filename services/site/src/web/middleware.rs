//! services/site/src/web/middleware.rs
//!
//! Gates routes that require a signed-up visitor.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::info;

use crate::web::state::AppState;

/// Middleware that refuses entry to the upload flow without an active identity.
///
/// If a visitor is signed up, inserts their `Identity` into request extensions.
/// Otherwise returns 401 Unauthorized. The content store checks again on write.
pub async fn require_identity(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let identity = state.site.begin_upload().map_err(|e| {
        info!("Upload refused: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
