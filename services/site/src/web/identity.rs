//! services/site/src/web/identity.rs
//!
//! Visitor sign-up, log-out, and lookup. There are no passwords: the identity is
//! a display label for the community feed.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::web::protocol::{IdentityResponse, SignupRequest};
use crate::web::rest::{port_rejection, store_rejection};
use crate::web::state::AppState;

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /identity/signup - Declare the current visitor
#[utoipa::path(
    post,
    path = "/identity/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Visitor recorded", body = IdentityResponse),
        (status = 400, description = "Name or email missing"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let identity = state
        .site
        .sign_up(&req.name, &req.email)
        .map_err(store_rejection)?;

    Ok((StatusCode::CREATED, Json(IdentityResponse::from(identity))))
}

/// POST /identity/logout - Forget the current visitor
#[utoipa::path(
    post,
    path = "/identity/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.site.log_out().map_err(port_rejection)?;
    Ok(StatusCode::OK)
}

/// GET /identity - The current visitor, if any
#[utoipa::path(
    get,
    path = "/identity",
    responses(
        (status = 200, description = "Signed-up visitor", body = IdentityResponse),
        (status = 404, description = "Nobody is signed up")
    )
)]
pub async fn current_identity_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IdentityResponse>, (StatusCode, String)> {
    state
        .site
        .current_identity()
        .map(|identity| Json(identity.into()))
        .ok_or((StatusCode::NOT_FOUND, "No visitor is signed up".to_string()))
}
