//! services/site/src/web/rest.rs
//!
//! Contains the Axum handlers for preferences, the catalog, the community feed,
//! and the assistant, plus the master definition for the OpenAPI specification.

use crate::web::protocol::{
    CatalogResponse, ChatRequest, ChatResponse, IdentityResponse, LanguageRequest,
    PostResponse, PreferencesResponse, SignupRequest, ThemeRequest, TurnResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use najm_core::{Identity, Language, NewPost, PortError, RejectReason, StoreError, SubmitOutcome, Theme};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_preferences_handler,
        set_language_handler,
        toggle_language_handler,
        set_theme_handler,
        toggle_theme_handler,
        catalog_handler,
        crate::web::identity::signup_handler,
        crate::web::identity::logout_handler,
        crate::web::identity::current_identity_handler,
        list_posts_handler,
        create_post_handler,
        get_chat_handler,
        post_chat_handler,
    ),
    components(
        schemas(
            PreferencesResponse, LanguageRequest, ThemeRequest, CatalogResponse,
            SignupRequest, IdentityResponse, PostResponse, ChatRequest, ChatResponse,
            TurnResponse
        )
    ),
    tags(
        (name = "Najm Tourism API", description = "Session state for the Najm Tourism site: preferences, visitor, community feed, and assistant.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

pub(crate) fn port_rejection(e: PortError) -> (StatusCode, String) {
    error!("Storage failure: {:?}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Storage is unavailable".to_string(),
    )
}

pub(crate) fn store_rejection(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::Validation(reason) => (StatusCode::BAD_REQUEST, reason),
        StoreError::NoActiveIdentity => (StatusCode::UNAUTHORIZED, e.to_string()),
        StoreError::Port(e) => port_rejection(e),
    }
}

fn preferences(state: &AppState) -> PreferencesResponse {
    let context = state.site.context();
    PreferencesResponse {
        language: context.language.to_string(),
        theme: context.theme.to_string(),
        root_class: state.display.root_class().to_string(),
    }
}

//=========================================================================================
// Preference Handlers
//=========================================================================================

/// Current language, theme, and root theme class.
#[utoipa::path(
    get,
    path = "/preferences",
    responses((status = 200, description = "Current preferences", body = PreferencesResponse))
)]
pub async fn get_preferences_handler(
    State(state): State<Arc<AppState>>,
) -> Json<PreferencesResponse> {
    Json(preferences(&state))
}

#[utoipa::path(
    put,
    path = "/preferences/language",
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Language stored", body = PreferencesResponse),
        (status = 400, description = "Unsupported language tag"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn set_language_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LanguageRequest>,
) -> Result<Json<PreferencesResponse>, (StatusCode, String)> {
    let language = req
        .language
        .parse::<Language>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    state.site.set_language(language).map_err(port_rejection)?;
    Ok(Json(preferences(&state)))
}

#[utoipa::path(
    post,
    path = "/preferences/language/toggle",
    responses(
        (status = 200, description = "Language flipped", body = PreferencesResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn toggle_language_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreferencesResponse>, (StatusCode, String)> {
    state.site.toggle_language().map_err(port_rejection)?;
    Ok(Json(preferences(&state)))
}

#[utoipa::path(
    put,
    path = "/preferences/theme",
    request_body = ThemeRequest,
    responses(
        (status = 200, description = "Theme stored and applied", body = PreferencesResponse),
        (status = 400, description = "Unsupported theme"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn set_theme_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<PreferencesResponse>, (StatusCode, String)> {
    let theme = req
        .theme
        .parse::<Theme>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    state.site.set_theme(theme).map_err(port_rejection)?;
    Ok(Json(preferences(&state)))
}

#[utoipa::path(
    post,
    path = "/preferences/theme/toggle",
    responses(
        (status = 200, description = "Theme flipped", body = PreferencesResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn toggle_theme_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreferencesResponse>, (StatusCode, String)> {
    state.site.toggle_theme().map_err(port_rejection)?;
    Ok(Json(preferences(&state)))
}

//=========================================================================================
// Catalog Handler
//=========================================================================================

/// Interface labels and destinations in the visitor's language.
#[utoipa::path(
    get,
    path = "/catalog",
    responses((status = 200, description = "Localized reference content", body = CatalogResponse))
)]
pub async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    let language = state.site.context().language;
    Json(CatalogResponse {
        language: language.to_string(),
        ui: state.site.ui_text(),
        destinations: state.site.destinations(),
    })
}

//=========================================================================================
// Community Feed Handlers
//=========================================================================================

/// The community feed, newest first apart from the two example posts, which
/// keep their fixed order.
#[utoipa::path(
    get,
    path = "/posts",
    responses((status = 200, description = "All posts", body = [PostResponse]))
)]
pub async fn list_posts_handler(State(state): State<Arc<AppState>>) -> Json<Vec<PostResponse>> {
    Json(state.site.feed().into_iter().map(PostResponse::from).collect())
}

/// Publish a photo under the signed-up visitor's name.
///
/// Accepts a multipart/form-data request with an `image` file part and optional
/// `caption` and `location` text parts. The image is stored as a `data:` URL.
/// Request bodies above the router's body limit are refused with 413 before
/// they reach this handler.
#[utoipa::path(
    post,
    path = "/posts",
    request_body(content_type = "multipart/form-data", description = "The photo and its caption."),
    responses(
        (status = 201, description = "Post published", body = PostResponse),
        (status = 400, description = "Bad request (e.g., missing image)"),
        (status = 401, description = "No visitor is signed up"),
        (status = 413, description = "Request body exceeds the 10 MiB limit"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_post_handler(
    State(state): State<Arc<AppState>>,
    Extension(visitor): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut new_post = NewPost::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            e.status(),
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    (
                        e.status(),
                        format!("Failed to read image bytes: {}", e),
                    )
                })?;
                if !data.is_empty() {
                    new_post.image_data =
                        format!("data:{};base64,{}", content_type, STANDARD.encode(&data));
                }
            }
            "caption" | "location" => {
                let text = field.text().await.map_err(|e| {
                    (
                        e.status(),
                        format!("Failed to read field '{}': {}", name, e),
                    )
                })?;
                if name == "caption" {
                    new_post.caption = text;
                } else {
                    new_post.location = text;
                }
            }
            _ => {}
        }
    }

    info!("Upload from '{}'", visitor.name);
    let post = state.site.submit_post(new_post).map_err(store_rejection)?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

//=========================================================================================
// Assistant Handlers
//=========================================================================================

/// The conversation so far.
#[utoipa::path(
    get,
    path = "/chat",
    responses((status = 200, description = "Chat state and turns", body = ChatResponse))
)]
pub async fn get_chat_handler(State(state): State<Arc<AppState>>) -> Json<ChatResponse> {
    let chat_state = state.site.chat_state().await;
    let turns = state.site.chat_turns().await;
    Json(ChatResponse::new(chat_state, turns))
}

/// Ask the assistant. Failures of the advice service still answer with an apology.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = TurnResponse),
        (status = 400, description = "Empty prompt"),
        (status = 409, description = "A previous question is still being answered")
    )
)]
pub async fn post_chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<TurnResponse>, (StatusCode, String)> {
    match state.site.ask(&req.prompt).await {
        SubmitOutcome::Answered(turn) => Ok(Json(turn.into())),
        SubmitOutcome::Rejected(RejectReason::EmptyPrompt) => {
            Err((StatusCode::BAD_REQUEST, "Prompt is empty".to_string()))
        }
        SubmitOutcome::Rejected(RejectReason::Busy) => Err((
            StatusCode::CONFLICT,
            "The assistant is still answering the previous question".to_string(),
        )),
    }
}
