//! services/site/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the site
//! service. Domain types are mapped into these flat shapes at the edge.

use najm_core::catalog::{DestinationView, UiText};
use najm_core::{ChatRole, ChatState, ChatTurn, ContentPost, Identity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Requests
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LanguageRequest {
    /// `"ar"` or `"en"`.
    pub language: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ThemeRequest {
    /// `"light"` or `"dark"`.
    pub theme: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    pub prompt: String,
}

//=========================================================================================
// Responses
//=========================================================================================

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PreferencesResponse {
    pub language: String,
    pub theme: String,
    /// Class on the document root: `"dark"` or empty.
    pub root_class: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct IdentityResponse {
    pub name: String,
    pub email: String,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            name: identity.name,
            email: identity.email,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: String,
    pub image_url: String,
    pub user_name: String,
    pub caption: String,
    pub location: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl From<ContentPost> for PostResponse {
    fn from(post: ContentPost) -> Self {
        Self {
            id: post.id,
            image_url: post.image_data,
            user_name: post.author_name,
            caption: post.caption,
            location: post.location,
            timestamp: post.created_at.timestamp_millis(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TurnResponse {
    /// `"user"` or `"assistant"`.
    pub role: String,
    pub text: String,
}

impl From<ChatTurn> for TurnResponse {
    fn from(turn: ChatTurn) -> Self {
        let role = match turn.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            text: turn.text,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// `"idle"` or `"awaiting_response"`.
    pub state: String,
    pub turns: Vec<TurnResponse>,
}

impl ChatResponse {
    pub fn new(state: ChatState, turns: Vec<ChatTurn>) -> Self {
        let state = match state {
            ChatState::Idle => "idle",
            ChatState::AwaitingResponse => "awaiting_response",
        };
        Self {
            state: state.to_string(),
            turns: turns.into_iter().map(TurnResponse::from).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CatalogResponse {
    pub language: String,
    #[schema(value_type = Object)]
    pub ui: &'static UiText,
    #[schema(value_type = Vec<Object>)]
    pub destinations: Vec<DestinationView>,
}
