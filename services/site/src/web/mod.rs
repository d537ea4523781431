pub mod identity;
pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub use middleware::require_identity;
pub use state::AppState;

/// Uploaded photos are kept inline, so allow reasonably large request bodies.
/// Larger bodies are refused with 413.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the API router. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    // The upload flow is only reachable with a signed-up visitor.
    let create_post = post(rest::create_post_handler).route_layer(
        axum_middleware::from_fn_with_state(app_state.clone(), require_identity),
    );

    Router::new()
        .route("/preferences", get(rest::get_preferences_handler))
        .route("/preferences/language", put(rest::set_language_handler))
        .route("/preferences/language/toggle", post(rest::toggle_language_handler))
        .route("/preferences/theme", put(rest::set_theme_handler))
        .route("/preferences/theme/toggle", post(rest::toggle_theme_handler))
        .route("/catalog", get(rest::catalog_handler))
        .route("/identity", get(identity::current_identity_handler))
        .route("/identity/signup", post(identity::signup_handler))
        .route("/identity/logout", post(identity::logout_handler))
        .route("/posts", create_post.merge(get(rest::list_posts_handler)))
        .route("/chat", get(rest::get_chat_handler).post(rest::post_chat_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RootClassDisplay;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use najm_core::{
        catalog::ADVICE_FALLBACK_EN, AdviceService, Language, MemoryStore, PortError,
        PortResult, SiteCoordinator, Theme,
    };
    use serde_json::{json, Value};
    use tokio::sync::Notify;
    use tower::ServiceExt;

    struct StubAdvice;

    #[async_trait]
    impl AdviceService for StubAdvice {
        async fn get_travel_advice(&self, prompt: &str, _language: Language) -> PortResult<String> {
            if prompt == "test" {
                return Err(PortError::Unavailable("offline".to_string()));
            }
            Ok("Visit Ala-Archa with the family.".to_string())
        }
    }

    /// Holds every answer until the test releases it.
    struct GatedAdvice(Arc<Notify>);

    #[async_trait]
    impl AdviceService for GatedAdvice {
        async fn get_travel_advice(&self, _prompt: &str, _language: Language) -> PortResult<String> {
            self.0.notified().await;
            Ok("Bring a jacket for Son-Kul.".to_string())
        }
    }

    fn app() -> Router {
        app_with(Arc::new(StubAdvice))
    }

    fn app_with(advice: Arc<dyn AdviceService>) -> Router {
        let display = Arc::new(RootClassDisplay::new(Theme::Light));
        let site = SiteCoordinator::new(
            Arc::new(MemoryStore::new()),
            display.clone(),
            advice,
            None,
        );
        site.boot().unwrap();
        router(Arc::new(AppState {
            site: Arc::new(site),
            display,
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_upload(boundary: &str) -> Body {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"caption\"\r\n\r\nLake day\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"location\"\r\n\r\nIssyk-Kul\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"lake.png\"\r\nContent-Type: image/png\r\n\r\nPNGDATA\r\n\
             --{b}--\r\n",
            b = boundary
        );
        Body::from(body)
    }

    async fn upload(app: &Router) -> Response {
        upload_body(app, multipart_upload("najm-boundary")).await
    }

    async fn upload_body(app: &Router, body: Body) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=najm-boundary",
            )
            .body(body)
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn theme_toggle_updates_root_class() {
        let app = app();
        let prefs = json_body(send(&app, Method::GET, "/preferences", None).await).await;
        assert_eq!(prefs["theme"], "light");
        assert_eq!(prefs["language"], "ar");

        let response = send(&app, Method::POST, "/preferences/theme/toggle", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let prefs = json_body(response).await;
        assert_eq!(prefs["theme"], "dark");
        assert_eq!(prefs["root_class"], "dark");

        let response = send(&app, Method::PUT, "/preferences/theme", Some(json!({"theme": "sepia"}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn catalog_follows_language() {
        let app = app();
        let response = send(&app, Method::PUT, "/preferences/language", Some(json!({"language": "en"}))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let catalog = json_body(send(&app, Method::GET, "/catalog", None).await).await;
        assert_eq!(catalog["language"], "en");
        assert_eq!(catalog["ui"]["navHome"], "Home");
        assert_eq!(catalog["destinations"][0]["title"], "Issyk-Kul Lake");
    }

    #[tokio::test]
    async fn upload_requires_signup() {
        let app = app();
        assert_eq!(upload(&app).await.status(), StatusCode::UNAUTHORIZED);

        let response = send(
            &app,
            Method::POST,
            "/identity/signup",
            Some(json!({"name": "Hassan", "email": "hassan@example.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = upload(&app).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let post = json_body(response).await;
        assert_eq!(post["user_name"], "Hassan");
        assert_eq!(post["caption"], "Lake day");
        assert_eq!(post["image_url"], "data:image/png;base64,UE5HREFUQQ==");

        let feed = json_body(send(&app, Method::GET, "/posts", None).await).await;
        assert_eq!(feed.as_array().unwrap().len(), 3);
        assert_eq!(feed[0]["id"], post["id"]);

        send(&app, Method::POST, "/identity/logout", None).await;
        let response = send(&app, Method::GET, "/identity", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_upload_is_refused() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/identity/signup",
            Some(json!({"name": "Hassan", "email": "hassan@example.com"})),
        )
        .await;

        let mut body = b"--najm-boundary\r\nContent-Disposition: form-data; name=\"image\"; filename=\"big.png\"\r\nContent-Type: image/png\r\n\r\n".to_vec();
        body.extend(std::iter::repeat(b'x').take(MAX_BODY_BYTES + 1));
        body.extend_from_slice(b"\r\n--najm-boundary--\r\n");

        let response = upload_body(&app, Body::from(body)).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let feed = json_body(send(&app, Method::GET, "/posts", None).await).await;
        assert_eq!(feed.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn signup_rejects_blank_fields() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/identity/signup",
            Some(json!({"name": "", "email": "hassan@example.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_reports_fallback_and_rejects_blank_prompt() {
        let app = app();
        send(&app, Method::PUT, "/preferences/language", Some(json!({"language": "en"}))).await;

        let response = send(&app, Method::POST, "/chat", Some(json!({"prompt": "  "}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let reply = json_body(send(&app, Method::POST, "/chat", Some(json!({"prompt": "test"}))).await).await;
        assert_eq!(reply["role"], "assistant");
        assert_eq!(reply["text"], ADVICE_FALLBACK_EN);

        let chat = json_body(send(&app, Method::GET, "/chat", None).await).await;
        assert_eq!(chat["state"], "idle");
        assert_eq!(chat["turns"].as_array().unwrap().len(), 2);
        assert_eq!(chat["turns"][0]["text"], "test");
    }

    #[tokio::test]
    async fn chat_refuses_second_question_while_answering() {
        let gate = Arc::new(Notify::new());
        let app = app_with(Arc::new(GatedAdvice(gate.clone())));

        let first = tokio::spawn({
            let app = app.clone();
            async move {
                send(&app, Method::POST, "/chat", Some(json!({"prompt": "What to pack?"}))).await
            }
        });
        loop {
            let chat = json_body(send(&app, Method::GET, "/chat", None).await).await;
            if chat["state"] == "awaiting_response" {
                break;
            }
            tokio::task::yield_now().await;
        }

        let response = send(&app, Method::POST, "/chat", Some(json!({"prompt": "And shoes?"}))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        gate.notify_one();
        let response = first.await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["text"], "Bring a jacket for Son-Kul.");

        let chat = json_body(send(&app, Method::GET, "/chat", None).await).await;
        assert_eq!(chat["state"], "idle");
        assert_eq!(chat["turns"].as_array().unwrap().len(), 2);
    }
}
