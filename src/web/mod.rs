//! Web surface: routes, forms and the server loop.

use std::num::NonZeroU16;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tracing::{error, info};

use crate::constants::{MAX_UPLOAD_BYTES, SESSION_SWEEP_INTERVAL};
use crate::openai::OpenAiClient;
use crate::selector::InputStrategy;
use crate::store::{SessionMemory, sweep_expired};

mod analyze;
mod csrf;
pub(crate) mod flash;
mod generate;
mod input;
mod prelude;
mod views;

use analyze::{analyze_generated_handler, analyze_handler};
use generate::{download_handler, generate_handler};
use input::{select_mode_handler, stage_image_handler};
use views::index_handler;

/// Shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    strategy: InputStrategy,
    openai: OpenAiClient,
}

impl AppState {
    /// State for a server offering `strategy`, talking to OpenAI via `openai`.
    pub fn new(strategy: InputStrategy, openai: OpenAiClient) -> Self {
        Self { strategy, openai }
    }
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/static/styles.css", get(styles_handler))
        .route("/mode", post(select_mode_handler))
        .route("/image", post(stage_image_handler))
        .route("/analyze", post(analyze_handler))
        .route("/generate", post(generate_handler))
        .route("/generated/analyze", post(analyze_generated_handler))
        .route("/generated/download", get(download_handler))
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

/// Router with sessions, the upload limit and request tracing applied.
pub fn build_app(state: AppState, store: SessionMemory, session_idle: time::Duration) -> Router {
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(session_idle));

    create_router()
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Binds the listener and serves until ctrl-c.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    state: AppState,
    session_idle: time::Duration,
) -> Result<(), anyhow::Error> {
    let store = SessionMemory::default();
    let sweeper = tokio::spawn(sweep_expired(store.clone(), SESSION_SWEEP_INTERVAL));
    let app = build_app(state, store, session_idle);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    sweeper.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::header::{CONTENT_DISPOSITION, COOKIE, LOCATION, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::constants::TEST_API_KEY;
    use crate::openai::OpenAiConfig;
    use crate::test_fixtures::{tiny_jpeg, tiny_png};

    const BOUNDARY: &str = "visionweb-test-boundary";

    fn app_for(server: &MockServer, strategy: InputStrategy) -> Router {
        let openai = OpenAiClient::new(OpenAiConfig {
            api_key: TEST_API_KEY.to_string(),
            api_base: Url::parse(&format!("{}/v1/", server.uri())).expect("mock url"),
            vision_model: "gpt-4o".to_string(),
            image_model: "dall-e-3".to_string(),
        });
        build_app(
            AppState::new(strategy, openai),
            SessionMemory::default(),
            time::Duration::minutes(5),
        )
    }

    async fn read_body(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }

    /// A browser: keeps the session cookie and the page's CSRF token.
    struct Browser {
        app: Router,
        cookie: String,
        csrf_token: String,
    }

    impl Browser {
        async fn open(app: Router) -> Self {
            let response = app
                .clone()
                .oneshot(Request::get("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let cookie = response
                .headers()
                .get(SET_COOKIE)
                .expect("session cookie")
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            let body = read_body(response).await;
            let csrf_token = extract_csrf(&body);
            Self {
                app,
                cookie,
                csrf_token,
            }
        }

        async fn send(&self, request: Request<Body>) -> axum::response::Response {
            self.app.clone().oneshot(request).await.unwrap()
        }

        async fn get(&self, uri: &str) -> axum::response::Response {
            self.send(
                Request::get(uri)
                    .header(COOKIE, &self.cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
        }

        async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> axum::response::Response {
            let mut body = url::form_urlencoded::Serializer::new(String::new());
            body.append_pair("csrf_token", &self.csrf_token);
            for (name, value) in fields {
                body.append_pair(name, value);
            }
            self.send(
                Request::post(uri)
                    .header(COOKIE, &self.cookie)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.finish()))
                    .unwrap(),
            )
            .await
        }

        async fn post_multipart(
            &self,
            uri: &str,
            question: Option<&str>,
            image: Option<(&str, &[u8])>,
        ) -> axum::response::Response {
            let mut body: Vec<u8> = Vec::new();
            let mut text_part = |name: &str, value: &str| {
                body.extend_from_slice(
                    format!(
                        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                    )
                    .as_bytes(),
                );
            };
            text_part("csrf_token", &self.csrf_token);
            if let Some(question) = question {
                text_part("question", question);
            }
            if let Some((filename, bytes)) = image {
                body.extend_from_slice(
                    format!(
                        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
            body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

            self.send(
                Request::post(uri)
                    .header(COOKIE, &self.cookie)
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
        }

        async fn page(&self) -> String {
            read_body(self.get("/").await).await
        }
    }

    fn extract_csrf(body: &str) -> String {
        let marker = "name=\"csrf_token\" value=\"";
        let start = body.find(marker).expect("csrf field on page") + marker.len();
        let end = body[start..].find('"').expect("end of token") + start;
        body[start..end].to_string()
    }

    fn chat_reply(text: &str) -> Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]
        })
    }

    async fn mount_chat(server: &MockServer, text: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(text)))
            .mount(server)
            .await;
    }

    async fn mount_generation(server: &MockServer, image_url: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created": 1700000000,
                "data": [{"url": image_url, "revised_prompt": "A fluffy orange cat on a windowsill"}]
            })))
            .mount(server)
            .await;
    }

    async fn chat_bodies(server: &MockServer) -> Vec<Value> {
        server
            .received_requests()
            .await
            .expect("request recording")
            .into_iter()
            .filter(|request| request.url.path() == "/v1/chat/completions")
            .map(|request| serde_json::from_slice(&request.body).expect("json body"))
            .collect()
    }

    #[tokio::test]
    async fn full_strategy_offers_mode_selector() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;
        let body = browser.page().await;

        assert!(body.contains("OpenAI Vision and Image Generation"));
        assert!(body.contains("name=\"mode\" value=\"upload\""));
        assert!(body.contains("name=\"mode\" value=\"generate\""));
        assert!(body.contains("name=\"mode\" value=\"capture\""));
        // nothing staged yet, so no analyze action
        assert!(!body.contains("Analyze Image"));
        assert!(!body.contains("Generate Image"));
    }

    #[tokio::test]
    async fn upload_only_shows_upload_and_generation() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;
        let body = browser.page().await;

        assert!(!body.contains("name=\"mode\""));
        assert!(body.contains("Upload an image"));
        assert!(body.contains("Generate Image"));
        assert!(!body.contains("Analyze Uploaded Image"));
        assert!(!body.contains("Analyze Generated Image"));
    }

    #[tokio::test]
    async fn staging_an_upload_offers_analysis() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;

        let png = tiny_png();
        let response = browser
            .post_multipart("/image", None, Some(("cat.png", png.as_slice())))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");

        let body = browser.page().await;
        assert!(body.contains("Image ready."));
        assert!(body.contains("data:image/png;base64,"));
        assert!(body.contains("Analyze Uploaded Image"));
    }

    #[tokio::test]
    async fn invalid_upload_is_flashed_not_staged() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;

        let response = browser
            .post_multipart("/image", None, Some(("notes.txt", b"hello".as_slice())))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let body = browser.page().await;
        assert!(body.contains("isn&#39;t a usable image") || body.contains("usable image"));
        assert!(!body.contains("data:image/"));
    }

    #[tokio::test]
    async fn missing_csrf_token_is_rejected() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;

        let response = browser
            .send(
                Request::post("/generate")
                    .header(COOKIE, &browser.cookie)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("csrf_token=wrong&prompt=cat"))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(
            server
                .received_requests()
                .await
                .expect("request recording")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn analyze_sends_question_and_inline_image() {
        let server = MockServer::start().await;
        mount_chat(&server, "A small red square").await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;

        let jpeg = tiny_jpeg();
        let response = browser
            .post_multipart(
                "/analyze",
                Some(" What is in this image?  "),
                Some(("photo.jpg", jpeg.as_slice())),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("Response from OpenAI Vision API"));
        assert!(body.contains("A small red square"));
        assert!(body.contains("chatcmpl-test"));

        let bodies = chat_bodies(&server).await;
        assert_eq!(bodies.len(), 1);
        let content = bodies[0]["messages"][0]["content"]
            .as_array()
            .expect("content");
        // sent exactly as typed
        assert_eq!(content[0]["text"], " What is in this image?  ");
        assert_eq!(
            content[1]["image_url"]["url"],
            format!("data:image/jpeg;base64,{}", crate::encoder::encode_image(&jpeg))
        );
        assert_eq!(bodies[0]["max_tokens"], 300);

        let requests = server.received_requests().await.expect("request recording");
        assert_eq!(
            requests[0].headers.get("authorization").unwrap(),
            format!("Bearer {TEST_API_KEY}").as_str()
        );
    }

    #[tokio::test]
    async fn analyze_without_image_is_refused() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;

        let response = browser
            .post_multipart("/analyze", Some("What is in this image?"), None)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(browser.page().await.contains("Provide an image"));
        assert!(chat_bodies(&server).await.is_empty());
    }

    #[tokio::test]
    async fn api_errors_are_shown_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;

        let png = tiny_png();
        let response = browser
            .post_multipart("/analyze", Some("What is this?"), Some(("a.png", png.as_slice())))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(read_body(response).await.contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn switching_mode_drops_staged_upload() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;

        let png = tiny_png();
        browser
            .post_multipart("/image", None, Some(("cat.png", png.as_slice())))
            .await;
        assert!(browser.page().await.contains("data:image/png;base64,"));

        let response = browser.post_form("/mode", &[("mode", "capture")]).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let body = browser.page().await;
        assert!(body.contains("capture=\"environment\""));
        assert!(!body.contains("data:image/png;base64,"));

        browser.post_form("/mode", &[("mode", "upload")]).await;
        assert!(!browser.page().await.contains("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn capture_then_analyze() {
        let server = MockServer::start().await;
        mount_chat(&server, "A photo of a desk").await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;

        browser.post_form("/mode", &[("mode", "capture")]).await;
        let jpeg = tiny_jpeg();
        let response = browser
            .post_multipart("/image", None, Some(("image.jpg", jpeg.as_slice())))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let body = browser.page().await;
        assert!(body.contains("Take a picture"));
        assert!(body.contains("capture=\"environment\""));
        assert!(body.contains("Captured Image"));
        assert!(body.contains("data:image/jpeg;base64,"));
        assert!(body.contains(">Analyze Image</button>"));
        assert!(!body.contains("Analyze Uploaded Image"));
        assert!(!body.contains("Generate Image"));

        let response = browser
            .post_multipart("/analyze", Some("What is on the desk?"), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(read_body(response).await.contains("A photo of a desk"));

        let bodies = chat_bodies(&server).await;
        assert_eq!(bodies.len(), 1);
        let content = &bodies[0]["messages"][0]["content"];
        assert_eq!(content[0]["text"], "What is on the desk?");
        assert_eq!(
            content[1]["image_url"]["url"],
            format!("data:image/jpeg;base64,{}", crate::encoder::encode_image(&jpeg))
        );
    }

    #[tokio::test]
    async fn generate_outside_generate_mode_is_refused() {
        let server = MockServer::start().await;
        mount_generation(&server, "https://images.example.org/generated/hidden.png").await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;

        let response = browser.post_form("/generate", &[("prompt", "a cat")]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            server
                .received_requests()
                .await
                .expect("request recording")
                .is_empty()
        );

        browser.post_form("/mode", &[("mode", "generate")]).await;
        assert!(!browser.page().await.contains("hidden.png"));
    }

    #[tokio::test]
    async fn upload_only_refuses_other_modes() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;
        let response = browser.post_form("/mode", &[("mode", "generate")]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generate_then_analyze_generated_reuses_url() {
        let server = MockServer::start().await;
        let image_url = "https://images.example.org/generated/img-abc123.png";
        mount_generation(&server, image_url).await;
        mount_chat(&server, "An orange cat").await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;

        browser.post_form("/mode", &[("mode", "generate")]).await;
        let response = browser
            .post_form("/generate", &[("prompt", "a cat on a windowsill")])
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("img-abc123.png"));
        assert!(body.contains("Analyze Generated Image"));
        assert!(body.contains("A fluffy orange cat on a windowsill"));
        // a plain link, so a failed download still renders its error page
        assert!(body.contains("<a class=\"button\" href=\"/generated/download\">Download Image</a>"));
        assert!(!body.contains("download=\""));

        let response = browser
            .post_form("/generated/analyze", &[("question", "What colour is the cat?")])
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(read_body(response).await.contains("An orange cat"));

        let bodies = chat_bodies(&server).await;
        assert_eq!(bodies.len(), 1);
        let content = &bodies[0]["messages"][0]["content"];
        assert_eq!(content[0]["text"], "What colour is the cat?");
        assert_eq!(content[1]["image_url"]["url"], image_url);
    }

    #[tokio::test]
    async fn analyze_generated_falls_back_to_last_question() {
        let server = MockServer::start().await;
        let image_url = "https://images.example.org/generated/img-xyz.png";
        mount_generation(&server, image_url).await;
        mount_chat(&server, "Still a cat").await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;

        // the question comes from the upload flow
        let png = tiny_png();
        browser
            .post_multipart("/analyze", Some("Is there an animal?"), Some(("a.png", png.as_slice())))
            .await;
        browser.post_form("/generate", &[("prompt", "a cat")]).await;
        let response = browser
            .post_form("/generated/analyze", &[("question", "")])
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let bodies = chat_bodies(&server).await;
        assert_eq!(bodies.len(), 2);
        let content = &bodies[1]["messages"][0]["content"];
        assert_eq!(content[0]["text"], "Is there an animal?");
        assert_eq!(content[1]["image_url"]["url"], image_url);
    }

    #[tokio::test]
    async fn analyze_generated_needs_a_question() {
        let server = MockServer::start().await;
        mount_generation(&server, "https://images.example.org/generated/q.png").await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;

        browser.post_form("/generate", &[("prompt", "a cat")]).await;
        let response = browser
            .post_form("/generated/analyze", &[("question", " ")])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(browser.page().await.contains("Ask a question about the image first."));
        assert!(chat_bodies(&server).await.is_empty());
    }

    #[tokio::test]
    async fn generation_failure_is_visible_and_keeps_previous_url() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;

        let first = Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"url": "https://images.example.org/generated/first.png"}]
            })))
            .up_to_n_times(1)
            .mount_as_scoped(&server)
            .await;
        browser.post_form("/generate", &[("prompt", "a dog")]).await;
        drop(first);

        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "quota exceeded", "type": "insufficient_quota"}
            })))
            .mount(&server)
            .await;
        let response = browser.post_form("/generate", &[("prompt", "a dog")]).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("Image generation failed: quota exceeded"));
        assert!(body.contains("first.png"));
    }

    #[tokio::test]
    async fn download_reencodes_as_png() {
        let server = MockServer::start().await;
        let image_url = format!("{}/files/generated.jpg", server.uri());
        mount_generation(&server, &image_url).await;
        Mock::given(method("GET"))
            .and(path("/files/generated.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_jpeg()))
            .mount(&server)
            .await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;
        browser.post_form("/generate", &[("prompt", "a cat")]).await;

        let response = browser.get("/generated/download").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(
            response.headers().get(CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"generated_image.png\""
        );
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        assert_eq!(
            image::guess_format(&bytes).expect("guess"),
            image::ImageFormat::Png
        );
    }

    #[tokio::test]
    async fn failed_download_shows_error_and_keeps_session() {
        let server = MockServer::start().await;
        let image_url = format!("{}/files/expired.png", server.uri());
        mount_generation(&server, &image_url).await;
        Mock::given(method("GET"))
            .and(path("/files/expired.png"))
            .respond_with(ResponseTemplate::new(403).set_body_string("AuthenticationFailed"))
            .mount(&server)
            .await;
        let browser = Browser::open(app_for(&server, InputStrategy::UploadOnly)).await;
        browser.post_form("/generate", &[("prompt", "a cat")]).await;

        let response = browser.get("/generated/download").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(read_body(response).await.contains("Error in downloading the image"));

        // generated image still there
        assert!(browser.page().await.contains("Analyze Generated Image"));
    }

    #[tokio::test]
    async fn download_without_generated_image_is_not_found() {
        let server = MockServer::start().await;
        let browser = Browser::open(app_for(&server, InputStrategy::Full)).await;
        let response = browser.get("/generated/download").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_stylesheet() {
        let server = MockServer::start().await;
        let app = app_for(&server, InputStrategy::Full);
        let response = app
            .oneshot(
                Request::get("/static/styles.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/css");
    }
}
