//! End-to-end router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use futures::future::BoxFuture;
use serde_json::{json, Value};
use tmt_core::{LanguageCode, TmtConfig};
use tmt_server::{build_router, AppState};
use tmt_store::SqliteStore;
use tmt_translate::{ProviderError, TranslationProvider};
use tower::ServiceExt;

/// Spanish translates to "Hola"; every other language fails.
#[derive(Default)]
struct SpanishOnly {
    calls: AtomicUsize,
}

impl TranslationProvider for SpanishOnly {
    fn translate<'a>(
        &'a self,
        _text: &'a str,
        target: LanguageCode,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            match target {
                LanguageCode::Es => Ok("Hola".to_string()),
                _ => Err(ProviderError::Status(503)),
            }
        })
    }

    fn name(&self) -> &'static str {
        "spanish-only"
    }
}

struct TestApp {
    router: Router,
    provider: Arc<SpanishOnly>,
    _dir: tempfile::TempDir,
}

impl TestApp {
    fn new(require_auth: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TmtConfig::with_data_dir(dir.path()).unwrap();
        config.require_auth = require_auth;
        let store = SqliteStore::open(&config.db_path).unwrap();
        let provider = Arc::new(SpanishOnly::default());
        let state = AppState::with_provider(config, store, provider.clone());
        Self {
            router: build_router(Arc::new(state)),
            provider,
            _dir: dir,
        }
    }

    fn calls(&self) -> usize {
        self.provider.calls.load(Ordering::SeqCst)
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({"name": "Ana", "email": email, "password": "s3cret-pass"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::new(true);

    let (status, body) = app.send("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Server is running..".into()));

    let (status, body) = app.send("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["translations"], 0);
    assert_eq!(body["provider"], "spanish-only");
}

#[tokio::test]
async fn test_register_login_me_logout() {
    let app = TestApp::new(true);
    let first = app.register("ana@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "ana@example.com", "password": "s3cret-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert_ne!(token, first);

    let (status, body) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert!(body["user"].get("password_hash").is_none());

    let (status, _) = app.send("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failures() {
    let app = TestApp::new(true);
    app.register("ana@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "ana@example.com", "password": "wrong-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"name": "Other", "email": "ana@example.com", "password": "longenough"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"name": "Bob", "email": "bob@example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_translations_require_token() {
    let app = TestApp::new(true);

    let (status, body) = app.send("GET", "/api/translations/search", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = app
        .send("GET", "/api/translations/search", Some("made-up-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            "POST",
            "/api/translations/add",
            None,
            Some(json!({"key": "greet", "englishText": "Hello"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.calls(), 0);
}

#[tokio::test]
async fn test_add_search_update_flow() {
    let app = TestApp::new(true);
    let token = app.register("ana@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/translations/add",
            Some(&token),
            Some(json!({"key": "greet", "englishText": "Hello"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Translation added successfully");
    assert_eq!(
        body["data"]["translations"],
        json!({"en": "Hello", "hi": "Hello", "es": "Hola", "fr": "Hello"})
    );
    let id = body["data"]["_id"].as_str().unwrap().to_string();
    assert_eq!(app.calls(), 3);

    let (status, body) = app
        .send("GET", "/api/translations/search?query=GRE", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["key"], "greet");

    let (status, body) = app
        .send("GET", "/api/translations/search?query=zzz", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/translations/update/{}", id),
            Some(&token),
            Some(json!({"translations": {"en": "Hi", "hi": "नमस्ते", "es": "Hola", "fr": "Salut"}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Translation Updated successfully.");
    assert_eq!(body["data"]["translations"]["fr"], "Salut");
    assert_eq!(body["data"]["key"], "greet");
    assert_eq!(app.calls(), 3);

    let (status, body) = app
        .send("GET", &format!("/api/translations/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translations"]["en"], "Hi");

    let (status, body) = app.send("GET", "/api/translations/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"totalKeys": 1, "degradedKeys": 0}));
}

#[tokio::test]
async fn test_add_errors_make_no_provider_calls() {
    let app = TestApp::new(true);
    let token = app.register("ana@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/translations/add",
            Some(&token),
            Some(json!({"key": "greet"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Both key and englishText are required");

    let (status, _) = app
        .send(
            "POST",
            "/api/translations/add",
            Some(&token),
            Some(json!({"key": "greet", "englishText": "Hello"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            "POST",
            "/api/translations/add",
            Some(&token),
            Some(json!({"key": "greet", "englishText": "Hi"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
    assert_eq!(app.calls(), 3);
}

#[tokio::test]
async fn test_update_without_translations_leaves_record_untouched() {
    let app = TestApp::new(true);
    let token = app.register("ana@example.com").await;

    let (_, body) = app
        .send(
            "POST",
            "/api/translations/add",
            Some(&token),
            Some(json!({"key": "greet", "englishText": "Hello"})),
        )
        .await;
    let id = body["data"]["_id"].as_str().unwrap().to_string();
    let before = body["data"]["translations"].clone();

    for bad_body in [json!({"translation": {"en": "typo"}}), json!({})] {
        let (status, body) = app
            .send(
                "PUT",
                &format!("/api/translations/update/{}", id),
                Some(&token),
                Some(bad_body),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
    }

    let (status, body) = app
        .send("GET", &format!("/api/translations/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translations"], before);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = TestApp::new(true);
    let token = app.register("ana@example.com").await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/translations/update/does-not-exist",
            Some(&token),
            Some(json!({"translations": {"en": "X"}})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = app
        .send("GET", "/api/translations/does-not-exist", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preview_does_not_persist() {
    let app = TestApp::new(false);

    let (status, body) = app
        .send(
            "POST",
            "/api/translations/translate",
            None,
            Some(json!({"text": "Hello"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"hi": "Hello", "es": "Hola", "fr": "Hello"}));

    let (_, body) = app.send("GET", "/api/translations/search", None, None).await;
    assert_eq!(body, json!([]));

    let (status, _) = app
        .send("POST", "/api/translations/translate", None, Some(json!({"text": ""})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new(false);
    let request = Request::builder()
        .method("POST")
        .uri("/api/translations/add")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.calls(), 0);
}
