// Router tests driven with tower's oneshot — no sockets for the app
// itself. The Spotify proxy tests spin up a stub upstream server on an
// ephemeral port to script the third party's responses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use recd_server::config::Config;
use recd_server::expo::traits::PushGateway;
use recd_server::expo::types::{DeliveryStatus, PushMessage, PushReceipt, PushTicket};
use recd_server::spotify::client::SpotifyAuthClient;
use recd_server::store::UserStore;
use recd_server::web::{build_router, AppState};

// --- Mocks ---

/// In-memory user store.
struct MockStore {
    users: HashMap<String, Vec<String>>,
    fail: bool,
}

impl MockStore {
    fn with_user(uid: &str, tokens: &[&str]) -> Self {
        let mut users = HashMap::new();
        users.insert(uid.to_string(), tokens.iter().map(|t| t.to_string()).collect());
        Self { users, fail: false }
    }

    fn empty() -> Self {
        Self {
            users: HashMap::new(),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            users: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl UserStore for MockStore {
    async fn push_tokens(&self, uid: &str) -> Result<Option<Vec<String>>> {
        if self.fail {
            anyhow::bail!("simulated store outage");
        }
        Ok(self.users.get(uid).cloned())
    }
}

/// Gateway that records sends and never produces receipt ids.
#[derive(Default)]
struct RecordingGateway {
    sends: Mutex<Vec<Vec<PushMessage>>>,
}

impl RecordingGateway {
    fn sends(&self) -> Vec<Vec<PushMessage>> {
        self.sends.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send_notifications(&self, chunk: &[PushMessage]) -> Result<Vec<PushTicket>> {
        self.sends.lock().unwrap().push(chunk.to_vec());
        Ok(chunk
            .iter()
            .map(|_| PushTicket {
                status: DeliveryStatus::Ok,
                id: None,
                message: None,
                details: None,
            })
            .collect())
    }

    async fn get_receipts(&self, _receipt_ids: &[String]) -> Result<HashMap<String, PushReceipt>> {
        Ok(HashMap::new())
    }
}

// --- Test fixtures ---

fn test_config(spotify_auth_url: &str) -> Config {
    Config {
        spotify_client_id: "test-client-id".to_string(),
        spotify_client_secret: "test-client-secret".to_string(),
        spotify_auth_url: spotify_auth_url.to_string(),
        expo_push_url: "http://127.0.0.1:9".to_string(),
        firestore_project_id: "test-project".to_string(),
        firestore_url: "http://127.0.0.1:9".to_string(),
    }
}

fn test_state(
    store: MockStore,
    gateway: Arc<RecordingGateway>,
    spotify_auth_url: &str,
) -> AppState {
    AppState {
        config: Arc::new(test_config(spotify_auth_url)),
        store: Arc::new(store),
        gateway,
        spotify: Arc::new(SpotifyAuthClient::new(spotify_auth_url).unwrap()),
    }
}

/// Spin up a stub Spotify accounts server answering POST /api/token
/// with a fixed status and body. Returns its base URL.
async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
    let app = axum::Router::new().route(
        "/api/token",
        axum::routing::post(move || async move {
            (status, [(header::CONTENT_TYPE, "application/json")], body)
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn event_request(uid: &str, rid: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/events/user_recds/{uid}/recd_items/{rid}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Let tasks spawned by the event handler run on the test runtime.
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

// --- Health ---

#[tokio::test]
async fn health_returns_ok() {
    let state = test_state(
        MockStore::empty(),
        Arc::new(RecordingGateway::default()),
        "http://127.0.0.1:9",
    );
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// --- Spotify token proxy ---

#[tokio::test]
async fn upstream_failure_becomes_generic_500() {
    let upstream = spawn_upstream(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"error":"service unavailable"}"#,
    )
    .await;
    let state = test_state(
        MockStore::empty(),
        Arc::new(RecordingGateway::default()),
        &upstream,
    );
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/spotify/token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(response).await,
        r#"{"error":"Something went wrong"}"#
    );
}

#[tokio::test]
async fn upstream_success_is_relayed_verbatim() {
    let token_body = r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600}"#;
    let upstream = spawn_upstream(StatusCode::OK, token_body).await;
    let state = test_state(
        MockStore::empty(),
        Arc::new(RecordingGateway::default()),
        &upstream,
    );
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/spotify/token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/json"));
    assert_eq!(body_string(response).await, token_body);
}

// --- Recd-item event trigger ---

#[tokio::test]
async fn event_dispatches_only_to_valid_tokens() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = MockStore::with_user("u1", &["ExponentPushToken[validtok1]", "bad"]);
    let app = build_router(test_state(store, gateway.clone(), "http://127.0.0.1:9"));

    let response = app
        .oneshot(event_request(
            "u1",
            "r1",
            r#"{"message":"","senderDisplayName":"Bob"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    settle().await;

    let sends = gateway.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].len(), 1);
    assert_eq!(sends[0][0].to, "ExponentPushToken[validtok1]");
    assert_eq!(sends[0][0].body, "Bob sent you a recommendation");
}

#[tokio::test]
async fn event_with_message_formats_body_with_sender_prefix() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = MockStore::with_user("u1", &["ExponentPushToken[validtok1]"]);
    let app = build_router(test_state(store, gateway.clone(), "http://127.0.0.1:9"));

    let response = app
        .oneshot(event_request(
            "u1",
            "r2",
            r#"{"message":"great song!","senderDisplayName":"Alice"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    settle().await;

    let sends = gateway.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0][0].body, "Alice: great song!");
}

#[tokio::test]
async fn missing_user_is_a_silent_noop() {
    let gateway = Arc::new(RecordingGateway::default());
    let app = build_router(test_state(
        MockStore::empty(),
        gateway.clone(),
        "http://127.0.0.1:9",
    ));

    let response = app
        .oneshot(event_request(
            "u1",
            "r1",
            r#"{"message":"","senderDisplayName":"Bob"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    settle().await;
    assert!(gateway.sends().is_empty());
}

#[tokio::test]
async fn lookup_failure_never_fails_the_trigger() {
    let gateway = Arc::new(RecordingGateway::default());
    let app = build_router(test_state(
        MockStore::failing(),
        gateway.clone(),
        "http://127.0.0.1:9",
    ));

    let response = app
        .oneshot(event_request(
            "u1",
            "r1",
            r#"{"message":"hi","senderDisplayName":"Bob"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    settle().await;
    assert!(gateway.sends().is_empty());
}
