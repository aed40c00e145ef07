#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crewdesk_api::auth::jwt::{generate_access_token, IdentityClaims, JwtConfig};
use crewdesk_api::config::{ServerConfig, StorageConfig};
use crewdesk_api::routes;
use crewdesk_api::state::AppState;
use crewdesk_api::storage::UploadSigner;
use crewdesk_assist::AgentClient;
use crewdesk_store::MemoryStore;

/// Secret shared by test tokens and the test app config.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// An orchestrator base URL nothing listens on (port 9, discard).
pub const DEAD_AGENT_URL: &str = "http://127.0.0.1:9";

/// Build a test `ServerConfig` pointing the orchestrator client at
/// `agent_base_url`.
pub fn test_config(agent_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        agent_base_url: agent_base_url.to_string(),
        agent_timeout_secs: 5,
        storage: StorageConfig {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
        },
    }
}

/// Upload signer with static credentials; presigning is pure computation, so
/// no AWS access is needed.
pub fn test_upload_signer() -> UploadSigner {
    let credentials = aws_sdk_s3::config::Credentials::new(
        "test-access-key",
        "test-secret-key",
        None,
        None,
        "test",
    );
    let s3_config = aws_sdk_s3::Config::builder()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new("us-east-1"))
        .credentials_provider(credentials)
        .build();
    UploadSigner::with_client(
        aws_sdk_s3::Client::from_conf(s3_config),
        "test-bucket".to_string(),
        "us-east-1".to_string(),
    )
}

/// A test application plus a handle on its in-memory store for seeding and
/// inspection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

/// Build the full application router with all middleware layers over an
/// in-memory store, mirroring the construction in `main.rs` so tests
/// exercise the same stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(agent_base_url: &str) -> TestApp {
    let config = test_config(agent_base_url);
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        store: store.clone(),
        assist: Arc::new(AgentClient::new(
            config.agent_base_url.clone(),
            Duration::from_secs(config.agent_timeout_secs),
        )),
        uploads: Arc::new(test_upload_signer()),
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    TestApp { router, store }
}

/// Shorthand: a test app whose orchestrator is unreachable.
pub fn build_test_app_without_agent() -> TestApp {
    build_test_app(DEAD_AGENT_URL)
}

/// Spawn a stub orchestrator that answers every POST with `reply`, returning
/// its base URL.
pub async fn spawn_agent_stub(reply: Value) -> String {
    let handler = move || {
        let reply = reply.clone();
        async move { axum::Json(reply) }
    };
    let app = Router::new().fallback(handler);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Mint a bearer token for `sub`.
pub fn token_for(sub: &str, name: Option<&str>) -> String {
    let identity = IdentityClaims {
        sub: sub.to_string(),
        email: Some(format!("{sub}@example.com")),
        name: name.map(String::from),
        picture: None,
        role: None,
    };
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
    };
    generate_access_token(&identity, 15, &config).expect("token generation should succeed")
}

/// Send a request, optionally authenticated, optionally with a JSON body.
pub async fn request(
    router: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    router.clone().oneshot(request).await.unwrap()
}

pub async fn get(router: &Router, path: &str, token: &str) -> Response {
    request(router, "GET", path, Some(token), None).await
}

pub async fn post(router: &Router, path: &str, token: &str, body: Value) -> Response {
    request(router, "POST", path, Some(token), Some(body)).await
}

pub async fn patch(router: &Router, path: &str, token: &str, body: Value) -> Response {
    request(router, "PATCH", path, Some(token), Some(body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
