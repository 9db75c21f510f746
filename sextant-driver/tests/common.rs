//! Shared helpers for the WebDriver protocol stub used by integration tests.
//!
//! fantoccini speaks the W3C wire protocol over HTTP, so a `wiremock` server
//! that answers the handful of endpoints a test exercises stands in for a
//! real browser. Endpoints a test does not mount return 404, which makes an
//! unexpected code path (say, a native lookup where a custom one was
//! expected) fail the test instead of passing silently.

use std::sync::OnceLock;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sextant_common::observability::LogConfig;

pub const SESSION_ID: &str = "stub-session";

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "sextant-tests",
            emit_stderr: true,
            default_filter: "debug",
            ..LogConfig::default()
        };

        sextant_common::observability::init_logging(config).unwrap_or_default()
    });
}

/// Wrap `value` the way a WebDriver server does.
pub fn webdriver_value(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "value": value }))
}

/// A W3C element reference with the given opaque id.
pub fn element_ref(id: &str) -> Value {
    json!({ "element-6066-11e4-a52e-4f735466cecf": id })
}

/// Path under the stub session, e.g. `session_path("elements")`.
pub fn session_path(suffix: &str) -> String {
    format!("/session/{SESSION_ID}/{suffix}")
}

/// Start a stub that can mint and tear down one session.
pub async fn webdriver_stub() -> MockServer {
    init_test_tracing();

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(webdriver_value(
            json!({ "sessionId": SESSION_ID, "capabilities": {} }),
        ))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(session_path("timeouts")))
        .respond_with(webdriver_value(json!(null)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(webdriver_value(json!({ "ready": true, "message": "" })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/session/{SESSION_ID}")))
        .respond_with(webdriver_value(json!(null)))
        .mount(&server)
        .await;

    server
}

/// Connect a fantoccini client to the stub.
pub async fn connect(server: &MockServer) -> fantoccini::Client {
    fantoccini::ClientBuilder::native()
        .connect(&server.uri())
        .await
        .expect("connect to webdriver stub")
}
