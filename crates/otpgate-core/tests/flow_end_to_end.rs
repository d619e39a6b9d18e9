//! End-to-end sign-in through `FlowDriver` against a mock service.

use otpgate_core::client::{AuthClient, AuthError, Credentials, HttpAuthClient, ServerAck};
use otpgate_core::config::ServiceConfig;
use otpgate_core::flow::{FlowDriver, FlowEvent, FlowOptions, Route, Step};
use otpgate_core::store::{FilePendingStore, MemoryPendingStore, PendingLoginStore};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &MockServer) -> HttpAuthClient {
    HttpAuthClient::from_config(&ServiceConfig {
        base_url: server.uri(),
        ..ServiceConfig::default()
    })
    .unwrap()
}

async fn sign_in_credentials<S: PendingLoginStore>(
    driver: &mut FlowDriver<HttpAuthClient, S>,
    identifier: &str,
    secret: &str,
) {
    driver.open(Route::Credentials).await;
    driver
        .dispatch(FlowEvent::IdentifierChanged(identifier.to_string()))
        .await;
    driver
        .dispatch(FlowEvent::SecretChanged(secret.to_string()))
        .await;
    driver.dispatch(FlowEvent::SubmitCredentials).await;
}

#[tokio::test]
async fn test_full_sign_in() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({ "email": "jdoe@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("sent"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/otp"))
        .and(body_json(json!({ "otp": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("verified"))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let store = FilePendingStore::new(home.path().join("pending_login.json"), "userEmail");
    let options = FlowOptions {
        clear_pending_on_success: false,
        ..FlowOptions::default()
    };
    let mut driver = FlowDriver::new(client_for(&server), store, options);

    sign_in_credentials(&mut driver, "jdoe@example.com", "hunter2").await;

    assert_eq!(driver.route(), &Route::Otp);
    assert_eq!(driver.state().step(), Step::AwaitingOtp);
    assert_eq!(driver.store().load().as_deref(), Some("jdoe@example.com"));
    assert_eq!(
        driver.state().masked_identifier(),
        Some("j*********@example.com")
    );

    driver
        .dispatch(FlowEvent::CodePasted("123456".to_string()))
        .await;
    driver.dispatch(FlowEvent::SubmitOtp).await;

    assert_eq!(driver.state().step(), Step::Authenticated);
    assert!(driver.state().otp().is_empty());
    assert_eq!(driver.state().otp().assembled_code(), "");
    // Same-route success target does not re-enter the OTP step.
    assert_eq!(driver.route(), &Route::Otp);
    assert_eq!(driver.store().load().as_deref(), Some("jdoe@example.com"));
}

#[tokio::test]
async fn test_success_clears_pending_by_default() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut driver = FlowDriver::new(
        client_for(&server),
        MemoryPendingStore::new(),
        FlowOptions {
            success_route: Route::Other("/home".to_string()),
            ..FlowOptions::default()
        },
    );
    sign_in_credentials(&mut driver, "a@b.com", "pw").await;
    driver
        .dispatch(FlowEvent::CodePasted("000000".to_string()))
        .await;
    driver.dispatch(FlowEvent::SubmitOtp).await;

    assert_eq!(driver.state().step(), Step::Authenticated);
    assert_eq!(driver.route(), &Route::Other("/home".to_string()));
    assert_eq!(driver.store().load(), None);
}

#[tokio::test]
async fn test_rejected_credentials_leave_store_untouched() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .expect(1)
        .mount(&server)
        .await;

    let mut driver = FlowDriver::new(
        client_for(&server),
        MemoryPendingStore::new(),
        FlowOptions::default(),
    );
    sign_in_credentials(&mut driver, "jdoe@example.com", "wrong").await;

    assert_eq!(driver.state().step(), Step::CredentialEntry);
    assert_eq!(driver.route(), &Route::Credentials);
    assert!(!driver.state().is_submitting());
    assert_eq!(driver.store().load(), None);
    assert_eq!(
        driver.state().failure(),
        Some(&AuthError::Rejected {
            status: 401,
            reason: "Invalid credentials".to_string(),
        })
    );
}

#[tokio::test]
async fn test_invalid_input_makes_no_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut driver = FlowDriver::new(
        client_for(&server),
        MemoryPendingStore::new(),
        FlowOptions::default(),
    );
    sign_in_credentials(&mut driver, "", "").await;
    assert_eq!(driver.state().form().errors.len(), 2);

    driver.open(Route::Otp).await;
    driver
        .dispatch(FlowEvent::CodePasted("12345".to_string()))
        .await;
    driver.dispatch(FlowEvent::SubmitOtp).await;
    assert!(driver.state().otp_error().is_some());
}

#[tokio::test]
async fn test_opening_otp_step_without_pending_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    let store = FilePendingStore::new(home.path().join("missing.json"), "userEmail");
    let mut driver = FlowDriver::new(client_for(&server), store, FlowOptions::default());

    driver.open(Route::Otp).await;

    assert_eq!(driver.state().step(), Step::AwaitingOtp);
    assert_eq!(driver.state().masked_identifier(), None);
}

#[tokio::test]
async fn test_fresh_credential_step_clears_stale_pending() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let mut driver = FlowDriver::new(
        client_for(&server),
        MemoryPendingStore::with_value("stale@example.com"),
        FlowOptions::default(),
    );

    driver.open(Route::Credentials).await;
    assert_eq!(driver.store().load(), None);
}

/// Accepts every request without touching the network.
struct AcceptAll;

impl AuthClient for AcceptAll {
    async fn submit_credentials(&self, _credentials: &Credentials) -> Result<ServerAck, AuthError> {
        Ok(ServerAck {
            status: 200,
            body: String::new(),
        })
    }

    async fn submit_otp(&self, _code: &str) -> Result<ServerAck, AuthError> {
        Ok(ServerAck {
            status: 200,
            body: String::new(),
        })
    }
}

#[tokio::test]
async fn test_success_route_to_credentials_stays_authenticated() {
    let mut driver = FlowDriver::new(
        AcceptAll,
        MemoryPendingStore::new(),
        FlowOptions {
            success_route: Route::parse("/"),
            ..FlowOptions::default()
        },
    );
    driver.open(Route::Credentials).await;
    driver
        .dispatch(FlowEvent::IdentifierChanged("jdoe@example.com".to_string()))
        .await;
    driver
        .dispatch(FlowEvent::SecretChanged("hunter2".to_string()))
        .await;
    driver.dispatch(FlowEvent::SubmitCredentials).await;
    assert_eq!(driver.route(), &Route::Otp);

    driver
        .dispatch(FlowEvent::CodePasted("123456".to_string()))
        .await;
    driver.dispatch(FlowEvent::SubmitOtp).await;

    assert_eq!(driver.route(), &Route::Credentials);
    assert_eq!(driver.state().step(), Step::Authenticated);
}
