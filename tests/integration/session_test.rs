//! Session lifecycle integration tests
//!
//! Login, silent refresh, the refresh-and-retry path after a 401, and
//! the no-network fast-fail when every token has expired.

use crate::common::{jwt_with_expiry, login_response_json, session_for, user_json};
use campusync::auth::{Credentials, SessionState, NO_VALID_SESSION};
use campusync::models::Role;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials {
        username: "admin".to_string(),
        password: "secret".to_string(),
    }
}

#[tokio::test]
async fn test_login_stores_pair_and_authenticates() {
    let server = MockServer::start().await;
    let (manager, _client, tokens) = session_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response_json(3600, 86400)))
        .expect(1)
        .mount(&server)
        .await;

    let user = manager.login(&credentials()).await.unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(manager.state().await, SessionState::Authenticated);
    assert!(tokens.has_valid_access());
    assert!(tokens.has_valid_refresh());
    assert!(manager.is_authenticated().await);
}

#[tokio::test]
async fn test_login_failure_returns_to_anonymous_with_error() {
    let server = MockServer::start().await;
    let (manager, _client, tokens) = session_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid username or password",
        })))
        .mount(&server)
        .await;

    let error = manager.login(&credentials()).await.unwrap_err();
    assert_eq!(error.message(), "Invalid username or password");

    let session = manager.session().await;
    assert_eq!(session.state, SessionState::Anonymous);
    assert_eq!(session.error.as_deref(), Some("Invalid username or password"));
    assert!(tokens.access_token().is_none());
}

#[tokio::test]
async fn test_expired_access_triggers_exactly_one_refresh() {
    let server = MockServer::start().await;
    let (manager, _client, tokens) = session_for(&server);
    tokens.set_pair(jwt_with_expiry(-60), jwt_with_expiry(86400));

    let rotated_access = jwt_with_expiry(3600);
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": rotated_access,
            "refresh_token": jwt_with_expiry(86400),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "admin", "admin")))
        .expect(1)
        .mount(&server)
        .await;

    let user = manager.current_user().await.unwrap();
    assert_eq!(user.username, "admin");
    assert_eq!(manager.state().await, SessionState::Authenticated);
    assert_eq!(tokens.access_token().as_deref(), Some(rotated_access.as_str()));
}

#[tokio::test]
async fn test_both_tokens_expired_fails_without_network() {
    let server = MockServer::start().await;
    let (manager, _client, tokens) = session_for(&server);
    tokens.set_pair(jwt_with_expiry(-3600), jwt_with_expiry(-60));

    let error = manager.current_user().await.unwrap_err();
    assert_eq!(error.message(), NO_VALID_SESSION);
    assert_eq!(manager.state().await, SessionState::Expired);
    assert!(tokens.access_token().is_none());

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "expired tokens must not reach the network");
}

#[tokio::test]
async fn test_401_on_me_refreshes_and_retries_once() {
    let server = MockServer::start().await;
    let (manager, _client, tokens) = session_for(&server);
    // Locally valid access token the server nonetheless rejects (revoked)
    tokens.set_pair(jwt_with_expiry(3600), jwt_with_expiry(86400));

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": jwt_with_expiry(3600),
            "refresh_token": jwt_with_expiry(86400),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "admin", "admin")))
        .expect(1)
        .mount(&server)
        .await;

    let user = manager.current_user().await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(manager.state().await, SessionState::Authenticated);
}

#[tokio::test]
async fn test_failed_refresh_expires_the_session() {
    let server = MockServer::start().await;
    let (manager, _client, tokens) = session_for(&server);
    tokens.set_pair(jwt_with_expiry(-60), jwt_with_expiry(86400));

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Refresh token revoked",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let error = manager.current_user().await.unwrap_err();
    assert!(error.is_auth());
    assert_eq!(manager.state().await, SessionState::Expired);
    assert!(tokens.refresh_token().is_none(), "a rejected refresh clears everything");

    // A second probe stays local now that the pair is gone
    let error = manager.current_user().await.unwrap_err();
    assert_eq!(error.message(), NO_VALID_SESSION);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_logout_clears_locally_even_when_server_errors() {
    let server = MockServer::start().await;
    let (manager, _client, tokens) = session_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_response_json(3600, 86400)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    manager.login(&credentials()).await.unwrap();
    manager.logout().await;

    assert_eq!(manager.state().await, SessionState::Anonymous);
    assert!(tokens.access_token().is_none());
    assert!(!manager.is_authenticated().await);
}
