//! Mock backend wiring
//!
//! Builds a real `ApiClient`/`SessionManager` pointed at a wiremock server.

use campusync::auth::{SessionManager, TokenStore};
use campusync::config::ClientConfig;
use campusync::http::ApiClient;
use std::sync::Arc;
use wiremock::MockServer;

/// An `ApiClient` with an in-memory token store, aimed at `server`
pub fn client_for(server: &MockServer) -> (Arc<ApiClient>, Arc<TokenStore>) {
    crate::common::init_tracing();
    let tokens = Arc::new(TokenStore::in_memory());
    let config = ClientConfig::builder()
        .api_url(server.uri())
        .build()
        .expect("mock server URI is a valid base URL");
    let client = Arc::new(ApiClient::new(config, tokens.clone()).expect("client builds"));
    (client, tokens)
}

/// A `SessionManager` over [`client_for`]
pub fn session_for(server: &MockServer) -> (SessionManager, Arc<ApiClient>, Arc<TokenStore>) {
    let (client, tokens) = client_for(server);
    (SessionManager::new(client.clone()), client, tokens)
}
