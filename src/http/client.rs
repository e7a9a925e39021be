//! Configured HTTP client
//!
//! One `reqwest::Client` with a fixed base URL and timeout. Responsibilities:
//!
//! - attach `Authorization: Bearer <token>` when the token store holds one
//!   (absence is fine, unauthenticated calls such as login still go out)
//! - unwrap successful bodies: a JSON object with a `data` key yields that
//!   value, anything else is returned as-is; auth endpoints bypass the
//!   unwrapping via the `*_raw` methods because they need the full envelope
//! - convert every failure into a normalized [`ApiError`], never a raw
//!   `reqwest` error
//! - on a 401 outside `/api/auth/*`, clear the token store and publish
//!   [`SessionEvent::Invalidated`] so the embedding UI can return to its
//!   login screen; the auth endpoints are exempt to avoid loops on the
//!   current-user probe

use crate::config::ClientConfig;
use crate::auth::tokens::TokenStore;
use crate::error::{ApiError, ApiResult};
use crate::models::Paginated;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Paths whose 401s must not tear down the session (login probing itself,
/// refresh, logout). Everything under the auth prefix qualifies.
const AUTH_PREFIX: &str = "/api/auth/";

/// Correlation id header, matched against backend request logs
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Events published by the client about the session it guards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend rejected a bearer token; local tokens were cleared and the
    /// UI should present its login screen
    Invalidated {
        /// Path of the request that was rejected
        path: String,
    },
}

/// The single configured request layer
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<TokenStore>,
    session_events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Build the client from a configuration and a token store
    pub fn new(config: ClientConfig, tokens: Arc<TokenStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::session(format!("failed to initialize HTTP client: {}", e)))?;
        let (session_events, _) = broadcast::channel(16);
        Ok(Self {
            http,
            config,
            tokens,
            session_events,
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The token store this client reads bearer tokens from
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Subscribe to session events (currently only `Invalidated`)
    pub fn subscribe_session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.session_events.subscribe()
    }

    /// Attach the bearer token (when one is held) and a fresh correlation id
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        match self.tokens.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET, unwrapped into `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let value = self.send(Method::GET, path, &[], None).await?;
        self.decode(path, "GET", unwrap_data(value))
    }

    /// GET with query parameters, unwrapped into `T`
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<T> {
        let value = self.send(Method::GET, path, query, None).await?;
        self.decode(path, "GET", unwrap_data(value))
    }

    /// GET a `{data, pagination}` list envelope
    ///
    /// List bodies are parsed wholesale rather than unwrapped, because the
    /// pagination record rides alongside `data`.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<Paginated<T>> {
        let value = self.send(Method::GET, path, query, None).await?;
        self.decode(path, "GET", value)
    }

    /// POST a JSON body, unwrapped into `T`
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let body = self.encode(path, "POST", body)?;
        let value = self.send(Method::POST, path, &[], Some(body)).await?;
        self.decode(path, "POST", unwrap_data(value))
    }

    /// PUT a JSON body, unwrapped into `T`
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let body = self.encode(path, "PUT", body)?;
        let value = self.send(Method::PUT, path, &[], Some(body)).await?;
        self.decode(path, "PUT", unwrap_data(value))
    }

    /// DELETE, discarding any response body
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// DELETE with a JSON body (bulk operations), discarding the response
    pub async fn delete_with_body(&self, path: &str, body: &impl Serialize) -> ApiResult<()> {
        let body = self.encode(path, "DELETE", body)?;
        self.send(Method::DELETE, path, &[], Some(body)).await?;
        Ok(())
    }

    /// POST returning the raw response body (auth endpoints need the full
    /// envelope, e.g. the token fields next to the user)
    pub async fn post_raw(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<serde_json::Value> {
        let body = self.encode(path, "POST", body)?;
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// GET returning the raw response body
    pub async fn get_raw(&self, path: &str) -> ApiResult<serde_json::Value> {
        self.send(Method::GET, path, &[], None).await
    }

    /// POST a single file as multipart form data, unwrapped into `T`
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<T> {
        let url = self.config.endpoint(path);
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::decode(e.to_string(), &url, "POST"))?;
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        let request = self.authorize(self.http.post(&url).multipart(form));
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string(), &url, "POST"))?;
        let value = self.read_body(response, path, &url, "POST").await?;
        self.decode(path, "POST", unwrap_data(value))
    }

    /// GET a binary body (file downloads)
    pub async fn download(&self, path: &str) -> ApiResult<Vec<u8>> {
        let url = self.config.endpoint(path);
        let request = self.authorize(self.http.get(&url));
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string(), &url, "GET"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.reject(status, &body, path, &url, "GET"));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(e.to_string(), &url, "GET"))?;
        Ok(bytes.to_vec())
    }

    /// Send one request and return its JSON body (`Null` for an empty body)
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> ApiResult<serde_json::Value> {
        let url = self.config.endpoint(path);
        let method_name = method.as_str().to_string();

        let mut request = self.authorize(self.http.request(method, &url));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string(), &url, &method_name))?;
        self.read_body(response, path, &url, &method_name).await
    }

    async fn read_body(
        &self,
        response: reqwest::Response,
        path: &str,
        url: &str,
        method: &str,
    ) -> ApiResult<serde_json::Value> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(e.to_string(), url, method))?;

        if !status.is_success() {
            return Err(self.reject(status, &text, path, url, method));
        }
        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::decode(e.to_string(), url, method))
    }

    /// Normalize a non-success status, running the session-invalidation path
    /// for 401s outside the auth endpoints
    fn reject(&self, status: StatusCode, body: &str, path: &str, url: &str, method: &str) -> ApiError {
        let error = ApiError::from_status(status.as_u16(), body, url, method);
        if error.is_auth() && !path.starts_with(AUTH_PREFIX) {
            tracing::warn!("401 on {} {}, invalidating session", method, path);
            self.tokens.clear();
            let _ = self.session_events.send(SessionEvent::Invalidated {
                path: path.to_string(),
            });
        }
        error
    }

    fn encode(&self, path: &str, method: &str, body: &impl Serialize) -> ApiResult<serde_json::Value> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::decode(e.to_string(), self.config.endpoint(path), method))
    }

    fn decode<T: DeserializeOwned>(
        &self,
        path: &str,
        method: &str,
        value: serde_json::Value,
    ) -> ApiResult<T> {
        serde_json::from_value(value)
            .map_err(|e| ApiError::decode(e.to_string(), self.config.endpoint(path), method))
    }
}

/// The success-path unwrap rule: prefer a nested `data` field when the
/// backend wraps its responses, else take the body as-is.
pub(crate) fn unwrap_data(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    }
}
