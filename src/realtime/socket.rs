//! Reconnecting WebSocket client
//!
//! States: `Idle -> Connecting -> Open -> Closed (retry pending) -> ... ->
//! Exhausted`.
//!
//! Every close, including a network drop, schedules a reconnect after a fixed
//! interval, up to a maximum attempt count; a successful open resets the
//! counter. Once the attempts are spent, the terminal
//! [`MAX_RECONNECT_EVENT`] is dispatched exactly once and retrying stops.
//!
//! Incoming frames are JSON `{"type": ..., "payload": ...}`; they are
//! dispatched by `type` to all registered handlers. Malformed frames are
//! logged and dropped; they never close the channel.

use crate::error::{ApiError, ApiResult};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Event name dispatched once when reconnection gives up
pub const MAX_RECONNECT_EVENT: &str = "max_reconnect_attempts_reached";

/// Lifecycle state of the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    /// Never connected
    Idle,
    /// Connection attempt in flight
    Connecting,
    /// Channel usable
    Open,
    /// Connection lost, retry pending
    Closed,
    /// Retry budget spent, no further attempts
    Exhausted,
}

/// Socket configuration
///
/// The defaults are the production contract (3 s interval, 5 attempts);
/// tests shrink the interval.
#[derive(Debug, Clone)]
pub struct SocketConfig {
    pub url: String,
    pub reconnect_interval: Duration,
    pub max_reconnect_attempts: u32,
}

impl SocketConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_interval: Duration::from_secs(3),
            max_reconnect_attempts: 5,
        }
    }

    pub fn reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    pub fn max_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.max_reconnect_attempts = attempts;
        self
    }
}

/// Identifies a registered handler so it can be removed again
///
/// Closures are not comparable, so [`ReconnectingSocket::on`] hands out the
/// id that [`ReconnectingSocket::off`] takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Arc<dyn Fn(serde_json::Value) + Send + Sync>;
type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Generic event channel with bounded automatic reconnection
#[derive(Clone)]
pub struct ReconnectingSocket {
    inner: Arc<SocketInner>,
}

struct SocketInner {
    config: SocketConfig,
    state: RwLock<SocketState>,
    handlers: RwLock<HashMap<String, Vec<(HandlerId, Handler)>>>,
    next_handler_id: AtomicU64,
    attempts: AtomicU32,
    terminal_fired: AtomicBool,
    reconnect_pending: AtomicBool,
    shutdown: AtomicBool,
    writer: Mutex<Option<WsSink>>,
}

impl ReconnectingSocket {
    pub fn new(config: SocketConfig) -> Self {
        Self {
            inner: Arc::new(SocketInner {
                config,
                state: RwLock::new(SocketState::Idle),
                handlers: RwLock::new(HashMap::new()),
                next_handler_id: AtomicU64::new(1),
                attempts: AtomicU32::new(0),
                terminal_fired: AtomicBool::new(false),
                reconnect_pending: AtomicBool::new(false),
                shutdown: AtomicBool::new(false),
                writer: Mutex::new(None),
            }),
        }
    }

    /// Current channel state
    pub fn state(&self) -> SocketState {
        *self.inner.state.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Open the channel
    ///
    /// Resolves once the connection is open; an error before open is
    /// returned *and* the retry schedule starts, exactly as a later drop
    /// would.
    pub async fn connect(&self) -> ApiResult<()> {
        self.inner.shutdown.store(false, Ordering::SeqCst);
        self.inner.attempts.store(0, Ordering::SeqCst);
        // A new cycle gets a fresh terminal event when it too exhausts
        self.inner.terminal_fired.store(false, Ordering::SeqCst);
        match self.inner.clone().try_open().await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.inner.clone().spawn_reconnect();
                Err(ApiError::socket(e.to_string()))
            }
        }
    }

    /// Close the channel and stop reconnecting
    pub async fn close(&self) {
        self.inner.shutdown.store(true, Ordering::SeqCst);
        if let Some(mut sink) = self.inner.writer.lock().await.take() {
            let _ = sink.send(Message::Close(None)).await;
        }
        self.inner.set_state(SocketState::Idle);
    }

    /// Send one `{type, payload}` message
    ///
    /// A no-op with a logged warning when the channel is not open; never an
    /// error, and nothing is queued.
    pub async fn send(&self, event: &str, payload: serde_json::Value) {
        if self.state() != SocketState::Open {
            tracing::warn!("Socket not open, dropping outbound '{}' message", event);
            return;
        }
        let frame = serde_json::json!({ "type": event, "payload": payload });
        let mut writer = self.inner.writer.lock().await;
        match writer.as_mut() {
            Some(sink) => {
                if let Err(e) = sink.send(Message::Text(frame.to_string())).await {
                    tracing::warn!("Socket send failed: {}", e);
                }
            }
            None => tracing::warn!("Socket not open, dropping outbound '{}' message", event),
        }
    }

    /// Register a handler for an event type, returning its id
    pub fn on(
        &self,
        event: impl Into<String>,
        handler: impl Fn(serde_json::Value) + Send + Sync + 'static,
    ) -> HandlerId {
        let id = HandlerId(self.inner.next_handler_id.fetch_add(1, Ordering::SeqCst));
        let mut handlers = self.inner.handlers.write().unwrap_or_else(|e| e.into_inner());
        handlers
            .entry(event.into())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove a previously registered handler
    pub fn off(&self, event: &str, id: HandlerId) {
        let mut handlers = self.inner.handlers.write().unwrap_or_else(|e| e.into_inner());
        if let Some(list) = handlers.get_mut(event) {
            list.retain(|(registered, _)| *registered != id);
        }
    }
}

impl SocketInner {
    fn set_state(&self, state: SocketState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
    }

    fn state(&self) -> SocketState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    async fn try_open(self: Arc<Self>) -> Result<(), tokio_tungstenite::tungstenite::Error> {
        self.set_state(SocketState::Connecting);
        let (ws, _response) = match connect_async(&self.config.url).await {
            Ok(ok) => ok,
            Err(e) => {
                self.set_state(SocketState::Closed);
                return Err(e);
            }
        };
        tracing::info!("Socket connected to {}", self.config.url);

        let (sink, stream) = ws.split();
        *self.writer.lock().await = Some(sink);
        self.attempts.store(0, Ordering::SeqCst);
        self.terminal_fired.store(false, Ordering::SeqCst);
        self.set_state(SocketState::Open);

        let inner = self.clone();
        tokio::spawn(async move {
            inner.read_loop(stream).await;
        });
        Ok(())
    }

    async fn read_loop(
        self: Arc<Self>,
        mut stream: futures_util::stream::SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
    ) {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => self.dispatch_frame(&text),
                Ok(Message::Close(_)) => break,
                Ok(_) => {} // ping/pong/binary, nothing to dispatch
                Err(e) => {
                    tracing::warn!("Socket read error: {}", e);
                    break;
                }
            }
        }

        *self.writer.lock().await = None;
        if self.shutdown.load(Ordering::SeqCst) {
            return;
        }
        tracing::warn!("Socket connection lost, scheduling reconnect");
        self.set_state(SocketState::Closed);
        self.spawn_reconnect();
    }

    // At most one retry loop is live per socket; a second spawn while one
    // is waiting out its interval would double-count attempts and open
    // duplicate connections.
    fn spawn_reconnect(self: Arc<Self>) {
        if self.reconnect_pending.swap(true, Ordering::SeqCst) {
            return;
        }
        tokio::spawn(async move {
            loop {
                if self.shutdown.load(Ordering::SeqCst) || self.state() == SocketState::Exhausted {
                    self.reconnect_pending.store(false, Ordering::SeqCst);
                    return;
                }
                let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt > self.config.max_reconnect_attempts {
                    self.set_state(SocketState::Exhausted);
                    self.reconnect_pending.store(false, Ordering::SeqCst);
                    if !self.terminal_fired.swap(true, Ordering::SeqCst) {
                        tracing::error!(
                            "Socket gave up after {} reconnect attempts",
                            self.config.max_reconnect_attempts
                        );
                        self.dispatch(MAX_RECONNECT_EVENT, serde_json::Value::Null);
                    }
                    return;
                }

                tokio::time::sleep(self.config.reconnect_interval).await;
                // connect() may have reopened the channel while we slept
                if self.state() == SocketState::Open {
                    self.reconnect_pending.store(false, Ordering::SeqCst);
                    return;
                }
                tracing::info!(
                    "Reconnect attempt {}/{}",
                    attempt,
                    self.config.max_reconnect_attempts
                );
                match self.clone().try_open().await {
                    Ok(()) => {
                        self.reconnect_pending.store(false, Ordering::SeqCst);
                        return;
                    }
                    Err(e) => tracing::warn!("Reconnect attempt {} failed: {}", attempt, e),
                }
            }
        });
    }

    /// Parse one incoming frame and dispatch by its `type` field
    fn dispatch_frame(&self, text: &str) {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Dropping malformed socket frame: {}", e);
                return;
            }
        };
        let Some(event) = value.get("type").and_then(|t| t.as_str()) else {
            tracing::warn!("Dropping socket frame without a type field");
            return;
        };
        let payload = value.get("payload").cloned().unwrap_or(serde_json::Value::Null);
        self.dispatch(event, payload);
    }

    fn dispatch(&self, event: &str, payload: serde_json::Value) {
        // Clone the handler list out of the lock so a handler may call
        // on()/off() without deadlocking.
        let targets: Vec<Handler> = {
            let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
            handlers
                .get(event)
                .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
                .unwrap_or_default()
        };
        for handler in targets {
            handler(payload.clone());
        }
    }
}
