//! Real-time channel
//!
//! A generic `{type, payload}` publish/subscribe channel over WebSocket with
//! bounded automatic reconnection. Socket failures never propagate to the UI
//! as errors; they drive the reconnection state machine instead.

pub mod socket;

pub use socket::{HandlerId, ReconnectingSocket, SocketConfig, SocketState, MAX_RECONNECT_EVENT};
