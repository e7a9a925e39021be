//! HTTP layer
//!
//! Every outbound REST call funnels through [`client::ApiClient`], so bearer
//! injection, response unwrapping, and error normalization happen exactly
//! once.

pub mod client;

pub use client::{ApiClient, SessionEvent};
