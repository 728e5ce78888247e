//! REST client for the external video/chat platform.
//!
//! Implements [`platform_core::CallPlatform`] and
//! [`platform_core::ChatPlatform`] over the platform's HTTP API, plus
//! HMAC-SHA256 verification of inbound webhook signatures. The meeting
//! id is used as both the call id and the chat channel id.

mod client;
mod config;
mod signature;
mod token;

pub use client::StreamClient;
pub use config::{StreamConfig, StreamConfigBuilder};
pub use signature::verify_signature;
pub use token::create_user_token;
