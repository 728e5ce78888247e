//! Webhook endpoint for the Huddle meeting assistant.
//!
//! A single POST endpoint receives signed lifecycle events from the
//! call/chat platform, authenticates them, and hands them to the
//! coordinator. The router is the one place that always produces a
//! response: every handler outcome maps to a JSON acknowledgement or a
//! JSON error body.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
