//! Outbound adapters implementing domain ports.
//!
//! - **backend_http**: reqwest client for the remote booking backend
//! - **views**: handlebars page renderer
//!
//! Adapters translate between domain types and infrastructure; they hold no
//! booking logic.

pub mod backend_http;
pub mod views;
