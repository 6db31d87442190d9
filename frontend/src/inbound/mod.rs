//! Inbound adapters translating browser requests into backend calls.
//!
//! Only HTTP is served; see [`http`].

pub mod http;
