//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::Key;
use frontend::domain::ports::{BackendTransport, ViewRenderer};

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) transport: Arc<dyn BackendTransport>,
    pub(crate) views: Arc<dyn ViewRenderer>,
}

impl ServerConfig {
    /// Bundle the session key, cookie flag, listening address and adapters.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        bind_addr: SocketAddr,
        transport: Arc<dyn BackendTransport>,
        views: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            transport,
            views,
        }
    }
}
