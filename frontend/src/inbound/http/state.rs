//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::BackendClient;
use crate::domain::ports::{BackendTransport, ViewRenderer};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Typed client for the remote backend.
    pub backend: BackendClient,
    /// Page renderer.
    pub views: Arc<dyn ViewRenderer>,
}

impl HttpState {
    /// Bundle a backend transport and a renderer.
    pub fn new(transport: Arc<dyn BackendTransport>, views: Arc<dyn ViewRenderer>) -> Self {
        Self {
            backend: BackendClient::new(transport),
            views,
        }
    }
}
