//! Domain ports for the hexagonal boundary.

mod backend_transport;
mod view_renderer;

#[cfg(test)]
pub use backend_transport::MockBackendTransport;
pub use backend_transport::{BackendMethod, BackendRequest, BackendTransport};
#[cfg(test)]
pub use view_renderer::MockViewRenderer;
pub use view_renderer::{FixtureViewRenderer, View, ViewRenderError, ViewRenderer};
