//! Cinema booking front end.
//!
//! Serves session-gated HTML pages for customers and operators and a JSON
//! booking endpoint, composing every page from a remote JSON backend. The
//! crate holds no persistent state of its own: catalogue data, accounts and
//! bookings live in the backend, and the signed-in identity travels in an
//! encrypted session cookie.
//!
//! - [`domain`]: records, validation, enrichment and the backend facade.
//! - [`inbound`]: actix-web handlers, session helpers and error mapping.
//! - [`outbound`]: reqwest transport and handlebars renderer.
//! - [`middleware`]: per-request trace identifiers and access logging.
//! - [`settings`]: OrthoConfig-backed runtime settings.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;
