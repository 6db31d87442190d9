//! Domain types and the backend facade.
//!
//! Purpose: describe what the front end knows about the booking system
//! (catalogue records, accounts, bookings, result envelopes) and how it
//! composes them, without depending on actix or reqwest.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `ActionResult` / `ListResult`: decoded backend responses.
//! - `enrich_shows` / `find_show_context`: in-memory joins for the views.
//! - `BackendClient`: one method per backend endpoint.

pub mod account;
pub mod backend_client;
pub mod booking;
pub mod catalogue;
pub mod enrichment;
pub mod envelope;
pub mod error;
pub mod listings;
pub mod ports;
pub mod trace_id;

pub use self::account::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError, Role,
    SessionIdentity, UnknownRole,
};
pub use self::backend_client::{BackendClient, LoginOutcome};
pub use self::booking::{
    BookingSubmission, BookingValidationError, INVALID_BOOKING_MESSAGE, SeatBooking,
};
pub use self::catalogue::{
    Booking, DashboardStats, EntityKey, Movie, Record, SeatAvailability, Show, Theatre,
};
pub use self::enrichment::{
    EnrichedShow, ShowContext, UNKNOWN_NAME, enrich_shows, find_show_context,
};
pub use self::envelope::{ActionResult, BACKEND_UNREACHABLE, ListResult, failure_envelope};
pub use self::error::{Error, ErrorCode};
pub use self::listings::{NewMovie, NewShow, NewTheatre};
pub use self::trace_id::TraceId;
