//! Typed facade over [`BackendTransport`], one method per backend endpoint.
//!
//! Collection endpoints decode through [`ListResult`]; action endpoints
//! through [`ActionResult`]. Nothing here fails: transport problems arrive
//! as failure envelopes and are reported the same way as backend rejections.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use url::form_urlencoded;

use super::account::{LoginCredentials, Registration, Role, SessionIdentity};
use super::booking::SeatBooking;
use super::catalogue::{Booking, DashboardStats, Movie, SeatAvailability, Show, Theatre};
use super::envelope::{ActionResult, ListResult};
use super::ports::{BackendRequest, BackendTransport};

/// Outcome of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The backend accepted the credentials.
    Authenticated(SessionIdentity),
    /// The backend refused, with its message when it sent one.
    Rejected(Option<String>),
}

/// Stateless client for the remote booking backend.
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn BackendTransport>,
}

fn encode_query(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

impl BackendClient {
    /// Wrap a transport.
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Vec<T> {
        let response = self.transport.call(BackendRequest::get(path)).await;
        let decoded = ListResult::decode(response);
        if decoded.is_malformed() {
            warn!(path, "backend returned a malformed list; using an empty one");
        }
        decoded.into_items()
    }

    async fn action<P: Serialize>(&self, path: &str, payload: &P) -> ActionResult {
        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(error) => {
                warn!(path, error = %error, "failed to encode backend payload");
                return ActionResult::failure(error.to_string());
            }
        };
        ActionResult::decode(self.transport.call(BackendRequest::post(path, body)).await)
    }

    /// All scheduled shows.
    pub async fn shows(&self) -> Vec<Show> {
        self.list("/api/shows").await
    }

    /// All movies.
    pub async fn movies(&self) -> Vec<Movie> {
        self.list("/api/movies").await
    }

    /// All theatres.
    pub async fn theatres(&self) -> Vec<Theatre> {
        self.list("/api/theatres").await
    }

    /// Bookings made by `user_email`.
    pub async fn bookings(&self, user_email: &str) -> Vec<Booking> {
        let path = format!("/api/bookings?userEmail={}", encode_query(user_email));
        self.list(&path).await
    }

    /// Seat map for one show.
    pub async fn show_seats(&self, show_id: &str) -> SeatAvailability {
        let path = format!("/api/show-seats?showId={}", encode_query(show_id));
        SeatAvailability::from_value(self.transport.call(BackendRequest::get(path)).await)
    }

    /// Admin dashboard counters.
    pub async fn stats(&self) -> DashboardStats {
        let response = self.transport.call(BackendRequest::get("/api/stats")).await;
        DashboardStats::from_value(&response)
    }

    /// Sign in as `role`.
    ///
    /// The account object is read from the `user` or `admin` field of a
    /// successful response.
    pub async fn login(&self, role: Role, credentials: &LoginCredentials) -> LoginOutcome {
        let path = format!("/api/{role}/login");
        let result = self.action(&path, &credentials.payload()).await;
        if !result.success {
            return LoginOutcome::Rejected(result.message);
        }
        let account = result.data.get(role.as_str());
        LoginOutcome::Authenticated(SessionIdentity::from_account(
            credentials.email(),
            role,
            account,
        ))
    }

    /// Create an account with `role`.
    pub async fn register(&self, role: Role, registration: &Registration) -> ActionResult {
        let path = format!("/api/{role}/register");
        self.action(&path, &registration.payload()).await
    }

    /// Add a theatre, movie or show by posting `listing` to `path`.
    pub async fn add_listing<L: Serialize>(&self, path: &str, listing: &L) -> ActionResult {
        self.action(path, listing).await
    }

    /// Book seats for the signed-in user, returning the backend body verbatim.
    pub async fn book_seats(&self, booking: &SeatBooking, user_email: &str) -> Value {
        self.transport
            .call(BackendRequest::post(
                "/api/book-seats",
                booking.payload(user_email),
            ))
            .await
    }
}
