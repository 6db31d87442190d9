//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use serde_json::Value;

use crate::domain::ports::{BackendTransport, FixtureViewRenderer};
use crate::domain::{Error, Role, SessionIdentity};

use super::session::SessionContext;
use super::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Path of the test-only route that signs in as `role`.
pub fn sign_in_uri(role: Role) -> String {
    format!("/test/sign-in/{role}")
}

async fn sign_in(session: SessionContext, role: web::Path<String>) -> Result<HttpResponse, Error> {
    let role = role
        .parse::<Role>()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_identity(&SessionIdentity {
        email: "a@b.com".to_owned(),
        name: "Ada".to_owned(),
        id: "42".to_owned(),
        role,
    })?;
    Ok(HttpResponse::Ok().finish())
}

/// App with cookie sessions and the test sign-in route.
pub fn session_test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .route("/test/sign-in/{role}", web::get().to(sign_in))
}

/// Handler state backed by `transport` and the JSON fixture renderer.
pub fn test_state(transport: impl BackendTransport + 'static) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(transport),
        Arc::new(FixtureViewRenderer),
    ))
}

/// Session cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Decode a page rendered by [`FixtureViewRenderer`] into `(view, context)`.
pub async fn rendered<B: MessageBody>(res: ServiceResponse<B>) -> (String, Value) {
    let body: Value = test::read_body_json(res).await;
    let view = body
        .get("view")
        .and_then(Value::as_str)
        .expect("view name")
        .to_owned();
    let context = body.get("context").cloned().expect("view context");
    (view, context)
}

/// [`session_test_app`] serving every page route with `state`.
pub fn page_test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    session_test_app().app_data(state).configure(super::configure)
}
