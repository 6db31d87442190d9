//! Shared helpers for the front-end integration suites.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use frontend::Trace;
use frontend::domain::failure_envelope;
use frontend::domain::ports::{BackendRequest, BackendTransport, FixtureViewRenderer};
use frontend::inbound::http::{HttpState, configure};
use serde_json::Value;

/// Transport answering from a path table and recording every request.
#[derive(Default)]
pub struct RecordingTransport {
    routes: HashMap<String, Value>,
    calls: AtomicUsize,
    requests: Mutex<Vec<BackendRequest>>,
}

impl RecordingTransport {
    /// Answer `body` for requests to `path`.
    pub fn with_route(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_owned(), body);
        self
    }

    /// Number of backend calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received, oldest first.
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().expect("request log").clone()
    }
}

#[async_trait]
impl BackendTransport for RecordingTransport {
    async fn call(&self, request: BackendRequest) -> Value {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self
            .routes
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| failure_envelope("no such route"));
        self.requests.lock().expect("request log").push(request);
        answer
    }
}

/// App wired like production, rendering pages as JSON fixtures.
pub fn app(
    transport: Arc<dyn BackendTransport>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(HttpState::new(
            transport,
            Arc::new(FixtureViewRenderer),
        )))
        .wrap(Trace)
        .wrap(session)
        .configure(configure)
}

/// Session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Decode a fixture-rendered page into `(view, context)`.
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
