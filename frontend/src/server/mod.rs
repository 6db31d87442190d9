//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite, time::Duration};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use frontend::Trace;
use frontend::inbound::http::{HealthState, HttpState, configure, configure_health};

const SESSION_COOKIE: &str = "session";
const SESSION_TTL_HOURS: i64 = 2;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let pages = web::scope("")
        .wrap(session_middleware(key, cookie_secure))
        .configure(configure);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_health)
        .service(pages)
}

/// Construct the HTTP server and mark it ready once the listener is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        transport,
        views,
    } = config;
    let http_state = web::Data::new(HttpState::new(transport, views));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use frontend::domain::ports::FixtureViewRenderer;
    use frontend::middleware::TRACE_ID_HEADER;
    use frontend::outbound::backend_http::HttpBackendTransport;
    use url::Url;

    fn deps() -> AppDependencies {
        let transport = HttpBackendTransport::new(
            Url::parse("http://127.0.0.1:9").expect("url"),
            std::time::Duration::from_millis(200),
        )
        .expect("client");
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::new(
                Arc::new(transport),
                Arc::new(FixtureViewRenderer),
            )),
            key: Key::generate(),
            cookie_secure: false,
        }
    }

    #[actix_web::test]
    async fn probes_answer_without_a_session_cookie() {
        let deps = deps();
        deps.health_state.mark_ready();
        let app = test::init_service(build_app(deps)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(TRACE_ID_HEADER).is_some());
        assert!(res.response().cookies().next().is_none());
    }

    #[actix_web::test]
    async fn guarded_pages_set_a_private_session_cookie() {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/user/dashboard").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert!(cookie.max_age().is_some());
        assert!(!cookie.value().contains("Please login first"));
    }
}
