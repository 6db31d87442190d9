//! HTTP inbound adapter serving the HTML pages and the booking endpoint.

pub mod accounts;
pub mod admin;
pub mod error;
pub mod flash;
pub mod health;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::{ApiResult, PageError, PageResult};
pub use health::HealthState;
pub use state::HttpState;

/// Register every page and JSON route.
///
/// Handlers expect [`HttpState`] as app data and a session middleware on
/// the enclosing app. Health probes are registered separately because they
/// need [`HealthState`] instead.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::logout)
        .service(users::user_login_page)
        .service(users::user_login)
        .service(users::user_register_page)
        .service(users::user_register)
        .service(users::user_dashboard)
        .service(users::book_show)
        .service(users::confirm_booking)
        .service(users::my_bookings)
        .service(users::user_logout)
        .service(admin::admin_login_page)
        .service(admin::admin_login)
        .service(admin::admin_register_page)
        .service(admin::admin_register)
        .service(admin::admin_dashboard)
        .service(admin::add_theatre_page)
        .service(admin::add_theatre)
        .service(admin::manage_theatres)
        .service(admin::add_movie_page)
        .service(admin::add_movie)
        .service(admin::manage_movies)
        .service(admin::add_show_page)
        .service(admin::add_show)
        .service(admin::manage_shows);
}

/// Register the liveness and readiness probes.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ready).service(health::live);
}
