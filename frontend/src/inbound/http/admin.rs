//! Operator pages: sign-in, counters, and catalogue management.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::domain::ports::View;
use crate::domain::{Error, NewMovie, NewShow, NewTheatre, Role};

use super::accounts::{
    LoginForm, RegisterForm, login_flow, login_page, register_flow, register_page,
};
use super::error::PageResult;
use super::flash::Flash;
use super::pages::{flash_and_redirect, render_page};
use super::session::SessionContext;
use super::state::HttpState;

/// Where a new catalogue entry goes and how the outcome is reported.
struct ListingTarget {
    endpoint: &'static str,
    form: View,
    added: &'static str,
    failed: &'static str,
    listing_page: &'static str,
}

const THEATRES: ListingTarget = ListingTarget {
    endpoint: "/api/theatres",
    form: View::AddTheatre,
    added: "Theatre added successfully!",
    failed: "Failed to add theatre",
    listing_page: "/admin/theatres",
};

const MOVIES: ListingTarget = ListingTarget {
    endpoint: "/api/movies",
    form: View::AddMovie,
    added: "Movie added successfully!",
    failed: "Failed to add movie",
    listing_page: "/admin/movies",
};

const SHOWS: ListingTarget = ListingTarget {
    endpoint: "/api/shows",
    form: View::AddShow,
    added: "Show added successfully!",
    failed: "Failed to add show",
    listing_page: "/admin/shows",
};

fn empty() -> Value {
    Value::Object(Map::new())
}

/// Form extractor result, decoded only once the guard has passed.
type SubmittedForm<T> = Result<web::Form<T>, actix_web::Error>;

fn form_fields<T>(form: SubmittedForm<T>) -> Result<T, Error> {
    form.map(web::Form::into_inner)
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Post `listing`; on failure the form is shown again with `form_context`.
async fn submit_listing<L: Serialize>(
    state: &HttpState,
    session: &SessionContext,
    target: &ListingTarget,
    listing: &L,
    form_context: Value,
) -> PageResult<HttpResponse> {
    let result = state.backend.add_listing(target.endpoint, listing).await;
    if result.success {
        info!(endpoint = target.endpoint, "catalogue entry added");
        return flash_and_redirect(session, Flash::success(target.added), target.listing_page);
    }
    session.flash(Flash::error(result.message_or(target.failed)))?;
    render_page(state, session, target.form, form_context)
}

/// Operator sign-in form.
#[get("/admin/login")]
pub async fn admin_login_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    login_page(&state, &session, Role::Admin)
}

/// Operator sign-in.
#[post("/admin/login")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    login_flow(&state, &session, Role::Admin, form.into_inner()).await
}

/// Operator sign-up form.
#[get("/admin/register")]
pub async fn admin_register_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    register_page(&state, &session, Role::Admin)
}

/// Operator sign-up.
#[post("/admin/register")]
pub async fn admin_register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> PageResult<HttpResponse> {
    register_flow(&state, &session, Role::Admin, form.into_inner()).await
}

/// Headline counters.
#[get("/admin/dashboard")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let identity = session.require_role(Role::Admin)?;
    let stats = state.backend.stats().await;
    render_page(
        &state,
        &session,
        View::AdminDashboard,
        json!({ "admin_name": identity.name, "stats": stats }),
    )
}

#[get("/admin/add-theatre")]
pub async fn add_theatre_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    render_page(&state, &session, View::AddTheatre, empty())
}

#[post("/admin/add-theatre")]
pub async fn add_theatre(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: SubmittedForm<NewTheatre>,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let listing = form_fields(form)?;
    submit_listing(&state, &session, &THEATRES, &listing, empty()).await
}

#[get("/admin/theatres")]
pub async fn manage_theatres(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let theatres = state.backend.theatres().await;
    render_page(
        &state,
        &session,
        View::ManageTheatres,
        json!({ "theatres": theatres }),
    )
}

#[get("/admin/add-movie")]
pub async fn add_movie_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    render_page(&state, &session, View::AddMovie, empty())
}

#[post("/admin/add-movie")]
pub async fn add_movie(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: SubmittedForm<NewMovie>,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let listing = form_fields(form)?;
    submit_listing(&state, &session, &MOVIES, &listing, empty()).await
}

#[get("/admin/movies")]
pub async fn manage_movies(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let movies = state.backend.movies().await;
    render_page(&state, &session, View::ManageMovies, json!({ "movies": movies }))
}

/// Dropdown options for the show form.
async fn show_form_context(state: &HttpState) -> Value {
    let theatres = state.backend.theatres().await;
    let movies = state.backend.movies().await;
    json!({ "theatres": theatres, "movies": movies })
}

#[get("/admin/add-show")]
pub async fn add_show_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let context = show_form_context(&state).await;
    render_page(&state, &session, View::AddShow, context)
}

/// Schedule a show. The dropdown lists are fetched before submitting so a
/// rejected form can be shown again.
#[post("/admin/add-show")]
pub async fn add_show(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: SubmittedForm<NewShow>,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let listing = form_fields(form)?;
    let context = show_form_context(&state).await;
    submit_listing(&state, &session, &SHOWS, &listing, context).await
}

#[get("/admin/shows")]
pub async fn manage_shows(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let shows = state.backend.shows().await;
    render_page(&state, &session, View::ManageShows, json!({ "shows": shows }))
}
