//! Customer pages: sign-in, show listing, seat booking and history.

use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    BookingSubmission, INVALID_BOOKING_MESSAGE, Role, SeatBooking, enrich_shows,
    failure_envelope, find_show_context,
};
use crate::domain::ports::View;

use super::accounts::{
    LoginForm, RegisterForm, dashboard_path, login_flow, login_page, register_flow,
    register_page,
};
use super::error::{ApiResult, PageResult};
use super::flash::Flash;
use super::pages::{flash_and_redirect, render_page};
use super::session::{LOGIN_REQUIRED_MESSAGE, SessionContext};
use super::state::HttpState;

const SHOW_NOT_FOUND: &str = "Show not found";

/// Customer sign-in form.
#[get("/user/login")]
pub async fn user_login_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    login_page(&state, &session, Role::User)
}

/// Customer sign-in.
#[post("/user/login")]
pub async fn user_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    login_flow(&state, &session, Role::User, form.into_inner()).await
}

/// Customer sign-up form.
#[get("/user/register")]
pub async fn user_register_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    register_page(&state, &session, Role::User)
}

/// Customer sign-up.
#[post("/user/register")]
pub async fn user_register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> PageResult<HttpResponse> {
    register_flow(&state, &session, Role::User, form.into_inner()).await
}

/// Scheduled shows with movie and theatre names resolved.
#[get("/user/dashboard")]
pub async fn user_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let identity = session.require_role(Role::User)?;
    let shows = state.backend.shows().await;
    let movies = state.backend.movies().await;
    let theatres = state.backend.theatres().await;
    let shows = enrich_shows(&shows, &movies, &theatres);
    render_page(
        &state,
        &session,
        View::UserDashboard,
        json!({ "user_name": identity.name, "shows": shows }),
    )
}

/// Seat picker for one show.
///
/// Both an unknown seat map and a show missing from the listing send the
/// visitor back to the dashboard.
#[get("/book/{show_id}")]
pub async fn book_show(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    session.require_role(Role::User)?;
    let show_id = path.into_inner();
    let seat_info = state.backend.show_seats(&show_id).await;
    if !seat_info.has_seat_map() {
        return flash_and_redirect(
            &session,
            Flash::error(SHOW_NOT_FOUND),
            dashboard_path(Role::User),
        );
    }
    let shows = state.backend.shows().await;
    let movies = state.backend.movies().await;
    let theatres = state.backend.theatres().await;
    let Some(context) = find_show_context(&show_id, &shows, &movies, &theatres) else {
        return flash_and_redirect(
            &session,
            Flash::error(SHOW_NOT_FOUND),
            dashboard_path(Role::User),
        );
    };
    render_page(
        &state,
        &session,
        View::BookSeats,
        json!({
            "show": context.show,
            "movie": context.movie,
            "theatre": context.theatre,
            "seat_info": seat_info,
        }),
    )
}

/// Forward a seat selection to the backend and relay its answer.
///
/// Answers JSON in every case: an anonymous caller or an invalid selection
/// gets a failure envelope without any backend call.
#[post("/confirm-booking")]
pub async fn confirm_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: Option<web::Json<BookingSubmission>>,
) -> ApiResult<HttpResponse> {
    let Some(identity) = session.role_identity(Role::User)? else {
        return Ok(HttpResponse::Ok().json(failure_envelope(LOGIN_REQUIRED_MESSAGE)));
    };
    let submission = body.map(web::Json::into_inner).unwrap_or_default();
    let booking = match SeatBooking::try_new(submission) {
        Ok(booking) => booking,
        Err(err) => {
            debug!(reason = %err, "rejecting booking before calling the backend");
            return Ok(HttpResponse::Ok().json(failure_envelope(INVALID_BOOKING_MESSAGE)));
        }
    };
    let result = state.backend.book_seats(&booking, &identity.email).await;
    Ok(HttpResponse::Ok().json(result))
}

/// Bookings made by the signed-in customer.
#[get("/my-bookings")]
pub async fn my_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let identity = session.require_role(Role::User)?;
    let bookings = state.backend.bookings(&identity.email).await;
    render_page(
        &state,
        &session,
        View::MyBookings,
        json!({ "user_name": identity.name, "bookings": bookings }),
    )
}

/// Sign the customer out, keeping any other session state.
#[get("/user/logout")]
pub async fn user_logout(session: SessionContext) -> PageResult<HttpResponse> {
    session.forget_identity();
    flash_and_redirect(&session, Flash::success("Logged out successfully"), "/")
}
