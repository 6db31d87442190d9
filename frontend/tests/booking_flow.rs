//! End-to-end customer and operator journeys against a recording backend.

#[allow(dead_code, reason = "shared helpers; each suite uses a subset")]
mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use frontend::domain::ports::BackendMethod;
use rstest::rstest;
use serde_json::{Value, json};

use support::{RecordingTransport, app, location, rendered, session_cookie};

fn cinema() -> RecordingTransport {
    RecordingTransport::default()
        .with_route(
            "/api/user/login",
            json!({ "success": true, "user": { "name": "Ada", "id": 4 } }),
        )
        .with_route(
            "/api/admin/login",
            json!({ "success": true, "admin": { "name": "Ops", "id": "a-1" } }),
        )
        .with_route(
            "/api/shows",
            json!([{ "id": 1, "movieId": 10, "theatreId": 100, "showtime": "18:00", "price": 200 }]),
        )
        .with_route("/api/movies", json!([{ "id": 10, "name": "Dune" }]))
        .with_route(
            "/api/theatres",
            json!([{ "id": 100, "name": "Regal", "location": "Downtown" }]),
        )
        .with_route(
            "/api/show-seats?showId=1",
            json!({ "showId": 1, "totalSeats": 50, "price": 200, "tax": 10, "bookedSeats": [3] }),
        )
        .with_route(
            "/api/book-seats",
            json!({
                "success": true,
                "booking": { "seats": "1,2", "subtotal": 400, "tax": 40, "total": 440 }
            }),
        )
        .with_route(
            "/api/bookings?userEmail=ada%40example.com",
            json!([{ "id": "b-1", "seats": "1,2", "total": 440 }]),
        )
}

macro_rules! login {
    ($app:expr, $role:literal, $email:literal) => {{
        let res = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri(concat!("/", $role, "/login"))
                .set_form([("email", $email), ("password", "secret")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        session_cookie(&res).expect("login sets a session")
    }};
}

#[actix_web::test]
async fn customer_books_seats_end_to_end() {
    let backend = Arc::new(cinema());
    let app = test::init_service(app(backend.clone())).await;
    let cookie = login!(app, "user", "ada@example.com");

    let dashboard = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/user/dashboard")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let (view, context) = rendered(dashboard).await;
    assert_eq!(view, "user_dashboard");
    assert_eq!(
        context.get("shows"),
        Some(&json!([{
            "id": 1,
            "movieId": 10,
            "theatreId": 100,
            "showtime": "18:00",
            "price": 200,
            "movieName": "Dune",
            "theatreName": "Regal",
            "theatreLocation": "Downtown"
        }]))
    );

    let seats = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/book/1")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let (view, context) = rendered(seats).await;
    assert_eq!(view, "book_seats");
    assert_eq!(context.pointer("/seat_info/totalSeats"), Some(&json!(50)));

    let confirmed = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/confirm-booking")
            .cookie(cookie.clone())
            .set_json(json!({ "showId": 1, "seats": [1, 2] }))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(confirmed).await;
    assert_eq!(body.pointer("/booking/total"), Some(&json!(440)));

    let history = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/my-bookings")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let (view, context) = rendered(history).await;
    assert_eq!(view, "my_bookings");
    assert_eq!(context.pointer("/bookings/0/id"), Some(&json!("b-1")));

    let booking = backend
        .requests()
        .into_iter()
        .find(|request| request.path == "/api/book-seats")
        .expect("booking forwarded");
    assert_eq!(booking.method, BackendMethod::Post);
    assert_eq!(
        booking.payload,
        Some(json!({ "showId": 1, "userEmail": "ada@example.com", "seats": "1,2" }))
    );
}

#[rstest]
#[case(json!({ "showId": 1, "seats": [] }))]
#[case(json!({ "showId": null, "seats": [1] }))]
#[case(json!({ "seats": [1] }))]
#[actix_web::test]
async fn invalid_bookings_make_no_backend_calls(#[case] submission: Value) {
    let backend = Arc::new(cinema());
    let app = test::init_service(app(backend.clone())).await;
    let cookie = login!(app, "user", "ada@example.com");
    let before = backend.calls();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/confirm-booking")
            .cookie(cookie)
            .set_json(submission)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.get("success"), Some(&json!(false)));
    assert_eq!(backend.calls(), before);
}

#[rstest]
#[case::customer_on_operator_page("user", "ada@example.com", "/admin/dashboard", "/admin/login")]
#[case::operator_on_customer_page("admin", "ops@example.com", "/user/dashboard", "/user/login")]
#[case::operator_on_seat_picker("admin", "ops@example.com", "/book/1", "/user/login")]
#[actix_web::test]
async fn role_guards_redirect_to_the_right_login(
    #[case] role: &str,
    #[case] email: &str,
    #[case] page: &str,
    #[case] expected: &str,
) {
    let backend = Arc::new(cinema());
    let app = test::init_service(app(backend.clone())).await;
    let signed_in = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/{role}/login"))
            .set_form([("email", email), ("password", "secret")])
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&signed_in).expect("login sets a session");
    let before = backend.calls();

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri(page).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some(expected));
    assert_eq!(backend.calls(), before);
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let backend = Arc::new(cinema());
    let app = test::init_service(app(backend)).await;
    let cookie = login!(app, "admin", "ops@example.com");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/"));
    let cookie = session_cookie(&res).expect("flash stored");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/dashboard")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/admin/login"));
}
