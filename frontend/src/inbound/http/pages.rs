//! Page rendering helpers and the session-agnostic pages.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, web};
use serde_json::{Map, Value};
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::View;

use super::error::PageResult;
use super::flash::Flash;
use super::session::SessionContext;
use super::state::HttpState;

/// Post/redirect/get response pointing at `path`.
pub fn redirect(path: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, path))
        .finish()
}

/// Render `view` with `context`, draining pending flashes into it.
///
/// `context` should be a JSON object; anything else is replaced by an empty
/// one. The signed-in display name, when there is one, is exposed as
/// `display_name`.
pub fn render_page(
    state: &HttpState,
    session: &SessionContext,
    view: View,
    context: Value,
) -> PageResult<HttpResponse> {
    let mut model = match context {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    let flashes = session.take_flashes();
    model.insert(
        "flashes".to_owned(),
        serde_json::to_value(flashes).map_err(|err| Error::internal(err.to_string()))?,
    );
    if let Some(identity) = session.identity()? {
        model.insert("display_name".to_owned(), Value::String(identity.name));
    }
    let html = state
        .views
        .render(view, &Value::Object(model))
        .map_err(|err| {
            error!(view = %view, error = %err, "page rendering failed");
            Error::internal(format!("failed to render {view}"))
        })?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Queue `flash` and redirect to `path`.
pub fn flash_and_redirect(
    session: &SessionContext,
    flash: Flash,
    path: &str,
) -> PageResult<HttpResponse> {
    session.flash(flash)?;
    Ok(redirect(path))
}

/// Landing page.
#[get("/")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> PageResult<HttpResponse> {
    render_page(&state, &session, View::Index, Value::Object(Map::new()))
}

/// Sign out of any role and return to the landing page.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> PageResult<HttpResponse> {
    session.clear();
    flash_and_redirect(&session, Flash::success("You have been logged out"), "/")
}
