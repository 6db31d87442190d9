//! Handlebars adapter for the [`ViewRenderer`] port.
//!
//! Templates are embedded at compile time and registered once at start-up.
//! Every page template wraps itself in the `layout` partial, which renders
//! the header and pending flash messages.

use handlebars::Handlebars;
use serde_json::Value;

use crate::domain::ports::{View, ViewRenderError, ViewRenderer};

macro_rules! template {
    ($name:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name, ".hbs"))
    };
}

const LAYOUT: &str = template!("layout");

fn source(view: View) -> &'static str {
    match view {
        View::Index => template!("index"),
        View::UserLogin => template!("user_login"),
        View::UserRegister => template!("user_register"),
        View::UserDashboard => template!("user_dashboard"),
        View::BookSeats => template!("book_seats"),
        View::MyBookings => template!("my_bookings"),
        View::AdminLogin => template!("admin_login"),
        View::AdminRegister => template!("admin_register"),
        View::AdminDashboard => template!("admin_dashboard"),
        View::AddTheatre => template!("add_theatre"),
        View::ManageTheatres => template!("manage_theatres"),
        View::AddMovie => template!("add_movie"),
        View::ManageMovies => template!("manage_movies"),
        View::AddShow => template!("add_show"),
        View::ManageShows => template!("manage_shows"),
    }
}

/// Renders pages with the embedded handlebars templates.
#[derive(Debug, Clone)]
pub struct HandlebarsViewRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsViewRenderer {
    /// Compile the layout partial and every page template.
    ///
    /// # Errors
    ///
    /// Returns [`ViewRenderError::Registration`] when a template fails to
    /// compile.
    pub fn new() -> Result<Self, ViewRenderError> {
        let mut registry = Handlebars::new();
        registry
            .register_partial("layout", LAYOUT)
            .map_err(|err| ViewRenderError::Registration {
                name: "layout".to_owned(),
                message: err.to_string(),
            })?;
        for view in View::ALL {
            registry
                .register_template_string(view.as_str(), source(view))
                .map_err(|err| ViewRenderError::Registration {
                    name: view.as_str().to_owned(),
                    message: err.to_string(),
                })?;
        }
        Ok(Self { registry })
    }
}

impl ViewRenderer for HandlebarsViewRenderer {
    fn render(&self, view: View, context: &Value) -> Result<String, ViewRenderError> {
        if !self.registry.has_template(view.as_str()) {
            return Err(ViewRenderError::MissingTemplate { view });
        }
        self.registry
            .render(view.as_str(), context)
            .map_err(|err| ViewRenderError::Template {
                view,
                message: err.to_string(),
            })
    }
}
