//! Driven port for turning view models into HTML.
//!
//! Page handlers compose a JSON view model and hand it to this port with the
//! name of the page. The production adapter renders handlebars templates;
//! tests use [`FixtureViewRenderer`] to assert on the composed model.

use std::fmt;

use serde_json::{Value, json};

/// Pages the front end can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing page.
    Index,
    /// Customer sign-in form.
    UserLogin,
    /// Customer sign-up form.
    UserRegister,
    /// Customer show listing.
    UserDashboard,
    /// Seat picker for one show.
    BookSeats,
    /// Customer booking history.
    MyBookings,
    /// Operator sign-in form.
    AdminLogin,
    /// Operator sign-up form.
    AdminRegister,
    /// Operator headline counters.
    AdminDashboard,
    /// New theatre form.
    AddTheatre,
    /// Theatre listing.
    ManageTheatres,
    /// New movie form.
    AddMovie,
    /// Movie listing.
    ManageMovies,
    /// New show form.
    AddShow,
    /// Show listing.
    ManageShows,
}

impl View {
    /// Every page, in registration order.
    pub const ALL: [Self; 15] = [
        Self::Index,
        Self::UserLogin,
        Self::UserRegister,
        Self::UserDashboard,
        Self::BookSeats,
        Self::MyBookings,
        Self::AdminLogin,
        Self::AdminRegister,
        Self::AdminDashboard,
        Self::AddTheatre,
        Self::ManageTheatres,
        Self::AddMovie,
        Self::ManageMovies,
        Self::AddShow,
        Self::ManageShows,
    ];

    /// Template name of the page.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::UserLogin => "user_login",
            Self::UserRegister => "user_register",
            Self::UserDashboard => "user_dashboard",
            Self::BookSeats => "book_seats",
            Self::MyBookings => "my_bookings",
            Self::AdminLogin => "admin_login",
            Self::AdminRegister => "admin_register",
            Self::AdminDashboard => "admin_dashboard",
            Self::AddTheatre => "add_theatre",
            Self::ManageTheatres => "manage_theatres",
            Self::AddMovie => "add_movie",
            Self::ManageMovies => "manage_movies",
            Self::AddShow => "add_show",
            Self::ManageShows => "manage_shows",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while rendering a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewRenderError {
    /// A template or partial failed to compile.
    #[error("failed to register template `{name}`: {message}")]
    Registration {
        /// Template or partial name.
        name: String,
        /// Engine error text.
        message: String,
    },
    /// No template is registered for the page.
    #[error("no template registered for view `{view}`")]
    MissingTemplate {
        /// The requested page.
        view: View,
    },
    /// The template failed while rendering.
    #[error("failed to render view `{view}`: {message}")]
    Template {
        /// The requested page.
        view: View,
        /// Engine error text.
        message: String,
    },
}

/// Port for rendering a page from its view model.
#[cfg_attr(test, mockall::automock)]
pub trait ViewRenderer: Send + Sync {
    /// Render `view` with `context` into an HTML document.
    fn render(&self, view: View, context: &Value) -> Result<String, ViewRenderError>;
}

/// Renderer that echoes the view name and model as JSON.
///
/// Used by tests that assert on the composed view model rather than markup.
///
/// # Examples
/// ```
/// use frontend::domain::ports::{FixtureViewRenderer, View, ViewRenderer};
/// use serde_json::json;
///
/// let body = FixtureViewRenderer.render(View::Index, &json!({})).unwrap();
/// assert!(body.contains(r#""view":"index""#));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureViewRenderer;

impl ViewRenderer for FixtureViewRenderer {
    fn render(&self, view: View, context: &Value) -> Result<String, ViewRenderError> {
        Ok(json!({ "view": view.as_str(), "context": context }).to_string())
    }
}
