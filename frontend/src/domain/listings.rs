//! Admin forms for adding catalogue entries.
//!
//! Values are forwarded to the backend as the strings the operator typed;
//! the backend owns numeric parsing and validation.

use serde::{Deserialize, Serialize};

fn default_tax() -> String {
    "10".to_owned()
}

/// New theatre submitted from `/admin/add-theatre`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTheatre {
    /// Theatre name.
    pub name: String,
    /// Free-form location.
    pub location: String,
    /// Seat capacity, as typed.
    pub totalseats: String,
    /// Tax percentage, `"10"` when the form omits it.
    #[serde(default = "default_tax")]
    pub tax: String,
}

/// New movie submitted from `/admin/add-movie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    /// Title.
    pub name: String,
    /// Genre label.
    pub genre: String,
    /// Running time, as typed.
    pub duration: String,
    /// Spoken language.
    pub language: String,
    /// Optional synopsis.
    #[serde(default)]
    pub description: String,
}

/// New show submitted from `/admin/add-show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShow {
    /// Movie being screened.
    pub movie_id: String,
    /// Hosting theatre.
    pub theatre_id: String,
    /// Start time, as typed.
    pub showtime: String,
    /// Ticket price, as typed.
    pub price: String,
}
