//! In-memory join of shows with the movies and theatres they reference.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use super::catalogue::{EntityKey, Movie, Record, Show, Theatre};

/// Placeholder for a name that could not be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

const MOVIE_NAME: &str = "movieName";
const THEATRE_NAME: &str = "theatreName";
const THEATRE_LOCATION: &str = "theatreLocation";

/// A show annotated with display names for its movie and theatre.
///
/// Serialises as the show's own fields plus `movieName`, `theatreName` and
/// `theatreLocation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnrichedShow(Record);

impl EnrichedShow {
    /// Resolved movie name, or `"Unknown"`.
    pub fn movie_name(&self) -> &Value {
        self.derived(MOVIE_NAME)
    }

    /// Resolved theatre name, or `"Unknown"`.
    pub fn theatre_name(&self) -> &Value {
        self.derived(THEATRE_NAME)
    }

    /// Resolved theatre location, or the empty string.
    pub fn theatre_location(&self) -> &Value {
        self.derived(THEATRE_LOCATION)
    }

    /// Borrow the full enriched object.
    pub fn as_record(&self) -> &Record {
        &self.0
    }

    fn derived(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&Value::Null)
    }
}

fn index_by_key<'a, T, F>(items: &'a [T], key: F) -> HashMap<EntityKey, &'a T>
where
    F: Fn(&T) -> Option<EntityKey>,
{
    // Later duplicates overwrite earlier ones.
    items
        .iter()
        .filter_map(|item| key(item).map(|k| (k, item)))
        .collect()
}

fn field_or(record: Option<&Record>, name: &str, fallback: &str) -> Value {
    record
        .and_then(|r| r.get(name))
        .cloned()
        .unwrap_or_else(|| Value::String(fallback.to_owned()))
}

/// Attach movie and theatre display names to each show.
///
/// Lookups are by JSON-typed identifier. A show whose `movieId` or
/// `theatreId` does not resolve gets `"Unknown"` names and an empty
/// location. Output order matches `shows`; the function is pure.
///
/// # Examples
/// ```
/// use frontend::domain::{Movie, Show, Theatre, enrich_shows};
/// use serde_json::{json, Value};
///
/// fn from(value: Value) -> serde_json::Map<String, Value> {
///     value.as_object().cloned().unwrap_or_default()
/// }
///
/// let shows = [Show::new(from(json!({ "id": 1, "movieId": 10, "theatreId": 100 })))];
/// let movies = [Movie::new(from(json!({ "id": 10, "name": "Dune" })))];
/// let theatres: [Theatre; 0] = [];
///
/// let enriched = enrich_shows(&shows, &movies, &theatres);
/// assert_eq!(enriched[0].movie_name(), &json!("Dune"));
/// assert_eq!(enriched[0].theatre_name(), &json!("Unknown"));
/// ```
pub fn enrich_shows(shows: &[Show], movies: &[Movie], theatres: &[Theatre]) -> Vec<EnrichedShow> {
    let movies_by_id = index_by_key(movies, Movie::key);
    let theatres_by_id = index_by_key(theatres, Theatre::key);

    shows
        .iter()
        .map(|show| {
            let movie = show
                .movie_key()
                .and_then(|k| movies_by_id.get(&k))
                .map(|m| m.as_record());
            let theatre = show
                .theatre_key()
                .and_then(|k| theatres_by_id.get(&k))
                .map(|t| t.as_record());

            let mut record = show.as_record().clone();
            record.insert(MOVIE_NAME.into(), field_or(movie, "name", UNKNOWN_NAME));
            record.insert(THEATRE_NAME.into(), field_or(theatre, "name", UNKNOWN_NAME));
            record.insert(THEATRE_LOCATION.into(), field_or(theatre, "location", ""));
            EnrichedShow(record)
        })
        .collect()
}

/// Everything the seat-selection page needs about one show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowContext {
    /// The show itself.
    pub show: Show,
    /// Its movie, or an empty object when unresolved.
    pub movie: Movie,
    /// Its theatre, or an empty object when unresolved.
    pub theatre: Theatre,
}

/// Locate the show whose `id` reads as `show_id` and resolve its movie and
/// theatre.
///
/// `show_id` comes from a URL segment, so it matches both string ids and
/// numeric ids with the same text. Movie and theatre resolution uses
/// JSON-typed equality like [`enrich_shows`]. The first matching record wins.
pub fn find_show_context(
    show_id: &str,
    shows: &[Show],
    movies: &[Movie],
    theatres: &[Theatre],
) -> Option<ShowContext> {
    let show = shows.iter().find(|show| match show.key() {
        Some(EntityKey::Text(text) | EntityKey::Number(text)) => text == show_id,
        None => false,
    })?;
    let movie = show
        .movie_key()
        .and_then(|k| movies.iter().find(|m| m.key().as_ref() == Some(&k)))
        .cloned()
        .unwrap_or_default();
    let theatre = show
        .theatre_key()
        .and_then(|k| theatres.iter().find(|t| t.key().as_ref() == Some(&k)))
        .cloned()
        .unwrap_or_default();
    Some(ShowContext {
        show: show.clone(),
        movie,
        theatre,
    })
}
