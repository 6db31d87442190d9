//! Catalogue records sourced verbatim from the remote backend.
//!
//! Movies, theatres, shows and bookings are opaque JSON objects. The front
//! end only reads identifiers (`id`, and on shows `movieId`/`theatreId`);
//! every other field is passed through to the views untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Raw JSON object as returned by the backend.
pub type Record = Map<String, Value>;

/// Hashable identifier extracted from a record field.
///
/// Equality is JSON-typed: the string `"10"` and the number `10` are
/// different keys. Numbers compare by value, so `10` and `10.0` are the same
/// key. Values that are neither strings nor numbers cannot be used as
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    /// A string identifier, such as a document id.
    Text(String),
    /// A numeric identifier in its canonical JSON text form.
    Number(String),
}

impl EntityKey {
    /// Extract a key from a JSON value.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::EntityKey;
    /// use serde_json::json;
    ///
    /// assert_eq!(EntityKey::from_value(&json!("abc")), Some(EntityKey::Text("abc".into())));
    /// assert_ne!(EntityKey::from_value(&json!(10)), EntityKey::from_value(&json!("10")));
    /// assert_eq!(EntityKey::from_value(&json!(10.0)), EntityKey::from_value(&json!(10)));
    /// assert_eq!(EntityKey::from_value(&json!(null)), None);
    /// ```
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => Some(Self::Number(canonical_number(number))),
            _ => None,
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Integral floats are written as integers; everything else keeps its JSON text.
fn canonical_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float)
            if number.is_f64()
                && float.fract().abs() < f64::EPSILON
                && float.abs() < EXACT_INTEGER_LIMIT =>
        {
            // Adding zero folds -0.0 into 0.0.
            format!("{:.0}", float + 0.0)
        }
        _ => number.to_string(),
    }
}

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Record);

        impl $name {
            /// Wrap a raw backend object.
            pub fn new(record: Record) -> Self {
                Self(record)
            }

            /// Identifier of this record, when it carries a usable `id`.
            pub fn key(&self) -> Option<EntityKey> {
                self.0.get("id").and_then(EntityKey::from_value)
            }

            /// Look up an arbitrary field.
            pub fn field(&self, name: &str) -> Option<&Value> {
                self.0.get(name)
            }

            /// Borrow the underlying object.
            pub fn as_record(&self) -> &Record {
                &self.0
            }

            /// Release the underlying object.
            pub fn into_record(self) -> Record {
                self.0
            }
        }

        impl From<Record> for $name {
            fn from(record: Record) -> Self {
                Self(record)
            }
        }
    };
}

opaque_record!(
    /// A movie listed by the backend (`name`, `genre`, `duration`, ...).
    Movie
);
opaque_record!(
    /// A theatre listed by the backend (`name`, `location`, `totalseats`, ...).
    Theatre
);
opaque_record!(
    /// A scheduled screening linking a movie to a theatre.
    Show
);
opaque_record!(
    /// A past booking belonging to the signed-in user.
    Booking
);

impl Show {
    /// Key of the movie this show screens.
    pub fn movie_key(&self) -> Option<EntityKey> {
        self.field("movieId").and_then(EntityKey::from_value)
    }

    /// Key of the theatre hosting this show.
    pub fn theatre_key(&self) -> Option<EntityKey> {
        self.field("theatreId").and_then(EntityKey::from_value)
    }
}

/// Seat map for one show as reported by `/api/show-seats`.
///
/// Carries `showId`, `totalSeats`, `price`, `tax` and `bookedSeats`; an
/// error envelope or any non-object response yields an empty map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatAvailability(Record);

impl SeatAvailability {
    /// Decode a backend response, discarding anything that is not an object.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(record) => Self(record),
            _ => Self::default(),
        }
    }

    /// Whether the response describes a bookable seat map.
    pub fn has_seat_map(&self) -> bool {
        self.0.get("totalSeats").is_some_and(is_truthy)
    }
}

/// Headline counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Number of theatres.
    pub total_theatres: u64,
    /// Number of scheduled shows.
    pub total_shows: u64,
    /// Number of registered users.
    pub total_users: u64,
}

impl DashboardStats {
    /// Read counters from a `/api/stats` response; missing values count as zero.
    pub fn from_value(value: &Value) -> Self {
        let counter = |name: &str| value.get(name).and_then(Value::as_u64).unwrap_or(0);
        Self {
            total_theatres: counter("total_theatres"),
            total_shows: counter("total_shows"),
            total_users: counter("total_users"),
        }
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays or
/// objects are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
