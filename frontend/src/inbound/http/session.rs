//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the per-request Actix session so handlers only deal with identities,
//! role guards and flash messages. The backing store is the signed and
//! encrypted session cookie configured in [`super::session_config`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Role, SessionIdentity};

use super::error::PageError;
use super::flash::Flash;

pub(crate) const EMAIL_KEY: &str = "email";
pub(crate) const NAME_KEY: &str = "name";
pub(crate) const ACCOUNT_ID_KEY: &str = "account_id";
pub(crate) const ROLE_KEY: &str = "role";
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Notice pushed when a guard turns a visitor away.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login first";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store a freshly authenticated identity, replacing any previous one.
    ///
    /// The session key is renewed so a pre-login cookie cannot be replayed
    /// as a signed-in one.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(EMAIL_KEY, &identity.email)
            .map_err(write_error)?;
        self.0.insert(NAME_KEY, &identity.name).map_err(write_error)?;
        self.0
            .insert(ACCOUNT_ID_KEY, &identity.id)
            .map_err(write_error)?;
        self.0
            .insert(ROLE_KEY, identity.role.as_str())
            .map_err(write_error)
    }

    /// The signed-in identity, if the session holds a complete one.
    ///
    /// An empty email or an unrecognised role counts as signed out.
    pub fn identity(&self) -> Result<Option<SessionIdentity>, Error> {
        let Some(email) = self.0.get::<String>(EMAIL_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        if email.is_empty() {
            return Ok(None);
        }
        let Some(raw_role) = self.0.get::<String>(ROLE_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        let role = match raw_role.parse::<Role>() {
            Ok(role) => role,
            Err(error) => {
                warn!(%error, "ignoring session with an unrecognised role");
                return Ok(None);
            }
        };
        let name = self
            .0
            .get::<String>(NAME_KEY)
            .map_err(read_error)?
            .unwrap_or_else(|| role.default_name().to_owned());
        let id = self
            .0
            .get::<String>(ACCOUNT_ID_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        Ok(Some(SessionIdentity {
            email,
            name,
            id,
            role,
        }))
    }

    /// Require an identity holding `role`.
    ///
    /// Otherwise queue the "Please login first" notice and fail with
    /// [`PageError::LoginRequired`], which redirects to the role's login page.
    pub fn require_role(&self, role: Role) -> Result<SessionIdentity, PageError> {
        match self.identity()? {
            Some(identity) if identity.role == role => Ok(identity),
            _ => {
                self.flash(Flash::error(LOGIN_REQUIRED_MESSAGE))?;
                Err(PageError::LoginRequired(role))
            }
        }
    }

    /// Like [`Self::require_role`] without queuing a notice; for JSON callers.
    pub fn role_identity(&self, role: Role) -> Result<Option<SessionIdentity>, Error> {
        Ok(self.identity()?.filter(|identity| identity.role == role))
    }

    /// Drop the identity while keeping pending notices.
    pub fn forget_identity(&self) {
        for key in [EMAIL_KEY, NAME_KEY, ACCOUNT_ID_KEY, ROLE_KEY] {
            self.0.remove(key);
        }
    }

    /// Drop everything held in the session.
    pub fn clear(&self) {
        self.0.clear();
    }

    /// Queue a notice for the next rendered page.
    pub fn flash(&self, flash: Flash) -> Result<(), Error> {
        let mut pending = self.pending_flashes();
        pending.push(flash);
        self.0.insert(FLASHES_KEY, pending).map_err(write_error)
    }

    /// Remove and return every queued notice, oldest first.
    pub fn take_flashes(&self) -> Vec<Flash> {
        match self.0.remove_as::<Vec<Flash>>(FLASHES_KEY) {
            Some(Ok(flashes)) => flashes,
            Some(Err(raw)) => {
                warn!(len = raw.len(), "discarding undecodable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn pending_flashes(&self) -> Vec<Flash> {
        match self.0.get::<Vec<Flash>>(FLASHES_KEY) {
            Ok(flashes) => flashes.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "discarding undecodable flash messages");
                Vec::new()
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
