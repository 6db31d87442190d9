//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning so a
//! developer can start the front end with no configuration. Release builds
//! refuse to start unless every toggle is explicit and the signing key file
//! holds at least [`SESSION_KEY_MIN_LEN`] bytes. A key file shorter than
//! [`SESSION_KEY_DEBUG_MIN_LEN`] is rejected in either mode.

use std::fmt;
use std::path::PathBuf;

use actix_web::cookie::Key;
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/frontend_session_key";
/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Shortest master key cookie key derivation accepts; enforced in debug builds.
pub const SESSION_KEY_DEBUG_MIN_LEN: usize = 32;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const FINGERPRINT_BYTES: usize = 8;

/// How strictly to validate the environment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerate missing or malformed values.
    Debug,
    /// Require explicit, valid values.
    Release,
}

impl BuildMode {
    /// Pick the mode matching `cfg!(debug_assertions)`.
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for the session cookie.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl SessionSettings {
    /// Fingerprint of [`Self::key`], safe to log.
    pub fn key_fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }
}

impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("key_fingerprint", &self.key_fingerprint())
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required variable is unset.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A variable holds something other than a boolean.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file is shorter than the minimum for the build mode.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
    /// Release builds never fall back to a generated key.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read session settings from `env`.
///
/// # Examples
///
/// ```rust
/// use frontend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/frontend-key".to_owned()),
///     "SESSION_COOKIE_SECURE" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).unwrap();
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = toggle(env, mode, COOKIE_SECURE_ENV, true)?;
    let allow_ephemeral = toggle(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings { key, cookie_secure })
}

/// Read a boolean variable; debug builds fall back to `debug_default`.
fn toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default = debug_default, "session toggle not set");
            return Ok(debug_default);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(
                variable = name,
                value = %value,
                default = debug_default,
                "invalid session toggle"
            );
            Ok(debug_default)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let min_len = if mode.is_debug() {
                SESSION_KEY_DEBUG_MIN_LEN
            } else {
                SESSION_KEY_MIN_LEN
            };
            if bytes.len() < min_len {
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length: bytes.len(),
                    min_len,
                });
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using a temporary session key; sessions end on restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// First eight bytes of the SHA-256 of the key's signing half, hex encoded.
///
/// ```rust
/// use actix_web::cookie::Key;
/// use frontend::inbound::http::session_config::key_fingerprint;
///
/// let fingerprint = key_fingerprint(&Key::generate());
/// assert_eq!(fingerprint.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use uuid::Uuid;

    struct TempKeyFile {
        path: PathBuf,
    }

    impl TempKeyFile {
        fn new(len: usize) -> Self {
            let path = std::env::temp_dir().join(format!("frontend-key-{}", Uuid::new_v4()));
            std::fs::write(&path, vec![b'k'; len]).expect("write key file");
            Self { path }
        }

        fn path_str(&self) -> String {
            self.path.to_str().expect("utf-8 temp path").to_owned()
        }
    }

    impl Drop for TempKeyFile {
        fn drop(&mut self) {
            drop(std::fs::remove_file(&self.path));
        }
    }

    fn env_with(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[test]
    fn release_accepts_explicit_settings() {
        let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
        let path = key.path_str();
        let env = env_with(&[
            (KEY_FILE_ENV, &path),
            (COOKIE_SECURE_ENV, "yes"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);
        let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid");
        assert!(settings.cookie_secure);
        assert_eq!(
            settings.key_fingerprint(),
            key_fingerprint(&Key::derive_from(&[b'k'; SESSION_KEY_MIN_LEN]))
        );
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV)]
    #[case(ALLOW_EPHEMERAL_ENV)]
    fn release_requires_every_toggle(#[case] missing: &str) {
        let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
        let path = key.path_str();
        let vars: Vec<(&str, &str)> = [
            (KEY_FILE_ENV, path.as_str()),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]
        .into_iter()
        .filter(|(name, _)| *name != missing)
        .collect();
        let err = session_settings_from_env(&env_with(&vars), BuildMode::Release)
            .expect_err("missing toggle must fail");
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
    }

    #[test]
    fn release_rejects_malformed_toggle() {
        let env = env_with(&[(COOKIE_SECURE_ENV, "maybe"), (ALLOW_EPHEMERAL_ENV, "0")]);
        let err = session_settings_from_env(&env, BuildMode::Release).expect_err("must fail");
        assert!(matches!(
            err,
            SessionConfigError::InvalidEnv { name: COOKIE_SECURE_ENV, ref value, .. } if value == "maybe"
        ));
    }

    #[test]
    fn release_rejects_ephemeral_keys() {
        let env = env_with(&[(COOKIE_SECURE_ENV, "1"), (ALLOW_EPHEMERAL_ENV, "1")]);
        let err = session_settings_from_env(&env, BuildMode::Release).expect_err("must fail");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[test]
    fn release_rejects_short_key() {
        let key = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1);
        let path = key.path_str();
        let env = env_with(&[
            (KEY_FILE_ENV, &path),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);
        let err = session_settings_from_env(&env, BuildMode::Release).expect_err("must fail");
        assert!(matches!(
            err,
            SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
        ));
    }

    #[test]
    fn release_rejects_missing_key_file() {
        let env = env_with(&[
            (KEY_FILE_ENV, "/nonexistent/frontend-key"),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);
        let err = session_settings_from_env(&env, BuildMode::Release).expect_err("must fail");
        assert!(matches!(err, SessionConfigError::KeyRead { .. }));
    }

    #[test]
    fn debug_defaults_to_secure_cookie_and_temporary_key() {
        let env = env_with(&[(KEY_FILE_ENV, "/nonexistent/frontend-key")]);
        let settings = session_settings_from_env(&env, BuildMode::Debug).expect("defaults");
        assert!(settings.cookie_secure);
    }

    #[rstest]
    #[case("0", false)]
    #[case("FALSE", false)]
    #[case(" y ", true)]
    #[case("garbage", true)]
    fn debug_reads_cookie_flag(#[case] raw: &str, #[case] expected: bool) {
        let env = env_with(&[
            (KEY_FILE_ENV, "/nonexistent/frontend-key"),
            (COOKIE_SECURE_ENV, raw),
        ]);
        let settings = session_settings_from_env(&env, BuildMode::Debug).expect("valid");
        assert_eq!(settings.cookie_secure, expected);
    }

    #[test]
    fn debug_accepts_key_shorter_than_release_minimum() {
        let key = TempKeyFile::new(SESSION_KEY_DEBUG_MIN_LEN);
        let path = key.path_str();
        let env = env_with(&[(KEY_FILE_ENV, &path)]);
        assert!(session_settings_from_env(&env, BuildMode::Debug).is_ok());
    }

    #[rstest]
    #[case(8)]
    #[case(SESSION_KEY_DEBUG_MIN_LEN - 1)]
    fn debug_rejects_keys_too_short_to_derive(#[case] len: usize) {
        let key = TempKeyFile::new(len);
        let path = key.path_str();
        let env = env_with(&[(KEY_FILE_ENV, &path)]);
        let err = session_settings_from_env(&env, BuildMode::Debug).expect_err("must fail");
        assert!(matches!(
            err,
            SessionConfigError::KeyTooShort { length, min_len, .. }
                if length == len && min_len == SESSION_KEY_DEBUG_MIN_LEN
        ));
    }

    #[test]
    fn fingerprint_is_stable_lowercase_hex() {
        let key = Key::derive_from(&[b'a'; 64]);
        let first = key_fingerprint(&key);
        assert_eq!(first, key_fingerprint(&key));
        assert_eq!(first.len(), FINGERPRINT_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(first, key_fingerprint(&Key::derive_from(&[b'b'; 64])));
    }

    #[test]
    fn debug_output_hides_key_material() {
        let settings = SessionSettings {
            key: Key::derive_from(&[b'a'; 64]),
            cookie_secure: false,
        };
        let rendered = format!("{settings:?}");
        assert!(rendered.contains(&settings.key_fingerprint()));
    }
}
