//! Sign-in and sign-up flows shared by the customer and admin pages.

use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::domain::ports::View;
use crate::domain::{LoginCredentials, LoginOutcome, Registration, Role};

use super::error::PageResult;
use super::flash::Flash;
use super::pages::{flash_and_redirect, render_page};
use super::session::SessionContext;
use super::state::HttpState;

/// Login form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
}

/// Registration form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Chosen password.
    #[serde(default)]
    pub password: String,
    /// Repeated password.
    #[serde(default)]
    pub confirm_password: String,
}

/// Login page for `role`.
pub const fn login_path(role: Role) -> &'static str {
    match role {
        Role::User => "/user/login",
        Role::Admin => "/admin/login",
    }
}

/// Landing page after signing in as `role`.
pub const fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::User => "/user/dashboard",
        Role::Admin => "/admin/dashboard",
    }
}

const fn login_view(role: Role) -> View {
    match role {
        Role::User => View::UserLogin,
        Role::Admin => View::AdminLogin,
    }
}

const fn register_view(role: Role) -> View {
    match role {
        Role::User => View::UserRegister,
        Role::Admin => View::AdminRegister,
    }
}

const fn registered_message(role: Role) -> &'static str {
    match role {
        Role::User => "Registration successful! Please login.",
        Role::Admin => "Admin registration successful! Please login.",
    }
}

fn empty() -> Value {
    Value::Object(Map::new())
}

/// Render the login form for `role`.
pub fn login_page(
    state: &HttpState,
    session: &SessionContext,
    role: Role,
) -> PageResult<HttpResponse> {
    render_page(state, session, login_view(role), empty())
}

/// Render the registration form for `role`.
pub fn register_page(
    state: &HttpState,
    session: &SessionContext,
    role: Role,
) -> PageResult<HttpResponse> {
    render_page(state, session, register_view(role), empty())
}

/// Validate a login form, ask the backend, and sign in on success.
pub async fn login_flow(
    state: &HttpState,
    session: &SessionContext,
    role: Role,
    form: LoginForm,
) -> PageResult<HttpResponse> {
    let credentials = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            session.flash(Flash::error(err.to_string()))?;
            return login_page(state, session, role);
        }
    };
    match state.backend.login(role, &credentials).await {
        LoginOutcome::Authenticated(identity) => {
            session.persist_identity(&identity)?;
            info!(role = %role, "signed in");
            flash_and_redirect(session, Flash::success("Login successful!"), dashboard_path(role))
        }
        LoginOutcome::Rejected(message) => {
            let message = message.unwrap_or_else(|| "Invalid email or password".to_owned());
            session.flash(Flash::error(message))?;
            login_page(state, session, role)
        }
    }
}

/// Validate a registration form and forward it to the backend.
pub async fn register_flow(
    state: &HttpState,
    session: &SessionContext,
    role: Role,
    form: RegisterForm,
) -> PageResult<HttpResponse> {
    let registration = match Registration::try_from_parts(
        &form.name,
        &form.email,
        &form.password,
        &form.confirm_password,
    ) {
        Ok(registration) => registration,
        Err(err) => {
            session.flash(Flash::error(err.to_string()))?;
            return register_page(state, session, role);
        }
    };
    let result = state.backend.register(role, &registration).await;
    if result.success {
        flash_and_redirect(
            session,
            Flash::success(registered_message(role)),
            login_path(role),
        )
    } else {
        session.flash(Flash::error(result.message_or("Registration failed")))?;
        register_page(state, session, role)
    }
}
