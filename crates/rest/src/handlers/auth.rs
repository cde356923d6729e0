//! Account registration, login and logout.
//!
//! Forms are `application/x-www-form-urlencoded`. Passwords are stored as
//! bcrypt hashes; hashing and verification run on the blocking pool.

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use retenciones_persistence::core::UserStore;
use retenciones_persistence::types::NewUser;
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::responses::cookies::{expired_session_cookie, session_cookie, user_rif_cookie};
use crate::state::AppState;

/// bcrypt work factor for new accounts.
pub const BCRYPT_COST: u32 = 10;

/// Fields of the registration form.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    /// Login name.
    pub username: Option<String>,
    /// Taxpayer RIF of the account.
    pub rif: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

/// Fields of the login form.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    /// Login name.
    pub username: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A `302 Found` to `location`, appending one `Set-Cookie` per cookie.
fn redirect(location: &'static str, cookies: Vec<String>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location)],
        AppendHeaders(cookies.into_iter().map(|c| (header::SET_COOKIE, c))),
        (),
    )
        .into_response()
}

async fn hash_password(password: String) -> RestResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| RestError::InternalError {
            message: format!("hashing task failed: {}", e),
        })?
        .map_err(|e| RestError::InternalError {
            message: format!("bcrypt hash failed: {}", e),
        })
}

async fn verify_password(password: String, hash: String) -> RestResult<bool> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| RestError::InternalError {
            message: format!("verification task failed: {}", e),
        })?;

    match verified {
        Ok(valid) => Ok(valid),
        Err(e) => {
            warn!(error = %e, "Stored password hash is unreadable");
            Ok(false)
        }
    }
}

/// Handler for `POST /api/auth/register`.
///
/// # Response
///
/// - `302 Found` to `/login` - Account created
/// - `400 Bad Request` - A field is missing
/// - `409 Conflict` - Username or RIF already registered
pub async fn register_handler<S>(
    State(state): State<AppState<S>>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> RestResult<Response>
where
    S: UserStore + Send + Sync,
{
    let missing = || RestError::BadRequest {
        message: "Username, RIF, and password are required".to_string(),
    };
    let Form(form) = form.map_err(|_| missing())?;
    let (Some(username), Some(rif), Some(password)) = (
        present(form.username),
        present(form.rif),
        present(form.password),
    ) else {
        return Err(missing());
    };

    debug!(username = %username, rif = %rif, "Processing registration");

    if state.storage().user_exists(&username, &rif).await? {
        return Err(RestError::Conflict {
            message: "User already exists or RIF is already registered".to_string(),
        });
    }

    let password_hash = hash_password(password).await?;
    let user = state
        .storage()
        .create_user(NewUser {
            username,
            rif,
            password_hash,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "Registered user");
    Ok(redirect("/login", Vec::new()))
}

/// Handler for `POST /api/auth/login`.
///
/// Sets the `session` and `user_rif` cookies on success.
///
/// # Response
///
/// - `302 Found` to `/dashboard` - Logged in
/// - `400 Bad Request` - A field is missing
/// - `401 Unauthorized` - Unknown user or wrong password
pub async fn login_handler<S>(
    State(state): State<AppState<S>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> RestResult<Response>
where
    S: UserStore + Send + Sync,
{
    let missing = || RestError::BadRequest {
        message: "Username and password are required".to_string(),
    };
    let Form(form) = form.map_err(|_| missing())?;
    let (Some(username), Some(password)) = (present(form.username), present(form.password))
    else {
        return Err(missing());
    };

    let Some(user) = state.storage().find_user(&username).await? else {
        warn!(username = %username, "Login for unknown user");
        return Err(RestError::InvalidCredentials);
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        warn!(username = %username, "Login with wrong password");
        return Err(RestError::InvalidCredentials);
    }

    let token = Uuid::new_v4().to_string();
    let config = state.config();
    info!(user_id = user.id, "User logged in");

    Ok(redirect(
        "/dashboard",
        vec![
            session_cookie(&token, config),
            user_rif_cookie(&user.rif, config),
        ],
    ))
}

/// Handler for `GET /api/auth/logout`.
///
/// Expires the `session` cookie and redirects to `/login`.
pub async fn logout_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: Send + Sync,
{
    debug!("Processing logout");
    redirect("/login", vec![expired_session_cookie(state.config())])
}
