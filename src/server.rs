use cfg_if::cfg_if;

cfg_if! { if #[cfg(feature = "ssr")] {
    use crate::{
        cookies::{expired_session_cookie, parse_session_cookie, session_cookie},
        fileserv::file_and_error_handler,
        security::HashError,
        sessions::{MemorySessions, MemoryUser, SessionError},
    };
    use axum::{
        extract::{FromRef, State},
        http::{
            header::{CONTENT_TYPE, SET_COOKIE},
            HeaderMap, HeaderValue, StatusCode,
        },
        response::{IntoResponse, Response},
        routing::post,
        Form, Router,
    };
    use secrecy::SecretString;
    use serde::Deserialize;
    use std::{env, net::SocketAddr, sync::Arc};
    use thiserror::Error as ThisError;
    use tower_http::compression::CompressionLayer;
}}

#[cfg(feature = "ssr")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Dev,
    Prod,
}

#[cfg(feature = "ssr")]
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    #[error("{0} is not a valid socket address")]
    InvalidAddr(String),
    #[error("APP_ENV must be DEV or PROD, got {0}")]
    InvalidEnv(String),
    #[error("DEV_PASSWORD could not be hashed: {0}")]
    PasswordHash(#[from] HashError),
}

/// Settings for the development host, read from the environment (and a
/// `.env` file, if `main` found one).
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub site_addr: SocketAddr,
    pub site_root: String,
    pub env: Env,
    pub dev_user: Option<MemoryUser>,
}

#[cfg(feature = "ssr")]
impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let site_addr = lookup("SITE_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let site_addr = site_addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(site_addr))?;
        let env = match lookup("APP_ENV").as_deref() {
            None | Some("DEV") => Env::Dev,
            Some("PROD") => Env::Prod,
            Some(other) => return Err(ConfigError::InvalidEnv(other.to_string())),
        };
        let dev_user = match (lookup("DEV_IDENTITY"), lookup("DEV_PASSWORD")) {
            (Some(identity), Some(password)) => {
                Some(MemoryUser::new(identity, &SecretString::from(password))?)
            }
            _ => None,
        };
        Ok(Self {
            site_addr,
            site_root: lookup("SITE_ROOT").unwrap_or_else(|| "target/site".to_string()),
            env,
            dev_user,
        })
    }
}

#[cfg(feature = "ssr")]
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal Server Error")]
    InternalServerError,
}

#[cfg(feature = "ssr")]
impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "ssr")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), plain_text(), self.to_string()).into_response()
    }
}

#[cfg(feature = "ssr")]
impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::LoginFailed => AppError::Unauthorized,
            SessionError::TokenExhausted | SessionError::StoreUnavailable => {
                log::error!("{e}");
                AppError::InternalServerError
            }
        }
    }
}

#[cfg(feature = "ssr")]
#[derive(Clone, FromRef)]
pub struct AppState {
    pub sessions: MemorySessions,
    pub site_root: Arc<str>,
}

#[cfg(feature = "ssr")]
#[derive(Deserialize)]
pub struct LoginForm {
    identity: String,
    password: String,
}

#[cfg(feature = "ssr")]
fn plain_text() -> [(axum::http::HeaderName, HeaderValue); 1] {
    [(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    )]
}

#[cfg(feature = "ssr")]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/logout/all", post(logout_all))
        .fallback(file_and_error_handler)
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(feature = "ssr")]
async fn login(
    State(sessions): State<MemorySessions>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let (session_id, expires) =
        sessions.login(&form.identity, &SecretString::from(form.password))?;
    let cookie = session_cookie(&session_id, expires).map_err(|e| {
        log::error!("could not build session cookie: {e}");
        AppError::InternalServerError
    })?;
    log::trace!("user {} logged in", form.identity);
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        plain_text(),
        "Login Successful",
    )
        .into_response())
}

#[cfg(feature = "ssr")]
async fn logout(
    State(sessions): State<MemorySessions>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(session_id) = parse_session_cookie(&headers) else {
        // no cookie, the user may already be logged out
        log::trace!("logout without a session cookie");
        return Ok((StatusCode::OK, plain_text(), "").into_response());
    };
    sessions.logout(&session_id)?;
    log::trace!("user logged out");
    session_cleared()
}

/// Ends every session of the identity behind the cookie, on all devices.
#[cfg(feature = "ssr")]
async fn logout_all(
    State(sessions): State<MemorySessions>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(session_id) = parse_session_cookie(&headers) else {
        log::trace!("logout everywhere without a session cookie");
        return Ok((StatusCode::OK, plain_text(), "").into_response());
    };
    match sessions.identity(&session_id)? {
        Some(identity) => {
            let ended = sessions.logout_identity(&identity)?;
            log::trace!("ended {ended} sessions of {identity}");
        }
        // expired or unknown, still drop whatever the token names
        None => sessions.logout(&session_id)?,
    }
    session_cleared()
}

#[cfg(feature = "ssr")]
fn session_cleared() -> Result<Response, AppError> {
    let cookie = expired_session_cookie().map_err(|e| {
        log::error!("could not build expired session cookie: {e}");
        AppError::InternalServerError
    })?;
    Ok((StatusCode::OK, [(SET_COOKIE, cookie)], plain_text(), "").into_response())
}
