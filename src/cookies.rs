use cfg_if::cfg_if;

cfg_if! { if #[cfg(feature = "ssr")] {
    use crate::defs::SESSION_COOKIE;
    use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
    use chrono::prelude::*;
    use http::header::InvalidHeaderValue;
}}

#[cfg(feature = "ssr")]
const SESSION_COOKIE_ATTRIBUTES: &str = "Secure; SameSite=Lax; HttpOnly; Path=/";

#[cfg(feature = "ssr")]
fn set_session_cookie(
    value: &str,
    expires: DateTime<Utc>,
    max_age: Option<i64>,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let expires = expires.format("%a, %d %b %Y %H:%M:%S GMT");
    let max_age = max_age
        .map(|secs| format!("Max-Age={secs}; "))
        .unwrap_or_default();
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={value}; Expires={expires}; {max_age}{SESSION_COOKIE_ATTRIBUTES}"
    ))
}

/// `Set-Cookie` value handing the client a new session.
#[cfg(feature = "ssr")]
pub fn session_cookie(
    session_id: &str,
    expires: DateTime<Utc>,
) -> Result<HeaderValue, InvalidHeaderValue> {
    set_session_cookie(session_id, expires, None)
}

/// `Set-Cookie` value telling the client to forget its session.
#[cfg(feature = "ssr")]
pub fn expired_session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    set_session_cookie("deleted", DateTime::UNIX_EPOCH, Some(0))
}

/// Session id carried by the request, looked up across every `Cookie` header.
#[cfg(feature = "ssr")]
pub fn parse_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|line| line.to_str().ok())
        .flat_map(|line| line.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
