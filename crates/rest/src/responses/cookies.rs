//! `Set-Cookie` values for the login session.
//!
//! Both cookies are `HttpOnly` with `Path=/`; `Secure` follows
//! [`ServerConfig::secure_cookies`](crate::config::ServerConfig::secure_cookies).

use url::form_urlencoded;

use crate::config::ServerConfig;
use crate::extractors::{SESSION_COOKIE, USER_RIF_COOKIE};

fn build(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name,
        encode_value(value),
        max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Form-encodes the value so `;`, `,` and spaces cannot end the cookie early.
fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// The `session` cookie carrying a fresh token.
pub fn session_cookie(token: &str, config: &ServerConfig) -> String {
    build(SESSION_COOKIE, token, config.session_max_age, config.secure_cookies)
}

/// The `user_rif` cookie for the logged-in account.
pub fn user_rif_cookie(rif: &str, config: &ServerConfig) -> String {
    build(USER_RIF_COOKIE, rif, config.session_max_age, config.secure_cookies)
}

/// Expires the `session` cookie.
pub fn expired_session_cookie(config: &ServerConfig) -> String {
    let mut cookie = build(SESSION_COOKIE, "", 0, config.secure_cookies);
    cookie.push_str("; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
    cookie
}
