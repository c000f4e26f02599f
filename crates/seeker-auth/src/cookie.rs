//! Cookie transport for token pairs.
//!
//! Each half of a [`TokenPair`] lives in its own `HttpOnly` cookie under a
//! fixed name. Both cookies share the refresh lifetime; access token
//! validity is governed by its `exp` claim, not by the cookie.
use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponseBuilder;
use actix_web::cookie::Cookie;
use actix_web::cookie::SameSite;
use actix_web::cookie::time::Duration;
use seeker_core::ACCESS_TOKEN_COOKIE;
use seeker_core::REFRESH_TOKEN_COOKIE;

fn private(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(
            seeker_core::REFRESH_TOKEN_DURATION.as_secs() as i64,
        ))
        .finish()
}

/// Both cookies for a freshly issued pair.
pub fn bake(tokens: &TokenPair, secure: bool) -> [Cookie<'static>; 2] {
    [
        private(ACCESS_TOKEN_COOKIE, tokens.access().to_string(), secure),
        private(REFRESH_TOKEN_COOKIE, tokens.refresh().to_string(), secure),
    ]
}

/// Expires both cookies on the client.
pub fn clear(mut builder: HttpResponseBuilder, secure: bool) -> HttpResponseBuilder {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = private(name, String::new(), secure);
        cookie.make_removal();
        builder.cookie(cookie);
    }
    builder
}

/// Reads the pair back from a request. Either cookie missing or empty
/// means no credential was presented.
pub fn read(req: &HttpRequest) -> Option<TokenPair> {
    let access = req.cookie(ACCESS_TOKEN_COOKIE)?;
    let refresh = req.cookie(REFRESH_TOKEN_COOKIE)?;
    TokenPair::new(access.value().to_string(), refresh.value().to_string())
}
