/**
 * Session Cookies
 *
 * Builders for the `accessToken` and `refreshToken` cookies and their
 * removal twins. Both cookies are httpOnly with path `/`; max-age follows
 * the token lifetime. The `secure` flag is left to the fronting proxy.
 */

use axum_extra::extract::cookie::{Cookie, SameSite};

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

fn session_cookie(name: &'static str, value: String, max_age_secs: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(max_age_secs));
    cookie
}

pub fn access_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    session_cookie(ACCESS_COOKIE, token, max_age_secs)
}

pub fn refresh_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    session_cookie(REFRESH_COOKIE, token, max_age_secs)
}

/// Cookie used with `CookieJar::remove`; path must match the original for
/// the removal to take effect in the browser.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}
