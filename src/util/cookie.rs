//! Cookie inspection: session hints and the CSRF token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session cookies themselves are HttpOnly and owned by the backend;
//! the client only inspects the inspectable ones. An `auth` or `refresh`
//! cookie signals "a session might exist" and gates the initial fetch so a
//! guaranteed-401 round trip is skipped. `csrftoken` is echoed back on
//! mutating requests as the `X-CSRFToken` header.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Cookie names whose presence suggests an authenticated session.
const SESSION_COOKIES: [&str; 2] = ["auth", "refresh"];

#[cfg(feature = "hydrate")]
const CSRF_COOKIE: &str = "csrftoken";

/// Extract a cookie value from a `document.cookie` string.
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then_some(value)
    })
}

/// Whether the cookie string carries an `auth` or `refresh` cookie.
pub fn has_session_hint(cookies: &str) -> bool {
    SESSION_COOKIES
        .iter()
        .any(|name| cookie_value(cookies, name).is_some())
}

#[cfg(feature = "hydrate")]
fn document_cookies() -> Option<String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    let html_document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    html_document.cookie().ok()
}

/// Whether the browser currently holds a session-hinting cookie.
/// Always `false` outside the browser.
pub fn browser_has_session_hint() -> bool {
    #[cfg(feature = "hydrate")]
    {
        document_cookies().is_some_and(|cookies| has_session_hint(&cookies))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// The CSRF token from the browser's `csrftoken` cookie, if set.
pub fn csrf_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        document_cookies().and_then(|cookies| cookie_value(&cookies, CSRF_COOKIE).map(str::to_owned))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
