//! REST transport for the account backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the CSRF
//! token from the `csrftoken` cookie attached to every mutating request.
//! Server-side (SSR): stubs returning "signed out"/error since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-OK responses are classified into the `ApiError` taxonomy and logged
//! by status class; nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::net::error::ApiError;
use crate::net::types::{
    EmailChange, LoginCredentials, MarketingPreferences, PasswordChange, ProfileUpdate,
    RegisterForm, User,
};
use crate::session::core::UserDirectory;

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(path: &str) -> String {
    format!("/api{path}")
}

/// 401 and 403 on the identity fetch both mean "not signed in".
#[cfg(any(test, feature = "hydrate"))]
fn is_unauthenticated(status: u16) -> bool {
    matches!(status, 401 | 403)
}

#[cfg(feature = "hydrate")]
fn network_error(err: &gloo_net::Error) -> ApiError {
    log::error!("network or unexpected error: {err}");
    ApiError::Network(err.to_string())
}

#[cfg(feature = "hydrate")]
fn log_status_class(status: u16) {
    if status == 401 {
        log::error!("unauthorized (401)");
    } else if status == 403 {
        log::error!("forbidden (403)");
    } else if status == 429 {
        log::error!("rate limited (429)");
    } else if status >= 500 {
        log::error!("server error ({status})");
    }
}

#[cfg(feature = "hydrate")]
async fn error_from_response(resp: gloo_net::http::Response) -> ApiError {
    let status = resp.status();
    log_status_class(status);
    let body = resp.json::<serde_json::Value>().await.ok();
    ApiError::from_status_body(status, body)
}

/// Attach the CSRF header echoed back from the session cookie, if present.
#[cfg(feature = "hydrate")]
fn with_csrf(req: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match crate::util::cookie::csrf_token() {
        Some(token) => req.header("X-CSRFToken", &token),
        None => req,
    }
}

#[cfg(feature = "hydrate")]
async fn send_mutation<B: serde::Serialize>(
    builder: gloo_net::http::RequestBuilder,
    body: Option<&B>,
) -> Result<gloo_net::http::Response, ApiError> {
    let request = match body {
        Some(body) => with_csrf(builder)
            .json(body)
            .map_err(|e| network_error(&e))?,
        None => with_csrf(builder)
            .build()
            .map_err(|e| network_error(&e))?,
    };
    let resp = request.send().await.map_err(|e| network_error(&e))?;
    if resp.ok() {
        Ok(resp)
    } else {
        Err(error_from_response(resp).await)
    }
}

#[cfg(feature = "hydrate")]
async fn post_json<B: serde::Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    send_mutation(gloo_net::http::Request::post(&endpoint(path)), Some(body)).await?;
    Ok(())
}

#[cfg(feature = "hydrate")]
async fn post_empty(path: &str) -> Result<(), ApiError> {
    send_mutation::<()>(gloo_net::http::Request::post(&endpoint(path)), None).await?;
    Ok(())
}

/// The production [`UserDirectory`] speaking to the account backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpDirectory;

impl UserDirectory for HttpDirectory {
    /// Fetch the canonical user from `GET /api/auth/user/`.
    /// `Ok(None)` encodes the 401/403 "not signed in" outcome.
    async fn fetch_current_user(&self) -> Result<Option<User>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&endpoint("/auth/user/"))
                .send()
                .await
                .map_err(|e| network_error(&e))?;
            if resp.ok() {
                return resp
                    .json::<User>()
                    .await
                    .map(Some)
                    .map_err(|e| ApiError::Decode(e.to_string()));
            }
            if is_unauthenticated(resp.status()) {
                return Ok(None);
            }
            Err(error_from_response(resp).await)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json("/auth/login/", credentials).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(server_stub())
        }
    }

    async fn register(&self, form: &RegisterForm) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json("/auth/registration/", form).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = form;
            Err(server_stub())
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_empty("/auth/logout/").await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(server_stub())
        }
    }

    /// `PATCH /api/auth/profile/`; the response body is the updated record.
    async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = send_mutation(
                gloo_net::http::Request::patch(&endpoint("/auth/profile/")),
                Some(patch),
            )
            .await?;
            resp.json::<User>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = patch;
            Err(server_stub())
        }
    }

    async fn change_email(&self, change: &EmailChange) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            send_mutation(
                gloo_net::http::Request::patch(&endpoint("/auth/profile/")),
                Some(change),
            )
            .await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = change;
            Err(server_stub())
        }
    }

    async fn update_marketing_prefs(&self, prefs: &MarketingPreferences) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            send_mutation(
                gloo_net::http::Request::patch(&endpoint("/auth/profile/")),
                Some(prefs),
            )
            .await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = prefs;
            Err(server_stub())
        }
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json("/auth/password/change/", change).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = change;
            Err(server_stub())
        }
    }

    async fn reset_password(&self, email: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json("/auth/password/reset/", &serde_json::json!({ "email": email })).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(server_stub())
        }
    }

    async fn delete_account(&self, password: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json(
                "/auth/delete-account/",
                &serde_json::json!({ "password": password }),
            )
            .await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = password;
            Err(server_stub())
        }
    }

    async fn resend_verification_email(&self) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_empty("/auth/registration/resend-email/").await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(server_stub())
        }
    }

    async fn verify_email(&self, key: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json(
                "/auth/registration/verify-email/",
                &serde_json::json!({ "key": key }),
            )
            .await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(server_stub())
        }
    }
}

#[cfg(not(feature = "hydrate"))]
fn server_stub() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}
