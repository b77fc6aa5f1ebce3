//! The session core: sole authority for authentication-state transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and forms call these operations and re-render from the
//! [`SessionCache`]; nothing else writes the cache. The remote backend is
//! reached through the [`UserDirectory`] seam, with the production
//! implementation in `net::api` and fakes in tests.
//!
//! INVARIANT
//! =========
//! `Present` is only ever produced from a canonical fetch or a
//! server-returned record, never from client-submitted form data.

#[cfg(test)]
#[path = "core_test.rs"]
mod core_test;

use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::net::types::{
    EmailChange, LoginCredentials, MarketingPreferences, PasswordChange, ProfileUpdate,
    RegisterForm, User,
};
use crate::session::cache::SessionCache;
use crate::session::state::{FetchOutcome, PendingOp, UserSlot, resolve_fetch};

/// The remote user directory: fetch/login/register/logout and profile
/// mutations against the account backend.
///
/// `fetch_current_user` returns `Ok(None)` for 401/403, since "not signed
/// in" is a normal outcome of the identity fetch rather than an error.
// Browser event loop is single-threaded; futures here are deliberately !Send.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    async fn fetch_current_user(&self) -> Result<Option<User>, ApiError>;
    async fn login(&self, credentials: &LoginCredentials) -> Result<(), ApiError>;
    async fn register(&self, form: &RegisterForm) -> Result<(), ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError>;
    async fn change_email(&self, change: &EmailChange) -> Result<(), ApiError>;
    async fn update_marketing_prefs(&self, prefs: &MarketingPreferences) -> Result<(), ApiError>;
    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError>;
    async fn reset_password(&self, email: &str) -> Result<(), ApiError>;
    async fn delete_account(&self, password: &str) -> Result<(), ApiError>;
    async fn resend_verification_email(&self) -> Result<(), ApiError>;
    async fn verify_email(&self, key: &str) -> Result<(), ApiError>;
}

/// Orchestrates all [`UserSlot`] transitions over a [`UserDirectory`].
#[derive(Clone, Debug)]
pub struct SessionCore<D> {
    directory: D,
    cache: SessionCache,
    pending: ArcRwSignal<PendingOp>,
}

impl<D: UserDirectory> SessionCore<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            cache: SessionCache::new(),
            pending: ArcRwSignal::new(PendingOp::None),
        }
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// The credential-mutating operation currently in flight, if any.
    /// Reactive when read inside a tracking context; forms use it to
    /// disable submit controls.
    pub fn pending(&self) -> PendingOp {
        self.pending.get()
    }

    /// Initial resolution on application load.
    ///
    /// Without a session-cookie hint the fetch is skipped entirely (it
    /// could only 401) and the slot resolves to `Absent` immediately.
    pub async fn resolve_on_load(&self, session_hint: bool) {
        if !session_hint {
            self.cache.write(UserSlot::Absent);
            return;
        }
        self.refresh_user().await;
    }

    /// Re-derive the slot from the canonical record.
    ///
    /// At most one refetch is outstanding at a time: overlapping calls
    /// (e.g. two invalidations in quick succession) coalesce into the
    /// in-flight one. A failed fetch leaves the slot as it was and
    /// surfaces the error; there is no automatic retry.
    pub async fn refresh_user(&self) {
        if !self.cache.begin_refetch() {
            return;
        }
        let result = self.directory.fetch_current_user().await;
        self.cache.finish_refetch();
        match resolve_fetch(result) {
            FetchOutcome::Resolved(slot) => self.cache.write(slot),
            FetchOutcome::Failed(err) => self.cache.set_fetch_error(Some(err)),
        }
    }

    /// Mark the cached user stale and re-derive it from the backend.
    /// Used after mutations whose effect on the record is not locally known.
    pub async fn invalidate(&self) {
        self.refresh_user().await;
    }

    /// Authenticate with the backend.
    ///
    /// On transport success the session cookie now exists, so the canonical
    /// user is re-fetched unconditionally; the submitted credentials are
    /// never written into the cache. The caller decides what to do with the
    /// returned result (navigate, display validation errors, ...).
    ///
    /// # Errors
    ///
    /// Propagates the login failure verbatim; the slot is left untouched.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        self.pending.set(PendingOp::LoggingIn);
        let result = self.directory.login(credentials).await;
        if result.is_ok() {
            self.refresh_user().await;
        }
        self.pending.set(PendingOp::None);
        result
    }

    /// Create an account. Same contract shape as [`Self::login`]: transport
    /// success funnels into the canonical re-fetch.
    ///
    /// # Errors
    ///
    /// Propagates registration failure (typically field-level validation).
    pub async fn register(&self, form: &RegisterForm) -> Result<(), ApiError> {
        self.pending.set(PendingOp::Registering);
        let result = self.directory.register(form).await;
        if result.is_ok() {
            self.refresh_user().await;
        }
        self.pending.set(PendingOp::None);
        result
    }

    /// End the session, whether user-initiated or idle-triggered.
    ///
    /// On success `Absent` is written directly: "no session" is already
    /// fully known, no re-fetch needed. On failure the cache is left alone,
    /// since the server-side session may still be valid.
    ///
    /// # Errors
    ///
    /// Propagates the logout failure for the caller to display.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.pending.set(PendingOp::LoggingOut);
        let result = self.directory.logout().await;
        if result.is_ok() {
            self.cache.write(UserSlot::Absent);
        }
        self.pending.set(PendingOp::None);
        result
    }

    /// Apply a profile edit. The response body carries the full updated
    /// record, which is written straight into the cache without a re-fetch.
    ///
    /// # Errors
    ///
    /// Propagates the mutation failure; the cache is left untouched.
    pub async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError> {
        let user = self.directory.update_profile(patch).await?;
        self.cache.write(UserSlot::Present(user.clone()));
        Ok(user)
    }

    /// Change the account email. The server may reset derived fields
    /// (verification flags), so the cache is invalidated and re-fetched
    /// instead of trusting the local payload.
    ///
    /// # Errors
    ///
    /// Propagates the mutation failure without touching the cache.
    pub async fn change_email(&self, change: &EmailChange) -> Result<(), ApiError> {
        self.directory.change_email(change).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Toggle marketing preferences; re-fetches like an email change.
    ///
    /// # Errors
    ///
    /// Propagates the mutation failure without touching the cache.
    pub async fn update_marketing_prefs(
        &self,
        prefs: &MarketingPreferences,
    ) -> Result<(), ApiError> {
        self.directory.update_marketing_prefs(prefs).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Change the account password. No cache effect.
    ///
    /// # Errors
    ///
    /// Propagates the mutation failure (e.g. wrong old password).
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.directory.change_password(change).await
    }

    /// Request a password-reset email for an account. No cache effect.
    ///
    /// # Errors
    ///
    /// Propagates the request failure.
    pub async fn reset_password(&self, email: &str) -> Result<(), ApiError> {
        self.directory.reset_password(email).await
    }

    /// Permanently delete the account. Success implies the session is gone,
    /// so `Absent` is written directly.
    ///
    /// # Errors
    ///
    /// Propagates the failure (e.g. wrong confirmation password).
    pub async fn delete_account(&self, password: &str) -> Result<(), ApiError> {
        self.directory.delete_account(password).await?;
        self.cache.write(UserSlot::Absent);
        Ok(())
    }

    /// Re-send the address-verification email. No cache effect.
    ///
    /// # Errors
    ///
    /// Propagates the request failure.
    pub async fn resend_verification_email(&self) -> Result<(), ApiError> {
        self.directory.resend_verification_email().await
    }

    /// Confirm an address-verification key from an email link. No cache
    /// effect; verification flags show up on the next fetch.
    ///
    /// # Errors
    ///
    /// Propagates the failure (expired or invalid key).
    pub async fn verify_email(&self, key: &str) -> Result<(), ApiError> {
        self.directory.verify_email(key).await
    }
}
