use super::*;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::executor::block_on;

fn sample_user() -> User {
    serde_json::from_str(r#"{"id": 9, "email": "kim@example.com"}"#).unwrap()
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        detail: String::new(),
    }
}

/// Yields to the executor exactly once, so two futures driven with `join`
/// can genuinely overlap at the network-call boundary.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[derive(Default)]
struct FakeInner {
    fetch_results: RefCell<VecDeque<Result<Option<User>, ApiError>>>,
    fetch_calls: Cell<usize>,
    fetch_yields: Cell<bool>,
    login_error: RefCell<Option<ApiError>>,
    logout_error: RefCell<Option<ApiError>>,
    logout_calls: Cell<usize>,
    profile_error: RefCell<Option<ApiError>>,
    email_change_calls: Cell<usize>,
    prefs_calls: Cell<usize>,
}

/// Scriptable in-memory stand-in for the remote user directory.
#[derive(Clone, Default)]
struct FakeDirectory(Rc<FakeInner>);

impl FakeDirectory {
    fn push_fetch(&self, result: Result<Option<User>, ApiError>) {
        self.0.fetch_results.borrow_mut().push_back(result);
    }

    fn fetch_calls(&self) -> usize {
        self.0.fetch_calls.get()
    }

    fn yield_on_fetch(&self) {
        self.0.fetch_yields.set(true);
    }

    fn fail_login(&self, err: ApiError) {
        *self.0.login_error.borrow_mut() = Some(err);
    }

    fn fail_logout(&self, err: ApiError) {
        *self.0.logout_error.borrow_mut() = Some(err);
    }

    fn fail_profile(&self, err: ApiError) {
        *self.0.profile_error.borrow_mut() = Some(err);
    }
}

impl UserDirectory for FakeDirectory {
    async fn fetch_current_user(&self) -> Result<Option<User>, ApiError> {
        if self.0.fetch_yields.get() {
            YieldOnce(false).await;
        }
        self.0.fetch_calls.set(self.0.fetch_calls.get() + 1);
        self.0
            .fetch_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn login(&self, _credentials: &LoginCredentials) -> Result<(), ApiError> {
        match self.0.login_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn register(&self, _form: &RegisterForm) -> Result<(), ApiError> {
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.0.logout_calls.set(self.0.logout_calls.get() + 1);
        match self.0.logout_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError> {
        if let Some(err) = self.0.profile_error.borrow_mut().take() {
            return Err(err);
        }
        let mut user = sample_user();
        user.first_name.clone_from(&patch.first_name);
        Ok(user)
    }

    async fn change_email(&self, _change: &EmailChange) -> Result<(), ApiError> {
        self.0.email_change_calls.set(self.0.email_change_calls.get() + 1);
        Ok(())
    }

    async fn update_marketing_prefs(&self, _prefs: &MarketingPreferences) -> Result<(), ApiError> {
        self.0.prefs_calls.set(self.0.prefs_calls.get() + 1);
        Ok(())
    }

    async fn change_password(&self, _change: &PasswordChange) -> Result<(), ApiError> {
        Ok(())
    }

    async fn reset_password(&self, _email: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_account(&self, _password: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn resend_verification_email(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn verify_email(&self, _key: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

fn core_with(dir: &FakeDirectory) -> SessionCore<FakeDirectory> {
    SessionCore::new(dir.clone())
}

fn credentials() -> LoginCredentials {
    LoginCredentials {
        email: "kim@example.com".to_owned(),
        password: "Secret123".to_owned(),
    }
}

// =============================================================
// Initial resolution
// =============================================================

#[test]
fn no_cookie_hint_skips_fetch_and_resolves_absent() {
    let dir = FakeDirectory::default();
    let core = core_with(&dir);
    block_on(core.resolve_on_load(false));
    assert_eq!(dir.fetch_calls(), 0);
    assert_eq!(core.cache().read(), UserSlot::Absent);
}

#[test]
fn cookie_hint_and_successful_fetch_resolves_present() {
    let dir = FakeDirectory::default();
    dir.push_fetch(Ok(Some(sample_user())));
    let core = core_with(&dir);
    block_on(core.resolve_on_load(true));
    assert_eq!(dir.fetch_calls(), 1);
    assert_eq!(core.cache().read(), UserSlot::Present(sample_user()));
    assert_eq!(core.cache().fetch_error(), None);
}

#[test]
fn unauthorized_fetch_resolves_absent_without_error() {
    let dir = FakeDirectory::default();
    dir.push_fetch(Ok(None));
    let core = core_with(&dir);
    block_on(core.resolve_on_load(true));
    assert_eq!(core.cache().read(), UserSlot::Absent);
    assert_eq!(core.cache().fetch_error(), None);
}

#[test]
fn server_error_keeps_unknown_surfaces_error_no_retry() {
    let dir = FakeDirectory::default();
    dir.push_fetch(Err(server_error()));
    let core = core_with(&dir);
    block_on(core.resolve_on_load(true));
    assert_eq!(dir.fetch_calls(), 1);
    assert_eq!(core.cache().read(), UserSlot::Unknown);
    assert_eq!(core.cache().fetch_error(), Some(server_error()));
}

// =============================================================
// Login / register
// =============================================================

#[test]
fn successful_login_triggers_exactly_one_refetch() {
    let dir = FakeDirectory::default();
    dir.push_fetch(Ok(Some(sample_user())));
    let core = core_with(&dir);
    let result = block_on(core.login(&credentials()));
    assert!(result.is_ok());
    assert_eq!(dir.fetch_calls(), 1);
    assert!(core.cache().read().is_present());
    assert_eq!(core.pending(), PendingOp::None);
}

#[test]
fn failed_login_does_not_fetch_or_touch_cache() {
    let dir = FakeDirectory::default();
    dir.fail_login(ApiError::Status {
        status: 401,
        detail: "Invalid credentials.".to_owned(),
    });
    let core = core_with(&dir);
    let result = block_on(core.login(&credentials()));
    assert!(result.is_err());
    assert_eq!(dir.fetch_calls(), 0);
    assert_eq!(core.cache().read(), UserSlot::Unknown);
    assert_eq!(core.pending(), PendingOp::None);
}

#[test]
fn registration_funnels_into_the_same_refetch_path() {
    let dir = FakeDirectory::default();
    dir.push_fetch(Ok(Some(sample_user())));
    let core = core_with(&dir);
    let result = block_on(core.register(&RegisterForm::default()));
    assert!(result.is_ok());
    assert_eq!(dir.fetch_calls(), 1);
    assert!(core.cache().read().is_present());
}

#[test]
fn login_refetch_returning_unauthorized_lands_absent() {
    // Degenerate but possible: login succeeded yet the follow-up fetch 401s.
    let dir = FakeDirectory::default();
    dir.push_fetch(Ok(None));
    let core = core_with(&dir);
    assert!(block_on(core.login(&credentials())).is_ok());
    assert_eq!(core.cache().read(), UserSlot::Absent);
}

// =============================================================
// Logout
// =============================================================

#[test]
fn successful_logout_writes_absent_with_no_fetch() {
    let dir = FakeDirectory::default();
    let core = core_with(&dir);
    core.cache().write(UserSlot::Present(sample_user()));
    let result = block_on(core.logout());
    assert!(result.is_ok());
    assert_eq!(core.cache().read(), UserSlot::Absent);
    assert_eq!(dir.fetch_calls(), 0);
}

#[test]
fn failed_logout_preserves_present_state() {
    let dir = FakeDirectory::default();
    dir.fail_logout(server_error());
    let core = core_with(&dir);
    core.cache().write(UserSlot::Present(sample_user()));
    let result = block_on(core.logout());
    assert!(result.is_err());
    assert!(core.cache().read().is_present());
}

// =============================================================
// Profile mutation propagation
// =============================================================

#[test]
fn profile_update_writes_returned_record_without_refetch() {
    let dir = FakeDirectory::default();
    let core = core_with(&dir);
    core.cache().write(UserSlot::Present(sample_user()));
    let patch = ProfileUpdate {
        first_name: Some("Grace".to_owned()),
        ..ProfileUpdate::default()
    };
    let updated = block_on(core.update_profile(&patch)).unwrap();
    assert_eq!(updated.first_name.as_deref(), Some("Grace"));
    assert_eq!(core.cache().read(), UserSlot::Present(updated));
    assert_eq!(dir.fetch_calls(), 0);
}

#[test]
fn failed_profile_update_leaves_cache_untouched() {
    let dir = FakeDirectory::default();
    dir.fail_profile(server_error());
    let core = core_with(&dir);
    core.cache().write(UserSlot::Present(sample_user()));
    assert!(block_on(core.update_profile(&ProfileUpdate::default())).is_err());
    assert_eq!(core.cache().read(), UserSlot::Present(sample_user()));
}

#[test]
fn email_change_invalidates_and_refetches() {
    let dir = FakeDirectory::default();
    let mut refreshed = sample_user();
    refreshed.email = "new@example.com".to_owned();
    refreshed.email_verified = false;
    dir.push_fetch(Ok(Some(refreshed.clone())));
    let core = core_with(&dir);
    core.cache().write(UserSlot::Present(sample_user()));
    let change = EmailChange {
        email: "new@example.com".to_owned(),
        current_password: "Secret123".to_owned(),
    };
    assert!(block_on(core.change_email(&change)).is_ok());
    assert_eq!(dir.0.email_change_calls.get(), 1);
    assert_eq!(dir.fetch_calls(), 1);
    assert_eq!(core.cache().read(), UserSlot::Present(refreshed));
}

#[test]
fn marketing_prefs_update_refetches() {
    let dir = FakeDirectory::default();
    dir.push_fetch(Ok(Some(sample_user())));
    let core = core_with(&dir);
    let prefs = MarketingPreferences {
        marketing_emails: false,
    };
    assert!(block_on(core.update_marketing_prefs(&prefs)).is_ok());
    assert_eq!(dir.0.prefs_calls.get(), 1);
    assert_eq!(dir.fetch_calls(), 1);
}

#[test]
fn delete_account_writes_absent() {
    let dir = FakeDirectory::default();
    let core = core_with(&dir);
    core.cache().write(UserSlot::Present(sample_user()));
    assert!(block_on(core.delete_account("Secret123")).is_ok());
    assert_eq!(core.cache().read(), UserSlot::Absent);
}

// =============================================================
// Refetch deduplication
// =============================================================

#[test]
fn overlapping_invalidations_coalesce_into_one_fetch() {
    let dir = FakeDirectory::default();
    dir.yield_on_fetch();
    dir.push_fetch(Ok(Some(sample_user())));
    let core = core_with(&dir);
    // Both invalidations overlap at the suspended network call; the second
    // must observe the in-flight refetch and back off.
    block_on(futures::future::join(core.invalidate(), core.invalidate()));
    assert_eq!(dir.fetch_calls(), 1);
    assert!(core.cache().read().is_present());
    assert!(!core.cache().is_refetching());
}

#[test]
fn sequential_invalidations_each_fetch() {
    let dir = FakeDirectory::default();
    dir.push_fetch(Ok(Some(sample_user())));
    dir.push_fetch(Ok(None));
    let core = core_with(&dir);
    block_on(core.invalidate());
    block_on(core.invalidate());
    assert_eq!(dir.fetch_calls(), 2);
    assert_eq!(core.cache().read(), UserSlot::Absent);
}
