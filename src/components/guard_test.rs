use super::*;

fn sample_user() -> crate::net::types::User {
    serde_json::from_str(r#"{"id": 1, "email": "a@b.com"}"#).unwrap()
}

#[test]
fn unknown_slot_neither_redirects() {
    // Still resolving; pages show the spinner instead of bouncing.
    assert!(!needs_sign_in(&UserSlot::Unknown));
    assert!(!already_signed_in(&UserSlot::Unknown));
}

#[test]
fn absent_slot_sends_visitors_to_sign_in() {
    assert!(needs_sign_in(&UserSlot::Absent));
    assert!(!already_signed_in(&UserSlot::Absent));
}

#[test]
fn present_slot_sends_auth_pages_to_dashboard() {
    let slot = UserSlot::Present(sample_user());
    assert!(!needs_sign_in(&slot));
    assert!(already_signed_in(&slot));
}
