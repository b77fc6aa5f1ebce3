use super::*;

fn full_user_json() -> &'static str {
    r#"{
        "id": 42,
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "phone_number": "+44123456",
        "phone_verified": true,
        "email_verified": true,
        "identity_verified": false,
        "marketing_emails": true,
        "accepted_terms": true,
        "accepted_privacy_policy": true
    }"#
}

// =============================================================
// User deserialization
// =============================================================

#[test]
fn user_deserializes_full_record() {
    let user: User = serde_json::from_str(full_user_json()).unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert!(user.phone_verified);
    assert!(user.email_verified);
    assert!(!user.identity_verified);
}

#[test]
fn user_optional_fields_absent_means_none() {
    let user: User = serde_json::from_str(r#"{"id": 1, "email": "a@b.com"}"#).unwrap();
    assert_eq!(user.first_name, None);
    assert_eq!(user.last_name, None);
    assert_eq!(user.phone_number, None);
    assert!(!user.email_verified);
    assert!(!user.marketing_emails);
}

#[test]
fn user_ignores_unknown_server_fields() {
    let json = r#"{"id": 1, "email": "a@b.com", "loyalty_tier": "gold"}"#;
    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.id, 1);
}

#[test]
fn user_display_name_prefers_first_name() {
    let mut user: User = serde_json::from_str(full_user_json()).unwrap();
    assert_eq!(user.display_name(), "Ada");
    user.first_name = None;
    assert_eq!(user.display_name(), "ada");
    user.first_name = Some(String::new());
    assert_eq!(user.display_name(), "ada");
}

// =============================================================
// PATCH body shape
// =============================================================

#[test]
fn profile_update_omits_unset_fields() {
    let patch = ProfileUpdate {
        first_name: Some("Grace".to_owned()),
        ..ProfileUpdate::default()
    };
    let body = serde_json::to_value(&patch).unwrap();
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(obj["first_name"], "Grace");
}

#[test]
fn profile_update_empty_patch_is_empty_object() {
    let body = serde_json::to_value(ProfileUpdate::default()).unwrap();
    assert_eq!(body, serde_json::json!({}));
}

#[test]
fn register_form_omits_unset_optionals_but_keeps_required() {
    let form = RegisterForm {
        email: "ada@example.com".to_owned(),
        password1: "Secret123".to_owned(),
        password2: "Secret123".to_owned(),
        date_of_birth: "1990-01-01".to_owned(),
        accepted_terms: true,
        accepted_privacy_policy: true,
        ..RegisterForm::default()
    };
    let body = serde_json::to_value(&form).unwrap();
    let obj = body.as_object().unwrap();
    assert!(obj.contains_key("email"));
    assert!(obj.contains_key("password1"));
    assert!(obj.contains_key("password2"));
    assert!(obj.contains_key("date_of_birth"));
    assert!(obj.contains_key("accepted_terms"));
    assert!(!obj.contains_key("first_name"));
    assert!(!obj.contains_key("marketing_emails"));
}

#[test]
fn email_change_serializes_both_fields() {
    let change = EmailChange {
        email: "new@example.com".to_owned(),
        current_password: "Secret123".to_owned(),
    };
    let body = serde_json::to_value(&change).unwrap();
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["current_password"], "Secret123");
}
