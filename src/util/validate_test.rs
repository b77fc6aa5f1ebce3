use super::*;

fn valid_form() -> RegisterForm {
    RegisterForm {
        email: "ada@example.com".to_owned(),
        password1: "Secret123".to_owned(),
        password2: "Secret123".to_owned(),
        date_of_birth: "1990-06-15".to_owned(),
        accepted_terms: true,
        accepted_privacy_policy: true,
        ..RegisterForm::default()
    }
}

const TODAY: &str = "2026-08-30";

// =============================================================
// Email format
// =============================================================

#[test]
fn email_format_accepts_plain_addresses() {
    assert!(email_format_ok("ada@example.com"));
    assert!(email_format_ok("a.b+tag@sub.example.co"));
}

#[test]
fn email_format_rejects_malformed_addresses() {
    assert!(!email_format_ok(""));
    assert!(!email_format_ok("ada"));
    assert!(!email_format_ok("ada@"));
    assert!(!email_format_ok("@example.com"));
    assert!(!email_format_ok("ada@example"));
    assert!(!email_format_ok("ada@.com"));
    assert!(!email_format_ok("ada@example."));
}

// =============================================================
// Password strength
// =============================================================

#[test]
fn strong_password_passes() {
    assert!(password_strength_errors("Secret123").is_empty());
}

#[test]
fn weak_passwords_report_each_missing_rule() {
    assert_eq!(password_strength_errors("Sh0rt").len(), 1);
    assert!(
        password_strength_errors("alllowercase1")
            .iter()
            .any(|e| e.contains("uppercase"))
    );
    assert!(
        password_strength_errors("ALLUPPERCASE1")
            .iter()
            .any(|e| e.contains("lowercase"))
    );
    assert!(
        password_strength_errors("NoDigitsHere")
            .iter()
            .any(|e| e.contains("number"))
    );
    assert_eq!(password_strength_errors("").len(), 4);
}

// =============================================================
// Sign-in schema
// =============================================================

#[test]
fn sign_in_valid_input_has_no_errors() {
    assert!(validate_sign_in("ada@example.com", "pw").is_empty());
}

#[test]
fn sign_in_reports_bad_email_and_missing_password() {
    let errors = validate_sign_in("nope", "");
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&"Invalid email address".to_owned()));
    assert!(errors.contains(&"Password is required".to_owned()));
}

// =============================================================
// Sign-up schema
// =============================================================

#[test]
fn sign_up_valid_form_has_no_errors() {
    assert!(validate_sign_up(&valid_form(), TODAY).is_empty());
}

#[test]
fn sign_up_requires_matching_passwords() {
    let mut form = valid_form();
    form.password2 = "Different1".to_owned();
    assert!(
        validate_sign_up(&form, TODAY).contains(&"Passwords do not match".to_owned())
    );
    form.password2 = String::new();
    assert!(
        validate_sign_up(&form, TODAY).contains(&"Please confirm your password".to_owned())
    );
}

#[test]
fn sign_up_requires_acknowledgements() {
    let mut form = valid_form();
    form.accepted_terms = false;
    form.accepted_privacy_policy = false;
    let errors = validate_sign_up(&form, TODAY);
    assert!(errors.contains(&"You must accept the terms and conditions".to_owned()));
    assert!(errors.contains(&"You must accept the privacy policy".to_owned()));
}

#[test]
fn sign_up_enforces_the_age_gate() {
    let mut form = valid_form();
    form.date_of_birth = "2010-01-01".to_owned();
    assert!(
        validate_sign_up(&form, TODAY)
            .contains(&"You must be at least 18 years old to register".to_owned())
    );
    form.date_of_birth = String::new();
    assert!(
        validate_sign_up(&form, TODAY).contains(&"Date of birth is required".to_owned())
    );
}

// =============================================================
// Age gate
// =============================================================

#[test]
fn adult_on_the_exact_birthday() {
    assert!(is_at_least_adult("2008-08-30", "2026-08-30"));
    assert!(!is_at_least_adult("2008-08-31", "2026-08-30"));
}

#[test]
fn age_accounts_for_month_and_day() {
    assert!(is_at_least_adult("2008-01-01", "2026-08-30"));
    assert!(!is_at_least_adult("2008-12-31", "2026-08-30"));
}

#[test]
fn malformed_dates_fail_closed() {
    assert!(!is_at_least_adult("not-a-date", TODAY));
    assert!(!is_at_least_adult("1990-13-01", TODAY));
    assert!(!is_at_least_adult("1990-06-15", "garbage"));
}

// =============================================================
// Settings schemas
// =============================================================

#[test]
fn password_change_requires_old_and_strong_new() {
    assert!(validate_password_change("OldPw123", "Secret123", "Secret123").is_empty());
    let errors = validate_password_change("", "weak", "weak");
    assert!(errors.contains(&"Current password is required".to_owned()));
    assert!(!errors.is_empty());
    assert!(
        validate_password_change("OldPw123", "Secret123", "Secret124")
            .contains(&"Passwords do not match".to_owned())
    );
}

#[test]
fn email_change_requires_address_and_password() {
    assert!(validate_email_change("new@example.com", "Secret123").is_empty());
    let errors = validate_email_change("nope", "");
    assert_eq!(errors.len(), 2);
}
