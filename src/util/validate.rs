//! Client-side validation schemas for the account forms.
//!
//! DESIGN
//! ======
//! Pure functions returning message lists, shared by the sign-in, sign-up
//! and settings forms. The server re-validates everything; these exist so
//! obviously-bad submissions never leave the browser. Messages mirror the
//! backend's wording where the forms display both side by side.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::types::RegisterForm;

pub const MIN_PASSWORD_LEN: usize = 8;

const ADULT_AGE_YEARS: i32 = 18;

/// Loose structural email check: non-empty local part and a dotted domain.
pub fn email_format_ok(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Password strength rules for new passwords: length, upper, lower, digit.
pub fn password_strength_errors(password: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("Password must be at least 8 characters long".to_owned());
    }
    if !password.chars().any(char::is_uppercase) {
        errors.push("Password must contain at least one uppercase letter".to_owned());
    }
    if !password.chars().any(char::is_lowercase) {
        errors.push("Password must contain at least one lowercase letter".to_owned());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_owned());
    }
    errors
}

/// Sign-in schema: well-formed email and a non-empty password.
pub fn validate_sign_in(email: &str, password: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if !email_format_ok(email) {
        errors.push("Invalid email address".to_owned());
    }
    if password.is_empty() {
        errors.push("Password is required".to_owned());
    }
    errors
}

/// Sign-up schema: email, password strength + confirmation, age gate, and
/// the terms/privacy acknowledgements.
pub fn validate_sign_up(form: &RegisterForm, today: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if !email_format_ok(&form.email) {
        errors.push("Invalid email address".to_owned());
    }
    errors.extend(password_strength_errors(&form.password1));
    if form.password2.is_empty() {
        errors.push("Please confirm your password".to_owned());
    } else if form.password1 != form.password2 {
        errors.push("Passwords do not match".to_owned());
    }
    if form.date_of_birth.is_empty() {
        errors.push("Date of birth is required".to_owned());
    } else if !is_at_least_adult(&form.date_of_birth, today) {
        errors.push("You must be at least 18 years old to register".to_owned());
    }
    if !form.accepted_terms {
        errors.push("You must accept the terms and conditions".to_owned());
    }
    if !form.accepted_privacy_policy {
        errors.push("You must accept the privacy policy".to_owned());
    }
    errors
}

/// Password-change schema: old password present, new password strong and
/// confirmed.
pub fn validate_password_change(old: &str, new1: &str, new2: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if old.is_empty() {
        errors.push("Current password is required".to_owned());
    }
    errors.extend(password_strength_errors(new1));
    if new2.is_empty() {
        errors.push("Please confirm your password".to_owned());
    } else if new1 != new2 {
        errors.push("Passwords do not match".to_owned());
    }
    errors
}

/// Email-change schema: new address well-formed, current password present.
pub fn validate_email_change(email: &str, current_password: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if !email_format_ok(email) {
        errors.push("Invalid email address".to_owned());
    }
    if current_password.is_empty() {
        errors.push("Current password is required".to_owned());
    }
    errors
}

fn parse_iso_date(value: &str) -> Option<(i32, u32, u32)> {
    let mut parts = value.splitn(3, '-');
    let year = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some((year, month, day))
}

/// Age gate: at least 18 years between `date_of_birth` and `today`, both
/// ISO 8601 dates. Malformed input fails closed.
pub fn is_at_least_adult(date_of_birth: &str, today: &str) -> bool {
    let Some((by, bm, bd)) = parse_iso_date(date_of_birth) else {
        return false;
    };
    let Some((ty, tm, td)) = parse_iso_date(today) else {
        return false;
    };
    let mut age = ty - by;
    if (tm, td) < (bm, bd) {
        age -= 1;
    }
    age >= ADULT_AGE_YEARS
}

/// Today's date as an ISO 8601 string, from the browser clock.
pub fn today_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        #[allow(clippy::cast_possible_wrap)]
        let year = now.get_full_year() as i32;
        format!("{year:04}-{:02}-{:02}", now.get_month() + 1, now.get_date())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        "1970-01-01".to_owned()
    }
}
