use super::*;

#[test]
fn status_label_reflects_email_verification() {
    assert_eq!(account_status_label(true), "Verified");
    assert_eq!(account_status_label(false), "Verification Pending");
}
