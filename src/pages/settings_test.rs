use super::*;

// ==================================================================== //
// Tab selection                                                        //
// ==================================================================== //

#[test]
fn profile_tab_is_the_default() {
    assert_eq!(SettingsTab::default(), SettingsTab::Profile);
}

#[test]
fn tab_labels_are_distinct() {
    let labels: Vec<_> = TABS.into_iter().map(SettingsTab::label).collect();
    assert_eq!(labels, ["Profile", "Security", "Advanced"]);
}

// ==================================================================== //
// Profile patch construction                                           //
// ==================================================================== //

#[test]
fn patch_trims_inputs() {
    let patch = profile_patch("  Ada ", " Lovelace", " 555-0100 ");
    assert_eq!(patch.first_name.as_deref(), Some("Ada"));
    assert_eq!(patch.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(patch.phone_number.as_deref(), Some("555-0100"));
}

#[test]
fn patch_omits_blank_fields() {
    let patch = profile_patch("Ada", "", "   ");
    assert_eq!(patch.first_name.as_deref(), Some("Ada"));
    assert!(patch.last_name.is_none());
    assert!(patch.phone_number.is_none());
    // Serialized body carries only the provided field.
    let body = serde_json::to_value(&patch).unwrap();
    assert_eq!(body, serde_json::json!({"first_name": "Ada"}));
}
