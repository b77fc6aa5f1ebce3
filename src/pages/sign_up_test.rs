use super::*;

#[test]
fn optional_field_trims_and_drops_blank_input() {
    assert_eq!(optional_field("  Ada  "), Some("Ada".to_owned()));
    assert_eq!(optional_field("Ada"), Some("Ada".to_owned()));
    assert_eq!(optional_field(""), None);
    assert_eq!(optional_field("   "), None);
}
