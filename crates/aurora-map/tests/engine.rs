//! End-to-end mapping scenarios across the engine, session state, and
//! validation layers.

use aurora_map::{
    ConfidenceLevel, MappingState, auto_map, default_mapping, suggest_mapping, validate_mapping,
};
use aurora_model::{ColumnSchema, ColumnType};

fn crm_schema() -> Vec<ColumnSchema> {
    let mut schema = vec![
        ColumnSchema::new("name", ColumnType::Text),
        ColumnSchema::new("email", ColumnType::Email),
        ColumnSchema::new("phone", ColumnType::Phone),
        ColumnSchema::new("created_date", ColumnType::Date),
    ];
    schema[0].is_required = true;
    schema[1].is_required = true;
    schema
}

fn file_columns() -> Vec<String> {
    ["Name", "E-Mail", "Phone Number", "created date", "internal_ref"]
        .iter()
        .map(|c| (*c).to_string())
        .collect()
}

#[test]
fn crm_import_maps_the_obvious_columns() {
    let outcome = auto_map(&file_columns(), &crm_schema());

    let find = |source: &str| {
        outcome
            .mappings
            .iter()
            .find(|m| m.source_column == source)
            .unwrap_or_else(|| panic!("no mapping for {source}"))
    };

    assert_eq!(find("Name").target_column, "name");
    assert_eq!(find("Name").confidence, Some(1.0));
    assert_eq!(find("E-Mail").target_column, "email");
    assert_eq!(find("E-Mail").confidence, Some(0.9));
    assert_eq!(find("created date").target_column, "created_date");
    assert_eq!(find("created date").confidence, Some(0.9));

    assert!(outcome.unmapped_source.contains(&"internal_ref".to_string()));
}

#[test]
fn mappings_come_back_in_source_order() {
    let outcome = auto_map(&file_columns(), &crm_schema());
    let sources: Vec<&str> = outcome
        .mappings
        .iter()
        .map(|m| m.source_column.as_str())
        .collect();
    let positions: Vec<usize> = sources
        .iter()
        .map(|s| {
            file_columns()
                .iter()
                .position(|c| c == s)
                .expect("mapping source must come from the input")
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn session_flow_from_auto_map_to_valid_import() {
    let mut state = MappingState::new(file_columns(), crm_schema());
    state.auto_map();

    // The fuzzy pass leaves "Phone Number" unmatched; assign it by hand.
    assert!(state.unmapped_source().contains(&"Phone Number".to_string()));
    state.set_mapping("Phone Number", "phone");

    assert_eq!(state.mapped_count(), 4);
    assert_eq!(state.progress_label(), "4/5");
    assert!((state.progress() - 80.0).abs() < 1e-9);

    let report = validate_mapping(state.mappings(), &crm_schema());
    assert!(report.is_valid());
    // "internal_ref" has no mapping entry at all, so the only review
    // items are confidence-related, if any.
    for warning in &report.warnings {
        assert!(!warning.contains("internal_ref"));
    }
}

#[test]
fn duplicate_manual_assignment_is_caught_at_validation() {
    let mut state = MappingState::new(file_columns(), crm_schema());
    state.set_mapping("Name", "email");
    state.set_mapping("E-Mail", "email");

    // The session itself accepts the duplicate.
    assert_eq!(state.mappings().len(), 2);

    let report = validate_mapping(state.mappings(), &crm_schema());
    assert!(!report.is_valid());
    assert!(report.errors.iter().any(|e| e.contains("multiple sources")));
    assert!(report.errors.iter().any(|e| e.contains("\"name\"")));
}

#[test]
fn manual_overrides_read_as_manual_confidence() {
    let mut state = MappingState::new(file_columns(), crm_schema());
    state.auto_map();
    state.set_mapping("internal_ref", "phone");

    let manual = state
        .mappings()
        .iter()
        .find(|m| m.source_column == "internal_ref")
        .expect("manual mapping present");
    assert_eq!(ConfidenceLevel::of(manual), ConfidenceLevel::Manual);
}

#[test]
fn suggestion_pass_is_more_permissive_than_auto_map() {
    let sources = vec!["cust_email_addr".to_string()];
    let schema = crm_schema();

    // Plain similarity cannot clear 0.6 for this pair, the boosted
    // score can because "email" is a substring of the normalized key.
    let strict = auto_map(&sources, &schema);
    assert!(strict.mappings.is_empty());

    let loose = suggest_mapping(&sources, &schema, 0.6);
    assert_eq!(loose[0].target_column, "email");
}

#[test]
fn default_patterns_cover_a_typical_export() {
    let sources: Vec<String> = ["Customer Name", "contact_mail", "signup_date", "misc"]
        .iter()
        .map(|c| (*c).to_string())
        .collect();
    let schema = vec![
        ColumnSchema::new("name", ColumnType::Text),
        ColumnSchema::new("email", ColumnType::Email),
        ColumnSchema::new("date", ColumnType::Date),
    ];

    let got = default_mapping(&sources, &schema);
    assert_eq!(got[0].target_column, "name");
    assert_eq!(got[1].target_column, "email");
    assert_eq!(got[2].target_column, "date");
    assert_eq!(got[3].target_column, "");
}
