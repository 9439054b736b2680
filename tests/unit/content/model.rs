use super::*;

#[test]
fn records_pass_through_unchanged() {
    let json = r#"[
        {"label":"Founded","value":"1842","detail":"in Lyon"},
        {"title":"Archive","description":"Letters and maps","icon":"scroll"},
        {"label":"Volumes","value":"12"}
    ]"#;
    let records = parse_records(json).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].heading(), "Founded");
    assert_eq!(records[1].heading(), "Archive");
    assert_eq!(
        records[2],
        DisplayRecord::Metric {
            label: "Volumes".to_string(),
            value: "12".to_string(),
            detail: None,
        }
    );

    let again = serde_json::to_string(&records).unwrap();
    assert_eq!(parse_records(&again).unwrap(), records);
}

#[test]
fn malformed_records_are_serde_errors() {
    let err = parse_records(r#"[{"label":"x"}]"#).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"), "{err}");
}
