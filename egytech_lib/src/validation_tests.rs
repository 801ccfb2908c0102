use super::*;
use egytech_api::types::{BusinessFocus, Level, Title};
use egytech_api::{ParticipantsQuery, StatsQuery};
use serde_json::json;

// -- Normalisation --

#[test]
fn normalize_case_and_separators() {
    assert_eq!(normalize("  Data Engineer "), "data_engineer");
    assert_eq!(normalize("software-house"), "software_house");
    assert_eq!(normalize("B2B"), "b2b");
}

// -- Enum choices --

#[test]
fn choice_accepts_loose_spelling() {
    assert_eq!(parse_choice::<Title>("Data-Scientist").unwrap(), Title::DataScientist);
    assert_eq!(parse_choice::<Level>("MID LEVEL").unwrap(), Level::MidLevel);
    assert_eq!(
        parse_choice::<BusinessFocus>("software house").unwrap(),
        BusinessFocus::SoftwareHouse
    );
}

#[test]
fn choice_invalid_lists_values() {
    let err = parse_choice::<Level>("senoir").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("senoir"));
    assert!(msg.contains("senior_staff"));
}

#[test]
fn gender_shorthand() {
    assert_eq!(validate_gender("F").unwrap(), Gender::Female);
    assert_eq!(validate_gender("male").unwrap(), Gender::Male);
    assert!(validate_gender("x").is_err());
}

#[test]
fn language_aliases() {
    assert_eq!(validate_language("JavaScript").unwrap(), ProgrammingLanguage::JavaScript);
    assert_eq!(validate_language("c++").unwrap(), ProgrammingLanguage::CPlusPlus);
    assert_eq!(validate_language("C#").unwrap(), ProgrammingLanguage::CSharp);
    assert_eq!(validate_language("rust").unwrap(), ProgrammingLanguage::Rust);
    assert_eq!(validate_language("c_cplusplus").unwrap(), ProgrammingLanguage::CPlusPlus);
    assert!(validate_language("cobol").is_err());
}

// -- Flags --

#[test]
fn flag_values() {
    assert!(parse_flag("yes").unwrap());
    assert!(parse_flag("Y").unwrap());
    assert!(!parse_flag("false").unwrap());
    assert!(!parse_flag("no").unwrap());
    assert!(parse_flag("maybe").is_err());
}

// -- Query specs --

#[test]
fn spec_types_values() {
    let map = parse_query_spec("title=Backend, min_yoe=2, include-relocated=true, cs_degree=yes")
        .unwrap();
    assert_eq!(map["title"], json!("backend"));
    assert_eq!(map["min_yoe"], json!(2));
    assert_eq!(map["include_relocated"], json!(true));
    assert_eq!(map["cs_degree"], json!("yes"));

    let query = ParticipantsQuery::from_map(&map).unwrap();
    assert_eq!(query.title(), Some(Title::Backend));
    assert_eq!(query.cs_degree(), Some(true));
}

#[test]
fn spec_negative_number_stays_numeric() {
    let map = parse_query_spec("min_yoe=-1, max_yoe= 4 ").unwrap();
    assert_eq!(map["min_yoe"], json!(-1));
    assert_eq!(map["max_yoe"], json!(4));

    let err = ParticipantsQuery::from_map(&map).unwrap_err();
    assert!(matches!(
        err,
        egytech_api::ValidationError::OutOfRange { field: "min_yoe", value: -1, .. }
    ));
}

#[test]
fn spec_empty_is_empty_query() {
    let map = parse_query_spec("").unwrap();
    assert!(map.is_empty());
    assert!(ParticipantsQuery::from_map(&map).unwrap().is_empty());
}

#[test]
fn spec_unknown_key_reaches_model() {
    let map = parse_query_spec("programming_language=python").unwrap();
    assert!(ParticipantsQuery::from_map(&map).is_err());
    assert!(StatsQuery::from_map(&map).is_ok());
}

#[test]
fn spec_malformed() {
    assert!(parse_query_spec("title").is_err());
    assert!(parse_query_spec("=backend").is_err());
    assert!(parse_query_spec("title=backend,title=mobile").is_err());
    assert!(parse_query_spec(&"a=b,".repeat(200)).is_err());
}

// -- Query files --

#[test]
fn query_list_parses_objects() {
    let list = parse_query_list(r#"[{"title": "backend"}, {"level": "senior", "min_yoe": 3}]"#)
        .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1]["min_yoe"], json!(3));
}

#[test]
fn query_list_rejects_non_objects() {
    assert!(parse_query_list(r#"{"title": "backend"}"#).is_err());
    assert!(parse_query_list(r#"[{"title": "backend"}, "oops"]"#).is_err());
    assert!(parse_query_list("not json").is_err());
}
