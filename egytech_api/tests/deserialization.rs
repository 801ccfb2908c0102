use egytech_api::types::{
    ParticipantsResponse, ParticipantsResult, StatsResponse, StatsResult,
};
use serde_json::json;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_participants_full() {
    let json = load_fixture("participants.json");
    let resp: ParticipantsResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.results.len(), 3);

    let result = ParticipantsResult::from(resp);
    let ds = result.dataset();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.columns()[0], "title");
    // only the last record carries is_relocated, so it is the last column
    assert_eq!(ds.columns().last().unwrap(), "is_relocated");
    let relocated = ds.column("is_relocated").unwrap();
    assert!(relocated[0].is_null());
    assert_eq!(relocated[2], &json!(true));
    let comp = ds.column("compensation").unwrap();
    assert_eq!(comp, [&json!(55000), &json!(30000), &json!(140000)]);
}

#[test]
fn deserialize_participants_empty() {
    let json = load_fixture("participants_empty.json");
    let resp: ParticipantsResponse = serde_json::from_str(&json).unwrap();
    let result = ParticipantsResult::from(resp);
    assert!(result.dataset().is_empty());
}

#[test]
fn deserialize_stats() {
    let json = load_fixture("stats.json");
    let resp: StatsResponse = serde_json::from_str(&json).unwrap();
    let result = StatsResult::from(resp);

    let summary = result.summary();
    assert_eq!(summary.total_count, "200");
    assert_eq!(summary.median, "26000");
    assert_eq!(summary.p20_compensation, "15000");
    assert_eq!(summary.p75_compensation, "35000");
    assert_eq!(summary.p90_compensation, "52000");

    let buckets = result.buckets();
    assert_eq!(buckets.len(), 5);
    assert_eq!(buckets.columns(), ["bucket", "count"]);
}

#[test]
fn deserialize_stats_numeric_metrics() {
    let json = load_fixture("stats_numeric.json");
    let resp: StatsResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.stats.total_count, "0");
    assert!(resp.buckets.is_empty());
}

#[test]
fn stats_summary_as_record_uses_api_names() {
    let json = load_fixture("stats.json");
    let resp: StatsResponse = serde_json::from_str(&json).unwrap();
    let record = resp.stats.to_record();
    let keys: Vec<&String> = record.keys().collect();
    assert_eq!(
        keys,
        ["totalCount", "median", "p20Compensation", "p75Compensation", "p90Compensation"]
    );
    assert_eq!(record["median"], json!("26000"));
}

#[test]
fn deserialize_missing_results_returns_error() {
    let result = serde_json::from_str::<ParticipantsResponse>(r#"{"data": []}"#);
    assert!(result.is_err());
}

#[test]
fn deserialize_missing_stats_returns_error() {
    let result = serde_json::from_str::<StatsResponse>(r#"{"buckets": []}"#);
    assert!(result.is_err());
}

#[test]
fn deserialize_stats_rejects_non_scalar_metric() {
    let body = r#"{"buckets": [], "stats": {"totalCount": [1], "median": "1",
        "p20Compensation": "1", "p75Compensation": "1", "p90Compensation": "1"}}"#;
    assert!(serde_json::from_str::<StatsResponse>(body).is_err());
}
