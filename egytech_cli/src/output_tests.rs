use super::*;
use egytech_lib::types::Record;
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    value.as_object().unwrap().clone()
}

fn load_participants_fixture() -> Dataset {
    let json_str = include_str!("../../egytech_api/tests/fixtures/participants.json");
    let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
    let records = resp["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| record(r.clone()));
    Dataset::from_records(records)
}

fn buckets() -> Dataset {
    Dataset::from_records(vec![
        record(json!({"bucket": "0-10K", "count": 12})),
        record(json!({"bucket": "10K-20K", "count": 40})),
    ])
}

// -- Table output --

#[test]
fn test_table_has_header_and_rows() {
    let rendered = render_table(&buckets());
    assert!(rendered.contains("bucket"));
    assert!(rendered.contains("count"));
    assert!(rendered.contains("10K-20K"));
    assert!(rendered.contains("40"));
}

#[test]
fn test_table_fills_missing_cells() {
    let ds = load_participants_fixture();
    let rendered = render_table(&ds);
    assert!(rendered.contains("is_relocated"));
    // every data line has the same number of cells as the header
    let widths: Vec<usize> = rendered
        .lines()
        .filter(|l| l.starts_with('|'))
        .map(|l| l.matches('|').count())
        .collect();
    assert_eq!(widths.len(), ds.len() + 1);
    assert!(widths.iter().all(|w| *w == ds.columns().len() + 1));
}

// -- Markdown output --

#[test]
fn test_markdown_layout() {
    let rendered = render_markdown(&buckets());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("| bucket"));
    assert!(lines[1].starts_with("|-"));
    assert!(lines[2].contains("0-10K"));
}

// -- Stats summary --

#[test]
fn test_summary_lines_in_api_order() {
    let summary: StatsSummary = serde_json::from_value(json!({
        "totalCount": "200",
        "median": "26000",
        "p20Compensation": "15000",
        "p75Compensation": "35000",
        "p90Compensation": "52000"
    }))
    .unwrap();
    let rendered = render_summary(&summary);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "totalCount       200");
    assert_eq!(lines[1], "median           26000");
    assert_eq!(lines[4], "p90Compensation  52000");
}
