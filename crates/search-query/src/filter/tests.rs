//! Tests for filter compilation.

use serde_json::json;

use super::*;

const FULL_QUERY: &str = r#"(water) AND (owner: me OR owner: you) AND (created: [1609459200000 TO 1612137600000]) AND (modified: [1609459200000 TO 1612137600000]) AND (-title: "a title" AND -title: "b title") AND (typekeywords: "a type keyword") AND (tags: "tag 1" OR tags: "tag 2" OR tags: "tag 3") AND (type: "Feature Layer" OR type: "Table" OR type: "CSV") AND (access: private) AND (culture: en OR culture: de) AND (categories: "category one" AND categories: "category 2" AND categories: "category three") AND (-type: "code attachment")"#;

fn full_filter_json() -> serde_json::Value {
    json!({
        "terms": "water",
        "owner": ["me", "you"],
        "created": { "from": 1609459200000_i64, "to": 1612137600000_i64 },
        "modified": { "from": 1609459200000_i64, "to": 1612137600000_i64 },
        "title": { "bool": "NOT", "value": ["a title", "b title"] },
        "typekeywords": "a type keyword",
        "tags": ["tag 1", "tag 2", "tag 3"],
        "type": { "value": ["Feature Layer", "Table", "CSV"] },
        "access": "private",
        "culture": ["en", "de"],
        "categories": {
            "value": ["category one", "category 2", "category three"],
            "bool": "AND"
        }
    })
}

// ==================== Full Filters ====================

#[test]
fn test_compile_full_filter_from_json() {
    let filter = ContentFilter::from_json(&full_filter_json());
    assert_eq!(filter.to_query(), FULL_QUERY);
}

#[test]
fn test_compile_full_filter_from_builder() {
    let filter = ContentFilter::new()
        .with(
            "categories",
            FilterValue::grouped(BoolOp::And, ["category one", "category 2", "category three"]),
        )
        .with("culture", FilterValue::list(["en", "de"]))
        .with("access", FilterValue::scalar("private"))
        .with("type", FilterValue::grouped(BoolOp::Or, ["Feature Layer", "Table", "CSV"]))
        .with("tags", FilterValue::list(["tag 1", "tag 2", "tag 3"]))
        .with("typekeywords", FilterValue::scalar("a type keyword"))
        .with("title", FilterValue::grouped(BoolOp::Not, ["a title", "b title"]))
        .with("modified", FilterValue::range(Some(1609459200000), Some(1612137600000)))
        .with("created", FilterValue::range(Some(1609459200000), Some(1612137600000)))
        .with("owner", FilterValue::list(["me", "you"]))
        .with("terms", FilterValue::scalar("water"));

    // Insertion order is reversed; output order follows the field table.
    assert_eq!(filter.to_query(), FULL_QUERY);
}

#[test]
fn test_compile_negations_and_tokens() {
    let filter = ContentFilter::from_json(&json!({
        "terms": "water",
        "owner": { "bool": "NOT", "value": ["me", "you"] },
        "created": { "from": 1577836800000_i64, "to": 1580515200000_i64 },
        "modified": { "from": 1580515200000_i64, "to": 1583020800000_i64 },
        "title": ["title 1", "title 2", "title 3"],
        "typekeywords": "a type keyword",
        "tags": { "value": ["tag 1", "tag 2", "tag 3"], "bool": "AND" },
        "type": "Feature Layer",
        "access": ["private", "org"],
        "culture": "en",
        "categories": { "value": ["category one", "category 2", "category three"] },
        "orgid": ["org one", "org two"],
        "id": { "value": ["1", "2", "3"], "bool": "NOT" }
    }));

    assert_eq!(
        filter.to_query(),
        r#"(water) AND (-owner: me AND -owner: you) AND (created: [1577836800000 TO 1580515200000]) AND (modified: [1580515200000 TO 1583020800000]) AND (title: "title 1" OR title: "title 2" OR title: "title 3") AND (typekeywords: "a type keyword") AND (tags: "tag 1" AND tags: "tag 2" AND tags: "tag 3") AND (type: "Feature Layer") AND (access: private OR access: org) AND (culture: en) AND (categories: "category one" OR categories: "category 2" OR categories: "category three") AND (orgid: org one OR orgid: org two) AND (-id: 1 AND -id: 2 AND -id: 3) AND (-type: "code attachment")"#
    );
}

#[test]
fn test_compile_scenario_terms_owner_type() {
    let filter = ContentFilter::from_json(&json!({
        "terms": "water",
        "owner": ["me", "you"],
        "type": { "value": ["Feature Layer"] }
    }));

    assert_eq!(
        filter.to_query(),
        r#"(water) AND (owner: me OR owner: you) AND (type: "Feature Layer") AND (-type: "code attachment")"#
    );
}

// ==================== Partial Ranges ====================

#[test]
fn test_compile_partial_ranges() {
    let filter = ContentFilter::from_json(&json!({
        "created": { "from": 1609459200000_i64 },
        "modified": { "to": 1612137600000_i64 }
    }));

    let q = filter.to_query();
    assert!(q.contains("created: [1609459200000 TO"));
    assert!(q.contains("modified: [0 TO 1612137600000]"));
}

#[test]
fn test_compile_ignores_unrepresentable_bounds() {
    let filter = ContentFilter::from_json(&json!({
        "created": { "from": 1e300 },
        "modified": { "from": 1.5, "to": u64::MAX }
    }));
    assert_eq!(filter.to_query(), r#"(-type: "code attachment")"#);

    let filter = ContentFilter::from_json(&json!({
        "created": { "from": 1e300, "to": 1612137600000_i64 }
    }));
    assert_eq!(
        filter.to_query(),
        r#"(created: [0 TO 1612137600000]) AND (-type: "code attachment")"#
    );
}

// ==================== Empty and Malformed Values ====================

#[test]
fn test_compile_skips_empty_and_malformed_values() {
    let filter = ContentFilter::from_json(&json!({
        "terms": "water",
        "owner": [],
        "created": { "from": 1609459200000_i64, "to": 1612137600000_i64 },
        "modified": { "from": 1609459200000_i64, "to": 1612137600000_i64 },
        "title": { "bool": "NOT", "value": [] },
        "typekeywords": "",
        "tags": ["tag 1", "tag 2", "tag 3"],
        "type": { "value": null },
        "access": "",
        "culture": [],
        "categories": null
    }));

    assert_eq!(
        filter.to_query(),
        r#"(water) AND (created: [1609459200000 TO 1612137600000]) AND (modified: [1609459200000 TO 1612137600000]) AND (tags: "tag 1" OR tags: "tag 2" OR tags: "tag 3") AND (-type: "code attachment")"#
    );
}

#[test]
fn test_compile_empty_filter() {
    assert_eq!(ContentFilter::new().to_query(), EXCLUSION_CLAUSE);
    assert_eq!(ContentFilter::from_json(&json!({})).to_query(), EXCLUSION_CLAUSE);
}

#[test]
fn test_compile_non_object_filter() {
    assert_eq!(ContentFilter::from_json(&json!(null)).to_query(), EXCLUSION_CLAUSE);
    assert_eq!(ContentFilter::from_json(&json!("water")).to_query(), EXCLUSION_CLAUSE);
    assert_eq!(ContentFilter::from_json(&json!([1, 2])).to_query(), EXCLUSION_CLAUSE);
}

#[test]
fn test_compile_ignores_unknown_fields() {
    let filter = ContentFilter::from_json(&json!({
        "color": ["red"],
        "Owner": "me",
        "culture": "en"
    }));
    assert_eq!(
        filter.to_query(),
        r#"(culture: en) AND (-type: "code attachment")"#
    );
}

// ==================== Invariants ====================

#[test]
fn test_query_always_ends_with_exclusion() {
    let filters = [
        json!({}),
        full_filter_json(),
        json!({ "id": { "bool": "NOT", "value": ["x"] } }),
        json!({ "created": { "to": 1 } }),
        json!({ "unknown": "field" }),
    ];

    for value in &filters {
        let q = ContentFilter::from_json(value).to_query();
        assert!(q.ends_with(EXCLUSION_CLAUSE), "query did not end with exclusion: {q}");
        assert_eq!(q.matches(EXCLUSION_CLAUSE).count(), 1);
    }
}

#[test]
fn test_compile_is_deterministic() {
    let a: ContentFilter = serde_json::from_str(r#"{"owner": ["me"], "terms": "water"}"#).unwrap();
    let b: ContentFilter = serde_json::from_str(r#"{"terms": "water", "owner": ["me"]}"#).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_query(), b.to_query());
}

#[test]
fn test_deserialize_rejects_only_invalid_json() {
    assert!(serde_json::from_str::<ContentFilter>("{not json").is_err());
    let filter: ContentFilter = serde_json::from_str("42").unwrap();
    assert!(filter.is_empty());
}

#[test]
fn test_filter_from_iterator() {
    let filter: ContentFilter = [
        ("access", FilterValue::scalar("public")),
        ("terms", FilterValue::scalar("parks")),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        filter.to_query(),
        r#"(parks) AND (access: public) AND (-type: "code attachment")"#
    );
}
