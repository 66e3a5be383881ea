//! Narrow accessors over the opaque upstream feed document.
//!
//! The document is passed through to clients unchanged; only the handful of
//! fields the derived views read (`sports`, `comp`, `events`, `desc`, `id`,
//! `pos`) get typed access here. Nothing in this module mutates the tree.

use serde_json::Value;

/// One language's feed as returned by the upstream provider.
pub type FeedDocument = Value;

const EMPTY: &[Value] = &[];

fn array_field<'a>(node: &'a Value, key: &str) -> &'a [Value] {
    node.get(key)
        .and_then(Value::as_array)
        .map_or(EMPTY, Vec::as_slice)
}

/// The sports catalog. The provider wraps it in a `result` envelope; a bare
/// `{"sports": [...]}` document is honored too.
pub fn sports(document: &FeedDocument) -> &[Value] {
    let body = document.get("result").unwrap_or(document);
    array_field(body, "sports")
}

pub fn competitions(sport: &Value) -> &[Value] {
    array_field(sport, "comp")
}

pub fn events(competition: &Value) -> &[Value] {
    array_field(competition, "events")
}

/// Every event under one sport, in document order.
pub fn sport_events(sport: &Value) -> impl Iterator<Item = &Value> {
    competitions(sport)
        .iter()
        .flat_map(|competition| events(competition).iter())
}

/// Every event under every sport and competition, in document order.
pub fn all_events(document: &FeedDocument) -> impl Iterator<Item = &Value> {
    sports(document).iter().flat_map(sport_events)
}

pub fn description(node: &Value) -> Option<&str> {
    node.get("desc").and_then(Value::as_str)
}

/// The `id` field rendered the way lookup keys compare it: numbers print
/// their decimal form, strings pass through.
pub fn id_token(node: &Value) -> Option<String> {
    match node.get("id") {
        Some(Value::Number(id)) => Some(id.to_string()),
        Some(Value::String(id)) => Some(id.clone()),
        _ => None,
    }
}

/// Display position; events without one sort last.
pub fn position(event: &Value) -> i64 {
    event.get("pos").and_then(Value::as_i64).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sports_honors_the_result_envelope() {
        let enveloped = json!({ "status": 200, "result": { "sports": [{ "id": 100 }] } });
        assert_eq!(sports(&enveloped).len(), 1);

        let bare = json!({ "sports": [{ "id": 100 }, { "id": 601600 }] });
        assert_eq!(sports(&bare).len(), 2);
    }

    #[test]
    fn missing_collections_read_as_empty() {
        assert!(sports(&json!({})).is_empty());
        assert!(sports(&Value::Null).is_empty());
        assert!(competitions(&json!({ "desc": "Football" })).is_empty());
        assert!(events(&json!({ "comp": [] })).is_empty());
        assert!(sports(&json!({ "result": { "sports": "oops" } })).is_empty());
    }

    #[test]
    fn all_events_flattens_in_document_order() {
        let document = json!({
            "result": {
                "sports": [
                    { "comp": [ { "events": [{ "id": 1 }, { "id": 2 }] }, { "events": [{ "id": 3 }] } ] },
                    { "comp": [ { "events": [{ "id": 4 }] } ] }
                ]
            }
        });
        let ids: Vec<String> = all_events(&document).filter_map(id_token).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn id_token_stringifies_numbers_and_passes_strings() {
        assert_eq!(id_token(&json!({ "id": 1889014500i64 })), Some("1889014500".to_string()));
        assert_eq!(id_token(&json!({ "id": "abc" })), Some("abc".to_string()));
        assert_eq!(id_token(&json!({ "desc": "no id" })), None);
    }

    #[test]
    fn events_without_a_position_sort_last() {
        assert_eq!(position(&json!({ "pos": 7 })), 7);
        assert_eq!(position(&json!({})), i64::MAX);
    }
}
