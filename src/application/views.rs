//! Read-only projections over resolved feed documents.
//!
//! Pure functions: the upstream tree is filtered and reordered, never
//! transformed or enriched.

use std::collections::HashSet;

use crate::domain::error::FeedError;
use crate::domain::feed::{self, FeedDocument};

use super::fetcher::AggregatedFeeds;

/// Sport descriptions for one language, in catalog order.
pub fn sport_descriptions(document: &FeedDocument) -> Vec<String> {
    feed::sports(document)
        .iter()
        .filter_map(|sport| feed::description(sport))
        .map(str::to_owned)
        .collect()
}

/// Language → sports listing for the all-languages view, in aggregation
/// order.
pub fn sports_by_language(feeds: &AggregatedFeeds) -> Vec<(String, Vec<String>)> {
    feeds
        .iter()
        .map(|(language, document)| (language.to_owned(), sport_descriptions(document)))
        .collect()
}

/// Events matching the `event` query: comma-separated tokens compared
/// case-insensitively against each event's description and exactly against
/// its stringified id. The parameter is required and is checked before any
/// flattening.
pub fn lookup_events(
    document: &FeedDocument,
    query: Option<&str>,
) -> Result<Vec<FeedDocument>, FeedError> {
    let Some(query) = query.filter(|value| !value.is_empty()) else {
        return Err(FeedError::EventParameterRequired);
    };

    let requested: HashSet<String> = query.to_lowercase().split(',').map(str::to_owned).collect();
    let mut selected: Vec<FeedDocument> = feed::all_events(document)
        .filter(|event| event_matches(event, &requested))
        .cloned()
        .collect();
    selected.sort_by_key(|event| feed::position(event));

    if selected.is_empty() {
        return Err(FeedError::NoEventsFound);
    }
    Ok(selected)
}

/// An empty token set selects every event.
fn event_matches(event: &FeedDocument, requested: &HashSet<String>) -> bool {
    requested.is_empty()
        || feed::description(event).is_some_and(|desc| requested.contains(&desc.to_lowercase()))
        || feed::id_token(event).is_some_and(|id| requested.contains(&id))
}

/// Events across the sports selected by the optional `sports` query.
///
/// Valid tokens are each sport's case-folded description and stringified id;
/// unknown tokens fail the whole request before any filtering. Without a
/// query every sport is selected.
pub fn events_for_sports(
    document: &FeedDocument,
    query: Option<&str>,
) -> Result<Vec<FeedDocument>, FeedError> {
    let requested: Vec<String> = match query {
        Some(value) => value.to_lowercase().split(',').map(str::to_owned).collect(),
        None => Vec::new(),
    };

    let catalog = feed::sports(document);
    let known: HashSet<String> = catalog
        .iter()
        .flat_map(|sport| {
            feed::description(sport)
                .map(str::to_lowercase)
                .into_iter()
                .chain(feed::id_token(sport))
        })
        .collect();

    let unknown: Vec<String> = requested
        .iter()
        .filter(|token| !known.contains(token.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(FeedError::UnknownSports { tokens: unknown });
    }

    let mut events: Vec<FeedDocument> = catalog
        .iter()
        .filter(|sport| requested.is_empty() || sport_matches(sport, &requested))
        .flat_map(|sport| feed::sport_events(sport))
        .cloned()
        .collect();
    events.sort_by_key(|event| feed::position(event));
    Ok(events)
}

fn sport_matches(sport: &FeedDocument, requested: &[String]) -> bool {
    feed::description(sport).is_some_and(|desc| requested.contains(&desc.to_lowercase()))
        || feed::id_token(sport).is_some_and(|id| requested.contains(&id))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn catalog() -> FeedDocument {
        json!({
            "result": {
                "sports": [
                    {
                        "id": 100,
                        "desc": "Football",
                        "pos": 1,
                        "comp": [
                            {
                                "id": 2001,
                                "desc": "Premier League",
                                "events": [
                                    { "id": 1, "desc": "A", "pos": 2 },
                                    { "id": 2, "desc": "B", "pos": 1 }
                                ]
                            }
                        ]
                    },
                    {
                        "id": 601600,
                        "desc": "Tennis",
                        "pos": 2,
                        "comp": [
                            {
                                "id": 2002,
                                "desc": "ATP Miami",
                                "events": [
                                    { "id": 3, "desc": "C v D", "pos": 3 }
                                ]
                            }
                        ]
                    }
                ]
            }
        })
    }

    fn ids(events: &[Value]) -> Vec<i64> {
        events
            .iter()
            .map(|event| event["id"].as_i64().expect("numeric id"))
            .collect()
    }

    #[test]
    fn sports_listing_preserves_source_order() {
        assert_eq!(
            sport_descriptions(&catalog()),
            vec!["Football".to_string(), "Tennis".to_string()]
        );
    }

    #[test]
    fn lookup_requires_the_event_parameter() {
        let document = catalog();
        assert!(matches!(
            lookup_events(&document, None),
            Err(FeedError::EventParameterRequired)
        ));
        assert!(matches!(
            lookup_events(&document, Some("")),
            Err(FeedError::EventParameterRequired)
        ));
    }

    #[test]
    fn lookup_matches_stringified_ids() {
        let events = lookup_events(&catalog(), Some("2")).expect("match");
        assert_eq!(ids(&events), vec![2]);
    }

    #[test]
    fn lookup_matches_descriptions_case_insensitively() {
        let events = lookup_events(&catalog(), Some("c V d")).expect("match");
        assert_eq!(ids(&events), vec![3]);
    }

    #[test]
    fn lookup_accepts_multiple_tokens_and_sorts_by_position() {
        let events = lookup_events(&catalog(), Some("a,b")).expect("match");
        assert_eq!(ids(&events), vec![2, 1]);
    }

    #[test]
    fn empty_token_set_selects_every_event() {
        let document = catalog();
        let selected = feed::all_events(&document)
            .filter(|event| event_matches(event, &HashSet::new()))
            .count();
        assert_eq!(selected, 3);
    }

    #[test]
    fn lookup_without_a_match_is_no_events_found() {
        assert!(matches!(
            lookup_events(&catalog(), Some("nothing")),
            Err(FeedError::NoEventsFound)
        ));
    }

    #[test]
    fn lookup_is_idempotent_over_the_same_document() {
        let document = catalog();
        let first = lookup_events(&document, Some("a,b,c v d")).expect("match");
        let second = lookup_events(&document, Some("a,b,c v d")).expect("match");
        assert_eq!(first, second);
        assert_eq!(ids(&first), vec![2, 1, 3]);
    }

    #[test]
    fn equal_positions_keep_document_order() {
        let document = json!({
            "result": {
                "sports": [{
                    "id": 100,
                    "desc": "Football",
                    "comp": [{
                        "events": [
                            { "id": 10, "desc": "first", "pos": 1 },
                            { "id": 11, "desc": "second", "pos": 1 },
                            { "id": 12, "desc": "third", "pos": 0 }
                        ]
                    }]
                }]
            }
        });
        let events = lookup_events(&document, Some("first,second,third")).expect("match");
        assert_eq!(ids(&events), vec![12, 10, 11]);
    }

    #[test]
    fn sport_filter_defaults_to_every_event() {
        let events = events_for_sports(&catalog(), None).expect("all events");
        assert_eq!(ids(&events), vec![2, 1, 3]);
    }

    #[test]
    fn sport_filter_selects_by_description_or_id() {
        let by_desc = events_for_sports(&catalog(), Some("tennis")).expect("tennis events");
        assert_eq!(ids(&by_desc), vec![3]);

        let by_id = events_for_sports(&catalog(), Some("100")).expect("football events");
        assert_eq!(ids(&by_id), vec![2, 1]);
    }

    #[test]
    fn unknown_sport_tokens_fail_listing_only_the_offenders() {
        let error = events_for_sports(&catalog(), Some("football,999")).unwrap_err();
        match error {
            FeedError::UnknownSports { tokens } => assert_eq!(tokens, vec!["999".to_string()]),
            other => panic!("expected unknown sports, got {other:?}"),
        }
    }

    #[test]
    fn empty_sports_query_yields_one_unknown_empty_token() {
        let error = events_for_sports(&catalog(), Some("")).unwrap_err();
        assert!(matches!(error, FeedError::UnknownSports { tokens } if tokens == vec![String::new()]));
    }

    #[test]
    fn sport_filter_without_matches_is_an_empty_success() {
        let document = json!({
            "result": {
                "sports": [{ "id": 100, "desc": "Football", "comp": [] }]
            }
        });
        let events = events_for_sports(&document, Some("football")).expect("empty");
        assert!(events.is_empty());
    }
}
