//! Assembly of the search request handed to the execution layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{CourierConfig, MergedState};

/// Request body and routing produced from a merged state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Index to search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    /// Document type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<Value>,
    /// Document identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Request body.
    #[serde(default)]
    pub body: Map<String, Value>,
}

impl SearchRequest {
    /// Build the request for `state`.
    ///
    /// Filters are folded into the query: with any filters present the body
    /// query becomes a `bool` query whose `must` clause holds the merged
    /// query (or `match_all`) and whose `filter` clause holds every filter in
    /// chain order. Without filters a missing query defaults to `match_all`.
    ///
    /// `config.default_size` fills `size` only when no source set it, and
    /// `config.track_total_hits` is copied into the body when enabled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use courier::{CourierConfig, MergedState, PropertyName, SearchRequest};
    /// use serde_json::json;
    ///
    /// let mut state = MergedState::new();
    /// state.merge_property(PropertyName::Query, json!({"match": {"msg": "error"}}));
    /// state.merge_property(PropertyName::Filter, json!({"term": {"env": "prod"}}));
    ///
    /// let request = SearchRequest::from_state(state, &CourierConfig::default());
    /// assert_eq!(
    ///     request.body["query"],
    ///     json!({"bool": {
    ///         "must": [{"match": {"msg": "error"}}],
    ///         "filter": [{"term": {"env": "prod"}}]
    ///     }})
    /// );
    /// ```
    #[must_use]
    pub fn from_state(state: MergedState, config: &CourierConfig) -> Self {
        let (identity, filters, mut body) = state.into_parts();

        let query = body
            .remove("query")
            .unwrap_or_else(|| json!({"match_all": {}}));
        let folded = if filters.is_empty() {
            query
        } else {
            json!({"bool": {"must": [query], "filter": filters}})
        };
        body.insert("query".to_owned(), folded);

        if let Some(size) = config.default_size {
            body.entry("size").or_insert_with(|| Value::from(size));
        }
        if config.track_total_hits {
            body.insert("track_total_hits".to_owned(), Value::Bool(true));
        }

        Self {
            index: identity.index,
            type_name: identity.type_name,
            id: identity.id,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::SearchRequest;
    use crate::{CourierConfig, MergedState, PropertyName};

    #[rstest]
    fn empty_state_matches_everything() {
        let request = SearchRequest::from_state(MergedState::new(), &CourierConfig::default());
        assert_eq!(request.body.len(), 1);
        assert_eq!(request.body.get("query"), Some(&json!({"match_all": {}})));
        assert!(request.index.is_none());
    }

    #[rstest]
    fn filters_wrap_match_all_when_no_query_is_set() {
        let mut state = MergedState::new();
        state.merge_property(PropertyName::Filter, json!({"term": {"a": 1}}));
        state.merge_property(PropertyName::Filter, json!({"term": {"b": 2}}));
        let request = SearchRequest::from_state(state, &CourierConfig::default());
        assert_eq!(
            request.body.get("query"),
            Some(&json!({"bool": {
                "must": [{"match_all": {}}],
                "filter": [{"term": {"a": 1}}, {"term": {"b": 2}}]
            }}))
        );
    }

    #[rstest]
    #[case(None, Some(json!(25)))]
    #[case(Some(5), Some(json!(5)))]
    fn default_size_only_fills_a_missing_size(
        #[case] explicit: Option<u64>,
        #[case] expected: Option<serde_json::Value>,
    ) {
        let mut state = MergedState::new();
        if let Some(size) = explicit {
            state.merge_property(PropertyName::Size, json!(size));
        }
        let config = CourierConfig {
            default_size: Some(25),
            ..CourierConfig::default()
        };
        let request = SearchRequest::from_state(state, &config);
        assert_eq!(request.body.get("size").cloned(), expected);
    }

    #[rstest]
    fn identity_and_total_hits_are_carried_over() {
        let mut state = MergedState::new();
        state.merge_property(PropertyName::Index, json!("logs-*"));
        state.merge_property(PropertyName::Type, json!("event"));
        let config = CourierConfig {
            track_total_hits: true,
            ..CourierConfig::default()
        };
        let request = SearchRequest::from_state(state, &config);
        let encoded = serde_json::to_value(&request).expect("request serialises");
        assert_eq!(encoded["index"], json!("logs-*"));
        assert_eq!(encoded["type"], json!("event"));
        assert!(encoded.get("id").is_none());
        assert_eq!(encoded["body"]["track_total_hits"], json!(true));
    }
}
