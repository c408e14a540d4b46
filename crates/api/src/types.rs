//! Wire-contract request types for the search and chat endpoints.
//!
//! Field names here are the upstream JSON contract (camelCase); optional
//! fields are skipped when unset so the serialized body only carries what the
//! caller supplied. Responses are deliberately *not* typed: their shape is
//! deeply variant, so they travel as `serde_json::Value` and the formatting
//! layer treats every field as optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_snippet_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_spellcheck: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_millis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<Person>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_tab_ids: Option<Vec<String>>,
    /// Opaque continuity token echoed back across paginated requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_options: Option<SearchRequestOptions>,
}

/// A person filter attached to a search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub obfuscated_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_bucket_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_filters: Option<Vec<FacetFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasources_filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_all_datasource_counts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_hints: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetFilter {
    pub field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<FacetFilterValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetFilterValue {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Conversation so far, ordered most-recent-first.
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_config: Option<AgentConfig>,
    /// Continuation handle for an existing conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_chat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_millis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusions: Option<ChatRestrictionFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<ChatRestrictionFilters>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRestrictionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub author: Author,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragments: Option<Vec<ChatFragment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_file_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_config: Option<AgentConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Author {
    User,
    GleanAi,
}

impl Default for Author {
    fn default() -> Self {
        Author::User
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Update,
    Content,
    Context,
    Debug,
    DebugExternal,
    Error,
    Heading,
    Warning,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<AgentMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Agent {
    Default,
    Gpt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentMode {
    Default,
    Quick,
}

/// One piece of a chat message.
///
/// There is no discriminant tag on the wire: a fragment is whatever optional
/// fields it carries, and a single fragment may legitimately carry several at
/// once. Consumers apply per-field rules rather than matching a single kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Parameter map for a tool invocation; opaque to this adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_suggestion: Option<QuerySuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_results: Option<Vec<StructuredResult>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySuggestion {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A reference from a chat message to a source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_document: Option<SourceDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Highlighted sub-ranges within the source; opaque to this adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_ranges: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn search_request_serializes_camel_case_and_skips_unset() {
        let request = SearchRequest {
            query: "quarterly roadmap".to_string(),
            page_size: Some(10),
            ..Default::default()
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"query": "quarterly roadmap", "pageSize": 10}));
    }

    #[test]
    fn search_request_requires_query() {
        let err = serde_json::from_value::<SearchRequest>(json!({"pageSize": 3})).unwrap_err();
        assert!(err.to_string().contains("query"));
    }

    #[test]
    fn chat_message_author_defaults_to_user() {
        let message: ChatMessage =
            serde_json::from_value(json!({"fragments": [{"text": "hi"}]})).unwrap();
        assert_eq!(message.author, Author::User);
    }

    #[test]
    fn author_and_message_type_use_upstream_spelling() {
        assert_eq!(serde_json::to_value(Author::GleanAi).unwrap(), json!("GLEAN_AI"));
        assert_eq!(
            serde_json::to_value(MessageType::DebugExternal).unwrap(),
            json!("DEBUG_EXTERNAL")
        );
        let parsed: MessageType = serde_json::from_value(json!("HEADING")).unwrap();
        assert_eq!(parsed, MessageType::Heading);
    }

    #[test]
    fn fragment_tolerates_unknown_fields_and_mixed_kinds() {
        let fragment: ChatFragment = serde_json::from_value(json!({
            "text": "see also",
            "querySuggestion": {"query": "vacation policy", "datasource": "confluence"},
            "somethingNew": true,
        }))
        .unwrap();
        assert_eq!(fragment.text.as_deref(), Some("see also"));
        assert_eq!(
            fragment.query_suggestion.as_ref().map(|q| q.query.as_str()),
            Some("vacation policy")
        );
    }
}
