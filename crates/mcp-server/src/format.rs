//! Render raw upstream responses as plain text for tool results.
//!
//! Responses arrive as loosely-shaped JSON and are never trusted to be
//! complete: both formatters are pure, treat every field as optional and
//! never panic on malformed input.

use serde_json::Value;

/// Render a search response as a numbered result list.
pub fn format_search_results(raw: &Value) -> String {
    let Some(results) = raw.get("results").and_then(Value::as_array) else {
        return "No results found.".to_string();
    };

    let metadata = raw.get("metadata");
    let searched_query = metadata
        .and_then(|m| m.get("searchedQuery"))
        .and_then(Value::as_str)
        .unwrap_or("your query");
    let total = metadata
        .and_then(|m| m.get("totalResults"))
        .and_then(Value::as_u64)
        .unwrap_or(results.len() as u64);

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, result)| format_result_block(i + 1, result))
        .collect();

    format!(
        "Search results for \"{searched_query}\" ({total} results):\n\n{}",
        blocks.join("\n\n")
    )
}

fn format_result_block(index: usize, result: &Value) -> String {
    let title = result
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("No title");
    let url = result.get("url").and_then(Value::as_str).unwrap_or("");
    let datasource = result
        .get("document")
        .and_then(|d| d.get("datasource"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown source");
    let snippets = snippet_block(result.get("snippets"));

    format!("[{index}] {title}\n{snippets}\nSource: {datasource}\nURL: {url}")
}

/// Snippets carry an explicit ordering; ties keep their wire order.
fn snippet_block(snippets: Option<&Value>) -> String {
    let Some(snippets) = snippets.and_then(Value::as_array) else {
        return "No description available".to_string();
    };

    let mut ordered: Vec<&Value> = snippets.iter().collect();
    ordered.sort_by_key(|s| {
        s.get("snippetTextOrdering")
            .and_then(Value::as_i64)
            .unwrap_or(0)
    });

    let lines: Vec<&str> = ordered
        .iter()
        .filter_map(|s| s.get("text").and_then(Value::as_str))
        .filter(|t| !t.trim().is_empty())
        .collect();

    if lines.is_empty() {
        "No description available".to_string()
    } else {
        lines.join("\n")
    }
}

/// Render a chat response as one block per message.
pub fn format_chat_response(raw: &Value) -> String {
    let messages = match raw.get("messages").and_then(Value::as_array) {
        Some(messages) if !messages.is_empty() => messages,
        _ => return "No response received.".to_string(),
    };

    let blocks: Vec<String> = messages.iter().map(format_message).collect();
    blocks.join("\n\n")
}

fn format_message(message: &Value) -> String {
    let author = message
        .get("author")
        .and_then(Value::as_str)
        .unwrap_or("USER");

    let mut block = author.to_string();
    if let Some(message_type) = message.get("messageType").and_then(Value::as_str) {
        block.push_str(&format!(" ({message_type})"));
    }
    if let Some(step_id) = message.get("stepId").and_then(Value::as_str) {
        block.push_str(&format!(" [Step: {step_id}]"));
    }
    block.push_str(": ");
    block.push_str(&fragment_lines(message.get("fragments")).join("\n"));

    if let Some(citations) = message.get("citations").and_then(Value::as_array) {
        if !citations.is_empty() {
            block.push_str("\n\nSources:");
            for (index, citation) in citations.iter().enumerate() {
                block.push('\n');
                block.push_str(&format_citation(index + 1, citation));
            }
        }
    }
    block
}

/// A fragment has no discriminant tag: every populated kind contributes a
/// line, in text / query-suggestion / structured-results order.
fn fragment_lines(fragments: Option<&Value>) -> Vec<String> {
    let Some(fragments) = fragments.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for fragment in fragments {
        if let Some(text) = fragment.get("text").and_then(Value::as_str) {
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }
        if let Some(query) = fragment
            .get("querySuggestion")
            .and_then(|q| q.get("query"))
            .and_then(Value::as_str)
        {
            lines.push(format!("Query: {query}"));
        }
        if let Some(results) = fragment.get("structuredResults").and_then(Value::as_array) {
            for entry in results {
                let Some(document) = entry.get("document") else {
                    continue;
                };
                let title = document
                    .get("title")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .unwrap_or("Untitled");
                let url = document
                    .get("url")
                    .and_then(Value::as_str)
                    .filter(|u| !u.is_empty())
                    .unwrap_or("No URL");
                lines.push(format!("Document: {title} ({url})"));
            }
        }
    }
    lines
}

fn format_citation(index: usize, citation: &Value) -> String {
    let source = citation.get("sourceDocument");
    let title = source
        .and_then(|s| s.get("title"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("Unknown source");
    let url = source
        .and_then(|s| s.get("url"))
        .and_then(Value::as_str)
        .unwrap_or("");
    format!("[{index}] {title} - {url}")
}
