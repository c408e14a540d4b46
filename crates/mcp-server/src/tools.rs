//! Tool descriptors and the operations behind them.
//!
//! Each descriptor is declared once: `tools/list` advertises it and the
//! dispatch router validates invocations against the very same schema
//! document. The operations parse the validated arguments into the wire
//! types and forward them to the upstream client; upstream failures
//! propagate to the router untouched.

use anyhow::{Context, Result};
use glean_api::types::{ChatRequest, SearchRequest};
use glean_api::GleanApi;
use rmcp::model::Tool;
use serde_json::{json, Value};
use std::sync::Arc;

pub const SEARCH_TOOL: &str = "glean_search";
pub const CHAT_TOOL: &str = "glean_chat";

/// The advertised tool set.
///
/// Names here are the same strings `dispatch` matches on; `server` tests
/// assert the two stay in lockstep in both directions.
pub fn descriptors() -> Vec<Tool> {
    vec![
        make_tool(
            SEARCH_TOOL,
            "Search company content across all connected datasources. \
             Returns ranked results with titles, snippets, sources and URLs.",
            search_input_schema(),
        ),
        make_tool(
            CHAT_TOOL,
            "Ask Glean's AI assistant a question grounded in company knowledge. \
             Send the conversation as messages (most recent first); returns the \
             assistant's reply with source citations.",
            chat_input_schema(),
        ),
    ]
}

fn make_tool(name: &'static str, description: &'static str, schema: Value) -> Tool {
    Tool {
        name: name.into(),
        title: None,
        description: Some(description.into()),
        input_schema: Arc::new(
            serde_json::from_value(schema).expect("tool schemas are object literals"),
        ),
        output_schema: None,
        annotations: None,
        icons: None,
    }
}

fn search_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search terms"
            },
            "cursor": {
                "type": "string",
                "description": "Pagination cursor from a previous response"
            },
            "pageSize": {
                "type": "integer",
                "description": "Maximum number of results to return"
            },
            "maxSnippetSize": {
                "type": "integer",
                "description": "Maximum characters per result snippet"
            },
            "disableSpellcheck": {
                "type": "boolean",
                "description": "Disable spellcheck-based query correction"
            },
            "timeoutMillis": {
                "type": "integer",
                "description": "Upstream timeout in milliseconds"
            },
            "people": {
                "type": "array",
                "description": "Restrict results to content from these people",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "obfuscatedId": {"type": "string"},
                        "email": {"type": "string"},
                        "metadata": {"type": "object"}
                    },
                    "required": ["name", "obfuscatedId"]
                }
            },
            "resultTabIds": {
                "type": "array",
                "description": "Unique IDs of the result tabs to fetch",
                "items": {"type": "string"}
            },
            "trackingToken": {
                "type": "string",
                "description": "Opaque token echoed back across paginated requests"
            },
            "timestamp": {
                "type": "string",
                "description": "ISO 8601 timestamp of the client request"
            },
            "requestOptions": {
                "type": "object",
                "description": "Facet filters, datasource restrictions and response hints",
                "properties": {
                    "facetBucketSize": {"type": "integer"},
                    "facetFilters": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "fieldName": {"type": "string"},
                                "values": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "value": {"type": "string"},
                                            "relationType": {"type": "string"}
                                        },
                                        "required": ["value"]
                                    }
                                }
                            },
                            "required": ["fieldName"]
                        }
                    },
                    "datasourcesFilter": {
                        "type": "array",
                        "items": {"type": "string"}
                    },
                    "fetchAllDatasourceCounts": {"type": "boolean"},
                    "responseHints": {
                        "type": "array",
                        "items": {"type": "string"}
                    }
                }
            }
        },
        "required": ["query"]
    })
}

fn chat_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "messages": {
                "type": "array",
                "description": "Conversation so far, ordered most recent first",
                "items": {
                    "type": "object",
                    "properties": {
                        "author": {
                            "type": "string",
                            "enum": ["USER", "GLEAN_AI"]
                        },
                        "fragments": {
                            "type": "array",
                            "description": "Message content; a fragment may carry text, a file, a query suggestion or structured results",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "text": {"type": "string"},
                                    "action": {"type": "object"},
                                    "file": {
                                        "type": "object",
                                        "properties": {
                                            "id": {"type": "string"},
                                            "name": {"type": "string"}
                                        },
                                        "required": ["id"]
                                    },
                                    "querySuggestion": {
                                        "type": "object",
                                        "properties": {
                                            "query": {"type": "string"},
                                            "datasource": {"type": "string"}
                                        },
                                        "required": ["query"]
                                    },
                                    "structuredResults": {
                                        "type": "array",
                                        "items": {
                                            "type": "object",
                                            "properties": {
                                                "document": {
                                                    "type": "object",
                                                    "properties": {
                                                        "title": {"type": "string"},
                                                        "url": {"type": "string"}
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        "citations": {
                            "type": "array",
                            "items": {"type": "object"}
                        },
                        "messageId": {"type": "string"},
                        "messageType": {
                            "type": "string",
                            "enum": ["UPDATE", "CONTENT", "CONTEXT", "DEBUG", "DEBUG_EXTERNAL", "ERROR", "HEADING", "WARNING"]
                        },
                        "ts": {"type": "string"},
                        "uploadedFileIds": {
                            "type": "array",
                            "items": {"type": "string"}
                        }
                    }
                }
            },
            "agentConfig": {
                "type": "object",
                "description": "Which assistant variant handles the conversation",
                "properties": {
                    "agent": {"type": "string", "enum": ["DEFAULT", "GPT"]},
                    "mode": {"type": "string", "enum": ["DEFAULT", "QUICK"]}
                }
            },
            "chatId": {
                "type": "string",
                "description": "Continuation handle for an existing conversation"
            },
            "saveChat": {
                "type": "boolean",
                "description": "Persist the conversation in chat history"
            },
            "stream": {
                "type": "boolean",
                "description": "Ignored: responses are always returned whole"
            },
            "timeoutMillis": {
                "type": "integer",
                "description": "Upstream timeout in milliseconds"
            },
            "applicationId": {
                "type": "string",
                "description": "Application the conversation belongs to"
            },
            "timezoneOffset": {
                "type": "integer",
                "description": "Client UTC offset in minutes"
            },
            "inclusions": {
                "type": "object",
                "description": "Restrict answers to these datasources",
                "properties": {
                    "datasources": {"type": "array", "items": {"type": "string"}}
                }
            },
            "exclusions": {
                "type": "object",
                "description": "Never draw answers from these datasources",
                "properties": {
                    "datasources": {"type": "array", "items": {"type": "string"}}
                }
            }
        },
        "required": ["messages"]
    })
}

/// Execute a `glean_search` invocation with schema-validated arguments.
///
/// The typed parse is deliberate defense in depth: even a caller that
/// bypasses the router's schema check cannot reach the network with a
/// malformed request.
pub async fn search(api: &dyn GleanApi, args: &Value) -> Result<Value> {
    let request: SearchRequest = serde_json::from_value(args.clone())
        .context("search arguments did not match the declared schema")?;
    let response = api.search(&request).await?;
    Ok(response)
}

/// Execute a `glean_chat` invocation with schema-validated arguments.
///
/// `stream` is pinned to `false`: the tool surface returns a single text
/// block and cannot consume a streamed body.
pub async fn chat(api: &dyn GleanApi, args: &Value) -> Result<Value> {
    let mut request: ChatRequest = serde_json::from_value(args.clone())
        .context("chat arguments did not match the declared schema")?;
    request.stream = Some(false);
    let response = api.chat(&request).await?;
    Ok(response)
}
