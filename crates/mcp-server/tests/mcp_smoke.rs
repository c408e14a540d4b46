//! Protocol-level smoke tests against the real binary over stdio.
//!
//! The server is spawned with dummy credentials; every exchange below stays
//! on a path that never reaches the network (tools/list, argument and
//! tool-name rejection).

use anyhow::{Context, Result};
use rmcp::{model::CallToolRequestParam, service::ServiceExt, transport::TokioChildProcess};
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use tokio::process::Command;

fn server_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_glean-mcp"));
    cmd.env("GLEAN_SUBDOMAIN", "example");
    cmd.env("GLEAN_API_TOKEN", "test-token");
    cmd.env_remove("GLEAN_ACT_AS");
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[tokio::test]
async fn tools_list_advertises_exactly_the_dispatchable_set() -> Result<()> {
    let transport = TokioChildProcess::new(server_command()).context("spawn glean-mcp")?;
    let service = tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")??;

    let tools = tokio::time::timeout(
        Duration::from_secs(10),
        service.list_tools(Default::default()),
    )
    .await
    .context("timeout listing tools")??;

    let names: HashSet<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();
    assert_eq!(names, HashSet::from(["glean_search", "glean_chat"]));

    for tool in &tools.tools {
        assert!(
            tool.description.is_some(),
            "tool {} has no description",
            tool.name
        );
        assert_eq!(
            tool.input_schema.get("type").and_then(|v| v.as_str()),
            Some("object"),
            "tool {} schema is not an object schema",
            tool.name
        );
    }

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn unknown_tool_is_an_error_result_not_a_protocol_fault() -> Result<()> {
    let transport = TokioChildProcess::new(server_command()).context("spawn glean-mcp")?;
    let service = tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")??;

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: "does_not_exist".into(),
            arguments: json!({}).as_object().cloned(),
        }),
    )
    .await
    .context("timeout calling unknown tool")??;

    assert_eq!(result.is_error, Some(true));
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
        .context("missing text content")?;
    assert_eq!(text, "Unknown tool: does_not_exist");

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn schema_violations_are_reported_with_field_paths() -> Result<()> {
    let transport = TokioChildProcess::new(server_command()).context("spawn glean-mcp")?;
    let service = tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")??;

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: "glean_search".into(),
            arguments: json!({"pageSize": "ten"}).as_object().cloned(),
        }),
    )
    .await
    .context("timeout calling glean_search")??;

    assert_eq!(result.is_error, Some(true));
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
        .context("missing text content")?;
    assert!(text.contains("query: required field is missing"), "{text}");
    assert!(
        text.contains("pageSize: expected integer, got string"),
        "{text}"
    );

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn missing_arguments_are_rejected() -> Result<()> {
    let transport = TokioChildProcess::new(server_command()).context("spawn glean-mcp")?;
    let service = tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")??;

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: "glean_chat".into(),
            arguments: None,
        }),
    )
    .await
    .context("timeout calling glean_chat")??;

    assert_eq!(result.is_error, Some(true));
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
        .context("missing text content")?;
    assert_eq!(text, "Arguments are required");

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}
