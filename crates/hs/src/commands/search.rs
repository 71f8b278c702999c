//! Search command implementation.

use std::time::Duration;

use portal_api_rs::client::PortalClient;
use portal_api_rs::search::SearchResponse;
use search_query_rs::params::CompiledQuery;

use super::config::ClientConfig;
use super::{CommandContext, Result};

/// Builds a portal client from config settings.
pub fn build_client(config: &ClientConfig) -> Result<PortalClient> {
    let mut builder = PortalClient::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = config.max_retries {
        builder = builder.max_retries(retries);
    }
    Ok(builder.build()?)
}

/// Executes the search command.
pub async fn execute(
    ctx: &CommandContext,
    client: &PortalClient,
    query: &CompiledQuery,
) -> Result<()> {
    tracing::debug!(q = %query.q, "running search");
    let response = client.search(query).await?;
    print_response(ctx, &response)
}

fn str_field<'a>(result: &'a serde_json::Value, name: &str) -> &'a str {
    result.get(name).and_then(|v| v.as_str()).unwrap_or("")
}

fn result_line(result: &serde_json::Value) -> String {
    format!(
        "{}  {}  [{}]",
        str_field(result, "id"),
        str_field(result, "title"),
        str_field(result, "type")
    )
}

fn print_response(ctx: &CommandContext, response: &SearchResponse) -> Result<()> {
    let next = response.next_page().map(|cursor| cursor.encode());

    if ctx.json_output {
        let output = serde_json::json!({
            "total": response.total,
            "start": response.start,
            "num": response.num,
            "results": response.results,
            "aggregations": response.aggregations,
            "next_page": next,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    use owo_colors::OwoColorize;

    let header = format!("{} results", response.total);
    if ctx.use_colors {
        println!("{}\n", header.green().bold());
    } else {
        println!("{}\n", header);
    }

    for result in &response.results {
        println!("{}", result_line(result));
    }

    if let Some(token) = next {
        println!("\nNext page: --page {}", token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_line() {
        let result = serde_json::json!({
            "id": "abc123",
            "title": "Water Mains",
            "type": "Feature Service"
        });
        assert_eq!(result_line(&result), "abc123  Water Mains  [Feature Service]");
    }

    #[test]
    fn test_result_line_missing_fields() {
        assert_eq!(result_line(&serde_json::json!({})), "    []");
    }

    #[test]
    fn test_build_client_from_config() {
        let config = ClientConfig {
            timeout_secs: Some(5),
            max_retries: Some(0),
        };
        assert!(build_client(&config).is_ok());
    }
}
