//! Compile command implementation.
//!
//! Builds a filter from a JSON file and flags, compiles it, and prints the
//! resulting search parameters.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use search_query_rs::prelude::*;

use super::config::Config;
use super::{CommandContext, CommandError, Result};
use crate::cli::{Cli, QueryArgs};

/// Reads the filter named by `--filter` and applies `--terms`.
pub fn load_filter(args: &QueryArgs) -> Result<ContentFilter> {
    let mut filter = match args.filter.as_deref() {
        Some(path) => parse_filter(&read_filter_source(path)?)?,
        None => ContentFilter::new(),
    };

    if let Some(terms) = &args.terms {
        filter.insert("terms", FilterValue::scalar(terms.clone()));
    }
    Ok(filter)
}

fn read_filter_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    fs::read_to_string(path)
        .map_err(|e| CommandError::Filter(format!("Failed to read {}: {}", path.display(), e)))
}

/// Parses filter JSON. Only syntactically invalid JSON is an error.
pub fn parse_filter(source: &str) -> Result<ContentFilter> {
    serde_json::from_str(source)
        .map_err(|e| CommandError::Filter(format!("Invalid filter JSON: {}", e)))
}

/// Builds per-call options from flags. `--portal`/`--token` override the config.
pub fn build_options(cli: &Cli, args: &QueryArgs) -> CompileOptions {
    CompileOptions {
        page: args.page.clone(),
        sort_field: args.sort_field.clone(),
        sort_order: args.sort_order,
        aggregations: args.aggregations.clone(),
        bbox: args.bbox.clone(),
        endpoint: cli.portal.clone(),
        credential: cli.token.clone().map(Credential::new),
    }
}

/// Compiles the query described by the CLI flags and config.
pub fn compile_from_args(cli: &Cli, args: &QueryArgs, config: &Config) -> Result<CompiledQuery> {
    let filter = load_filter(args)?;
    let options = build_options(cli, args);
    Ok(compile(&filter, &options, &config.service_context()))
}

/// Executes the compile command.
pub fn execute(ctx: &CommandContext, query: &CompiledQuery) -> Result<()> {
    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(query)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    println!("q: {}", query.q);
    println!("start: {}", query.params.start);
    println!("num: {}", query.params.num);
    if let (Some(field), Some(order)) = (&query.sort_field, query.sort_order) {
        println!("sort: {} {}", field, order);
    }
    if let (Some(fields), Some(size)) = (&query.params.count_fields, query.params.count_size) {
        println!("countFields: {} (countSize {})", fields, size);
    }
    if let Some(bbox) = &query.bbox {
        println!("bbox: {}", bbox);
    }
    if let Some(endpoint) = &query.endpoint {
        println!("portal: {}", endpoint);
    }
    if query.credential.is_some() {
        println!("token: (set)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> (Cli, QueryArgs) {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let query = match &cli.command {
            crate::cli::Commands::Compile { query } => query.clone(),
            _ => panic!("Expected compile"),
        };
        (cli, query)
    }

    #[test]
    fn test_compile_terms_only() {
        let (cli, args) = parse(&["hs", "compile", "--terms", "water"]);
        let query = compile_from_args(&cli, &args, &Config::default()).unwrap();

        assert_eq!(query.q, r#"(water) AND (-type: "code attachment")"#);
        assert!(query.endpoint.is_none());
    }

    #[test]
    fn test_compile_filter_file_with_terms_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"terms": "fire", "owner": ["me", "you"], "type": {{"value": ["Feature Layer"]}}}}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let (cli, args) = parse(&["hs", "compile", "--filter", &path, "--terms", "water"]);
        let query = compile_from_args(&cli, &args, &Config::default()).unwrap();

        assert_eq!(
            query.q,
            r#"(water) AND (owner: me OR owner: you) AND (type: "Feature Layer") AND (-type: "code attachment")"#
        );
    }

    #[test]
    fn test_compile_missing_filter_file() {
        let (cli, args) = parse(&["hs", "compile", "--filter", "/nonexistent/filter.json"]);
        let err = compile_from_args(&cli, &args, &Config::default()).unwrap_err();
        assert!(matches!(err, CommandError::Filter(_)));
    }

    #[test]
    fn test_parse_filter_invalid_json() {
        assert!(matches!(parse_filter("{oops"), Err(CommandError::Filter(_))));
    }

    #[test]
    fn test_flags_override_config_connection() {
        let config = Config {
            portal: Some("https://config.example.com/sharing/rest".to_string()),
            token: Some("config-token".to_string()),
            ..Config::default()
        };

        let (cli, args) = parse(&[
            "hs",
            "--portal",
            "https://flag.example.com/sharing/rest",
            "compile",
        ]);
        let query = compile_from_args(&cli, &args, &config).unwrap();

        assert_eq!(query.endpoint.as_deref(), Some("https://flag.example.com/sharing/rest"));
        assert_eq!(query.credential.unwrap().expose(), "config-token");
    }

    #[test]
    fn test_sort_requires_both_flags() {
        let (cli, args) = parse(&["hs", "compile", "--sort-field", "title"]);
        let query = compile_from_args(&cli, &args, &Config::default()).unwrap();
        assert!(query.sort_field.is_none());

        let (cli, args) = parse(&["hs", "compile", "--sort-field", "title", "--sort-order", "asc"]);
        let query = compile_from_args(&cli, &args, &Config::default()).unwrap();
        assert_eq!(query.sort_field.as_deref(), Some("title"));
        assert_eq!(query.sort_order, Some(SortOrder::Asc));
    }
}
