//! CLI argument parsing using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use search_query_rs::options::SortOrder;

/// hs - compile and run portal content searches
#[derive(Parser, Debug)]
#[command(name = "hs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Portal sharing URL for this call (overrides config)
    #[arg(long, global = true, env = "HS_PORTAL")]
    pub portal: Option<String>,

    /// Portal token for this call (overrides config)
    #[arg(long, global = true, env = "HS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter and paging arguments shared by `compile` and `search`.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// JSON filter file ("-" reads stdin)
    #[arg(short, long)]
    pub filter: Option<PathBuf>,

    /// Search terms (replaces "terms" from the filter file)
    #[arg(short, long)]
    pub terms: Option<String>,

    /// Page cursor from a previous search
    #[arg(long)]
    pub page: Option<String>,

    /// Field to sort by (needs --sort-order)
    #[arg(long)]
    pub sort_field: Option<String>,

    /// Sort direction: asc or desc (needs --sort-field)
    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    /// Comma-separated fields to count (e.g. "type,tags")
    #[arg(long)]
    pub aggregations: Option<String>,

    /// Bounding box passed through to the portal
    #[arg(long)]
    pub bbox: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a filter into search parameters without running it
    #[command(alias = "c")]
    Compile {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Compile a filter and run the search
    #[command(alias = "s")]
    Search {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Encode, decode and advance page cursors
    Cursor {
        #[command(subcommand)]
        command: CursorCommands,
    },

    /// View or edit configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cursor subcommands
#[derive(Subcommand, Debug)]
pub enum CursorCommands {
    /// Encode a page offset and size into a cursor
    Encode {
        /// 1-based offset of the first result
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        start: u32,

        /// Results per page
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
        num: u32,
    },

    /// Decode a cursor (invalid cursors decode to the first page)
    Decode {
        /// Cursor token
        cursor: String,
    },

    /// Print the cursor for the page after the given one
    Next {
        /// Cursor token
        cursor: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Key (portal, token, client.timeout_secs, client.max_retries)
        key: String,

        /// Value
        value: String,
    },
}

/// Shells supported by `completions`
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
