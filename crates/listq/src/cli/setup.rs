use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Returns the version string, including the git hash for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "listq", bin_name = "listq", version = get_version())]
#[command(about = "Search, filter and page through JSON record lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./listq.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a query and print one page of results
    Query(QueryArgs),

    /// Print the distinct values of every filterable field
    Facets(FacetsArgs),

    /// Print the resolved configuration
    Config,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// JSON file holding an array of records
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Free-text search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field filter as name=value; comma-separate values for multi-select
    #[arg(short, long = "filter", value_name = "NAME=VALUE")]
    pub filters: Vec<String>,

    /// Drop filters carried over from --state before applying --filter
    #[arg(long)]
    pub clear_filters: bool,

    /// Page to show (1-based, clamped to the last page)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Records per page (overrides config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Sort by field, e.g. title or created_at:desc
    #[arg(long)]
    pub sort: Option<String>,

    /// Load and save query state in this file between runs
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// JSON file holding an array of records
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}
