use anyhow::{bail, Context, Result};
use clap::Parser;
use listqapp::api::ListqApi;
use listqapp::config::ListqConfig;
use listqapp::model::Record;
use listqapp::query::QueryState;
use listqapp::sort::SortKey;
use listqapp::store::fs::FileStore;
use listqapp::store::Persist;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use super::render::{render_facets, render_page};
use super::setup::{Cli, Commands, FacetsArgs, OutputFormat, QueryArgs};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ListqConfig::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Query(args) => handle_query(config, args),
        Commands::Facets(args) => handle_facets(config, args),
        Commands::Config => handle_config(&config),
    }
}

/// Logs go to stderr so stdout stays clean for piping.
/// `RUST_LOG` wins; otherwise `--verbose` selects debug, else warn.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

fn open_api(data: &Path, config: ListqConfig) -> Result<ListqApi<FileStore<Vec<Record>>>> {
    if !data.exists() {
        bail!("data file not found: {}", data.display());
    }
    let api = ListqApi::open(FileStore::new(data), config)
        .with_context(|| format!("failed to read records from {}", data.display()))?;
    Ok(api)
}

fn handle_query(mut config: ListqConfig, args: QueryArgs) -> Result<()> {
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    let mut api = open_api(&args.data, config)?;

    let state_store = args
        .state
        .as_ref()
        .map(|path| FileStore::<QueryState>::new(path));
    let mut state = match &state_store {
        Some(store) => store.load_or_default()?,
        None => QueryState::new(),
    };

    if let Some(term) = args.search {
        state.set_search_term(term);
    }
    if args.clear_filters {
        state.clear_filters();
    }
    for raw in &args.filters {
        let (name, value) = api.parse_filter(raw)?;
        state.set_filter(name, value);
    }
    if let Some(sort) = &args.sort {
        state.set_sort(Some(SortKey::parse(sort)?));
    }
    if let Some(page) = args.page {
        state.set_page(page);
    }

    tracing::debug!(?state, "running query");
    let page = api.query(&mut state);

    if let Some(store) = &state_store {
        store.save(&state)?;
    }

    match args.output {
        OutputFormat::Text => print!("{}", render_page(&page, &api.config().schema())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
    }
    Ok(())
}

fn handle_facets(config: ListqConfig, args: FacetsArgs) -> Result<()> {
    let mut api = open_api(&args.data, config)?;
    let facets = api.facets();

    match args.output {
        OutputFormat::Text => print!("{}", render_facets(&facets)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&facets)?),
    }
    Ok(())
}

fn handle_config(config: &ListqConfig) -> Result<()> {
    println!("page_size = {}", config.page_size);
    println!("debounce_ms = {}", config.debounce_ms);
    println!("wildcard = {:?}", config.wildcard);
    println!("search_fields = {:?}", config.search_fields());
    println!("single_select = {:?}", config.single_select());
    println!("multi_select = {:?}", config.multi_select());
    println!(
        "stage_order = {}",
        serde_json::to_string(&config.stage_order())?
    );
    Ok(())
}
