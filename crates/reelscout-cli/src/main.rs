//! reelscout - browse and search the TMDB catalog.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use reelscout_api::ResultItem;
use reelscout_api::tmdb::TmdbClient;
use reelscout_core::{Direction, PagedListController, Screen, SearchController, Status};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Page through a catalog list.
    List(ListArgs),
    /// Run a type-ahead search.
    Search(SearchArgs),
}

/// List screen selector.
#[derive(Clone, Copy, ValueEnum)]
enum ScreenArg {
    Movie,
    Tv,
    Trending,
    People,
}

impl From<ScreenArg> for Screen {
    fn from(arg: ScreenArg) -> Self {
        match arg {
            ScreenArg::Movie => Self::Movie,
            ScreenArg::Tv => Self::Tv,
            ScreenArg::Trending => Self::Trending,
            ScreenArg::People => Self::People,
        }
    }
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Screen to list.
    #[arg(value_enum)]
    screen: ScreenArg,
    /// List category (e.g. "popular", "top_rated"). Defaults per screen.
    #[arg(long)]
    category: Option<String>,
    /// Trending time window ("day" or "week").
    #[arg(long)]
    duration: Option<String>,
    /// Number of pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text (e.g. "dune").
    #[arg(long, required = true)]
    query: String,
    /// Highlight and commit the N-th result (1-based).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    select: Option<u32>,
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    tracing::debug!(path = %path.display(), "loading config");
    AppConfig::load(&path)
}

/// Builds a TMDB client from the environment and config.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .language(&config.tmdb.language)
        .include_adult(config.tmdb.include_adult);
    if let Some(url) = &config.tmdb.base_url {
        builder = builder.base_url(url.clone());
    }
    builder.build().context("failed to build TMDB client")
}

/// Formats one result row.
fn describe(item: &ResultItem) -> String {
    let kind = item.media_type.map_or("-", |media_type| media_type.as_str());
    let name = item.display_name().unwrap_or("(untitled)");
    format!("{} [{kind}] {name}", item.id)
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the filters are invalid, the client fails to build,
/// or a page fails to load.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let screen = Screen::from(args.screen);
    let filters = screen.filters(args.category.as_deref(), args.duration.as_deref())?;
    let config = load_config(dir)?;
    let client = Arc::new(build_tmdb_client(&config)?);

    let controller = PagedListController::new(client, screen.resource());
    let mut rx = controller.subscribe();
    tracing::info!("Listing {screen} {filters}");
    controller.reset(filters);

    let mut shown = 0_usize;
    for page in 1..=args.pages {
        let state = rx
            .wait_for(|s| !s.status().is_loading())
            .await
            .context("list controller closed")?
            .clone();
        for item in state.items().iter().skip(shown) {
            tracing::info!("{}", describe(item));
        }
        shown = state.items().len();

        match state.status() {
            Status::Error(message) => bail!("page {page} failed to load: {message}"),
            Status::Exhausted => {
                tracing::info!("End of list");
                break;
            }
            Status::Idle | Status::Loading => {}
        }
        if page < args.pages {
            controller.load_next_page();
        }
    }

    tracing::info!("Total items: {shown}");
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is blank, the client fails to build, the
/// search fails, or `--select` is out of range.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    if args.query.trim().is_empty() {
        bail!("search query is blank");
    }
    let config = load_config(dir)?;
    let client = Arc::new(build_tmdb_client(&config)?);

    let mut search = SearchController::with_debounce(client, config.search.debounce());
    let mut rx = search.subscribe();
    let start = rx.borrow().epoch();
    search.set_query(args.query.as_str());

    let state = rx
        .wait_for(|s| s.epoch() != start && !s.status().is_loading())
        .await
        .context("search controller closed")?
        .clone();
    if let Some(message) = state.status().error() {
        bail!("search for {:?} failed: {message}", args.query);
    }

    tracing::info!("Results for {:?}: {}", state.query(), state.results().len());
    for (index, item) in state.results().iter().enumerate() {
        tracing::info!("{:>2}. {}", index.saturating_add(1), describe(item));
    }

    if let Some(select) = args.select {
        for _ in 0..select {
            search.move_selection(Direction::Down);
        }
        let reached = search.snapshot().selected_index().map(|i| i.saturating_add(1));
        if reached != usize::try_from(select).ok() {
            bail!(
                "--select {select} is out of range ({} results)",
                state.results().len()
            );
        }
        let item = search
            .commit_selection()
            .context("no result is highlighted")?;
        tracing::info!("Selected: {}", describe(&item));
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match &cli.command {
        Commands::List(args) => run_list(args, cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(args, cli.dir.as_ref()).await,
    }
}
