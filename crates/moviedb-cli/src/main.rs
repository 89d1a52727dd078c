//! moviedb - search a movie database and browse paginated results.

/// Application configuration (TOML).
mod config;
/// Tracing subscriber setup.
mod logging;
/// Client-side pagination.
mod pagination;
/// Terminal UI components.
mod tui;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use moviedb_api::omdb::{CategoryFilter, LocalOmdbApi, OmdbClient, SearchParams};
use tracing::instrument;
use url::Url;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use crate::tui::route::Route;
use crate::tui::{BrowserOptions, run_browser};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log file for the browser (default: `moviedb.log` in the config directory).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run (default: browse).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse search results in the terminal UI.
    Browse(BrowseArgs),
    /// Run one search and print a page of results.
    Search(SearchArgs),
    /// Print the full record of one title.
    Detail(DetailArgs),
    /// Manage the config file.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args, Default)]
struct BrowseArgs {
    /// Initial search term (default: `browse.default_term`).
    #[arg(long)]
    term: Option<String>,
    /// Initial category: all, movie or series (default: `browse.default_filter`).
    #[arg(long = "type")]
    kind: Option<CategoryFilter>,
    /// Route to open on start (e.g. "/movie/tt0111161").
    #[arg(long)]
    route: Option<Route>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search term (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Category: all, movie or series.
    #[arg(long = "type", default_value = "all")]
    kind: CategoryFilter,
    /// 1-based page to print.
    #[arg(long, default_value_t = 1)]
    page: usize,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// IMDb identifier (e.g. "tt0111161").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the resolved config (API key redacted).
    Show,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Builds an `OmdbClient` from config and environment.
///
/// # Errors
///
/// Returns an error if no API key is available, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(config: &AppConfig) -> Result<OmdbClient> {
    let api_key = config.resolve_api_key()?;

    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = &config.api.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid api.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(secs) = config.api.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("failed to build OMDb client")
}

/// Loads the config file for the given directory override.
fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the terminal UI fails.
#[allow(clippy::future_not_send)]
#[instrument(skip_all)]
async fn run_browse(args: BrowseArgs, config: &AppConfig) -> Result<()> {
    let client = build_omdb_client(config)?;
    let options = BrowserOptions {
        term: args
            .term
            .unwrap_or_else(|| config.browse.default_term.clone()),
        filter: args.kind.unwrap_or(config.browse.default_filter),
        reset_page_on_search: config.browse.reset_page_on_search,
        route: args.route.unwrap_or_default(),
    };
    tracing::info!(term = %options.term, filter = %options.filter, "Starting browser");
    run_browser(&client, options).await
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all, fields(query = %args.query))]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let client = build_omdb_client(config)?;
    let params = SearchParams::new(&args.query).filter(args.kind);

    let results = client
        .search(&params)
        .await
        .context("OMDb search request failed")?;

    let total_pages = pagination::total_pages(results.len());
    let visible = pagination::visible_slice(&results, args.page);

    tracing::info!("IMDb\t\tYear\t\tType\tTitle");
    for movie in visible {
        tracing::info!(
            "{}\t{}\t\t{}\t{}",
            movie.id,
            movie.year,
            movie.kind.as_deref().unwrap_or("-"),
            movie.title,
        );
    }
    if visible.is_empty() {
        tracing::info!("No movies found");
    }
    let buttons: Vec<String> = pagination::page_buttons(results.len())
        .iter()
        .map(ToString::to_string)
        .collect();
    tracing::info!("Pages: [{}]", buttons.join("] ["));
    tracing::info!(
        "Page {} of {} ({} results)",
        args.page,
        total_pages,
        results.len()
    );

    Ok(())
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the lookup fails.
#[instrument(skip_all, fields(id = %args.id))]
async fn run_detail(args: &DetailArgs, config: &AppConfig) -> Result<()> {
    let client = build_omdb_client(config)?;

    let detail = client
        .movie_detail(&args.id)
        .await
        .context("OMDb detail request failed")?;

    tracing::info!("{} ({})", detail.title, detail.year);
    tracing::info!("Genre:    {}", detail.genre.as_deref().unwrap_or("-"));
    tracing::info!("Director: {}", detail.director.as_deref().unwrap_or("-"));
    tracing::info!("Runtime:  {}", detail.runtime.as_deref().unwrap_or("-"));
    tracing::info!("Actors:   {}", detail.actors);
    tracing::info!("Plot:     {}", detail.plot);
    tracing::info!("Poster:   {}", detail.poster_url.as_deref().unwrap_or("-"));

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(dir: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(dir: Option<&Path>, config: &AppConfig) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let content =
        toml::to_string_pretty(&config.redacted()).context("failed to serialize config to TOML")?;
    tracing::info!("# {}", path.display());
    for line in content.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Writes shell completions to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = String::from(cmd.get_name());
    clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Browse(BrowseArgs::default()));

    if let Commands::Completions(args) = &command {
        run_completions(args);
        return Ok(());
    }

    let _log_guard = if matches!(command, Commands::Browse(_)) {
        let log_path = resolve_log_path(dir, cli.log_file.as_deref())?;
        logging::init_tracing(Some(&log_path))?
    } else {
        logging::init_tracing(cli.log_file.as_deref())?
    };

    match command {
        Commands::Browse(args) => run_browse(args, &load_config(dir)?).await,
        Commands::Search(args) => run_search(&args, &load_config(dir)?).await,
        Commands::Detail(args) => run_detail(&args, &load_config(dir)?).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init { force } => run_config_init(dir, force),
            ConfigSubcommands::Show => run_config_show(dir, &load_config(dir)?),
        },
        Commands::Completions(_) => Ok(()),
    }
}
