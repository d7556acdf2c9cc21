pub mod api;
pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod event;
pub mod state;
pub mod ui;

use app::App;
use clap::Parser;
use cli::{Cli, CliCommand};
use config::{AppConfig, load_config};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Initialize tracing (logs to stderr if RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config();
    let client = cli::build_client(&config, cli.base_url.as_deref())?;

    match cli.command {
        // No subcommand or explicit `tui` → launch the interactive TUI.
        None => run_tui(config, client, cli.username).await,
        Some(CliCommand::Tui { username }) => run_tui(config, client, username).await,
        // All other subcommands → non-interactive output.
        Some(cmd) => cli::run_command(cmd, &config, &client).await,
    }
}

/// Launch the interactive TUI.
async fn run_tui(
    config: AppConfig,
    client: api::StatsClient,
    username: Option<String>,
) -> color_eyre::Result<()> {
    let username = username.or_else(|| config.default_username.clone());

    let terminal = ratatui::init();
    let result = App::new(config, client).run(terminal, username).await;
    ratatui::restore();
    result
}
