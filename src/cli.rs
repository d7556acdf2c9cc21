use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre};

use crate::api::StatsClient;
use crate::api::batch::{FetchOutcome, fetch_for_user};
use crate::config::AppConfig;
use crate::dashboard::{DashboardView, FAILURE_MESSAGE, RenderOptions, derive_view};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "leetdash",
    about = "Terminal dashboard for LeetCode profile statistics",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Username to load on startup
    pub username: Option<String>,

    /// Base URL of the stats API (overrides config and LEETDASH_API_BASE)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui {
        /// Username to load on startup
        username: Option<String>,
    },
    /// Fetch every query for a user and print the raw payloads (JSONL)
    Fetch {
        /// Username (without @)
        username: String,
    },
    /// Fetch a user and print the rendered dashboard as plain text
    Show {
        /// Username (without @)
        username: String,
    },
}

// ---------------------------------------------------------------------------
// Client setup
// ---------------------------------------------------------------------------

/// Build the stats client, letting `--base-url` win over the config file.
pub fn build_client(config: &AppConfig, base_url: Option<&str>) -> eyre::Result<StatsClient> {
    let base = base_url.unwrap_or(&config.api_base_url);
    tracing::info!(base_url = %base, "using stats API");
    StatsClient::new(base, config.request_timeout()).map_err(|e| eyre!("{e}"))
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

pub async fn run_command(
    cmd: CliCommand,
    config: &AppConfig,
    client: &StatsClient,
) -> eyre::Result<()> {
    let opts = RenderOptions {
        problem_base_url: config.problem_base_url.clone(),
    };

    match cmd {
        CliCommand::Tui { .. } => unreachable!("tui is handled in main"),

        CliCommand::Fetch { username } => match fetch(client, &username).await? {
            FetchOutcome::Success(bag) => {
                for (key, data) in bag.iter() {
                    let line = serde_json::to_string(&serde_json::json!({
                        "query": key.name(),
                        "data": data,
                    }))?;
                    println!("{line}");
                }
            }
            FetchOutcome::Failure(_) => return Err(eyre!(FAILURE_MESSAGE)),
        },

        CliCommand::Show { username } => {
            let outcome = fetch(client, &username).await?;
            match derive_view(Some(&outcome), &opts) {
                DashboardView::Error(message) => return Err(eyre!(message)),
                view => print!("{}", render_plain(&view)),
            }
        }
    }

    Ok(())
}

async fn fetch(client: &StatsClient, username: &str) -> eyre::Result<FetchOutcome> {
    let username = username.strip_prefix('@').unwrap_or(username);
    fetch_for_user(client, username)
        .await
        .map_err(|e| eyre!("{e}"))
}

/// Plain-text rendering of a dashboard view: a title line per section
/// followed by its indented lines.
pub fn render_plain(view: &DashboardView) -> String {
    match view {
        DashboardView::Empty => String::new(),
        DashboardView::Error(message) => format!("{message}\n"),
        DashboardView::Sections(sections) => {
            let mut out = String::new();
            for (i, section) in sections.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(section.title());
                out.push('\n');
                for line in section.lines() {
                    out.push_str("  ");
                    out.push_str(&line);
                    out.push('\n');
                }
            }
            out
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
