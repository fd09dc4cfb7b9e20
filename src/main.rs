use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use samvidhan::api::{Backend, HttpBackend};
use samvidhan::chat::FALLBACK;
use samvidhan::cli::{Cli, Command};
use samvidhan::config::Config;
use samvidhan::state::{AppState, View};
use samvidhan::ui::markdown::{lines_to_plain, markdown_to_lines};
use samvidhan::{logging, tui};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    let start = match cli.command {
        Some(Command::Ask { query }) => return ask(&config, &query.join(" ")),
        Some(Command::Quiz) => View::Quiz,
        Some(Command::Chat) => View::Chat,
        None => View::Home,
    };

    if let Some(path) = config.log_path() {
        logging::init_file(&path, &config.log_level);
    }
    info!(api_url = %config.api_url, "starting");

    let backend = HttpBackend::new(&config.api_url).context("cannot set up HTTP client")?;
    let state = AppState::new(backend.base_url());
    tui::run_tui(state, Arc::new(backend), start).context("terminal error")?;
    Ok(0)
}

/// One-shot question on stdout. Exits non-zero when the assistant could
/// not be reached.
fn ask(config: &Config, query: &str) -> Result<i32> {
    logging::init_stderr(&config.log_level);

    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("the question is empty");
    }

    let backend = HttpBackend::new(&config.api_url).context("cannot set up HTTP client")?;
    match backend.query(query) {
        Ok(answer) => {
            println!("{}", lines_to_plain(&markdown_to_lines(&answer.answer)));
            let sources: Vec<String> = answer.top_matches.iter().filter_map(|m| m.label()).collect();
            if !sources.is_empty() {
                println!();
                println!("Sources:");
                for source in sources {
                    println!("  - {}", source);
                }
            }
            Ok(0)
        }
        Err(e) => {
            error!(error = %e, "query failed");
            eprintln!("{}", FALLBACK);
            Ok(1)
        }
    }
}
