use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zcalc::ai::{GeminiClient, SolverGateway};
use zcalc::calculator::tokenize;
use zcalc::config::Config;
use zcalc::history::JsonFileStore;
use zcalc::session::Session;
use zcalc::ui::{render_history, render_state, run_repl};

#[derive(Parser)]
#[command(name = "zcalc", version, about = "Keypad calculator with history and an AI solver")]
struct Cli {
    /// Path to an alternative config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive keypad (the default).
    Repl,
    /// Press keys on a fresh calculator and print the display.
    Keys {
        /// Keypad tokens, e.g. `5 + 3 =` or `12.5*4=`.
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Show or clear past calculations.
    History {
        #[arg(long)]
        clear: bool,
        /// Print the stored records as JSON.
        #[arg(long, conflicts_with = "clear")]
        json: bool,
    },
    /// Ask the AI solver a question.
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &Config) -> Result<JsonFileStore> {
    match &config.history.dir {
        Some(dir) => Ok(JsonFileStore::in_dir(dir)),
        None => JsonFileStore::default_location().context("Failed to locate history storage"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let store = open_store(&config)?;
    tracing::debug!(path = %store.path().display(), "Using history store");
    let mut session = Session::open(store);
    let gateway = GeminiClient::from_config(&config.ai);

    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_repl(&mut session, &gateway, stdin, &mut stdout).await?;
        }
        Command::Keys { tokens } => {
            let keys = tokenize(&tokens.join(" ")).context("Invalid keypad input")?;
            session.press_all(keys);
            writeln!(stdout, "{}", render_state(session.state()))?;
        }
        Command::History { clear: true, .. } => {
            session.clear_history();
            writeln!(stdout, "History cleared.")?;
        }
        Command::History { json: true, .. } => {
            let json = serde_json::to_string_pretty(session.history().entries())
                .context("Failed to encode history")?;
            writeln!(stdout, "{}", json)?;
        }
        Command::History { .. } => {
            writeln!(stdout, "{}", render_history(session.history()))?;
        }
        Command::Ask { query } => {
            let query = query.join(" ");
            if !gateway.has_key() {
                tracing::info!("Set GEMINI_API_KEY or [ai].api_key to enable the solver");
            }
            let answer = gateway.solve(&query).await;
            writeln!(stdout, "{}", answer)?;
        }
    }

    Ok(())
}
