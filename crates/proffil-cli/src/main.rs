#![forbid(unsafe_code)]

//! Proffil CLI
//!
//! Interactive driver for profile watching: step through user identifiers,
//! hide and show the view, and watch state transitions stream by. Stepping
//! to the next user while the previous fetch is still in flight cancels it —
//! only the identifier you end up on gets rendered.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use proffil_client::{HttpSource, ProfileWatcher, SourceConfig};
use proffil_core::UserId;

/// Watch user profiles from a changing identifier
#[derive(Parser, Debug)]
#[command(name = "proffil")]
#[command(about = "Watch user profiles from a changing identifier", long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the profile endpoint (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Identifier to watch first
    #[arg(short, long, default_value_t = 1)]
    user: u64,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Prev,
    Goto(u64),
    Hide,
    Show,
    Quit,
}

impl Command {
    /// Parses a line of input; `None` if it is not a recognizable command.
    fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()? {
            "n" | "next" => Self::Next,
            "p" | "prev" => Self::Prev,
            "g" | "goto" => Self::Goto(words.next()?.parse().ok()?),
            "h" | "hide" => Self::Hide,
            "s" | "show" => Self::Show,
            "q" | "quit" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

fn load_config(path: Option<&Path>) -> Result<SourceConfig> {
    let Some(path) = path else {
        return Ok(SourceConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }

    let source = Arc::new(HttpSource::new(config)?);
    let watcher = ProfileWatcher::new(source);

    // Render every state transition as it lands.
    let mut state = watcher.subscribe();
    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let current = state.borrow_and_update().clone();
            println!("{current}");
        }
    });

    println!("commands: n(ext), p(rev), g(oto) <id>, h(ide), s(how), q(uit)");

    let mut current = UserId::new(args.user.max(1));
    let mut visible = true;
    watcher.watch(current);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                eprintln!("unrecognized command: {}", line.trim());
            }
            continue;
        };
        match command {
            Command::Next => {
                current = UserId::new(current.as_u64() + 1);
                if visible {
                    watcher.watch(current);
                }
            }
            Command::Prev => {
                current = UserId::new(current.as_u64().saturating_sub(1).max(1));
                if visible {
                    watcher.watch(current);
                }
            }
            Command::Goto(id) => {
                current = UserId::new(id);
                if visible {
                    watcher.watch(current);
                }
            }
            Command::Hide => {
                visible = false;
                watcher.clear();
            }
            Command::Show => {
                visible = true;
                watcher.watch(current);
            }
            Command::Quit => break,
        }
    }

    Ok(())
}
