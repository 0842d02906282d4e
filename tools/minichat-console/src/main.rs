//! Line-oriented console for the mini chat model.
//!
//! Reads one command per line from stdin (or `--script`), runs it against an
//! in-memory controller and redraws the chat. State lives only for the life
//! of the process.

mod command;
mod render;
mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use minichat_common::roster::{Roster, DEFAULT_MEMBERS};
use minichat_common::view::ViewConfig;
use minichat_common::Controller;
use tracing_subscriber::EnvFilter;

use crate::command::ConsoleCommand;
use crate::session::{Flow, Session};

#[derive(Parser)]
#[command(name = "minichat", about = "Mini chat priority queue + undo console")]
struct Cli {
    /// Activity log entries shown under the chat.
    #[arg(long, env = "MINICHAT_LOG_TAIL", default_value_t = 3)]
    log_tail: usize,

    /// Characters of the last deleted message shown before truncating.
    #[arg(long, default_value_t = 30)]
    preview_chars: usize,

    /// Comma-separated chat member names.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_MEMBERS.map(String::from)
    )]
    members: Vec<String>,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the view as JSON after each command instead of text panels.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = ViewConfig {
        log_tail: cli.log_tail,
        preview_chars: cli.preview_chars,
    };
    let controller = Controller::new().with_roster(Roster::from_names(cli.members));
    let mut session = Session::new(controller, config, cli.json);

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            let name = path.display();
            let file = File::open(path).with_context(|| format!("opening script {name}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };
    let interactive = cli.script.is_none();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    tracing::info!(
        log_tail = config.log_tail,
        json = cli.json,
        "console started"
    );
    session.redraw(&mut out)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        if !interactive {
            writeln!(out, "> {line}")?;
        }

        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        tracing::debug!(?command, "parsed console command");

        if session.execute(command, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    let state = session.controller().state();
    tracing::info!(
        delivered = state.store().len(),
        pending = state.pending().len(),
        deleted = state.undo_stack().len(),
        "console finished"
    );
    Ok(())
}
