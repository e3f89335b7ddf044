//! blockcraft - voxel building-blocks sandbox
//!
//! Headless builder console: reads text commands from stdin or a command
//! script and drives a single building session saved to disk.

mod command_script;
mod commands;
mod config;

use anyhow::{Context, Result};
use blockcraft_testkit::{JsonlSink, TranscriptHeader, TranscriptRecord};
use blockcraft_world::{BuilderSession, FileStore, KeyValueStore};
use clap::Parser;
use command_script::CommandScriptPlayer;
use commands::{execute_command, parse_command, CommandOutput};
use config::{BuilderConfig, DEFAULT_CONFIG_PATH};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Voxel building-blocks sandbox console", long_about = None)]
struct Args {
    /// Builder configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory for saved projects (overrides storage.directory)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Run a JSON command script instead of reading stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write every executed command to a JSONL transcript
    #[arg(long)]
    transcript: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    executed: u64,
    failed: u64,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var).
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting blockcraft v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = BuilderConfig::load_from_path(&args.config);
    debug!(gesture = ?config.gesture_config(), "pointer thresholds");

    let save_dir = args
        .save_dir
        .clone()
        .unwrap_or_else(|| config.storage.directory.clone());
    let store = FileStore::new(&save_dir)
        .with_context(|| format!("Failed to open save directory {}", save_dir.display()))?;
    let options = config.session_options();
    info!(
        bounds = %options.bounds,
        key = %options.storage_key,
        dir = %save_dir.display(),
        "session ready"
    );
    let mut session = BuilderSession::new(options, store);

    let mut transcript = match &args.transcript {
        Some(path) => {
            let mut sink = JsonlSink::create(path)?;
            sink.write(&TranscriptHeader::now())?;
            Some(sink)
        }
        None => None,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.script {
        Some(path) => {
            let script = CommandScriptPlayer::from_path(path)?;
            info!(
                steps = script.remaining(),
                script = %path.display(),
                "running command script"
            );
            run_commands(&mut session, script, transcript.as_mut(), &mut out)?
        }
        None => {
            let lines = io::stdin()
                .lock()
                .lines()
                .map_while(|line| line.ok())
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .take_while(|line| !matches!(line.as_str(), "quit" | "exit"));
            run_commands(&mut session, lines, transcript.as_mut(), &mut out)?
        }
    };

    if let Some(sink) = transcript.as_mut() {
        sink.flush()?;
    }
    info!(
        executed = summary.executed,
        failed = summary.failed,
        "session finished"
    );
    Ok(())
}

/// Parse and execute each command, echoing output lines to `out`.
fn run_commands<S, I, W>(
    session: &mut BuilderSession<S>,
    commands: I,
    mut transcript: Option<&mut JsonlSink>,
    out: &mut W,
) -> Result<RunSummary>
where
    S: KeyValueStore,
    I: IntoIterator<Item = String>,
    W: Write,
{
    let mut summary = RunSummary::default();
    for input in commands {
        let output = match parse_command(&input) {
            Ok(cmd) => execute_command(session, cmd),
            Err(err) => CommandOutput::error(&err),
        };
        for line in &output.lines {
            writeln!(out, "{line}")?;
        }
        if let Some(sink) = transcript.as_deref_mut() {
            sink.write(&TranscriptRecord {
                step: summary.executed,
                command: &input,
                success: output.success,
                message: &output.lines.join("\n"),
            })?;
        }
        summary.executed += 1;
        if !output.success {
            summary.failed += 1;
        }
    }
    Ok(summary)
}
