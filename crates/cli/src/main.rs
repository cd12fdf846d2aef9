use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gosuggest_engine::{generate_replacement, offset_at, Contents};

#[derive(Parser)]
#[command(name = "gosuggest")]
#[command(about = "Cursor-driven code suggestions for Go files", long_about = None)]
#[command(version)]
struct Cli {
    /// Cursor location: "path,byte_offset" or "path,line,col" (1-based).
    /// File content is read from stdin, not from the path.
    target: String,

    /// Log to stderr instead of the log file
    #[arg(long)]
    log_stderr: bool,
}

struct Target {
    path: PathBuf,
    locator: Locator,
}

enum Locator {
    Offset(usize),
    LineCol(usize, usize),
}

fn parse_target(raw: &str) -> Result<Target> {
    let parts: Vec<&str> = raw.split(',').collect();
    let locator = match parts.as_slice() {
        [_, offset] => Locator::Offset(
            offset
                .trim()
                .parse()
                .with_context(|| format!("invalid byte offset {offset:?}"))?,
        ),
        [_, line, col] => Locator::LineCol(
            line.trim()
                .parse()
                .with_context(|| format!("invalid line {line:?}"))?,
            col.trim()
                .parse()
                .with_context(|| format!("invalid column {col:?}"))?,
        ),
        _ => bail!("target must be \"path,byte_offset\" or \"path,line,col\", got {raw:?}"),
    };
    Ok(Target {
        path: PathBuf::from(parts[0]),
        locator,
    })
}

/// Stdout carries the replacement JSON, so diagnostics go to a log file
/// under the home directory (or stderr when asked, or when no home
/// directory exists).
fn init_logging(force_stderr: bool) {
    let filter = EnvFilter::try_from_env("GOSUGGEST_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if !force_stderr {
        if let Some(home) = dirs::home_dir() {
            let log_dir = home.join(".gosuggest");
            let opened = fs::create_dir_all(&log_dir).and_then(|()| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(log_dir.join("log.txt"))
            });
            if let Ok(file) = opened {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(file)
                    .with_ansi(false)
                    .init();
                return;
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_stderr);

    let target = parse_target(&cli.target)?;

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("reading file content from stdin")?;

    let offset = match target.locator {
        Locator::Offset(offset) => offset,
        Locator::LineCol(line, col) => offset_at(&text, line, col)
            .with_context(|| format!("position {line}:{col} is outside the file"))?,
    };

    let abs_path = std::path::absolute(&target.path)
        .with_context(|| format!("resolving {}", target.path.display()))?;

    tracing::info!(path = %abs_path.display(), offset, "generating replacement");

    let replacement = generate_replacement(Contents::new(abs_path, &text), offset)?;
    if replacement.is_empty() {
        tracing::info!("no suggestion applies");
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &replacement)?;
    writeln!(stdout)?;
    Ok(())
}
