//! vfx-feedback — turn review emails and chat logs into per-shot records.
//!
//! Two modes, like shdoc:
//!
//! - **stdin mode**: `vfx-feedback < message.txt` prints records to stdout
//! - **file mode**: `vfx-feedback -o out/ inbox/*.txt` writes one output per message

mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vfx_feedback::{ExtractOptions, Extractor, VersionCapture};

#[derive(Parser)]
#[command(
    name = "vfx-feedback",
    about = "Extract per-shot review notes and attachments from feedback messages"
)]
struct Cli {
    /// Input message files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// TOML file with extraction options
    #[arg(short = 'c', long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in shot pattern preset
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Regex for shot identifiers, overriding the preset or config file
    #[arg(long)]
    shot_pattern: Option<String>,

    /// Normalize versions to v<digits> and report the numeric version
    #[arg(long)]
    strict_version: bool,

    /// Log extraction decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Three or more underscore-joined segments
    Default,
    /// Any number of segments (SHOT001_v1)
    Permissive,
    /// Exactly three segments, extra segments become a service suffix
    ExactlyThree,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = resolve_options(&cli)?;
    let extractor = Extractor::new(&options)?;

    if cli.files.is_empty() {
        return stdin_mode(&cli, &extractor);
    }

    file_mode(&cli, &extractor)
}

/// Log to stderr so stdout stays clean for rendered output. `RUST_LOG`
/// takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("vfx_feedback=debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Preset or config file first, then individual flags on top.
fn resolve_options(cli: &Cli) -> Result<ExtractOptions> {
    let mut options = match (&cli.config, cli.preset) {
        (Some(path), _) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            ExtractOptions::from_toml(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        (None, Some(Preset::Permissive)) => ExtractOptions::permissive(),
        (None, Some(Preset::ExactlyThree)) => ExtractOptions::exactly_three(),
        (None, Some(Preset::Default) | None) => ExtractOptions::default(),
    };

    if let Some(ref pattern) = cli.shot_pattern {
        options.shot_pattern = pattern.clone();
    }
    if cli.strict_version {
        options.version_capture = VersionCapture::Strict;
    }
    Ok(options)
}

/// stdin mode: read one message, write rendered records to stdout.
fn stdin_mode(cli: &Cli, extractor: &Extractor) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let records = extractor.extract(&input);
    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&records)?);
    Ok(())
}

/// file mode: extract each message and write `<stem>.<ext>` into the output directory.
fn file_mode(cli: &Cli, extractor: &Extractor) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    for path in expand_globs(&cli.files)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let records = extractor.extract(&content);
        tracing::info!(file = %path.display(), records = records.len(), "extracted");

        let out_path = output_dir.join(format!("{}.{}", derive_output_name(&path), ext));
        fs::write(&out_path, renderer.render(&records)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Message files picked up when a directory is given.
const MESSAGE_EXTENSIONS: &[&str] = &["txt", "eml"];

fn is_message_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| MESSAGE_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
}

/// Resolve inputs to message files: plain files as given, directories
/// scanned one level deep, anything else as a glob.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            files.extend(
                entries
                    .flatten()
                    .map(|entry| entry.path())
                    .filter(|p| is_message_file(p)),
            );
        } else {
            let before = files.len();
            files.extend(
                glob::glob(pattern)
                    .with_context(|| format!("invalid glob pattern: {}", pattern))?
                    .flatten()
                    .filter(|p| p.is_file()),
            );
            if files.len() == before {
                tracing::warn!("no files matched: {}", pattern);
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// "inbox/review_0612.txt" → "review_0612"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
