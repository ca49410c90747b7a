//! CLI binary for scan2rx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `LayoutConfig` / extraction calls and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scan2rx::{extract_from_file, reconstruct_from_file, write_record, write_text, LayoutConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Reconstruct readable lines from an OCR detection file (stdout)
  scan2rx lines output/large_res.json

  # Reconstruct to a file, with a wider space divisor
  scan2rx lines --gap-px 15 output/large_res.json -o report.txt

  # Extract a prescription record from an LLM response (pretty JSON)
  scan2rx extract response.txt -o prescription.json

  # Compact JSON on stdout
  scan2rx extract --compact response.txt

ENVIRONMENT VARIABLES:
  SCAN2RX_OUTPUT   Default output path
  SCAN2RX_VERBOSE  Enable DEBUG-level tracing logs
  RUST_LOG         Full tracing filter override (e.g. scan2rx=debug)
"#;

/// Reconstruct OCR text lines and extract structured prescription records.
#[derive(Parser, Debug)]
#[command(
    name = "scan2rx",
    version,
    about = "Reconstruct OCR text lines and extract structured prescription records",
    long_about = "Turn unordered OCR detections into readable text lines ordered the way a \
human reads the page, and parse LLM-generated prescription text into structured JSON records.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SCAN2RX_VERBOSE", global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconstruct readable text lines from an OCR detection file.
    Lines {
        /// OCR result JSON with `rec_texts` and `rec_boxes` arrays.
        input: PathBuf,

        /// Write reconstructed text to this file instead of stdout.
        #[arg(short, long, env = "SCAN2RX_OUTPUT")]
        output: Option<PathBuf>,

        /// Fraction of the smaller box height that must overlap for two
        /// detections to share a line (0 < ratio <= 1).
        #[arg(long, default_value_t = 0.6)]
        overlap_ratio: f32,

        /// Horizontal pixels represented by one space character.
        #[arg(long, default_value_t = 10.0)]
        gap_px: f32,
    },

    /// Extract a structured prescription record from LLM response text.
    Extract {
        /// Text file holding the raw LLM response.
        input: PathBuf,

        /// Write the JSON record to this file instead of stdout.
        #[arg(short, long, env = "SCAN2RX_OUTPUT")]
        output: Option<PathBuf>,

        /// Emit compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Lines {
            input,
            output,
            overlap_ratio,
            gap_px,
        } => {
            let config = LayoutConfig::builder()
                .overlap_ratio(overlap_ratio)
                .gap_px_per_space(gap_px)
                .build()
                .context("Invalid layout configuration")?;

            let document = reconstruct_from_file(&input, &config)
                .with_context(|| format!("Failed to reconstruct {}", input.display()))?;

            match output {
                Some(path) => {
                    write_text(&document, &path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    if !cli.quiet {
                        eprintln!("{} lines → {}", document.len(), path.display());
                    }
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    handle
                        .write_all(document.text().as_bytes())
                        .context("Failed to write to stdout")?;
                }
            }
        }

        Command::Extract {
            input,
            output,
            compact,
        } => {
            let record = extract_from_file(&input)
                .with_context(|| format!("Failed to extract {}", input.display()))?;

            match output {
                Some(path) => {
                    write_record(&record, &path, !compact)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    if !cli.quiet {
                        eprintln!(
                            "{} medications, {} tests → {}",
                            record.medications.len(),
                            record.medical_tests.len(),
                            path.display()
                        );
                    }
                }
                None => {
                    let json = if compact {
                        serde_json::to_string(&record)
                    } else {
                        serde_json::to_string_pretty(&record)
                    }
                    .context("Failed to serialise record")?;
                    println!("{json}");
                }
            }
        }
    }

    Ok(())
}
