// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Everything here is optional on purpose: run the binary with no
// arguments and it falls back to interactive prompts, which is how the
// tool is normally used. Flags exist so scripts can skip the prompts.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "link-seeder",
    version = "0.1.0",
    about = "Distributes backlink ping notifications across a list of indexer URLs",
    long_about = "link-seeder takes a list of ping-service URL templates, substitutes your \
                  website into each one, and fires them all concurrently. At the end you get \
                  a per-status-class summary of how the endpoints responded."
)]
pub struct Cli {
    /// Your website identifier, without the http:// prefix
    ///
    /// This is a positional argument. Leave it out and you'll be
    /// prompted for it interactively.
    pub website: Option<String>,

    /// Number of concurrent workers (default: 16)
    ///
    /// Capped at 10x your CPU core count; higher requests are clamped.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Path to the line-delimited list of URL templates
    #[arg(long, default_value = "links.txt")]
    pub links_file: PathBuf,

    /// Output the final report as JSON instead of text
    ///
    /// JSON mode keeps stdout clean for piping: no banner, no progress
    /// lines, no exit pause - just the report.
    #[arg(long)]
    pub json: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<String> for the website?
//    - Option means "maybe provided, maybe not"
//    - None tells main.rs to ask interactively instead
//    - A required positional would break the prompt-driven workflow
//
// 2. What does default_value do?
//    - clap fills the field with "links.txt" when the flag is absent
//    - So links_file is a plain PathBuf, not an Option
//
// 3. Why PathBuf instead of String?
//    - PathBuf is the owned type for filesystem paths
//    - It handles platform differences (separators, encodings) for us
// -----------------------------------------------------------------------------
