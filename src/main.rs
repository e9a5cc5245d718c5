// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (prompting for whatever
//    is missing)
// 2. Load the URL template list from disk
// 3. Hand everything to the dispatcher and drain its results
// 4. Print the per-status-class summary and exit
//
// Rust concepts used:
// - async/await: Because we fire many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Closures: To wire the HTTP executor into the worker pool
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - run configuration and prompts
mod dispatch; // src/dispatch/ - worker pool and request execution
mod input; // src/input.rs - template list loading
mod report; // src/report.rs - outcome aggregation

use std::time::Instant;

use clap::Parser;

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::report::RunReport;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = run completed (the 5xx count is the failure signal, not
//           the exit code)
//   Ok(2) = could not start (e.g. missing links file)
//   Err = unexpected error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    if !cli.json {
        println!("🔗 link-seeder v{}", env!("CARGO_PKG_VERSION"));
        println!("{}", "-".repeat(16));
    }

    // Anything not given on the command line is asked for interactively.
    // An explicit website argument means "script mode": don't prompt for
    // the worker count either, just take the default
    let interactive = cli.website.is_none();

    let website_url = match cli.website {
        Some(website) => website.trim().to_string(),
        None => config::prompt_website()?,
    };

    let requested_workers = match cli.workers {
        Some(n) => Some(n),
        None if interactive => config::prompt_worker_count()?,
        None => None,
    };

    let (worker_count, notice) = config::resolve_worker_count(requested_workers);
    if let Some(notice) = notice {
        // Notices go to stderr so they show up even in JSON mode
        eprintln!("⚠️  {}", notice);
    }

    let run_config = RunConfig {
        website_url,
        worker_count,
    };

    if !cli.json {
        println!("Workers: {}", run_config.worker_count);
        println!("{}", "-".repeat(16));
    }

    let started = Instant::now();

    // Load the full template list before anything is dispatched.
    // If the file can't be read there is nothing to do: report it,
    // pause so a double-clicked console window stays readable, and stop
    let templates = match input::read_templates(&cli.links_file) {
        Ok(templates) => templates,
        Err(e) => {
            eprintln!("❌ {}", e);
            if !cli.json {
                pause();
            }
            return Ok(2);
        }
    };

    let total = templates.len();

    // One client for the whole pool - workers share its connection pool
    let client = dispatch::build_client()?;

    // Wire the HTTP executor into the pool. Each call gets its own
    // clone of the client handle and the website string
    let executor = {
        let client = client.clone();
        let website_url = run_config.website_url.clone();
        move |template: String| {
            let client = client.clone();
            let website_url = website_url.clone();
            async move { dispatch::execute(&client, &template, &website_url).await }
        }
    };

    // Dispatch everything and aggregate until the last outcome arrives
    let results = dispatch::dispatch(templates, run_config.worker_count, executor).await;
    let run_report = report::aggregate(results, total, started, !cli.json).await;

    if cli.json {
        // Clean JSON on stdout for piping
        println!("{}", serde_json::to_string_pretty(&run_report)?);
    } else {
        print_summary(&run_report);
        pause();
    }

    Ok(0)
}

// Prints the human-readable end-of-run summary
fn print_summary(run_report: &RunReport) {
    println!();
    println!("✅ All pings dispatched");
    println!("📊 Status class breakdown:");
    println!("   2xx: {}", run_report.tally.success);
    println!("   3xx: {}", run_report.tally.redirect);
    println!("   4xx: {}", run_report.tally.client_error);
    println!("   5xx: {}", run_report.tally.server_error);
    println!("   📋 Total: {}", run_report.total);
    println!("⏱️  Elapsed: {:.2}s", run_report.elapsed_seconds);
}

// Waits for Enter before returning
//
// The tool is often launched by double-clicking; without this the
// console window closes before anyone can read the summary
fn pause() {
    println!();
    println!("Press Enter to exit...");
    let mut _line = String::new();
    let _ = std::io::stdin().read_line(&mut _line);
}
