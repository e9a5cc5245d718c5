// src/config.rs
// =============================================================================
// This module holds the run configuration and the worker-count policy.
//
// Where values come from:
// - Command-line flags, when given (see src/cli.rs)
// - Interactive prompts, when flags are missing
// - Built-in defaults, when the user just presses Enter
//
// Whatever the source, the policy is the same: default to 16 workers,
// never exceed 10x the machine's core count, and never treat bad input
// as fatal - fall back instead.
// =============================================================================

use std::io::{self, Write};

use anyhow::Result;

// Worker count used when the user doesn't pick one
pub const DEFAULT_WORKER_COUNT: usize = 16;

// Configuration for one run, immutable once built
//
// Both fields are decided before dispatch starts and only read
// afterwards, so they can be shared freely.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The website identifier substituted into every template
    pub website_url: String,
    /// How many workers drain the task queue concurrently
    pub worker_count: usize,
}

// The most workers we allow: 10x the available CPU cores
//
// Workers spend almost all their time waiting on the network, so many
// more workers than cores is reasonable - but unbounded counts only
// add scheduling overhead and socket pressure.
pub fn worker_ceiling() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cores * 10
}

// Applies the worker-count policy to whatever the user asked for
//
// Returns the effective count plus an optional notice to show the
// user when their request was clamped.
//
// Policy:
//   nothing requested  -> DEFAULT_WORKER_COUNT
//   1..=ceiling        -> used as-is
//   above the ceiling  -> clamped to the ceiling, with a notice
//   zero               -> treated like nothing requested
pub fn resolve_worker_count(requested: Option<usize>) -> (usize, Option<String>) {
    let ceiling = worker_ceiling();

    match requested {
        Some(n) if (1..=ceiling).contains(&n) => (n, None),
        Some(n) if n > ceiling => (
            ceiling,
            Some(format!(
                "Worker count {} is too high, limited to {}",
                n, ceiling
            )),
        ),
        _ => (DEFAULT_WORKER_COUNT, None),
    }
}

// Prints a prompt and reads one trimmed line from stdin
fn prompt_line(message: &str) -> Result<String> {
    print!("{}", message);
    // print! doesn't flush, and the prompt has no newline, so flush
    // explicitly or the user stares at a blank line
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

// Asks for the website identifier
pub fn prompt_website() -> Result<String> {
    prompt_line("Your website (without http): ")
}

// Asks for the worker count
//
// Empty or non-numeric input returns None, which the policy above
// turns into the default. Bad input is never an error here.
pub fn prompt_worker_count() -> Result<Option<usize>> {
    let message = format!(
        "Worker count (default {}, at most {} recommended): ",
        DEFAULT_WORKER_COUNT,
        worker_ceiling()
    );
    let input = prompt_line(&message)?;

    if input.is_empty() {
        return Ok(None);
    }
    Ok(input.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspecified_count_defaults_to_16() {
        let (count, notice) = resolve_worker_count(None);
        assert_eq!(count, DEFAULT_WORKER_COUNT);
        assert!(notice.is_none());
    }

    #[test]
    fn test_count_within_ceiling_is_kept() {
        let (count, notice) = resolve_worker_count(Some(1));
        assert_eq!(count, 1);
        assert!(notice.is_none());
    }

    #[test]
    fn test_count_above_ceiling_is_clamped_with_notice() {
        let ceiling = worker_ceiling();
        let (count, notice) = resolve_worker_count(Some(ceiling + 1));
        assert_eq!(count, ceiling);
        assert!(notice.is_some());
    }

    #[test]
    fn test_zero_falls_back_to_default() {
        let (count, notice) = resolve_worker_count(Some(0));
        assert_eq!(count, DEFAULT_WORKER_COUNT);
        assert!(notice.is_none());
    }
}
