// src/input.rs
// =============================================================================
// This module loads the URL template list from disk.
//
// The file format is as simple as it gets: one URL template per line,
// each (usually) containing the {url} marker. The whole list is read
// into memory up front - dispatch never touches the file again.
// =============================================================================

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};

// Parses file contents into the template list
//
// Lines are trimmed, so Windows line endings and stray whitespace are
// harmless. Blank lines are skipped - an empty template would just
// burn a request on nothing.
pub fn parse_templates(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// Reads the template file fully into memory
//
// A missing or unreadable file is fatal to the run: there is nothing
// to dispatch, so the caller reports the error and stops.
pub fn read_templates(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(parse_templates(&contents))
}
