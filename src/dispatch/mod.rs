// src/dispatch/mod.rs
// =============================================================================
// This module contains the concurrent dispatch machinery.
//
// Submodules:
// - executor: Turns one URL template into one HTTP GET and an Outcome
// - pool: Worker pool + task/result plumbing around the executor
//
// This file (mod.rs) is the module root - it exports the public API
// that the rest of the application uses.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod executor;
mod pool;

// Re-export public items from submodules
// This lets users write `dispatch::execute()` instead of
// `dispatch::executor::execute()`
pub use executor::{build_client, execute, resolve_template, Outcome, SUBSTITUTION_MARKER};
pub use pool::dispatch;
