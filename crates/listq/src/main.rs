//! # listq CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/listqapp/` — the UI-agnostic query library
//! - `crates/listq/` — this CLI, one client of that library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/listq/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and dispatch (commands.rs)               │
//! │  - Text and JSON output (render.rs, styles.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/listqapp/src/api.rs)                     │
//! │  - Loads records, runs the pipeline, syncs query state      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns all user-facing
//! concerns: argument parsing, persistence paths, error reporting, rendering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
