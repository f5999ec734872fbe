//! # CLI Behavior
//!
//! This is **one possible UI client** for listq. It is the only place that knows
//! about terminal I/O, exit codes, and output formatting.
//!
//! ## Commands
//!
//! - `listq query --data posts.json` — Run a query and print one page.
//! - `listq facets --data posts.json` — Print the filter options.
//! - `listq config` — Print the resolved configuration.
//!
//! ## Sticky Queries
//!
//! With `--state <file>`, `query` loads the previous query state, applies the
//! flags on top, and saves the result back with the clamped page. Paging
//! through results is then just `listq query --state s.json --page 2`.
//!
//! Changing the search term or a filter resets to page 1, mirroring what a
//! list view does when the result set changes under the user.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch, logging setup, per-command handlers
//! - `render`: Text and JSON output
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
