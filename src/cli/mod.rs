//! Command-line interface

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use serde_json::json;

use crate::infrastructure::logging::scrub;

/// Print a command failure and exit non-zero
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let message = scrub(&format!("{err:#}"));
    if json_mode {
        eprintln!("{}", json!({ "error": message }));
    } else {
        eprintln!("Error: {message}");
    }
    std::process::exit(1)
}
