//! # Roster CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/roster/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - dispatch to the API facade (commands.rs)                 │
//! │  - plain-text tables and messages (render.rs)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/rosterapp/src/api.rs)                    │
//! │  - Dispatches to registries, composes the owner grid        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/rosterapp/src/commands/*)            │
//! │  - Pure business logic + data access                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument
//! parsing, context initialization, rendering and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
