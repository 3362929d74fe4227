//! Smoke-test binary library exports.
//!
//! Modules:
//! - `cli`: command-line argument parsing with clap
//! - `commands`: command implementations against a live engine
//! - `sample`: deterministic synthetic corpus collaborators

pub mod cli;
pub mod commands;
pub mod sample;

pub use cli::{Cli, Commands};
pub use commands::{
    build_service, init_logging, load_config, run_create, run_delete, run_index, run_reset,
    run_search, run_similar, run_status,
};
