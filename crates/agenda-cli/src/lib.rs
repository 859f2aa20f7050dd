//! Agenda CLI - terminal front end for the block request tracker
//!
//! Wires configuration, logging, and the file-backed [`agenda_store::Agenda`]
//! into the `agenda` binary. The library half exists so commands can be
//! exercised against an in-memory store.

#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

pub use cli::{Cli, Command, SubmitArgs};
pub use commands::{draft_from_args, execute, open_agenda, report_generator};
pub use config::{AgendaConfig, ConfigError, ReportConfig};
pub use logging::{init_logging, LogFormat};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
