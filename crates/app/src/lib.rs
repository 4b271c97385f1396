//! Tandem command line front end.
//!
//! Parses arguments, loads [`ClientSettings`](tandem_infrastructure::ClientSettings),
//! builds the shared authenticated client and runs one project command.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command, ProjectsCommand};
pub use commands::run;
pub use error::{AppError, AppResult};
