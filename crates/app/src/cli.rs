//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage Tandem IDE projects from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tandem", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Settings file (defaults to ./tandem.toml when present).
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Access token to start the session with.
    #[arg(long, global = true, env = "TANDEM_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Refresh token used to obtain new access tokens.
    #[arg(long, global = true, env = "TANDEM_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Work with projects.
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Show whether the session holds credentials.
    Status,
}

/// Project commands.
#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List the projects you have joined.
    List,

    /// Delete a project.
    Delete {
        /// Project id.
        id: String,
    },

    /// Set a new project password (4 to 10 characters).
    SetPassword {
        /// Project id.
        id: String,
        /// New password.
        password: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_password() {
        let cli = Cli::try_parse_from([
            "tandem",
            "projects",
            "set-password",
            "7",
            "abcd",
            "--access-token",
            "abc123",
        ])
        .unwrap();

        assert_eq!(cli.access_token.as_deref(), Some("abc123"));
        match cli.command {
            Command::Projects(ProjectsCommand::SetPassword { id, password }) => {
                assert_eq!(id, "7");
                assert_eq!(password, "abcd");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Cli::try_parse_from(["tandem", "projects", "delete"]).is_err());
    }
}
