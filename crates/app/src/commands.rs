//! Command execution.

use std::io::Write;

use tandem_application::{
    ChangeProjectPassword, ChangeProjectPasswordInput, DeleteProject, ListJoinedProjects,
    TokenStore,
};
use tandem_domain::{AccessToken, Project, RefreshToken};
use tandem_infrastructure::{ClientSettings, build_client};
use tracing::debug;

use crate::cli::{Cli, Command, ProjectsCommand};
use crate::error::AppResult;

/// Runs the parsed command against the backend described by `settings`,
/// writing user-facing output to `out`.
///
/// # Errors
/// Returns an error if the client cannot be built, the command fails or
/// output cannot be written.
pub async fn run<W: Write>(cli: Cli, settings: &ClientSettings, out: &mut W) -> AppResult<()> {
    let store = TokenStore::new();
    start_session(&store, cli.access_token, cli.refresh_token).await;

    match cli.command {
        Command::Status => {
            let status = store.status().await;
            writeln!(out, "{}", status.display_message())?;
        }
        Command::Projects(command) => {
            let client = build_client(settings, store)?;
            match command {
                ProjectsCommand::List => {
                    let projects = ListJoinedProjects::new(client).execute().await?;
                    write_projects(out, &projects)?;
                }
                ProjectsCommand::Delete { id } => {
                    DeleteProject::new(client).execute(&id).await?;
                    writeln!(out, "Deleted project {id}")?;
                }
                ProjectsCommand::SetPassword { id, password } => {
                    ChangeProjectPassword::new(client)
                        .execute(ChangeProjectPasswordInput {
                            project_id: id.clone(),
                            password,
                        })
                        .await?;
                    writeln!(out, "Password changed for project {id}")?;
                }
            }
        }
    }

    Ok(())
}

/// Seeds the store with the tokens given on the command line.
async fn start_session(store: &TokenStore, access: Option<String>, refresh: Option<String>) {
    let refresh = refresh.filter(|t| !t.is_empty()).map(RefreshToken::new);
    let access = access.map(AccessToken::new).unwrap_or_default();

    if access.is_empty() && refresh.is_none() {
        debug!("starting without credentials");
        return;
    }
    store.login(access, refresh).await;
}

fn write_projects<W: Write>(out: &mut W, projects: &[Project]) -> std::io::Result<()> {
    if projects.is_empty() {
        return writeln!(out, "No joined projects.");
    }

    let id_width = column_width(projects.iter().map(|p| p.id.as_str()), "ID");
    let name_width = column_width(projects.iter().map(|p| p.name.as_str()), "NAME");
    let lang_width = column_width(
        projects.iter().map(|p| p.programming_language.as_str()),
        "LANGUAGE",
    );

    writeln!(
        out,
        "{:<id_width$}  {:<name_width$}  {:<lang_width$}  UPDATED",
        "ID", "NAME", "LANGUAGE"
    )?;
    for project in projects {
        writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {:<lang_width$}  {}",
            project.id, project.name, project.programming_language, project.updated_at
        )?;
    }
    Ok(())
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
        .min(40)
}
