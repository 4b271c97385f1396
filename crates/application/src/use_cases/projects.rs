//! Project management use cases.
//!
//! All three go through the shared [`AuthenticatedClient`], so every call
//! is refreshed and authorized by its interceptor chain.

use serde_json::json;
use tandem_domain::{Paged, Project, ProjectId, ProjectPassword};
use tracing::info;

use crate::ApplicationResult;
use crate::client::AuthenticatedClient;

/// Path listing the projects the user has joined.
pub const JOINED_PROJECTS_PATH: &str = "/api/projects/me/joined";

fn project_path(id: &ProjectId) -> String {
    format!("/api/projects/{id}")
}

/// Lists the projects the user was invited to.
pub struct ListJoinedProjects {
    client: AuthenticatedClient,
}

impl ListJoinedProjects {
    /// Creates the use case.
    #[must_use]
    pub const fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Fetches the joined-project listing.
    ///
    /// # Errors
    /// Returns transport, status or decode errors.
    pub async fn execute(&self) -> ApplicationResult<Vec<Project>> {
        let page: Paged<Project> = self.client.get_json(JOINED_PROJECTS_PATH).await?;
        let projects = page.into_items();
        info!(count = projects.len(), "fetched joined projects");
        Ok(projects)
    }
}

/// Deletes a project.
pub struct DeleteProject {
    client: AuthenticatedClient,
}

impl DeleteProject {
    /// Creates the use case.
    #[must_use]
    pub const fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Deletes the project. The id is validated before any request.
    ///
    /// # Errors
    /// Returns `Domain` for an invalid id, otherwise transport or status errors.
    pub async fn execute(&self, project_id: &str) -> ApplicationResult<()> {
        let id = ProjectId::parse(project_id)?;
        self.client.delete(project_path(&id)).await?;
        info!(project_id = %id, "project deleted");
        Ok(())
    }
}

/// Input for [`ChangeProjectPassword`].
#[derive(Debug, Clone)]
pub struct ChangeProjectPasswordInput {
    /// Project to update.
    pub project_id: String,
    /// New password, 4 to 10 characters.
    pub password: String,
}

/// Sets a new project password.
pub struct ChangeProjectPassword {
    client: AuthenticatedClient,
}

impl ChangeProjectPassword {
    /// Creates the use case.
    #[must_use]
    pub const fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Validates the input, then sends the new password.
    ///
    /// # Errors
    /// Returns `Domain` for an invalid id or password length; no request
    /// is made in that case.
    pub async fn execute(&self, input: ChangeProjectPasswordInput) -> ApplicationResult<()> {
        let id = ProjectId::parse(input.project_id)?;
        let password = ProjectPassword::parse(input.password)?;

        let path = format!("{}/new-password", project_path(&id));
        self.client
            .patch_json(path, &json!({ "password": password.as_str() }))
            .await?;
        info!(project_id = %id, "project password changed");
        Ok(())
    }
}
