//! Application use cases (business logic orchestration).

mod projects;

pub use projects::{
    ChangeProjectPassword, ChangeProjectPasswordInput, DeleteProject, JOINED_PROJECTS_PATH,
    ListJoinedProjects,
};
