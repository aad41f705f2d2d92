use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::portfolio::{Portfolio, Profile, Project};

pub async fn profile(State(portfolio): State<&'static Portfolio>) -> Json<&'static Profile> {
    Json(&portfolio.profile)
}

pub async fn projects(State(portfolio): State<&'static Portfolio>) -> Json<ProjectsPage> {
    Json(ProjectsPage {
        projects: &portfolio.projects,
    })
}

#[derive(Serialize)]
pub struct ProjectsPage {
    projects: &'static [Project],
}
