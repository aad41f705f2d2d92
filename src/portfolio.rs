use std::fs::read_to_string;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml::from_str;

const BUILTIN: &str = include_str!("../deployment/portfolio.toml");

/// Static data served by the profile and project endpoints.
///
/// It is read once at startup and never modified afterwards.
#[derive(Debug, Deserialize, Serialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub projects: Vec<Project>,
}

impl Portfolio {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let text = read_to_string(path)
            .with_context(|| format!("Failed to read portfolio at {}", path.display()))?;

        let val = from_str(&text)
            .with_context(|| format!("Failed to parse portfolio at {}", path.display()))?;

        Ok(val)
    }

    pub fn builtin() -> Result<Self> {
        let val = from_str(BUILTIN).context("Failed to parse built-in portfolio")?;

        Ok(val)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub location: String,
    pub headline: String,
    pub years_experience: String,
    pub specialties: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub tech: Vec<String>,
    pub description: String,
    pub link: String,
}
