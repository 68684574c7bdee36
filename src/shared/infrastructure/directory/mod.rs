use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::shared::core::person_id::PersonId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Alumno,
    Maestro,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alumno => "alumno",
            Category::Maestro => "maestro",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub person_id: PersonId,
    pub display_name: String,
    pub category: Category,
    pub program: String,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("person {0} not found")]
    NotFound(PersonId),

    #[error("directory backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait Directory: Send + Sync {
    async fn resolve(&self, person_id: &PersonId) -> Result<Profile, DirectoryError>;
}

pub mod in_memory;
