// In memory Directory, loaded from a JSON seed of alumnos and maestros.
//
// Seed documents were exported from several collections with mixed key
// casing and with ids stored either as strings or integers. All of that is
// folded into `Profile` here; nothing past this module sees the raw shape.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::shared::core::person_id::{PersonId, PersonIdError};
use crate::shared::infrastructure::directory::{Category, Directory, DirectoryError, Profile};

const UNKNOWN_PROGRAM: &str = "N/A";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read directory seed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse directory seed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid person id in {category} seed entry: {source}")]
    InvalidId {
        category: Category,
        #[source]
        source: PersonIdError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

/// Every spelling is its own field so entries carrying more than one of them
/// still parse. The first non-blank spelling wins.
#[derive(Debug, Deserialize)]
struct RawEntry {
    matricula: Option<RawId>,
    #[serde(rename = "Matricula")]
    matricula_capitalized: Option<RawId>,
    nombre_completo: Option<String>,
    nombre: Option<String>,
    #[serde(rename = "Nombre")]
    nombre_capitalized: Option<String>,
    carrera: Option<String>,
    programa: Option<String>,
    #[serde(rename = "Programa")]
    programa_capitalized: Option<String>,
}

fn first_non_blank(candidates: [Option<String>; 3]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct RawSeed {
    #[serde(default)]
    alumnos: Vec<RawEntry>,
    #[serde(default)]
    maestros: Vec<RawEntry>,
}

fn normalize(entry: RawEntry, category: Category) -> Result<Profile, SeedError> {
    let raw_id = match entry.matricula.or(entry.matricula_capitalized) {
        Some(RawId::Text(text)) => text,
        Some(RawId::Number(number)) => number.to_string(),
        None => String::new(),
    };
    let person_id =
        PersonId::parse(&raw_id).map_err(|source| SeedError::InvalidId { category, source })?;
    let display_name =
        first_non_blank([entry.nombre_completo, entry.nombre, entry.nombre_capitalized])
            .unwrap_or_default();
    let program = first_non_blank([entry.carrera, entry.programa, entry.programa_capitalized])
        .unwrap_or_else(|| UNKNOWN_PROGRAM.to_string());
    Ok(Profile {
        person_id,
        display_name,
        category,
        program,
    })
}

#[derive(Default)]
pub struct InMemoryDirectory {
    alumnos: HashMap<PersonId, Profile>,
    maestros: HashMap<PersonId, Profile>,
    offline: AtomicBool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let mut directory = Self::new();
        for profile in profiles {
            directory.insert(profile);
        }
        directory
    }

    pub fn from_seed_str(seed: &str) -> Result<Self, SeedError> {
        let raw: RawSeed = serde_json::from_str(seed)?;
        let mut directory = Self::new();
        for entry in raw.alumnos {
            directory.insert(normalize(entry, Category::Alumno)?);
        }
        for entry in raw.maestros {
            directory.insert(normalize(entry, Category::Maestro)?);
        }
        Ok(directory)
    }

    pub fn from_seed_file(path: &Path) -> Result<Self, SeedError> {
        let seed = std::fs::read_to_string(path)?;
        Self::from_seed_str(&seed)
    }

    pub fn insert(&mut self, profile: Profile) {
        let target = match profile.category {
            Category::Alumno => &mut self.alumnos,
            Category::Maestro => &mut self.maestros,
        };
        target.insert(profile.person_id.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.alumnos.len() + self.maestros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Directory for InMemoryDirectory {
    async fn resolve(&self, person_id: &PersonId) -> Result<Profile, DirectoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DirectoryError::Backend("Directory offline".into()));
        }
        self.alumnos
            .get(person_id)
            .or_else(|| self.maestros.get(person_id))
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(person_id.clone()))
    }
}
