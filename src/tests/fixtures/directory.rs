// Directory seed used across handler, router and e2e tests.

use crate::shared::infrastructure::directory::in_memory::InMemoryDirectory;

pub const DIRECTORY_SEED: &str = r#"{
    "alumnos": [
        {"matricula": "A001", "nombre_completo": "Juan Pérez García", "carrera": "Ingeniería en Sistemas"},
        {"matricula": "A002", "nombre_completo": "María González López", "carrera": "Ingeniería Industrial"},
        {"Matricula": 20231234, "Nombre": "Luisa Torres", "Programa": "Bachillerato General"}
    ],
    "maestros": [
        {"matricula": "M001", "nombre_completo": "Dr. Roberto Sánchez", "carrera": "Ingeniería en Sistemas"}
    ]
}"#;

pub fn make_directory() -> InMemoryDirectory {
    InMemoryDirectory::from_seed_str(DIRECTORY_SEED).unwrap()
}
