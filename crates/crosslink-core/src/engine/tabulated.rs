use super::ForcefieldEngine;
use super::error::EngineError;
use crate::core::models::system::MolecularTopology;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::parameters::POTENTIAL_KEY_SEPARATOR;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
struct TypingRules {
    #[serde(default)]
    by_name: HashMap<String, String>,
    #[serde(default)]
    by_element: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ForcefieldFile {
    #[serde(default)]
    typing: TypingRules,
    #[serde(flatten)]
    sections: HashMap<String, HashMap<String, HashMap<String, f64>>>,
}

#[derive(Debug, Deserialize)]
struct TypeOverride {
    atom_name: String,
    atom_type: String,
}

/// A force-field engine backed by explicit lookup tables.
///
/// This engine performs no rule matching: atoms are typed by exact name,
/// falling back to element symbol, against tables loaded from a TOML file.
/// Parameter sections are arbitrary TOML tables whose entries map a joined
/// type key to named floating-point parameters, e.g.:
///
/// ```toml
/// [typing.by_element]
/// C = "opls_135"
/// H = "opls_140"
///
/// [atoms.opls_135]
/// charge = -0.18
/// sigma = 0.35
/// epsilon = 0.276144
///
/// [harmonic_bonds."opls_135-opls_140"]
/// k = 284512.0
/// length = 0.109
/// ```
///
/// An optional CSV side table (`atom_name,atom_type` records) can override
/// the name-based typing rules without editing the main parameter file.
#[derive(Debug, Clone)]
pub struct TabulatedEngine {
    typing: TypingRules,
    sections: HashMap<String, HashMap<String, HashMap<String, f64>>>,
}

impl TabulatedEngine {
    /// Loads the engine tables from a TOML parameter file.
    pub fn load(forcefield_path: &Path) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(forcefield_path).map_err(|e| EngineError::Io {
                path: forcefield_path.to_string_lossy().to_string(),
                source: e,
            })?;
        let file: ForcefieldFile =
            toml::from_str(&content).map_err(|e| EngineError::Toml {
                path: forcefield_path.to_string_lossy().to_string(),
                source: e,
            })?;

        Ok(Self {
            typing: file.typing,
            sections: file.sections,
        })
    }

    /// Loads the engine tables and merges a CSV type-override side table
    /// over the name-based typing rules.
    pub fn load_with_overrides(
        forcefield_path: &Path,
        overrides_path: &Path,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::load(forcefield_path)?;
        let overrides = Self::load_overrides_csv(overrides_path)?;
        engine.typing.by_name.extend(overrides);
        Ok(engine)
    }

    fn load_overrides_csv(path: &Path) -> Result<HashMap<String, String>, EngineError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| EngineError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut overrides = HashMap::new();
        for result in reader.deserialize::<TypeOverride>() {
            let record = result.map_err(|e| EngineError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            overrides.insert(record.atom_name, record.atom_type);
        }
        Ok(overrides)
    }

    fn joined(key: &[&str]) -> String {
        key.join(&POTENTIAL_KEY_SEPARATOR.to_string())
    }
}

impl ForcefieldEngine for TabulatedEngine {
    fn assign_atom_types(
        &self,
        topology: &MolecularTopology,
    ) -> Result<HashMap<usize, String>, EngineError> {
        let mut type_map = HashMap::with_capacity(topology.atom_count());
        for (index, (_, atom)) in topology.atoms_iter().enumerate() {
            let assigned = self
                .typing
                .by_name
                .get(&atom.name)
                .or_else(|| self.typing.by_element.get(atom.element.symbol()))
                .ok_or_else(|| EngineError::UntypedAtom {
                    index,
                    name: atom.name.clone(),
                })?;
            type_map.insert(index, assigned.clone());
        }
        Ok(type_map)
    }

    fn parameters(
        &self,
        section: &str,
        key: &[&str],
    ) -> Result<HashMap<String, f64>, EngineError> {
        let table = self
            .sections
            .get(section)
            .ok_or_else(|| EngineError::MissingForce {
                section: section.to_string(),
            })?;

        let forward = Self::joined(key);
        if let Some(params) = table.get(&forward) {
            return Ok(params.clone());
        }

        // Bonded parameters are symmetric in their member order.
        let reversed: Vec<&str> = key.iter().rev().copied().collect();
        if let Some(params) = table.get(&Self::joined(&reversed)) {
            return Ok(params.clone());
        }

        Err(EngineError::MissingParameters {
            section: section.to_string(),
            key: forward,
        })
    }
}
