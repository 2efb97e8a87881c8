//! # Parameter Model Module
//!
//! This module defines the engine-agnostic parameter model and the potential
//! handlers that populate it from an external force-field engine.
//!
//! ## Overview
//!
//! Every handler performs the same two-phase bookkeeping:
//!
//! 1. **Matching** - topological features (atoms, bonds, angles, torsions)
//!    are mapped to [`PotentialKey`]s built from engine-assigned atom types,
//!    recorded in a slot map keyed by [`TopologyKey`].
//! 2. **Resolution** - every distinct potential key is resolved against the
//!    engine's parameter tables and republished as a [`Potential`] whose
//!    values carry explicit units.
//!
//! No typing, rule matching, or parameter-file parsing happens here; the
//! handlers only shape engine results into a uniform model.
//!
//! ## Key Components
//!
//! - [`vdw`] - van der Waals handler (atom typing entry point)
//! - [`electrostatics`] - per-atom partial charge republication
//! - [`bonded`] - generic connected-atoms handler with harmonic bond and
//!   angle specializations
//! - [`torsions`] - Ryckaert-Bellemans and periodic torsion specializations

pub mod bonded;
pub mod electrostatics;
pub mod torsions;
pub mod vdw;

use crate::core::units::{Quantity, Unit};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Separator used when joining member atom types into a potential key id.
pub const POTENTIAL_KEY_SEPARATOR: char = '-';

/// Identifies a topological feature by the topology indices of its atoms.
///
/// A single-atom key addresses an atom slot; multi-atom keys address bonds,
/// angles, and torsions in the order the feature was enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopologyKey {
    atom_indices: Vec<usize>,
}

impl TopologyKey {
    pub fn atom(index: usize) -> Self {
        Self {
            atom_indices: vec![index],
        }
    }

    pub fn connection(indices: &[usize]) -> Self {
        Self {
            atom_indices: indices.to_vec(),
        }
    }

    pub fn atom_indices(&self) -> &[usize] {
        &self.atom_indices
    }
}

impl fmt::Display for TopologyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, index) in self.atom_indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, ")")
    }
}

/// Identifies a potential by the engine's type id(s).
///
/// For atoms this is the bare engine type id; for connected atoms it is the
/// member type ids joined with [`POTENTIAL_KEY_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PotentialKey {
    id: String,
}

impl PotentialKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Builds a key by joining member type ids with the separator.
    pub fn joined<S: AsRef<str>>(member_ids: &[S]) -> Self {
        let id = member_ids
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(&POTENTIAL_KEY_SEPARATOR.to_string());
        Self { id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Recovers the member type ids of a joined key.
    pub fn split(&self) -> Vec<&str> {
        self.id.split(POTENTIAL_KEY_SEPARATOR).collect()
    }
}

impl fmt::Display for PotentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A resolved potential: named parameters with explicit units.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Potential {
    pub parameters: HashMap<String, Quantity>,
}

impl Potential {
    pub fn new(parameters: HashMap<String, Quantity>) -> Self {
        Self { parameters }
    }

    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.parameters.get(name)
    }
}

/// Common read surface of all potential handlers.
pub trait PotentialHandler {
    /// The engine parameter section this handler consumes.
    fn section(&self) -> &'static str;

    /// The energy expression of the potential form, in the engine-agnostic
    /// convention.
    fn expression(&self) -> &'static str;

    fn slot_map(&self) -> &HashMap<TopologyKey, PotentialKey>;

    fn potentials(&self) -> &HashMap<PotentialKey, Potential>;

    fn is_empty(&self) -> bool {
        self.slot_map().is_empty()
    }
}

/// Tags raw engine parameters with units, dropping the named keys.
///
/// Entries listed in `units` receive that unit; all remaining entries are
/// republished dimensionless.
pub(crate) fn tag_parameters(
    raw: &HashMap<String, f64>,
    drop_keys: &[&str],
    units: &[(&str, Unit)],
) -> HashMap<String, Quantity> {
    raw.iter()
        .filter(|(name, _)| !drop_keys.contains(&name.as_str()))
        .map(|(name, &value)| {
            let unit = units
                .iter()
                .find(|(unit_name, _)| unit_name == name)
                .map(|&(_, unit)| unit)
                .unwrap_or(Unit::Dimensionless);
            (name.clone(), Quantity::new(value, unit))
        })
        .collect()
}
