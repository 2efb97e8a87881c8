use super::{Potential, PotentialHandler, PotentialKey, TopologyKey};
use crate::core::models::system::MolecularTopology;
use crate::core::units::{Quantity, Unit};
use crate::engine::{EngineError, ForcefieldEngine};
use std::collections::HashMap;
use std::marker::PhantomData;
use thiserror::Error;

/// A connection member whose atom slot carries no engine-assigned type.
///
/// This indicates the matching phases were run out of order or the atom
/// slot map was built for a different topology.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Connection {key} references atom {index}, which has no assigned atom type")]
pub struct UnassignedMemberError {
    pub key: String,
    pub index: usize,
}

/// Fixes the engine section, potential form, and parameter conversion of a
/// connected-atoms handler.
///
/// Each implementor is a zero-sized marker describing one bonded potential
/// form; [`ConnectedAtomsHandler`] supplies the shared bookkeeping.
pub trait ConnectionKind {
    const SECTION: &'static str;
    const EXPRESSION: &'static str;

    /// Whether a missing-parameters engine error for one connection is
    /// suppressed (leaving that slot without a potential) instead of
    /// aborting resolution.
    const SUPPRESS_MISSING_PARAMETERS: bool = false;

    /// Enumerates the member index tuples of this connection type.
    fn connections(topology: &MolecularTopology) -> Vec<Vec<usize>>;

    /// Converts raw engine parameters into the republished, unit-tagged
    /// form.
    fn convert_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity>;
}

/// Shared bookkeeping for all bonded potential handlers.
///
/// The matching phase joins the member atoms' engine types into a potential
/// key; the resolution phase queries the engine once per distinct key. An
/// engine without the section at all empties the handler; missing
/// parameters for an individual key follow the kind's suppression policy.
#[derive(Debug, Clone)]
pub struct ConnectedAtomsHandler<K: ConnectionKind> {
    slot_map: HashMap<TopologyKey, PotentialKey>,
    potentials: HashMap<PotentialKey, Potential>,
    _kind: PhantomData<K>,
}

impl<K: ConnectionKind> Default for ConnectedAtomsHandler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ConnectionKind> ConnectedAtomsHandler<K> {
    pub fn new() -> Self {
        Self {
            slot_map: HashMap::new(),
            potentials: HashMap::new(),
            _kind: PhantomData,
        }
    }

    /// Maps every enumerated connection to a potential key built from the
    /// member atoms' assigned types.
    pub fn store_matches(
        &mut self,
        atom_slots: &HashMap<TopologyKey, PotentialKey>,
        topology: &MolecularTopology,
    ) -> Result<(), UnassignedMemberError> {
        self.slot_map.clear();
        for connection in K::connections(topology) {
            let top_key = TopologyKey::connection(&connection);
            let mut member_ids = Vec::with_capacity(connection.len());
            for &index in &connection {
                let pot_key = atom_slots.get(&TopologyKey::atom(index)).ok_or_else(|| {
                    UnassignedMemberError {
                        key: top_key.to_string(),
                        index,
                    }
                })?;
                member_ids.push(pot_key.id().to_string());
            }
            self.slot_map
                .insert(top_key, PotentialKey::joined(&member_ids));
        }
        Ok(())
    }

    /// Resolves every distinct potential key against the engine.
    pub fn store_potentials(&mut self, engine: &dyn ForcefieldEngine) -> Result<(), EngineError> {
        let mut distinct: Vec<PotentialKey> = self.slot_map.values().cloned().collect();
        distinct.sort_by(|a, b| a.id().cmp(b.id()));
        distinct.dedup();

        let mut resolved: HashMap<PotentialKey, Potential> = HashMap::new();
        for pot_key in distinct {
            match engine.parameters(K::SECTION, &pot_key.split()) {
                Ok(raw) => {
                    let potential = Potential::new(K::convert_parameters(&raw));
                    resolved.insert(pot_key, potential);
                }
                Err(EngineError::MissingForce { .. }) => {
                    // The engine has no generator for this potential form
                    // at all; the topology simply has none of these terms.
                    self.slot_map.clear();
                    self.potentials.clear();
                    return Ok(());
                }
                Err(e @ EngineError::MissingParameters { .. }) => {
                    if !K::SUPPRESS_MISSING_PARAMETERS {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        self.potentials = resolved;
        Ok(())
    }

    /// Slots whose potential key found no parameters during resolution.
    pub fn unresolved_keys(&self) -> Vec<&PotentialKey> {
        let mut keys: Vec<&PotentialKey> = self
            .slot_map
            .values()
            .filter(|key| !self.potentials.contains_key(*key))
            .collect();
        keys.sort_by_key(|key| key.id().to_string());
        keys.dedup();
        keys
    }
}

impl<K: ConnectionKind> PotentialHandler for ConnectedAtomsHandler<K> {
    fn section(&self) -> &'static str {
        K::SECTION
    }

    fn expression(&self) -> &'static str {
        K::EXPRESSION
    }

    fn slot_map(&self) -> &HashMap<TopologyKey, PotentialKey> {
        &self.slot_map
    }

    fn potentials(&self) -> &HashMap<PotentialKey, Potential> {
        &self.potentials
    }
}

/// Harmonic bond stretching.
#[derive(Debug, Clone, Copy)]
pub enum HarmonicBond {}

impl ConnectionKind for HarmonicBond {
    const SECTION: &'static str = "harmonic_bonds";
    const EXPRESSION: &'static str = "1/2 * k * (r - length) ** 2";

    fn connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
        topology
            .bonded_pairs()
            .into_iter()
            .map(|pair| pair.to_vec())
            .collect()
    }

    fn convert_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
        super::tag_parameters(
            raw,
            &[],
            &[
                ("k", Unit::KilojoulePerMolePerSquareNanometer),
                ("length", Unit::Nanometer),
            ],
        )
    }
}

/// Harmonic angle bending.
///
/// The engine publishes the equilibrium value as `theta`; the republished
/// parameter is renamed `angle`.
#[derive(Debug, Clone, Copy)]
pub enum HarmonicAngle {}

impl ConnectionKind for HarmonicAngle {
    const SECTION: &'static str = "harmonic_angles";
    const EXPRESSION: &'static str = "0.5 * k * (theta-angle)**2";

    fn connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
        topology
            .angles()
            .into_iter()
            .map(|triplet| triplet.to_vec())
            .collect()
    }

    fn convert_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
        raw.iter()
            .map(|(name, &value)| match name.as_str() {
                "theta" => ("angle".to_string(), Quantity::new(value, Unit::Radian)),
                "k" => (
                    name.clone(),
                    Quantity::new(value, Unit::KilojoulePerMolePerSquareRadian),
                ),
                _ => (name.clone(), Quantity::dimensionless(value)),
            })
            .collect()
    }
}

pub type HarmonicBondHandler = ConnectedAtomsHandler<HarmonicBond>;
pub type HarmonicAngleHandler = ConnectedAtomsHandler<HarmonicAngle>;
