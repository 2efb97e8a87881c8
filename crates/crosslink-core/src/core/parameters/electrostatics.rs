use super::{PotentialKey, TopologyKey};
use crate::core::units::Quantity;
use crate::core::parameters::vdw::NonbondedMethod;
use crate::engine::{EngineError, ForcefieldEngine};
use std::collections::HashMap;

const SECTION: &str = "atoms";
const EXPRESSION: &str = "coul";
const DEFAULT_CUTOFF_ANGSTROMS: f64 = 9.0;

/// The electrostatics handler.
///
/// Unlike the other handlers it stores per-atom charges rather than keyed
/// potentials: the charge is the only electrostatic parameter the engine
/// publishes, and it lives in the same `atoms` section the van der Waals
/// handler consumes.
#[derive(Debug, Clone)]
pub struct ElectrostaticsHandler {
    pub method: NonbondedMethod,
    pub cutoff: Quantity,
    pub scale_13: f64,
    pub scale_14: f64,
    pub scale_15: f64,
    charges: HashMap<TopologyKey, Quantity>,
}

impl Default for ElectrostaticsHandler {
    fn default() -> Self {
        Self {
            method: NonbondedMethod::Pme,
            cutoff: Quantity::angstroms(DEFAULT_CUTOFF_ANGSTROMS),
            scale_13: 0.0,
            scale_14: 0.5,
            scale_15: 1.0,
            charges: HashMap::new(),
        }
    }
}

impl ElectrostaticsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> &'static str {
        SECTION
    }

    pub fn expression(&self) -> &'static str {
        EXPRESSION
    }

    /// Republishes the engine's `charge` entry for every atom slot, in
    /// elementary charge units.
    ///
    /// # Errors
    ///
    /// A type whose `atoms` parameters lack a `charge` entry is reported as
    /// [`EngineError::MissingParameters`].
    pub fn store_charges(
        &mut self,
        atom_slots: &HashMap<TopologyKey, PotentialKey>,
        engine: &dyn ForcefieldEngine,
    ) -> Result<(), EngineError> {
        for (top_key, pot_key) in atom_slots {
            let raw = engine.parameters(SECTION, &[pot_key.id()])?;
            let charge = raw
                .get("charge")
                .copied()
                .ok_or_else(|| EngineError::MissingParameters {
                    section: SECTION.to_string(),
                    key: format!("{}.charge", pot_key.id()),
                })?;
            self.charges
                .insert(top_key.clone(), Quantity::elementary_charge(charge));
        }
        Ok(())
    }

    pub fn charges(&self) -> &HashMap<TopologyKey, Quantity> {
        &self.charges
    }

    /// The net charge of all stored slots, in elementary charge units.
    pub fn total_charge(&self) -> f64 {
        self.charges.values().map(|q| q.value).sum()
    }
}
