use super::{Potential, PotentialHandler, PotentialKey, TopologyKey, tag_parameters};
use crate::core::models::system::MolecularTopology;
use crate::core::units::{Quantity, Unit};
use crate::engine::{EngineError, ForcefieldEngine};
use std::collections::HashMap;

const SECTION: &str = "atoms";
const EXPRESSION: &str = "4*epsilon*((sigma/r)**12-(sigma/r)**6)";
const DEFAULT_CUTOFF_ANGSTROMS: f64 = 9.0;

/// How per-pair van der Waals parameters are combined from per-atom ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixingRule {
    #[default]
    Geometric,
    LorentzBerthelot,
}

/// Truncation scheme for a non-bonded interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonbondedMethod {
    Cutoff,
    Pme,
}

/// The van der Waals handler.
///
/// This is the entry point of every assignment pass: its matching phase is
/// the only place atom-typing is requested from the engine, and its slot
/// map is the source the connected-atoms handlers draw member types from.
#[derive(Debug, Clone)]
pub struct VdwHandler {
    pub mixing_rule: MixingRule,
    pub method: NonbondedMethod,
    pub cutoff: Quantity,
    pub scale_13: f64,
    pub scale_14: f64,
    pub scale_15: f64,
    slot_map: HashMap<TopologyKey, PotentialKey>,
    potentials: HashMap<PotentialKey, Potential>,
}

impl Default for VdwHandler {
    fn default() -> Self {
        Self {
            mixing_rule: MixingRule::default(),
            method: NonbondedMethod::Cutoff,
            cutoff: Quantity::angstroms(DEFAULT_CUTOFF_ANGSTROMS),
            scale_13: 0.0,
            scale_14: 0.5,
            scale_15: 1.0,
            slot_map: HashMap::new(),
            potentials: HashMap::new(),
        }
    }
}

impl VdwHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegates atom-typing to the engine and records one slot per atom.
    pub fn store_matches(
        &mut self,
        engine: &dyn ForcefieldEngine,
        topology: &MolecularTopology,
    ) -> Result<(), EngineError> {
        let type_map = engine.assign_atom_types(topology)?;
        self.slot_map.clear();
        for (index, type_id) in type_map {
            self.slot_map
                .insert(TopologyKey::atom(index), PotentialKey::new(type_id));
        }
        Ok(())
    }

    /// Resolves the `atoms` parameters for every slot.
    ///
    /// The engine's `charge` entry is dropped here: charges belong to the
    /// electrostatics handler. `epsilon` is republished in kJ/mol and
    /// `sigma` in nm, matching the engine's own conventions for this
    /// section.
    pub fn store_potentials(&mut self, engine: &dyn ForcefieldEngine) -> Result<(), EngineError> {
        for pot_key in self.slot_map.values() {
            if self.potentials.contains_key(pot_key) {
                continue;
            }
            let raw = engine.parameters(SECTION, &[pot_key.id()])?;
            let parameters = tag_parameters(
                &raw,
                &["charge"],
                &[
                    ("epsilon", Unit::KilojoulePerMole),
                    ("sigma", Unit::Nanometer),
                ],
            );
            self.potentials
                .insert(pot_key.clone(), Potential::new(parameters));
        }
        Ok(())
    }
}

impl PotentialHandler for VdwHandler {
    fn section(&self) -> &'static str {
        SECTION
    }

    fn expression(&self) -> &'static str {
        EXPRESSION
    }

    fn slot_map(&self) -> &HashMap<TopologyKey, PotentialKey> {
        &self.slot_map
    }

    fn potentials(&self) -> &HashMap<PotentialKey, Potential> {
        &self.potentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::engine::TabulatedEngine;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::tempdir;

    const FORCEFIELD: &str = r#"
        [typing.by_element]
        C = "opls_135"
        H = "opls_140"

        [atoms.opls_135]
        charge = -0.18
        sigma = 0.35
        epsilon = 0.276144

        [atoms.opls_140]
        charge = 0.06
        sigma = 0.25
        epsilon = 0.12552
    "#;

    fn engine() -> (tempfile::TempDir, TabulatedEngine) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forcefield.toml");
        fs::write(&path, FORCEFIELD).unwrap();
        let engine = TabulatedEngine::load(&path).unwrap();
        (dir, engine)
    }

    fn methane_fragment() -> MolecularTopology {
        let mut topology = MolecularTopology::new();
        topology.add_atom(Atom::new("C1", Element::C, Point3::origin()));
        topology.add_atom(Atom::new("H1", Element::H, Point3::new(1.09, 0.0, 0.0)));
        topology.add_atom(Atom::new("H2", Element::H, Point3::new(-1.09, 0.0, 0.0)));
        topology
    }

    #[test]
    fn defaults_follow_the_engine_agnostic_convention() {
        let handler = VdwHandler::new();
        assert_eq!(handler.mixing_rule, MixingRule::Geometric);
        assert_eq!(handler.method, NonbondedMethod::Cutoff);
        assert_eq!(handler.cutoff, Quantity::angstroms(9.0));
        assert_eq!(handler.scale_13, 0.0);
        assert_eq!(handler.scale_14, 0.5);
        assert_eq!(handler.scale_15, 1.0);
        assert!(handler.is_empty());
    }

    #[test]
    fn store_matches_records_one_slot_per_atom() {
        let (_dir, engine) = engine();
        let topology = methane_fragment();

        let mut handler = VdwHandler::new();
        handler.store_matches(&engine, &topology).unwrap();

        assert_eq!(handler.slot_map().len(), 3);
        assert_eq!(
            handler.slot_map()[&TopologyKey::atom(0)],
            PotentialKey::new("opls_135")
        );
        assert_eq!(
            handler.slot_map()[&TopologyKey::atom(2)],
            PotentialKey::new("opls_140")
        );
    }

    #[test]
    fn store_potentials_drops_charge_and_tags_units() {
        let (_dir, engine) = engine();
        let topology = methane_fragment();

        let mut handler = VdwHandler::new();
        handler.store_matches(&engine, &topology).unwrap();
        handler.store_potentials(&engine).unwrap();

        // Two distinct types even though three atoms are matched.
        assert_eq!(handler.potentials().len(), 2);

        let carbon = &handler.potentials()[&PotentialKey::new("opls_135")];
        assert!(carbon.get("charge").is_none());
        assert_eq!(carbon.get("sigma"), Some(&Quantity::nanometers(0.35)));
        assert_eq!(
            carbon.get("epsilon"),
            Some(&Quantity::kilojoules_per_mole(0.276144))
        );
    }

    #[test]
    fn store_matches_replaces_previous_results() {
        let (_dir, engine) = engine();
        let topology = methane_fragment();

        let mut handler = VdwHandler::new();
        handler.store_matches(&engine, &topology).unwrap();
        handler.store_matches(&engine, &topology).unwrap();
        assert_eq!(handler.slot_map().len(), 3);
    }

    #[test]
    fn unknown_atom_type_in_parameters_is_an_engine_error() {
        let (_dir, engine) = engine();

        let mut topology = MolecularTopology::new();
        topology.add_atom(Atom::new("S1", Element::S, Point3::origin()));

        let mut handler = VdwHandler::new();
        let result = handler.store_matches(&engine, &topology);
        assert!(matches!(result, Err(EngineError::UntypedAtom { .. })));
    }
}
