use crate::core::models::system::MolecularTopology;
use crate::core::parameters::bonded::{
    ConnectedAtomsHandler, ConnectionKind, HarmonicAngleHandler, HarmonicBondHandler,
    UnassignedMemberError,
};
use crate::core::parameters::{PotentialHandler, PotentialKey, TopologyKey};
use crate::core::parameters::electrostatics::ElectrostaticsHandler;
use crate::core::parameters::torsions::{
    PeriodicImproperHandler, PeriodicProperHandler, RbImproperHandler, RbProperHandler,
};
use crate::core::parameters::vdw::VdwHandler;
use crate::engine::{EngineError, ForcefieldEngine};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Canonical names of the potential handlers, as exposed by
/// [`ParameterizedTopology::handler`].
pub const HANDLER_NAMES: [&str; 7] = [
    "vdW",
    "Bonds",
    "Angles",
    "RBTorsions",
    "RBImpropers",
    "ProperTorsions",
    "ImproperTorsions",
];

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Force-field engine error: {source}")]
    Engine {
        #[from]
        source: EngineError,
    },

    #[error(transparent)]
    UnassignedMember(#[from] UnassignedMemberError),
}

/// The engine-agnostic result of a parameter-assignment pass.
///
/// Holds one populated handler per potential form. Handlers whose force is
/// absent from the engine are present but empty.
#[derive(Debug, Clone, Default)]
pub struct ParameterizedTopology {
    pub vdw: VdwHandler,
    pub electrostatics: ElectrostaticsHandler,
    pub bonds: HarmonicBondHandler,
    pub angles: HarmonicAngleHandler,
    pub rb_propers: RbProperHandler,
    pub rb_impropers: RbImproperHandler,
    pub periodic_propers: PeriodicProperHandler,
    pub periodic_impropers: PeriodicImproperHandler,
}

impl ParameterizedTopology {
    /// Looks up a potential handler by its canonical name.
    ///
    /// Electrostatics stores charges rather than keyed potentials and is
    /// accessed through its field instead.
    pub fn handler(&self, name: &str) -> Option<&dyn PotentialHandler> {
        match name {
            "vdW" => Some(&self.vdw),
            "Bonds" => Some(&self.bonds),
            "Angles" => Some(&self.angles),
            "RBTorsions" => Some(&self.rb_propers),
            "RBImpropers" => Some(&self.rb_impropers),
            "ProperTorsions" => Some(&self.periodic_propers),
            "ImproperTorsions" => Some(&self.periodic_impropers),
            _ => None,
        }
    }
}

/// Runs a complete parameter-assignment pass over a topology.
///
/// Atom typing is delegated to the engine once, via the van der Waals
/// handler; every other handler draws member types from its slot map. The
/// assigned type of each atom is also written back onto the topology.
#[instrument(skip_all, name = "parameter_assignment")]
pub fn assign_parameters(
    engine: &dyn ForcefieldEngine,
    topology: &mut MolecularTopology,
) -> Result<ParameterizedTopology, AssignmentError> {
    let mut result = ParameterizedTopology::default();

    info!(atoms = topology.atom_count(), "Starting parameter assignment.");

    result.vdw.store_matches(engine, topology)?;
    write_types_back(&result.vdw, topology);
    result.vdw.store_potentials(engine)?;
    debug!(
        slots = result.vdw.slot_map().len(),
        potentials = result.vdw.potentials().len(),
        "Matched and resolved van der Waals parameters."
    );

    result
        .electrostatics
        .store_charges(result.vdw.slot_map(), engine)?;

    let atom_slots = result.vdw.slot_map().clone();

    run_connected(&mut result.bonds, &atom_slots, topology, engine)?;
    run_connected(&mut result.angles, &atom_slots, topology, engine)?;
    run_connected(&mut result.rb_propers, &atom_slots, topology, engine)?;
    run_connected(&mut result.rb_impropers, &atom_slots, topology, engine)?;
    run_connected(&mut result.periodic_propers, &atom_slots, topology, engine)?;
    run_connected(&mut result.periodic_impropers, &atom_slots, topology, engine)?;

    info!("Parameter assignment finished.");
    Ok(result)
}

fn run_connected<K: ConnectionKind>(
    handler: &mut ConnectedAtomsHandler<K>,
    atom_slots: &HashMap<TopologyKey, PotentialKey>,
    topology: &MolecularTopology,
    engine: &dyn ForcefieldEngine,
) -> Result<(), AssignmentError> {
    handler.store_matches(atom_slots, topology)?;
    handler.store_potentials(engine)?;
    debug!(
        section = K::SECTION,
        slots = handler.slot_map().len(),
        potentials = handler.potentials().len(),
        "Processed connected-atoms terms."
    );
    Ok(())
}

fn write_types_back(vdw: &VdwHandler, topology: &mut MolecularTopology) {
    let assignments: Vec<(usize, String)> = vdw
        .slot_map()
        .iter()
        .map(|(top_key, pot_key)| (top_key.atom_indices()[0], pot_key.id().to_string()))
        .collect();
    for (index, type_id) in assignments {
        if let Some(id) = topology.atom_by_index(index).map(|(id, _)| id) {
            if let Some(atom) = topology.atom_mut(id) {
                atom.force_field_type = type_id;
            }
        }
    }
}
