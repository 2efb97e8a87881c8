use crosslink::core::models::system::MolecularTopology;
use crosslink::core::parameters::PotentialHandler;
use crosslink::core::units::Quantity;
use crosslink::workflows::assign::{HANDLER_NAMES, ParameterizedTopology};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Serializable summary of one assignment pass, written as TOML.
///
/// Maps are re-keyed into sorted structures so the report is byte-stable
/// across runs.
#[derive(Debug, Serialize)]
pub struct ParameterReport {
    metadata: ReportMetadata,
    charges: Vec<ChargeEntry>,
    handlers: BTreeMap<String, HandlerReport>,
}

#[derive(Debug, Serialize)]
struct ReportMetadata {
    generator: String,
    version: String,
    topology: String,
    forcefield: String,
    atom_count: usize,
}

#[derive(Debug, Serialize)]
struct ChargeEntry {
    atom: usize,
    name: String,
    charge: Quantity,
}

#[derive(Debug, Serialize)]
struct HandlerReport {
    section: String,
    expression: String,
    slots: Vec<SlotEntry>,
    potentials: BTreeMap<String, BTreeMap<String, Quantity>>,
}

#[derive(Debug, Serialize)]
struct SlotEntry {
    atoms: Vec<usize>,
    key: String,
}

impl ParameterReport {
    pub fn new(
        result: &ParameterizedTopology,
        topology: &MolecularTopology,
        topology_path: &Path,
        forcefield_path: &Path,
    ) -> Self {
        let mut charges: Vec<ChargeEntry> = result
            .electrostatics
            .charges()
            .iter()
            .map(|(top_key, charge)| {
                let atom = top_key.atom_indices()[0];
                let name = topology
                    .atom_by_index(atom)
                    .map(|(_, a)| a.name.clone())
                    .unwrap_or_default();
                ChargeEntry {
                    atom,
                    name,
                    charge: *charge,
                }
            })
            .collect();
        charges.sort_by_key(|entry| entry.atom);

        let mut handlers = BTreeMap::new();
        for name in HANDLER_NAMES {
            let handler = result
                .handler(name)
                .expect("canonical handler names are exhaustive");
            handlers.insert(name.to_string(), HandlerReport::new(handler));
        }

        Self {
            metadata: ReportMetadata {
                generator: "crosslink".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                topology: topology_path.display().to_string(),
                forcefield: forcefield_path.display().to_string(),
                atom_count: topology.atom_count(),
            },
            charges,
            handlers,
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl HandlerReport {
    fn new(handler: &dyn PotentialHandler) -> Self {
        let mut slots: Vec<SlotEntry> = handler
            .slot_map()
            .iter()
            .map(|(top_key, pot_key)| SlotEntry {
                atoms: top_key.atom_indices().to_vec(),
                key: pot_key.id().to_string(),
            })
            .collect();
        slots.sort_by(|a, b| a.atoms.cmp(&b.atoms));

        let potentials = handler
            .potentials()
            .iter()
            .map(|(pot_key, potential)| {
                let parameters: BTreeMap<String, Quantity> = potential
                    .parameters
                    .iter()
                    .map(|(name, quantity)| (name.clone(), *quantity))
                    .collect();
                (pot_key.id().to_string(), parameters)
            })
            .collect();

        Self {
            section: handler.section().to_string(),
            expression: handler.expression().to_string(),
            slots,
            potentials,
        }
    }
}
