use crate::error::{CliError, Result};
use crosslink::core::models::atom::Atom;
use crosslink::core::models::element::Element;
use crosslink::core::models::ids::AtomId;
use crosslink::core::models::system::MolecularTopology;
use crosslink::core::models::topology::BondOrder;
use nalgebra::Point3;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct FileAtom {
    name: String,
    element: String,
    position: [f64; 3],
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct FileBond {
    /// Zero-based topology indices of the two bonded atoms.
    atoms: [usize; 2],
    #[serde(default)]
    order: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TopologyFile {
    #[serde(default)]
    atoms: Vec<FileAtom>,
    #[serde(default)]
    bonds: Vec<FileBond>,
}

fn parse_error(path: &Path, message: String) -> CliError {
    CliError::FileParsing {
        path: path.to_path_buf(),
        message,
    }
}

/// Loads a molecular topology from a TOML file.
///
/// The file lists `[[atoms]]` (name, element, position) and `[[bonds]]`
/// referencing atoms by zero-based index, with an optional bond order
/// string.
pub fn load_topology(path: &Path) -> Result<MolecularTopology> {
    let content = std::fs::read_to_string(path)?;
    let file: TopologyFile =
        toml::from_str(&content).map_err(|e| parse_error(path, e.to_string()))?;

    let mut topology = MolecularTopology::new();
    let mut ids: Vec<AtomId> = Vec::with_capacity(file.atoms.len());

    for (i, atom) in file.atoms.iter().enumerate() {
        let element: Element = atom.element.parse().map_err(|e| {
            parse_error(path, format!("atom {} ('{}'): {}", i, atom.name, e))
        })?;
        let position = Point3::new(atom.position[0], atom.position[1], atom.position[2]);
        ids.push(topology.add_atom(Atom::new(&atom.name, element, position)));
    }

    for (i, bond) in file.bonds.iter().enumerate() {
        let order = match &bond.order {
            Some(raw) => raw.parse::<BondOrder>().map_err(|_| {
                parse_error(path, format!("bond {}: invalid order '{}'", i, raw))
            })?,
            None => BondOrder::default(),
        };
        let [a, b] = bond.atoms;
        let (&id_a, &id_b) = match (ids.get(a), ids.get(b)) {
            (Some(id_a), Some(id_b)) => (id_a, id_b),
            _ => {
                return Err(parse_error(
                    path,
                    format!(
                        "bond {}: atom index out of range (atom count is {})",
                        i,
                        ids.len()
                    ),
                ));
            }
        };
        topology
            .add_bond(id_a, id_b, order)
            .map_err(|e| parse_error(path, format!("bond {}: {}", i, e)))?;
    }

    debug!(
        atoms = topology.atom_count(),
        bonds = topology.bonds().len(),
        "Loaded topology from {:?}.",
        path
    );
    Ok(topology)
}
