use super::atom::Atom;
use super::ids::AtomId;
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Atom with ID {0:?} does not exist in the topology")]
    AtomNotFound(AtomId),
    #[error("A bond cannot connect an atom to itself")]
    SelfBond,
}

/// A molecular topology: atoms, bonds, and the bonded features derived from
/// them.
///
/// Atoms are stored in a slot map for stable identifiers, with insertion
/// order preserved separately so every atom also has a stable zero-based
/// *topology index*. Handler bookkeeping downstream is keyed exclusively on
/// those indices.
///
/// Angles and torsions are not stored; they are enumerated on demand from
/// the bond graph in a deterministic, duplicate-free order.
#[derive(Debug, Clone, Default)]
pub struct MolecularTopology {
    atoms: SlotMap<AtomId, Atom>,
    /// Atom IDs in insertion order; the position of an ID in this list is
    /// the atom's topology index.
    atom_order: Vec<AtomId>,
    indices: SecondaryMap<AtomId, usize>,
    bonds: Vec<Bond>,
    adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl MolecularTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom and returns its ID. The atom's topology index is the
    /// number of atoms present before the call.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let id = self.atoms.insert(atom);
        self.indices.insert(id, self.atom_order.len());
        self.atom_order.push(id);
        self.adjacency.insert(id, Vec::new());
        id
    }

    /// Adds a bond between two existing atoms.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::SelfBond`] if both IDs are equal, or
    /// [`TopologyError::AtomNotFound`] if either ID is not part of this
    /// topology.
    pub fn add_bond(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        order: BondOrder,
    ) -> Result<(), TopologyError> {
        if atom1_id == atom2_id {
            return Err(TopologyError::SelfBond);
        }
        for id in [atom1_id, atom2_id] {
            if !self.atoms.contains_key(id) {
                return Err(TopologyError::AtomNotFound(id));
            }
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.adjacency[atom1_id].push(atom2_id);
        self.adjacency[atom2_id].push(atom1_id);
        Ok(())
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn atom_count(&self) -> usize {
        self.atom_order.len()
    }

    /// Returns an iterator over all atoms in insertion (topology index)
    /// order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order.iter().map(|&id| (id, &self.atoms[id]))
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Returns the topology index of an atom.
    pub fn index_of(&self, id: AtomId) -> Option<usize> {
        self.indices.get(id).copied()
    }

    pub fn atom_by_index(&self, index: usize) -> Option<(AtomId, &Atom)> {
        let id = *self.atom_order.get(index)?;
        Some((id, &self.atoms[id]))
    }

    /// Returns the IDs bonded to `id`, in bond insertion order.
    pub fn neighbors(&self, id: AtomId) -> &[AtomId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn sorted_neighbor_indices(&self, id: AtomId) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .neighbors(id)
            .iter()
            .map(|&n| self.indices[n])
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Enumerates all bonds as index pairs, in bond insertion order.
    pub fn bonded_pairs(&self) -> Vec<[usize; 2]> {
        self.bonds
            .iter()
            .map(|b| [self.indices[b.atom1_id], self.indices[b.atom2_id]])
            .collect()
    }

    /// Enumerates all angle triplets `i-j-k` with `j` the central atom.
    ///
    /// Each unordered pair of neighbors around a center is emitted exactly
    /// once, with `i < k` by topology index.
    pub fn angles(&self) -> Vec<[usize; 3]> {
        let mut angles = Vec::new();
        for &center in &self.atom_order {
            let neighbors = self.sorted_neighbor_indices(center);
            let j = self.indices[center];
            for (a, &i) in neighbors.iter().enumerate() {
                for &k in &neighbors[a + 1..] {
                    angles.push([i, j, k]);
                }
            }
        }
        angles
    }

    /// Enumerates all proper torsion quadruplets `i-j-k-l` around each bond
    /// `j-k`.
    ///
    /// Each torsion is emitted exactly once; the central bond is oriented so
    /// the lower-indexed atom comes second. Three-membered rings are handled
    /// by excluding quadruplets whose outer atoms coincide.
    pub fn propers(&self) -> Vec<[usize; 4]> {
        let mut propers = Vec::new();
        for bond in &self.bonds {
            let (j_id, k_id) = if self.indices[bond.atom1_id] <= self.indices[bond.atom2_id] {
                (bond.atom1_id, bond.atom2_id)
            } else {
                (bond.atom2_id, bond.atom1_id)
            };
            let j = self.indices[j_id];
            let k = self.indices[k_id];

            let i_side = self.sorted_neighbor_indices(j_id);
            let l_side = self.sorted_neighbor_indices(k_id);
            for &i in &i_side {
                if i == k {
                    continue;
                }
                for &l in &l_side {
                    if l == j || l == i {
                        continue;
                    }
                    propers.push([i, j, k, l]);
                }
            }
        }
        propers
    }

    /// Enumerates all improper torsion quadruplets with the central atom
    /// first, for every atom with exactly three neighbors.
    pub fn impropers(&self) -> Vec<[usize; 4]> {
        let mut impropers = Vec::new();
        for &center in &self.atom_order {
            let neighbors = self.sorted_neighbor_indices(center);
            if neighbors.len() != 3 {
                continue;
            }
            impropers.push([
                self.indices[center],
                neighbors[0],
                neighbors[1],
                neighbors[2],
            ]);
        }
        impropers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn atom(name: &str, element: Element) -> Atom {
        Atom::new(name, element, Point3::origin())
    }

    fn make_water() -> (MolecularTopology, Vec<AtomId>) {
        let mut topology = MolecularTopology::new();
        let o = topology.add_atom(atom("O", Element::O));
        let h1 = topology.add_atom(atom("H1", Element::H));
        let h2 = topology.add_atom(atom("H2", Element::H));
        topology.add_bond(o, h1, BondOrder::Single).unwrap();
        topology.add_bond(o, h2, BondOrder::Single).unwrap();
        (topology, vec![o, h1, h2])
    }

    fn make_ethane() -> MolecularTopology {
        let mut topology = MolecularTopology::new();
        let c1 = topology.add_atom(atom("C1", Element::C));
        let c2 = topology.add_atom(atom("C2", Element::C));
        let hydrogens: Vec<AtomId> = (0..6)
            .map(|i| topology.add_atom(atom(&format!("H{}", i + 1), Element::H)))
            .collect();
        topology.add_bond(c1, c2, BondOrder::Single).unwrap();
        for &h in &hydrogens[..3] {
            topology.add_bond(c1, h, BondOrder::Single).unwrap();
        }
        for &h in &hydrogens[3..] {
            topology.add_bond(c2, h, BondOrder::Single).unwrap();
        }
        topology
    }

    #[test]
    fn add_atom_assigns_sequential_indices() {
        let (topology, ids) = make_water();
        assert_eq!(topology.atom_count(), 3);
        for (expected, id) in ids.iter().enumerate() {
            assert_eq!(topology.index_of(*id), Some(expected));
        }
    }

    #[test]
    fn atoms_iter_preserves_insertion_order() {
        let (topology, ids) = make_water();
        let iterated: Vec<AtomId> = topology.atoms_iter().map(|(id, _)| id).collect();
        assert_eq!(iterated, ids);
    }

    #[test]
    fn atom_by_index_round_trips_with_index_of() {
        let (topology, ids) = make_water();
        let (id, atom) = topology.atom_by_index(1).unwrap();
        assert_eq!(id, ids[1]);
        assert_eq!(atom.name, "H1");
        assert!(topology.atom_by_index(3).is_none());
    }

    #[test]
    fn add_bond_rejects_self_bonds() {
        let mut topology = MolecularTopology::new();
        let a = topology.add_atom(atom("C", Element::C));
        assert_eq!(
            topology.add_bond(a, a, BondOrder::Single),
            Err(TopologyError::SelfBond)
        );
    }

    #[test]
    fn add_bond_rejects_foreign_atom_ids() {
        let mut topology = MolecularTopology::new();
        let a = topology.add_atom(atom("C", Element::C));

        let mut other = MolecularTopology::new();
        let foreign = other.add_atom(atom("N", Element::N));

        assert_eq!(
            topology.add_bond(a, foreign, BondOrder::Single),
            Err(TopologyError::AtomNotFound(foreign))
        );
    }

    #[test]
    fn bonded_pairs_reports_index_pairs_in_insertion_order() {
        let (topology, _) = make_water();
        assert_eq!(topology.bonded_pairs(), vec![[0, 1], [0, 2]]);
    }

    #[test]
    fn water_has_one_angle_and_no_torsions() {
        let (topology, _) = make_water();
        assert_eq!(topology.angles(), vec![[1, 0, 2]]);
        assert!(topology.propers().is_empty());
        assert!(topology.impropers().is_empty());
    }

    #[test]
    fn ethane_enumerates_expected_feature_counts() {
        let topology = make_ethane();
        assert_eq!(topology.bonded_pairs().len(), 7);
        // Each carbon centers C(2,4) = 6 angles.
        assert_eq!(topology.angles().len(), 12);
        // 3 hydrogens on each side of the central bond.
        assert_eq!(topology.propers().len(), 9);
        assert!(topology.impropers().is_empty());
    }

    #[test]
    fn propers_orient_central_bond_by_index() {
        let topology = make_ethane();
        for [_, j, k, _] in topology.propers() {
            assert_eq!((j, k), (0, 1));
        }
    }

    #[test]
    fn three_neighbor_center_yields_one_improper() {
        // Formaldehyde: C(=O)H2, carbon has exactly three neighbors.
        let mut topology = MolecularTopology::new();
        let c = topology.add_atom(atom("C", Element::C));
        let o = topology.add_atom(atom("O", Element::O));
        let h1 = topology.add_atom(atom("H1", Element::H));
        let h2 = topology.add_atom(atom("H2", Element::H));
        topology.add_bond(c, o, BondOrder::Double).unwrap();
        topology.add_bond(c, h1, BondOrder::Single).unwrap();
        topology.add_bond(c, h2, BondOrder::Single).unwrap();

        assert_eq!(topology.impropers(), vec![[0, 1, 2, 3]]);
    }

    #[test]
    fn enumerations_are_empty_without_bonds() {
        let mut topology = MolecularTopology::new();
        topology.add_atom(atom("Na", Element::Na));
        topology.add_atom(atom("Cl", Element::Cl));

        assert!(topology.bonded_pairs().is_empty());
        assert!(topology.angles().is_empty());
        assert!(topology.propers().is_empty());
        assert!(topology.impropers().is_empty());
    }
}
