use super::element::Element;
use nalgebra::Point3;

/// Represents an atom in a molecular topology.
///
/// This struct carries the atom's identity and coordinates together with the
/// force-field type assigned by the external typing engine. The type is
/// empty until a typing pass has run; all parameter lookup downstream is
/// keyed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom within its parent structure (e.g., "CA", "H1").
    pub name: String,
    /// The chemical element.
    pub element: Element,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The engine-assigned force-field atom type (e.g., "opls_135").
    ///
    /// Empty until atom-typing has been performed.
    pub force_field_type: String,
}

impl Atom {
    /// Creates a new `Atom` with no assigned force-field type.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `element` - The chemical element.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, element: Element, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element,
            position,
            force_field_type: String::new(),
        }
    }

    /// Returns `true` once a typing engine has assigned a force-field type.
    pub fn is_typed(&self) -> bool {
        !self.force_field_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new("CA", Element::C, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.element, Element::C);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.force_field_type, "");
    }

    #[test]
    fn new_atom_is_untyped_until_assigned() {
        let mut atom = Atom::new("O", Element::O, Point3::origin());
        assert!(!atom.is_typed());

        atom.force_field_type = "opls_154".to_string();
        assert!(atom.is_typed());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new("N", Element::N, Point3::new(0.0, 0.0, 0.0));
        atom1.force_field_type = "opls_238".to_string();
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
