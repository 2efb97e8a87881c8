use super::bonded::{ConnectedAtomsHandler, ConnectionKind};
use crate::core::models::system::MolecularTopology;
use crate::core::units::{Quantity, Unit};
use std::collections::HashMap;

const RB_EXPRESSION: &str = "C0 * cos(phi)**0 + C1 * cos(phi)**1 + \
                             C2 * cos(phi)**2 + C3 * cos(phi)**3 + \
                             C4 * cos(phi)**4 + C5 * cos(phi)**5";
const PERIODIC_EXPRESSION: &str = "k * (1 + cos(periodicity * phi - phase))";

fn proper_connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
    topology
        .propers()
        .into_iter()
        .map(|quad| quad.to_vec())
        .collect()
}

fn improper_connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
    topology
        .impropers()
        .into_iter()
        .map(|quad| quad.to_vec())
        .collect()
}

/// Ryckaert-Bellemans coefficients are republished upper-cased (`c0` to
/// `C0`), all in kJ/mol.
fn convert_rb_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
    raw.iter()
        .map(|(name, &value)| {
            (
                name.to_uppercase(),
                Quantity::new(value, Unit::KilojoulePerMole),
            )
        })
        .collect()
}

fn convert_periodic_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
    super::tag_parameters(
        raw,
        &[],
        &[
            ("k", Unit::KilojoulePerMole),
            ("phase", Unit::Radian),
            ("periodicity", Unit::Dimensionless),
        ],
    )
}

/// Ryckaert-Bellemans proper torsions.
///
/// Torsion coverage is typically sparse; connections whose type quartet has
/// no tabulated parameters are left without a potential rather than
/// aborting the assignment.
#[derive(Debug, Clone, Copy)]
pub enum RbProper {}

impl ConnectionKind for RbProper {
    const SECTION: &'static str = "rb_propers";
    const EXPRESSION: &'static str = RB_EXPRESSION;
    const SUPPRESS_MISSING_PARAMETERS: bool = true;

    fn connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
        proper_connections(topology)
    }

    fn convert_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
        convert_rb_parameters(raw)
    }
}

/// Ryckaert-Bellemans improper torsions.
#[derive(Debug, Clone, Copy)]
pub enum RbImproper {}

impl ConnectionKind for RbImproper {
    const SECTION: &'static str = "rb_impropers";
    const EXPRESSION: &'static str = RB_EXPRESSION;
    const SUPPRESS_MISSING_PARAMETERS: bool = true;

    fn connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
        improper_connections(topology)
    }

    fn convert_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
        convert_rb_parameters(raw)
    }
}

/// Periodic (cosine series) proper torsions.
#[derive(Debug, Clone, Copy)]
pub enum PeriodicProper {}

impl ConnectionKind for PeriodicProper {
    const SECTION: &'static str = "periodic_propers";
    const EXPRESSION: &'static str = PERIODIC_EXPRESSION;
    const SUPPRESS_MISSING_PARAMETERS: bool = true;

    fn connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
        proper_connections(topology)
    }

    fn convert_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
        convert_periodic_parameters(raw)
    }
}

/// Periodic (cosine series) improper torsions.
#[derive(Debug, Clone, Copy)]
pub enum PeriodicImproper {}

impl ConnectionKind for PeriodicImproper {
    const SECTION: &'static str = "periodic_impropers";
    const EXPRESSION: &'static str = PERIODIC_EXPRESSION;
    const SUPPRESS_MISSING_PARAMETERS: bool = true;

    fn connections(topology: &MolecularTopology) -> Vec<Vec<usize>> {
        improper_connections(topology)
    }

    fn convert_parameters(raw: &HashMap<String, f64>) -> HashMap<String, Quantity> {
        convert_periodic_parameters(raw)
    }
}

pub type RbProperHandler = ConnectedAtomsHandler<RbProper>;
pub type RbImproperHandler = ConnectedAtomsHandler<RbImproper>;
pub type PeriodicProperHandler = ConnectedAtomsHandler<PeriodicProper>;
pub type PeriodicImproperHandler = ConnectedAtomsHandler<PeriodicImproper>;
