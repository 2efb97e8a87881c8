use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const KILOCALORIE_IN_KILOJOULES: f64 = 4.184;
const ANGSTROM_IN_NANOMETERS: f64 = 0.1;

/// Units used when republishing engine parameters.
///
/// The set is deliberately small: it covers exactly the units the parameter
/// model emits. Conversion is supported within a dimension (e.g. Angstrom to
/// nanometer) and rejected across dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    KilojoulePerMole,
    KilocaloriePerMole,
    Nanometer,
    Angstrom,
    KilojoulePerMolePerSquareNanometer,
    KilojoulePerMolePerSquareRadian,
    Radian,
    Degree,
    ElementaryCharge,
    Dimensionless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    MolarEnergy,
    Length,
    BondForceConstant,
    AngleForceConstant,
    Angle,
    Charge,
    Dimensionless,
}

impl Unit {
    fn dimension(&self) -> Dimension {
        match self {
            Unit::KilojoulePerMole | Unit::KilocaloriePerMole => Dimension::MolarEnergy,
            Unit::Nanometer | Unit::Angstrom => Dimension::Length,
            Unit::KilojoulePerMolePerSquareNanometer => Dimension::BondForceConstant,
            Unit::KilojoulePerMolePerSquareRadian => Dimension::AngleForceConstant,
            Unit::Radian | Unit::Degree => Dimension::Angle,
            Unit::ElementaryCharge => Dimension::Charge,
            Unit::Dimensionless => Dimension::Dimensionless,
        }
    }

    /// Factor that converts a value in this unit to the dimension's base
    /// unit (kJ/mol, nm, rad, e).
    fn to_base(&self) -> f64 {
        match self {
            Unit::KilocaloriePerMole => KILOCALORIE_IN_KILOJOULES,
            Unit::Angstrom => ANGSTROM_IN_NANOMETERS,
            Unit::Degree => std::f64::consts::PI / 180.0,
            _ => 1.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::KilojoulePerMole => "kJ/mol",
            Unit::KilocaloriePerMole => "kcal/mol",
            Unit::Nanometer => "nm",
            Unit::Angstrom => "A",
            Unit::KilojoulePerMolePerSquareNanometer => "kJ/(mol nm^2)",
            Unit::KilojoulePerMolePerSquareRadian => "kJ/(mol rad^2)",
            Unit::Radian => "rad",
            Unit::Degree => "deg",
            Unit::ElementaryCharge => "e",
            Unit::Dimensionless => "",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("Cannot convert a value in {from:?} to {to:?}")]
    Incompatible { from: Unit, to: Unit },
}

/// A physical value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn kilojoules_per_mole(value: f64) -> Self {
        Self::new(value, Unit::KilojoulePerMole)
    }

    pub fn nanometers(value: f64) -> Self {
        Self::new(value, Unit::Nanometer)
    }

    pub fn angstroms(value: f64) -> Self {
        Self::new(value, Unit::Angstrom)
    }

    pub fn radians(value: f64) -> Self {
        Self::new(value, Unit::Radian)
    }

    pub fn elementary_charge(value: f64) -> Self {
        Self::new(value, Unit::ElementaryCharge)
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::Dimensionless)
    }

    /// Converts the quantity into another unit of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Incompatible`] if the target unit belongs to a
    /// different dimension.
    pub fn converted_to(&self, target: Unit) -> Result<Quantity, UnitError> {
        if self.unit.dimension() != target.dimension() {
            return Err(UnitError::Incompatible {
                from: self.unit,
                to: target,
            });
        }
        let value = self.value * self.unit.to_base() / target.to_base();
        Ok(Quantity::new(value, target))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.unit.symbol();
        if symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn angstroms_convert_to_nanometers() {
        let converted = Quantity::angstroms(9.0).converted_to(Unit::Nanometer).unwrap();
        assert_eq!(converted.unit, Unit::Nanometer);
        assert!(f64_approx_equal(converted.value, 0.9));
    }

    #[test]
    fn kilocalories_convert_to_kilojoules() {
        let q = Quantity::new(1.0, Unit::KilocaloriePerMole);
        let converted = q.converted_to(Unit::KilojoulePerMole).unwrap();
        assert!(f64_approx_equal(converted.value, 4.184));
    }

    #[test]
    fn degrees_convert_to_radians_and_back() {
        let q = Quantity::new(180.0, Unit::Degree);
        let radians = q.converted_to(Unit::Radian).unwrap();
        assert!(f64_approx_equal(radians.value, std::f64::consts::PI));

        let back = radians.converted_to(Unit::Degree).unwrap();
        assert!(f64_approx_equal(back.value, 180.0));
    }

    #[test]
    fn identity_conversion_preserves_value() {
        let q = Quantity::kilojoules_per_mole(2.5);
        let same = q.converted_to(Unit::KilojoulePerMole).unwrap();
        assert_eq!(same, q);
    }

    #[test]
    fn cross_dimension_conversion_is_rejected() {
        let q = Quantity::nanometers(1.0);
        assert_eq!(
            q.converted_to(Unit::KilojoulePerMole),
            Err(UnitError::Incompatible {
                from: Unit::Nanometer,
                to: Unit::KilojoulePerMole,
            })
        );
    }

    #[test]
    fn force_constant_units_do_not_mix() {
        let q = Quantity::new(1000.0, Unit::KilojoulePerMolePerSquareNanometer);
        assert!(q.converted_to(Unit::KilojoulePerMolePerSquareRadian).is_err());
    }

    #[test]
    fn display_includes_unit_symbol() {
        assert_eq!(Quantity::nanometers(0.15).to_string(), "0.15 nm");
        assert_eq!(Quantity::dimensionless(3.0).to_string(), "3");
    }

    #[test]
    fn unit_serializes_to_snake_case() {
        let serialized = toml::to_string(&Quantity::kilojoules_per_mole(1.0)).unwrap();
        assert!(serialized.contains("kilojoule_per_mole"));
    }
}
