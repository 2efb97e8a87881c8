use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static ELEMENTS_BY_SYMBOL: Map<&'static str, Element> = phf_map! {
    "H" => Element::H, "C" => Element::C, "N" => Element::N, "O" => Element::O,
    "F" => Element::F, "NA" => Element::Na, "MG" => Element::Mg, "P" => Element::P,
    "S" => Element::S, "CL" => Element::Cl, "K" => Element::K, "CA" => Element::Ca,
    "FE" => Element::Fe, "ZN" => Element::Zn, "BR" => Element::Br, "I" => Element::I,
};

/// Chemical elements supported by the topology model.
///
/// The set covers the elements found in organic and biomolecular systems
/// that rule-based force-field engines commonly parameterize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    H,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    P,
    S,
    Cl,
    K,
    Ca,
    Fe,
    Zn,
    Br,
    I,
}

impl Element {
    /// Returns the standard chemical symbol (e.g., "C", "Cl").
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Fe => "Fe",
            Element::Zn => "Zn",
            Element::Br => "Br",
            Element::I => "I",
        }
    }

    pub fn atomic_number(&self) -> u8 {
        match self {
            Element::H => 1,
            Element::C => 6,
            Element::N => 7,
            Element::O => 8,
            Element::F => 9,
            Element::Na => 11,
            Element::Mg => 12,
            Element::P => 15,
            Element::S => 16,
            Element::Cl => 17,
            Element::K => 19,
            Element::Ca => 20,
            Element::Fe => 26,
            Element::Zn => 30,
            Element::Br => 35,
            Element::I => 53,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        ELEMENTS_BY_SYMBOL
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| ParseElementError(s.trim().to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
