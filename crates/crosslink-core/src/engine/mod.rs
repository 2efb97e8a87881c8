//! # Engine Module
//!
//! This module defines the seam between Crosslink and the external
//! rule-based force-field engine that performs atom-typing and parameter
//! lookup.
//!
//! ## Overview
//!
//! All typing and parameter retrieval flows through the
//! [`ForcefieldEngine`] trait. The handlers in
//! [`crate::core::parameters`] never inspect an engine's internals; they
//! call the trait and shape the results. Any rule-matching engine can be
//! plugged in by implementing the two trait methods.
//!
//! ## Architecture
//!
//! - **Engine Contract** ([`ForcefieldEngine`]) - atom-typing over a whole
//!   topology and keyed parameter lookup per section
//! - **Error Handling** ([`error`]) - typed errors distinguishing an absent
//!   force section from absent parameters, which handlers treat differently
//! - **Tabulated Reference Engine** ([`tabulated`]) - a concrete engine
//!   backed by explicit lookup tables, used by the CLI and in tests
//!
//! ## Key Capabilities
//!
//! - **Engine-agnostic assignment** via a narrow, object-safe contract
//! - **Symmetric connection lookup** so `a-b` and `b-a` resolve to the same
//!   bonded parameters
//! - **Typed failure modes** allowing handlers to suppress or propagate
//!   missing-parameter conditions per potential form

pub mod error;
pub mod tabulated;

pub use error::EngineError;
pub use tabulated::TabulatedEngine;

use crate::core::models::system::MolecularTopology;
use std::collections::HashMap;

/// Contract for an external rule-based force-field engine.
///
/// Implementations own the atom-typing rules and the parameter tables;
/// Crosslink only consumes their results.
pub trait ForcefieldEngine {
    /// Assigns a force-field type to every atom of the topology.
    ///
    /// The returned map is keyed by topology index and must contain an
    /// entry for each atom.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UntypedAtom`] if any atom cannot be typed.
    fn assign_atom_types(
        &self,
        topology: &MolecularTopology,
    ) -> Result<HashMap<usize, String>, EngineError>;

    /// Looks up the raw parameters for a key in a parameter section.
    ///
    /// `key` holds one type id per member atom; engines must resolve
    /// multi-atom keys symmetrically (forward or reversed member order).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingForce`] if the section does not exist
    /// at all, or [`EngineError::MissingParameters`] if the section exists
    /// but holds no entry for the key.
    fn parameters(
        &self,
        section: &str,
        key: &[&str],
    ) -> Result<HashMap<String, f64>, EngineError>;
}
