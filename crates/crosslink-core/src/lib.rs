//! # Crosslink Core Library
//!
//! An engine-agnostic library for assigning classical molecular-mechanics
//! force-field parameters (van der Waals, electrostatics, bonded terms) to a
//! molecular topology. Atom-typing and parameter lookup are delegated to an
//! external rule-based force-field engine; this library shapes the inputs
//! and republishes the results in a uniform, engine-independent model.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`MolecularTopology`), the unit-tagged quantity model, and the
//!   engine-agnostic parameter model (`TopologyKey`, `PotentialKey`,
//!   `Potential`) together with the potential handlers that populate it.
//!
//! - **[`engine`]: The Seam.** Defines the [`engine::ForcefieldEngine`] trait
//!   through which all atom-typing and parameter lookup is performed, plus a
//!   tabulated reference implementation backed by explicit lookup tables.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the handlers and the engine together to run a complete
//!   parameter-assignment pass over a topology.

pub mod core;
pub mod engine;
pub mod workflows;
