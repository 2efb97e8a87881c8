//! # Core Module
//!
//! This module provides the fundamental building blocks for force-field
//! parameter assignment in Crosslink, serving as the data backbone of the
//! library.
//!
//! ## Overview
//!
//! The core module implements the data structures required to describe a
//! molecular topology, to tag physical quantities with units, and to hold
//! the engine-agnostic parameter model that assignment produces. It contains
//! no typing or rule-matching logic of its own; everything here is either a
//! passive data model or per-handler bookkeeping over engine results.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the parameter model:
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, and the
//!   topology container with derived angle/torsion enumeration
//! - **Physical Quantities** ([`units`]) - Unit-tagged values with
//!   in-dimension conversion
//! - **Parameter Model** ([`parameters`]) - Topology/potential keys, stored
//!   potentials, and the handlers that populate them
//!
//! ## Key Capabilities
//!
//! - **Complete topology description** with deterministic enumeration of
//!   bonded features (bonds, angles, proper and improper torsions)
//! - **Unit-safe parameter republication** independent of any engine's
//!   internal unit conventions
//! - **Uniform handler surface** so downstream consumers can walk every
//!   assigned term without knowing which engine produced it

pub mod models;
pub mod parameters;
pub mod units;
