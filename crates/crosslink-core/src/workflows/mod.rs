//! # Workflows Module
//!
//! This module provides the high-level entry point that orchestrates a
//! complete parameter-assignment pass in Crosslink.
//!
//! ## Overview
//!
//! Workflows are the top-level API for users of the library. The assignment
//! workflow wires the potential handlers to a force-field engine in the
//! required order (atom typing first, then charges and every bonded form),
//! and returns the populated engine-agnostic parameter model.
//!
//! ## Key Capabilities
//!
//! - **End-to-end assignment** from a bare topology to a fully populated
//!   parameter model
//! - **Typing write-back** so the topology's atoms carry their assigned
//!   force-field types afterwards
//! - **Uniform result access** through named handler lookup on the result

pub mod assign;
