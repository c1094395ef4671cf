//! Core types and registry loading for the model-relocation dependency graph.
//!
//! Provides the graph data model ([`graph::DependencyGraph`]), relocation
//! scope and silo enums, the raw model-registry snapshot types, and
//! classification errors.

pub mod config;
pub mod error;
pub mod graph;
pub mod registry;
