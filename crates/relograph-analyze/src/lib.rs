//! Analysis passes over a model-registry snapshot: reference
//! classification, scope resolution, dependency-graph construction, and
//! DOT rendering.

pub mod build;
pub mod classify;
pub mod export;
pub mod resolve;
pub mod validate;
