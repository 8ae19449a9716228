//! Component recording and per-manifest dependency graphs
//!
//! - `domain`: identities, graph nodes and the dependency graph itself
//! - `policies`: merge rules shared by the domain
//! - `services`: the recorders detectors write into and the graph translation
pub mod domain;
pub mod policies;
pub mod services;
