//! component-recorder - shared recording infrastructure for dependency detectors
//!
//! Detectors (lockfile and manifest parsers for npm, NuGet, Maven, pip, Go, Cargo,
//! Linux package databases, ...) write every component occurrence they find into
//! a per-manifest recorder. The recorder keeps a dependency graph per manifest
//! with explicit-vs-transitive classification, development-dependency and scope
//! merging, and memoized upward traversals (ancestors and explicit roots). A
//! scan-wide recorder aggregates the per-manifest results for reporting.
//!
//! # Architecture
//!
//! - **Domain** (`component_detection::domain`): identities, graph nodes, the graph
//! - **Policies** (`component_detection::policies`): merge rules
//! - **Services** (`component_detection::services`): recorders and graph translation
//! - **Ports** (`ports`): registration interface for detectors, read view for reporting
//! - **Shared** (`shared`): error and result types
//!
//! # Example
//!
//! ```no_run
//! use component_recorder::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let recorder = ComponentRecorder::default();
//! let single_file = recorder.create_single_file_component_recorder("/repo/package.json")?;
//!
//! let app = DetectedComponent::new(TypedComponent::npm("app", "1.0.0")?);
//! let app_id = app.id().to_string();
//! single_file.register_usage(app, UsageOptions::explicit())?;
//!
//! let lodash = DetectedComponent::new(TypedComponent::npm("lodash", "4.17.21")?);
//! single_file.register_usage(lodash, UsageOptions::new().with_parent(&app_id))?;
//!
//! let collection =
//!     GraphTranslation::accumulate_and_convert([recorder.get_dependency_graphs_by_location()])?;
//! println!("{}", GraphTranslation::to_json(&collection)?);
//! # Ok(())
//! # }
//! ```

pub mod component_detection;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::component_detection::domain::{
        Ancestor, ComponentRefNode, ComponentType, DependencyGraph, DependencyScope,
        DetectedComponent, TypedComponent,
    };
    pub use crate::component_detection::policies::ScopePriority;
    pub use crate::component_detection::services::{
        ComponentRecorder, DependencyGraphCollection, DependencyGraphWithMetadata,
        GraphTranslation, SingleFileComponentRecorder,
    };
    pub use crate::config::RecorderConfig;
    pub use crate::ports::inbound::{ComponentRegistration, UsageOptions};
    pub use crate::ports::outbound::DependencyGraphView;
    pub use crate::shared::{RecorderError, Result};
}
