pub mod component_ref_node;
pub mod dependency_graph;
pub mod dependency_scope;
pub mod detected_component;
pub mod typed_component;

pub use component_ref_node::ComponentRefNode;
pub use dependency_graph::{Ancestor, DependencyGraph};
pub use dependency_scope::DependencyScope;
pub use detected_component::DetectedComponent;
pub use typed_component::{ComponentType, TypedComponent};
