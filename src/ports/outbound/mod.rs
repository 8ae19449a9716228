/// Outbound ports (Driven ports) - Read views for the reporting layer
pub mod dependency_graph_view;

pub use dependency_graph_view::DependencyGraphView;
