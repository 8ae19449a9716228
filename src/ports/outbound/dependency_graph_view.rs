use crate::component_detection::domain::{Ancestor, DependencyGraph, DependencyScope};
use crate::shared::Result;
use std::collections::BTreeSet;

/// DependencyGraphView port for reading a finished per-location graph
///
/// The reporting layer reconstructs roots, ancestors, scopes and development
/// classification through this view, without access to graph mutation.
pub trait DependencyGraphView: Send + Sync {
    fn contains(&self, component_id: &str) -> bool;

    fn has_components(&self) -> bool;

    /// All component ids, sorted
    fn components(&self) -> Vec<String>;

    fn get_dependencies_for_component(&self, component_id: &str) -> Result<BTreeSet<String>>;

    fn get_explicit_referenced_dependency_ids(
        &self,
        component_id: &str,
    ) -> Result<BTreeSet<String>>;

    fn get_ancestors(&self, component_id: &str) -> Vec<Ancestor>;

    fn get_all_explicitly_referenced_components(&self) -> BTreeSet<String>;

    fn is_component_explicitly_referenced(&self, component_id: &str) -> Result<bool>;

    fn is_development_dependency(&self, component_id: &str) -> Result<Option<bool>>;

    fn get_dependency_scope(&self, component_id: &str) -> Result<Option<DependencyScope>>;

    fn get_additional_related_files(&self) -> BTreeSet<String>;
}

impl DependencyGraphView for DependencyGraph {
    fn contains(&self, component_id: &str) -> bool {
        DependencyGraph::contains(self, component_id)
    }

    fn has_components(&self) -> bool {
        DependencyGraph::has_components(self)
    }

    fn components(&self) -> Vec<String> {
        DependencyGraph::components(self)
    }

    fn get_dependencies_for_component(&self, component_id: &str) -> Result<BTreeSet<String>> {
        DependencyGraph::get_dependencies_for_component(self, component_id)
    }

    fn get_explicit_referenced_dependency_ids(
        &self,
        component_id: &str,
    ) -> Result<BTreeSet<String>> {
        DependencyGraph::get_explicit_referenced_dependency_ids(self, component_id)
    }

    fn get_ancestors(&self, component_id: &str) -> Vec<Ancestor> {
        DependencyGraph::get_ancestors(self, component_id)
    }

    fn get_all_explicitly_referenced_components(&self) -> BTreeSet<String> {
        DependencyGraph::get_all_explicitly_referenced_components(self)
    }

    fn is_component_explicitly_referenced(&self, component_id: &str) -> Result<bool> {
        DependencyGraph::is_component_explicitly_referenced(self, component_id)
    }

    fn is_development_dependency(&self, component_id: &str) -> Result<Option<bool>> {
        DependencyGraph::is_development_dependency(self, component_id)
    }

    fn get_dependency_scope(&self, component_id: &str) -> Result<Option<DependencyScope>> {
        DependencyGraph::get_dependency_scope(self, component_id)
    }

    fn get_additional_related_files(&self) -> BTreeSet<String> {
        DependencyGraph::get_additional_related_files(self)
    }
}
