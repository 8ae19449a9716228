use component_recorder::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Mock DependencyGraphView backed by fixed tables
///
/// Only the reads graph translation needs carry data; traversal reads return
/// empty results.
#[derive(Default)]
pub struct MockGraphView {
    pub dependencies: BTreeMap<String, BTreeSet<String>>,
    pub explicit: BTreeSet<String>,
    pub development: BTreeMap<String, bool>,
}

impl MockGraphView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, id: &str, dependencies: &[&str]) -> Self {
        self.dependencies.insert(
            id.to_string(),
            dependencies.iter().map(|dep| dep.to_string()).collect(),
        );
        self
    }

    pub fn with_explicit(mut self, id: &str) -> Self {
        self.explicit.insert(id.to_string());
        self
    }

    pub fn with_development(mut self, id: &str, development: bool) -> Self {
        self.development.insert(id.to_string(), development);
        self
    }

    fn require(&self, component_id: &str) -> Result<()> {
        if self.dependencies.contains_key(component_id) {
            Ok(())
        } else {
            Err(RecorderError::missing_node(component_id).into())
        }
    }
}

impl DependencyGraphView for MockGraphView {
    fn contains(&self, component_id: &str) -> bool {
        self.dependencies.contains_key(component_id)
    }

    fn has_components(&self) -> bool {
        !self.dependencies.is_empty()
    }

    fn components(&self) -> Vec<String> {
        self.dependencies.keys().cloned().collect()
    }

    fn get_dependencies_for_component(&self, component_id: &str) -> Result<BTreeSet<String>> {
        self.require(component_id)?;
        Ok(self.dependencies[component_id].clone())
    }

    fn get_explicit_referenced_dependency_ids(
        &self,
        component_id: &str,
    ) -> Result<BTreeSet<String>> {
        self.require(component_id)?;
        Ok(BTreeSet::new())
    }

    fn get_ancestors(&self, _component_id: &str) -> Vec<Ancestor> {
        Vec::new()
    }

    fn get_all_explicitly_referenced_components(&self) -> BTreeSet<String> {
        self.explicit.clone()
    }

    fn is_component_explicitly_referenced(&self, component_id: &str) -> Result<bool> {
        self.require(component_id)?;
        Ok(self.explicit.contains(component_id))
    }

    fn is_development_dependency(&self, component_id: &str) -> Result<Option<bool>> {
        self.require(component_id)?;
        Ok(self.development.get(component_id).copied())
    }

    fn get_dependency_scope(&self, component_id: &str) -> Result<Option<DependencyScope>> {
        self.require(component_id)?;
        Ok(None)
    }

    fn get_additional_related_files(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}
