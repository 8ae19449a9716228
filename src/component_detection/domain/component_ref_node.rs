use super::{DependencyScope, TypedComponent};
use crate::component_detection::policies::ScopePriority;
use std::collections::BTreeSet;

/// A single vertex of a [`DependencyGraph`](super::DependencyGraph).
///
/// Nodes never own each other: adjacency is stored as sets of component ids and
/// every traversal goes back through the graph's node index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRefNode {
    id: String,
    is_explicitly_referenced: bool,
    is_development_dependency: Option<bool>,
    dependency_scope: Option<DependencyScope>,
    dependency_ids: BTreeSet<String>,
    depended_on_by_ids: BTreeSet<String>,
    typed_component: Option<TypedComponent>,
}

impl ComponentRefNode {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_explicit_reference(mut self, is_explicitly_referenced: bool) -> Self {
        self.is_explicitly_referenced = is_explicitly_referenced;
        self
    }

    pub fn with_development_dependency(mut self, is_development_dependency: Option<bool>) -> Self {
        self.is_development_dependency = is_development_dependency;
        self
    }

    pub fn with_dependency_scope(mut self, dependency_scope: Option<DependencyScope>) -> Self {
        self.dependency_scope = dependency_scope;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_explicitly_referenced(&self) -> bool {
        self.is_explicitly_referenced
    }

    pub fn is_development_dependency(&self) -> Option<bool> {
        self.is_development_dependency
    }

    pub fn dependency_scope(&self) -> Option<DependencyScope> {
        self.dependency_scope
    }

    /// Ids this node directly depends on
    pub fn dependency_ids(&self) -> &BTreeSet<String> {
        &self.dependency_ids
    }

    /// Ids that directly depend on this node
    pub fn depended_on_by_ids(&self) -> &BTreeSet<String> {
        &self.depended_on_by_ids
    }

    pub fn typed_component(&self) -> Option<&TypedComponent> {
        self.typed_component.as_ref()
    }

    /// Folds another observation of the same component into this node.
    ///
    /// - explicit reference: OR, once true stays true
    /// - development dependency: AND over observed values; an unknown incoming
    ///   value leaves storage alone, an unknown stored value adopts the incoming one
    /// - scope: [`ScopePriority::merge`]
    ///
    /// Returns true when the explicit flag flipped, which changes root closures.
    pub(crate) fn merge_from(&mut self, update: &ComponentRefNode) -> bool {
        let was_explicit = self.is_explicitly_referenced;
        self.is_explicitly_referenced |= update.is_explicitly_referenced;

        if let Some(incoming) = update.is_development_dependency {
            self.is_development_dependency =
                Some(self.is_development_dependency.unwrap_or(true) && incoming);
        }

        self.dependency_scope =
            ScopePriority::merge(self.dependency_scope, update.dependency_scope);

        !was_explicit && self.is_explicitly_referenced
    }

    pub(crate) fn add_dependency_id(&mut self, component_id: &str) -> bool {
        self.dependency_ids.insert(component_id.to_string())
    }

    pub(crate) fn add_depended_on_by_id(&mut self, component_id: &str) -> bool {
        self.depended_on_by_ids.insert(component_id.to_string())
    }

    pub(crate) fn set_typed_component(&mut self, typed_component: Option<TypedComponent>) {
        self.typed_component = typed_component;
    }
}
