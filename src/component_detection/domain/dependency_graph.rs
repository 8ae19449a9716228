use super::{ComponentRefNode, DependencyScope, TypedComponent};
use crate::shared::error::{ensure_not_blank, RecorderError};
use crate::shared::Result;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// A component reached by walking upward from a queried component, with the
/// hop count at which the walk first labelled it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub id: String,
    pub depth: usize,
}

impl Ancestor {
    pub fn new(id: &str, depth: usize) -> Self {
        Self {
            id: id.to_string(),
            depth,
        }
    }
}

/// Memoized closure tagged with the graph generation it was computed at
#[derive(Debug, Clone)]
struct CachedClosure<T> {
    generation: u64,
    value: T,
}

/// DependencyGraph for a single manifest location
///
/// Nodes live in an index keyed by component id; adjacency is stored as id sets
/// on the nodes. Safe for concurrent writers and readers. Any number of threads
/// may call [`add_component`](Self::add_component) and the traversal queries at
/// the same time.
///
/// # Caching
/// Root closures and ancestor closures are memoized per queried component. Each
/// entry stores the generation it was computed at; any new edge or explicit flag
/// flip bumps the generation so stale entries are ignored and recomputed.
#[derive(Debug)]
pub struct DependencyGraph {
    component_nodes: DashMap<String, ComponentRefNode>,
    enable_manual_tracking_of_explicit_references: bool,
    additional_related_files: DashSet<String>,
    generation: AtomicU64,
    root_cache: DashMap<String, CachedClosure<BTreeSet<String>>>,
    ancestor_cache: DashMap<String, CachedClosure<BTreeMap<String, usize>>>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DependencyGraph {
    /// Creates an empty graph
    ///
    /// With manual tracking enabled a component is a root when a detector marked it
    /// as explicitly referenced. With it disabled a component is a root when nothing
    /// depends on it.
    pub fn new(enable_manual_tracking_of_explicit_references: bool) -> Self {
        Self {
            component_nodes: DashMap::new(),
            enable_manual_tracking_of_explicit_references,
            additional_related_files: DashSet::new(),
            generation: AtomicU64::new(0),
            root_cache: DashMap::new(),
            ancestor_cache: DashMap::new(),
        }
    }

    pub fn manual_tracking_enabled(&self) -> bool {
        self.enable_manual_tracking_of_explicit_references
    }

    /// Inserts `node`, or merges it into the existing node with the same id, then
    /// adds the edge `parent_id -> node` when a non-blank parent is given.
    ///
    /// The parent must already be in the graph (a component may name itself as
    /// parent). The check runs before anything is written, so a rejected call
    /// leaves the graph untouched.
    pub fn add_component(&self, node: ComponentRefNode, parent_id: Option<&str>) -> Result<()> {
        ensure_not_blank(node.id(), "component id")?;

        let component_id = node.id().to_string();
        let parent_id = parent_id.filter(|parent| !parent.trim().is_empty());

        if let Some(parent) = parent_id {
            if parent != component_id && !self.contains(parent) {
                return Err(RecorderError::missing_node(parent).into());
            }
        }

        let mut structure_changed = match self.component_nodes.entry(component_id.clone()) {
            Entry::Occupied(mut existing) => existing.get_mut().merge_from(&node),
            Entry::Vacant(vacant) => {
                vacant.insert(node);
                false
            }
        };

        if let Some(parent) = parent_id {
            // Guards are taken one at a time; holding two on the same map can deadlock.
            let added_down = self
                .component_nodes
                .get_mut(parent)
                .map(|mut parent_node| parent_node.add_dependency_id(&component_id))
                .ok_or_else(|| RecorderError::missing_node(parent))?;
            let added_up = self
                .component_nodes
                .get_mut(&component_id)
                .map(|mut child_node| child_node.add_depended_on_by_id(parent))
                .ok_or_else(|| RecorderError::missing_node(&component_id))?;

            if added_down || added_up {
                debug!(parent = parent, child = %component_id, "added dependency edge");
                structure_changed = true;
            }
        }

        if structure_changed {
            self.generation.fetch_add(1, Ordering::SeqCst);
        }

        Ok(())
    }

    /// Returns the root components reachable by walking upward from `component_id`,
    /// excluding `component_id` itself.
    ///
    /// # Errors
    /// `InvalidInput` for a blank id, `MissingNode` for an id not in the graph.
    pub fn get_explicit_referenced_dependency_ids(
        &self,
        component_id: &str,
    ) -> Result<BTreeSet<String>> {
        ensure_not_blank(component_id, "component id")?;
        if !self.contains(component_id) {
            return Err(RecorderError::missing_node(component_id).into());
        }

        let generation = self.generation.load(Ordering::SeqCst);
        if let Some(cached) = Self::cached(&self.root_cache, component_id, generation) {
            return Ok(cached);
        }

        let mut roots = BTreeSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![component_id.to_string()];
        visited.insert(component_id.to_string());

        while let Some(current) = stack.pop() {
            let (is_root, parents) = match self.component_nodes.get(&current) {
                Some(node) => (self.is_root(&node), node.depended_on_by_ids().clone()),
                None => continue,
            };

            if is_root {
                roots.insert(current.clone());
            }

            if current != component_id {
                if let Some(cached) = Self::cached(&self.root_cache, &current, generation) {
                    roots.extend(cached);
                    continue;
                }
            }

            for parent in parents.into_iter().rev() {
                if visited.insert(parent.clone()) {
                    stack.push(parent);
                }
            }
        }

        roots.remove(component_id);
        self.root_cache.insert(
            component_id.to_string(),
            CachedClosure {
                generation,
                value: roots.clone(),
            },
        );

        Ok(roots)
    }

    /// Returns every component reachable upward from `component_id`, each with the
    /// depth at which a depth-first walk first reached it, ordered by depth and
    /// then id. The queried component is never part of the result.
    ///
    /// On diamond-shaped graphs the depth is the first label assigned, not
    /// necessarily the shortest path. Unknown ids yield an empty list.
    pub fn get_ancestors(&self, component_id: &str) -> Vec<Ancestor> {
        if !self.contains(component_id) {
            return Vec::new();
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let depths = match Self::cached(&self.ancestor_cache, component_id, generation) {
            Some(cached) => cached,
            None => self.compute_ancestors(component_id, generation),
        };

        let mut ancestors: Vec<Ancestor> = depths
            .into_iter()
            .map(|(id, depth)| Ancestor { id, depth })
            .collect();
        // BTreeMap iteration is id-ordered, so a stable sort keeps ids ascending per depth
        ancestors.sort_by_key(|ancestor| ancestor.depth);
        ancestors
    }

    fn compute_ancestors(&self, component_id: &str, generation: u64) -> BTreeMap<String, usize> {
        let mut depths: BTreeMap<String, usize> = BTreeMap::new();
        depths.insert(component_id.to_string(), 0);

        let mut stack: Vec<(String, usize)> = self
            .parents_of(component_id)
            .into_iter()
            .rev()
            .map(|parent| (parent, 1))
            .collect();

        while let Some((current, depth)) = stack.pop() {
            if depths.contains_key(&current) {
                continue;
            }
            depths.insert(current.clone(), depth);

            // A cached closure equals what expanding `current` here would label only
            // when none of its ancestors are labelled yet. The queried id is always
            // labelled, so closures that loop back through it are expanded instead.
            if let Some(cached) = Self::cached(&self.ancestor_cache, &current, generation) {
                if cached.keys().all(|ancestor| !depths.contains_key(ancestor)) {
                    for (ancestor, offset) in cached {
                        depths.insert(ancestor, depth + offset);
                    }
                    continue;
                }
            }

            for parent in self.parents_of(&current).into_iter().rev() {
                if !depths.contains_key(&parent) {
                    stack.push((parent, depth + 1));
                }
            }
        }

        depths.remove(component_id);
        self.ancestor_cache.insert(
            component_id.to_string(),
            CachedClosure {
                generation,
                value: depths.clone(),
            },
        );
        depths
    }

    /// Ancestor ids in the order [`get_ancestors`](Self::get_ancestors) returns them
    pub fn get_ancestor_ids(&self, component_id: &str) -> Vec<String> {
        self.get_ancestors(component_id)
            .into_iter()
            .map(|ancestor| ancestor.id)
            .collect()
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.component_nodes.contains_key(component_id)
    }

    /// Direct dependencies of a component
    ///
    /// # Errors
    /// `MissingNode` when the id is not in the graph.
    pub fn get_dependencies_for_component(&self, component_id: &str) -> Result<BTreeSet<String>> {
        self.read_node(component_id, |node| node.dependency_ids().clone())
    }

    pub fn is_development_dependency(&self, component_id: &str) -> Result<Option<bool>> {
        self.read_node(component_id, ComponentRefNode::is_development_dependency)
    }

    pub fn get_dependency_scope(&self, component_id: &str) -> Result<Option<DependencyScope>> {
        self.read_node(component_id, ComponentRefNode::dependency_scope)
    }

    /// Whether the component counts as a root under this graph's policy
    pub fn is_component_explicitly_referenced(&self, component_id: &str) -> Result<bool> {
        self.read_node(component_id, |node| self.is_root(node))
    }

    /// All components counting as roots under this graph's policy
    pub fn get_all_explicitly_referenced_components(&self) -> BTreeSet<String> {
        self.component_nodes
            .iter()
            .filter(|entry| self.is_root(entry.value()))
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn has_components(&self) -> bool {
        !self.component_nodes.is_empty()
    }

    /// All component ids in the graph, sorted
    pub fn components(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .component_nodes
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn add_additional_related_file(&self, file_path: &str) {
        self.additional_related_files.insert(file_path.to_string());
    }

    pub fn get_additional_related_files(&self) -> BTreeSet<String> {
        self.additional_related_files
            .iter()
            .map(|file| file.key().clone())
            .collect()
    }

    /// Resolves and stores the typed component of every node
    ///
    /// Nodes the resolver cannot resolve keep no typed component.
    pub fn fill_typed_components<F>(&self, resolver: F)
    where
        F: Fn(&str) -> Option<TypedComponent>,
    {
        for component_id in self.components() {
            let typed_component = resolver(&component_id);
            if let Some(mut node) = self.component_nodes.get_mut(&component_id) {
                node.set_typed_component(typed_component);
            }
        }
    }

    /// Typed components of the roots of `component_id`
    ///
    /// Ids that neither the node nor the resolver can turn into a typed
    /// component are skipped.
    pub fn roots_as_typed_components<F>(
        &self,
        component_id: &str,
        resolver: F,
    ) -> Result<Vec<TypedComponent>>
    where
        F: Fn(&str) -> Option<TypedComponent>,
    {
        let roots = self.get_explicit_referenced_dependency_ids(component_id)?;
        Ok(roots
            .iter()
            .filter_map(|root| self.typed_component_for(root, &resolver))
            .collect())
    }

    /// Typed components of the ancestors of `component_id`, in ancestor order
    pub fn ancestors_as_typed_components<F>(
        &self,
        component_id: &str,
        resolver: F,
    ) -> Vec<TypedComponent>
    where
        F: Fn(&str) -> Option<TypedComponent>,
    {
        self.get_ancestor_ids(component_id)
            .iter()
            .filter_map(|ancestor| self.typed_component_for(ancestor, &resolver))
            .collect()
    }

    fn typed_component_for<F>(&self, component_id: &str, resolver: &F) -> Option<TypedComponent>
    where
        F: Fn(&str) -> Option<TypedComponent>,
    {
        let filled = self
            .component_nodes
            .get(component_id)
            .and_then(|node| node.typed_component().cloned());
        filled.or_else(|| resolver(component_id))
    }

    fn is_root(&self, node: &ComponentRefNode) -> bool {
        if self.enable_manual_tracking_of_explicit_references {
            node.is_explicitly_referenced()
        } else {
            node.depended_on_by_ids().is_empty()
        }
    }

    fn parents_of(&self, component_id: &str) -> Vec<String> {
        self.component_nodes
            .get(component_id)
            .map(|node| node.depended_on_by_ids().iter().cloned().collect())
            .unwrap_or_default()
    }

    fn read_node<T, F>(&self, component_id: &str, read: F) -> Result<T>
    where
        F: FnOnce(&ComponentRefNode) -> T,
    {
        let node = self
            .component_nodes
            .get(component_id)
            .ok_or_else(|| RecorderError::missing_node(component_id))?;
        Ok(read(node.value()))
    }

    fn cached<T: Clone>(
        cache: &DashMap<String, CachedClosure<T>>,
        component_id: &str,
        generation: u64,
    ) -> Option<T> {
        cache
            .get(component_id)
            .filter(|entry| entry.generation == generation)
            .map(|entry| entry.value.clone())
    }
}
