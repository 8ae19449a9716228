use super::{DependencyScope, TypedComponent};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A component found during a scan, plus everything gathered about it.
///
/// The graph node for the same id is purely structural; this record is the
/// payload. The typed component and its id are fixed at construction, the
/// remaining fields accumulate while the scan runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedComponent {
    component: TypedComponent,
    #[serde(skip)]
    id: String,
    /// Id of the detector that produced this component
    pub detected_by: Option<String>,
    pub file_paths: BTreeSet<String>,
    /// Filled by the reporting layer from the dependency graph
    pub dependency_roots: Option<BTreeSet<TypedComponent>>,
    /// Filled by the reporting layer from the dependency graph
    pub ancestral_dependency_roots: Option<BTreeSet<TypedComponent>>,
    pub development_dependency: Option<bool>,
    pub container_detail_ids: BTreeSet<u32>,
    pub container_layer_ids: BTreeMap<u32, Vec<u32>>,
    pub dependency_scope: Option<DependencyScope>,
    pub target_frameworks: BTreeSet<String>,
}

impl DetectedComponent {
    pub fn new(component: TypedComponent) -> Self {
        let id = component.id();
        Self {
            component,
            id,
            detected_by: None,
            file_paths: BTreeSet::new(),
            dependency_roots: None,
            ancestral_dependency_roots: None,
            development_dependency: None,
            container_detail_ids: BTreeSet::new(),
            container_layer_ids: BTreeMap::new(),
            dependency_scope: None,
            target_frameworks: BTreeSet::new(),
        }
    }

    pub fn with_detector(mut self, detector_id: &str) -> Self {
        self.detected_by = Some(detector_id.to_string());
        self
    }

    /// Marks the component as found inside a container, optionally in a specific layer
    pub fn in_container(
        mut self,
        container_details_id: u32,
        container_layer_id: Option<u32>,
    ) -> Self {
        self.container_detail_ids.insert(container_details_id);
        if let Some(layer_id) = container_layer_id {
            let layers = self.container_layer_ids.entry(container_details_id).or_default();
            if !layers.contains(&layer_id) {
                layers.push(layer_id);
            }
        }
        self
    }

    pub fn component(&self) -> &TypedComponent {
        &self.component
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds a file path this component was found at.
    ///
    /// The dependency graph already attributes the manifest location; detectors
    /// only call this for extra files they processed themselves (e.g. workspace
    /// manifests followed from a lockfile).
    pub fn add_component_file_path(&mut self, file_path: &str) {
        self.file_paths.insert(file_path.to_string());
    }
}
