use super::component_recorder::{ComponentRecorder, RecorderState};
use crate::component_detection::domain::{ComponentRefNode, DependencyGraph, DetectedComponent};
use crate::ports::inbound::{ComponentRegistration, UsageOptions};
use crate::shared::error::ensure_not_blank;
use crate::shared::Result;
use dashmap::{DashMap, DashSet};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::{debug, warn};

/// SingleFileComponentRecorder collects everything detected in one manifest
///
/// Holds one dependency graph and one catalog of detected components keyed by
/// component id. Catalog upsert and graph mutation happen under one lock, so a
/// component is never visible in the catalog without its graph node.
#[derive(Debug)]
pub struct SingleFileComponentRecorder {
    manifest_file_location: String,
    dependency_graph: Arc<DependencyGraph>,
    detected_components: DashMap<String, DetectedComponent>,
    skipped_components: DashSet<String>,
    registration_lock: Mutex<()>,
    parent: Weak<RecorderState>,
    creation_index: usize,
    warn_on_prepopulated_fields: bool,
}

impl SingleFileComponentRecorder {
    pub(crate) fn new(
        manifest_file_location: &str,
        parent: Weak<RecorderState>,
        creation_index: usize,
        enable_manual_tracking_of_explicit_references: bool,
        warn_on_prepopulated_fields: bool,
    ) -> Self {
        Self {
            manifest_file_location: manifest_file_location.to_string(),
            dependency_graph: Arc::new(DependencyGraph::new(
                enable_manual_tracking_of_explicit_references,
            )),
            detected_components: DashMap::new(),
            skipped_components: DashSet::new(),
            registration_lock: Mutex::new(()),
            parent,
            creation_index,
            warn_on_prepopulated_fields,
        }
    }

    pub fn dependency_graph(&self) -> &Arc<DependencyGraph> {
        &self.dependency_graph
    }

    /// Snapshot of the catalog, keyed by component id
    pub fn get_detected_components(&self) -> BTreeMap<String, DetectedComponent> {
        self.detected_components
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn get_skipped_components(&self) -> BTreeSet<String> {
        self.skipped_components
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn get_additional_related_files(&self) -> BTreeSet<String> {
        self.dependency_graph.get_additional_related_files()
    }

    /// The scan-wide recorder that created this one, if it is still alive
    pub fn parent_component_recorder(&self) -> Option<ComponentRecorder> {
        self.parent.upgrade().map(ComponentRecorder::from_state)
    }

    pub(crate) fn creation_index(&self) -> usize {
        self.creation_index
    }

    fn warn_on_prepopulated(&self, detected_component: &DetectedComponent) {
        if !self.warn_on_prepopulated_fields {
            return;
        }
        if detected_component.dependency_roots.is_some() {
            warn!(
                component_id = detected_component.id(),
                location = %self.manifest_file_location,
                "dependency_roots is computed by the recorder; detector value ignored"
            );
        }
        if detected_component.development_dependency.is_some() {
            warn!(
                component_id = detected_component.id(),
                location = %self.manifest_file_location,
                "development_dependency belongs in UsageOptions, not on the component"
            );
        }
    }
}

impl ComponentRegistration for SingleFileComponentRecorder {
    fn manifest_file_location(&self) -> &str {
        &self.manifest_file_location
    }

    fn register_usage(
        &self,
        detected_component: DetectedComponent,
        usage: UsageOptions,
    ) -> Result<()> {
        let component_id = detected_component.id().to_string();
        ensure_not_blank(&component_id, "component id")?;
        self.warn_on_prepopulated(&detected_component);

        let node = ComponentRefNode::new(&component_id)
            .with_explicit_reference(usage.is_explicit_reference)
            .with_development_dependency(usage.is_development_dependency)
            .with_dependency_scope(usage.dependency_scope);

        let _guard = self
            .registration_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Graph first: a rejected edge must not leave a catalog entry behind
        self.dependency_graph
            .add_component(node, usage.parent_component_id.as_deref())?;

        let mut stored = self
            .detected_components
            .entry(component_id.clone())
            .or_insert(detected_component);

        if let Some(target_framework) = usage
            .target_framework
            .as_deref()
            .map(str::trim)
            .filter(|framework| !framework.is_empty())
        {
            stored.target_frameworks.insert(target_framework.to_string());
        }
        drop(stored);

        debug!(
            component_id = %component_id,
            location = %self.manifest_file_location,
            explicit = usage.is_explicit_reference,
            parent = ?usage.parent_component_id,
            "registered component usage"
        );
        Ok(())
    }

    fn register_package_parse_failure(&self, skipped_component: &str) {
        debug!(
            skipped_component,
            location = %self.manifest_file_location,
            "package could not be parsed"
        );
        self.skipped_components.insert(skipped_component.to_string());
    }

    fn get_component(&self, component_id: &str) -> Option<DetectedComponent> {
        self.detected_components
            .get(component_id)
            .map(|entry| entry.value().clone())
    }

    fn add_additional_related_file(&self, file_path: &str) {
        self.dependency_graph.add_additional_related_file(file_path);
    }
}
