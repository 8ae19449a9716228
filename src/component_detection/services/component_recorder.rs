use super::single_file_recorder::SingleFileComponentRecorder;
use crate::component_detection::domain::{DependencyGraph, DetectedComponent, TypedComponent};
use crate::config::RecorderConfig;
use crate::ports::inbound::ComponentRegistration;
use crate::shared::error::ensure_not_blank;
use crate::shared::Result;
use dashmap::DashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub(crate) struct RecorderState {
    single_file_recorders: DashMap<String, Arc<SingleFileComponentRecorder>>,
    next_creation_index: AtomicUsize,
    enable_manual_tracking_of_explicit_references: bool,
    warn_on_prepopulated_fields: bool,
}

/// ComponentRecorder owns the per-manifest recorders of one scan
///
/// Cloning is cheap and every clone refers to the same scan. Recorders created
/// through it keep a weak back-reference, so they never keep the scan alive.
#[derive(Debug, Clone)]
pub struct ComponentRecorder {
    state: Arc<RecorderState>,
}

impl Default for ComponentRecorder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ComponentRecorder {
    pub fn new(enable_manual_tracking_of_explicit_references: bool) -> Self {
        Self::with_settings(
            enable_manual_tracking_of_explicit_references,
            cfg!(debug_assertions),
        )
    }

    pub fn from_config(config: &RecorderConfig) -> Self {
        Self::with_settings(
            config.manual_tracking_enabled(),
            config.warn_on_prepopulated_fields(),
        )
    }

    fn with_settings(
        enable_manual_tracking_of_explicit_references: bool,
        warn_on_prepopulated_fields: bool,
    ) -> Self {
        Self {
            state: Arc::new(RecorderState {
                single_file_recorders: DashMap::new(),
                next_creation_index: AtomicUsize::new(0),
                enable_manual_tracking_of_explicit_references,
                warn_on_prepopulated_fields,
            }),
        }
    }

    pub(crate) fn from_state(state: Arc<RecorderState>) -> Self {
        Self { state }
    }

    /// Returns the recorder for `location`, creating it on first use
    ///
    /// # Errors
    /// `InvalidInput` when the location is blank.
    pub fn create_single_file_component_recorder(
        &self,
        location: &str,
    ) -> Result<Arc<SingleFileComponentRecorder>> {
        ensure_not_blank(location, "location")?;

        let recorder = self
            .state
            .single_file_recorders
            .entry(location.to_string())
            .or_insert_with(|| {
                debug!(location, "creating single file component recorder");
                Arc::new(SingleFileComponentRecorder::new(
                    location,
                    Arc::downgrade(&self.state),
                    self.state.next_creation_index.fetch_add(1, Ordering::SeqCst),
                    self.state.enable_manual_tracking_of_explicit_references,
                    self.state.warn_on_prepopulated_fields,
                ))
            })
            .value()
            .clone();

        Ok(recorder)
    }

    /// All detected components of the scan, one per component id, sorted by id
    ///
    /// When an id was found in several manifests the occurrence from the
    /// earliest created recorder wins. Container detail ids and container layer
    /// ids of the other occurrences are merged into the winner; no other field is.
    pub fn get_detected_components(&self) -> Vec<DetectedComponent> {
        let mut merged: BTreeMap<String, DetectedComponent> = BTreeMap::new();

        for recorder in self.recorders_in_creation_order() {
            for (component_id, component) in recorder.get_detected_components() {
                match merged.get_mut(&component_id) {
                    Some(winner) => {
                        winner
                            .container_detail_ids
                            .extend(component.container_detail_ids);
                        for (details_id, layers) in component.container_layer_ids {
                            let winner_layers =
                                winner.container_layer_ids.entry(details_id).or_default();
                            for layer in layers {
                                if !winner_layers.contains(&layer) {
                                    winner_layers.push(layer);
                                }
                            }
                        }
                    }
                    None => {
                        merged.insert(component_id, component);
                    }
                }
            }
        }

        merged.into_values().collect()
    }

    pub fn get_skipped_components(&self) -> BTreeSet<String> {
        self.state
            .single_file_recorders
            .iter()
            .flat_map(|entry| entry.value().get_skipped_components())
            .collect()
    }

    /// Graphs of every location where at least one component was recorded
    pub fn get_dependency_graphs_by_location(&self) -> BTreeMap<String, Arc<DependencyGraph>> {
        self.state
            .single_file_recorders
            .iter()
            .filter(|entry| entry.value().dependency_graph().has_components())
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value().dependency_graph())))
            .collect()
    }

    pub fn get_dependency_graph_for_location(
        &self,
        location: &str,
    ) -> Option<Arc<DependencyGraph>> {
        self.state
            .single_file_recorders
            .get(location)
            .map(|entry| Arc::clone(entry.value().dependency_graph()))
    }

    /// First typed component with the given id across all locations
    pub fn get_component(&self, component_id: &str) -> Option<TypedComponent> {
        self.recorders_in_creation_order()
            .iter()
            .find_map(|recorder| recorder.get_component(component_id))
            .map(|detected| detected.component().clone())
    }

    fn recorders_in_creation_order(&self) -> Vec<Arc<SingleFileComponentRecorder>> {
        let mut recorders: Vec<Arc<SingleFileComponentRecorder>> = self
            .state
            .single_file_recorders
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        recorders.sort_by_key(|recorder| recorder.creation_index());
        recorders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::inbound::UsageOptions;
    use crate::shared::RecorderError;

    fn npm(name: &str, version: &str) -> DetectedComponent {
        DetectedComponent::new(TypedComponent::npm(name, version).unwrap())
    }

    #[test]
    fn test_create_single_file_component_recorder_is_idempotent() {
        let recorder = ComponentRecorder::default();
        let first = recorder
            .create_single_file_component_recorder("/repo/package.json")
            .unwrap();
        let second = recorder
            .create_single_file_component_recorder("/repo/package.json")
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_create_single_file_component_recorder_rejects_blank_location() {
        let err = ComponentRecorder::default()
            .create_single_file_component_recorder(" ")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecorderError>(),
            Some(RecorderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_get_detected_components_merges_container_ids_only() {
        let recorder = ComponentRecorder::default();
        let first = recorder.create_single_file_component_recorder("/a/package.json").unwrap();
        let second = recorder.create_single_file_component_recorder("/b/package.json").unwrap();

        first
            .register_usage(
                npm("lodash", "4.17.21").with_detector("npm").in_container(1, Some(10)),
                UsageOptions::new(),
            )
            .unwrap();
        second
            .register_usage(
                npm("lodash", "4.17.21").with_detector("yarn").in_container(2, Some(20)),
                UsageOptions::new(),
            )
            .unwrap();

        let components = recorder.get_detected_components();
        assert_eq!(components.len(), 1);
        let lodash = &components[0];
        assert_eq!(lodash.container_detail_ids, BTreeSet::from([1, 2]));
        assert_eq!(lodash.container_layer_ids[&1], vec![10]);
        assert_eq!(lodash.container_layer_ids[&2], vec![20]);
        assert_eq!(lodash.detected_by.as_deref(), Some("npm"));

        // Stored records are untouched by aggregation
        let stored = first.get_component(lodash.id()).unwrap();
        assert_eq!(stored.container_detail_ids, BTreeSet::from([1]));
    }

    #[test]
    fn test_get_dependency_graphs_by_location_skips_empty_graphs() {
        let recorder = ComponentRecorder::default();
        let used = recorder.create_single_file_component_recorder("/used").unwrap();
        recorder.create_single_file_component_recorder("/empty").unwrap();
        used.register_usage(npm("a", "1.0.0"), UsageOptions::explicit()).unwrap();

        let graphs = recorder.get_dependency_graphs_by_location();
        assert_eq!(graphs.keys().collect::<Vec<_>>(), vec!["/used"]);
        assert!(recorder.get_dependency_graph_for_location("/empty").is_some());
        assert!(recorder.get_dependency_graph_for_location("/unknown").is_none());
    }

    #[test]
    fn test_get_component_searches_all_locations() {
        let recorder = ComponentRecorder::default();
        recorder.create_single_file_component_recorder("/a").unwrap();
        let second = recorder.create_single_file_component_recorder("/b").unwrap();
        let component = npm("left-pad", "1.3.0");
        let id = component.id().to_string();
        second.register_usage(component, UsageOptions::new()).unwrap();

        assert_eq!(
            recorder.get_component(&id),
            Some(TypedComponent::npm("left-pad", "1.3.0").unwrap())
        );
        assert!(recorder.get_component("missing 1.0.0 - Npm").is_none());
    }

    #[test]
    fn test_skipped_components_are_unioned() {
        let recorder = ComponentRecorder::default();
        recorder
            .create_single_file_component_recorder("/a")
            .unwrap()
            .register_package_parse_failure("x");
        recorder
            .create_single_file_component_recorder("/b")
            .unwrap()
            .register_package_parse_failure("y");

        assert_eq!(
            recorder.get_skipped_components(),
            BTreeSet::from(["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_back_reference_follows_recorder_lifetime() {
        let recorder = ComponentRecorder::new(false);
        let single = recorder.create_single_file_component_recorder("/a").unwrap();

        let parent = single.parent_component_recorder().unwrap();
        assert!(Arc::ptr_eq(&parent.state, &recorder.state));
        assert!(!single.dependency_graph().manual_tracking_enabled());

        drop(parent);
        drop(recorder);
        assert!(single.parent_component_recorder().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = RecorderConfig {
            enable_manual_tracking_of_explicit_references: Some(false),
            ..RecorderConfig::default()
        };
        let recorder = ComponentRecorder::from_config(&config);
        let single = recorder.create_single_file_component_recorder("/a").unwrap();
        assert!(!single.dependency_graph().manual_tracking_enabled());
    }
}
