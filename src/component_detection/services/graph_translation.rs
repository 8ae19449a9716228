use crate::ports::outbound::DependencyGraphView;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Serializable form of one location's dependency graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraphWithMetadata {
    /// Component id to its direct dependencies; `None` while no dependency was seen
    pub graph: BTreeMap<String, Option<BTreeSet<String>>>,
    pub explicitly_referenced_component_ids: BTreeSet<String>,
    pub development_dependencies: BTreeSet<String>,
    pub dependencies: BTreeSet<String>,
}

/// Location to graph-with-metadata, ready for serialization
pub type DependencyGraphCollection = BTreeMap<String, DependencyGraphWithMetadata>;

/// GraphTranslation service converting recorder graphs into the collection model
pub struct GraphTranslation;

impl GraphTranslation {
    /// Folds many `get_dependency_graphs_by_location` results into one collection
    ///
    /// Graphs for the same location (e.g. two detectors reading the same manifest)
    /// are unioned. A component's dependency entry stays `None` until some graph
    /// reports a dependency for it.
    pub fn accumulate_and_convert<I, G>(graphs_by_location: I) -> Result<DependencyGraphCollection>
    where
        I: IntoIterator<Item = BTreeMap<String, Arc<G>>>,
        G: DependencyGraphView + ?Sized,
    {
        let mut collection = DependencyGraphCollection::new();

        for graphs in graphs_by_location {
            for (location, graph) in graphs {
                let metadata = collection.entry(location).or_default();
                Self::merge_graph(metadata, &*graph)?;
            }
        }

        Ok(collection)
    }

    fn merge_graph<G>(metadata: &mut DependencyGraphWithMetadata, graph: &G) -> Result<()>
    where
        G: DependencyGraphView + ?Sized,
    {
        for component_id in graph.components() {
            let dependencies = graph.get_dependencies_for_component(&component_id)?;
            let entry = metadata.graph.entry(component_id.clone()).or_insert(None);
            if !dependencies.is_empty() {
                entry.get_or_insert_with(BTreeSet::new).extend(dependencies);
            }

            match graph.is_development_dependency(&component_id)? {
                Some(true) => {
                    metadata.development_dependencies.insert(component_id);
                }
                Some(false) => {
                    metadata.dependencies.insert(component_id);
                }
                None => {}
            }
        }

        metadata
            .explicitly_referenced_component_ids
            .extend(graph.get_all_explicitly_referenced_components());
        Ok(())
    }

    /// Serializes the collection as pretty-printed JSON
    pub fn to_json(collection: &DependencyGraphCollection) -> Result<String> {
        serde_json::to_string_pretty(collection).map_err(Into::into)
    }
}
