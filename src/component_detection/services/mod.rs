mod component_recorder;
mod graph_translation;
mod single_file_recorder;

pub use component_recorder::ComponentRecorder;
pub use graph_translation::{
    DependencyGraphCollection, DependencyGraphWithMetadata, GraphTranslation,
};
pub use single_file_recorder::SingleFileComponentRecorder;
