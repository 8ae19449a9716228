//! Mock implementations for testing
#![allow(dead_code)]
mod mock_detector;
mod mock_graph_view;

pub use mock_detector::{MockDetector, MockEntry};
pub use mock_graph_view::MockGraphView;
