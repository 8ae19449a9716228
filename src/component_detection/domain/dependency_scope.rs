use serde::{Deserialize, Serialize};
use std::fmt;

/// Ecosystem-specific classification of how a dependency participates in
/// compilation and runtime.
///
/// Declaration order is not significant; merge precedence lives in
/// [`ScopePriority`](crate::component_detection::policies::ScopePriority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyScope {
    MavenCompile,
    MavenRuntime,
    MavenProvided,
    MavenSystem,
    MavenTest,
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MavenCompile => write!(f, "compile"),
            Self::MavenRuntime => write!(f, "runtime"),
            Self::MavenProvided => write!(f, "provided"),
            Self::MavenSystem => write!(f, "system"),
            Self::MavenTest => write!(f, "test"),
        }
    }
}
