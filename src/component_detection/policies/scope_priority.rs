use crate::component_detection::domain::DependencyScope;

/// ScopePriority policy for merging dependency scopes
///
/// When the same component is observed with different scopes, the scope that
/// makes the component most "present" in the final artifact wins.
///
/// Priority order (highest first):
/// 1. compile
/// 2. runtime
/// 3. provided
/// 4. system
/// 5. test
pub struct ScopePriority;

impl ScopePriority {
    /// Lower rank means higher priority
    pub fn rank(scope: DependencyScope) -> u8 {
        match scope {
            DependencyScope::MavenCompile => 0,
            DependencyScope::MavenRuntime => 1,
            DependencyScope::MavenProvided => 2,
            DependencyScope::MavenSystem => 3,
            DependencyScope::MavenTest => 4,
        }
    }

    /// Merges two optional scopes
    ///
    /// A missing scope never overrides a known one. The result is independent of
    /// argument order.
    pub fn merge(
        current: Option<DependencyScope>,
        incoming: Option<DependencyScope>,
    ) -> Option<DependencyScope> {
        match (current, incoming) {
            (None, None) => None,
            (Some(scope), None) | (None, Some(scope)) => Some(scope),
            (Some(a), Some(b)) => {
                if Self::rank(b) < Self::rank(a) {
                    Some(b)
                } else {
                    Some(a)
                }
            }
        }
    }
}
