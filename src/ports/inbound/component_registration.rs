use crate::component_detection::domain::{DependencyScope, DetectedComponent};
use crate::shared::Result;

/// Flags describing one occurrence of a component in a manifest
///
/// Every field defaults to "not stated": not explicit, no parent, unknown
/// development status, no scope, no target framework.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageOptions {
    /// The manifest author declared this component directly
    pub is_explicit_reference: bool,
    /// Id of the component that pulled this one in; must already be registered
    pub parent_component_id: Option<String>,
    pub is_development_dependency: Option<bool>,
    pub dependency_scope: Option<DependencyScope>,
    /// Target framework moniker (e.g. `net8.0`) the component was resolved for
    pub target_framework: Option<String>,
}

impl UsageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a component the manifest declares directly
    pub fn explicit() -> Self {
        Self {
            is_explicit_reference: true,
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_component_id: &str) -> Self {
        self.parent_component_id = Some(parent_component_id.to_string());
        self
    }

    pub fn with_development_dependency(mut self, is_development_dependency: bool) -> Self {
        self.is_development_dependency = Some(is_development_dependency);
        self
    }

    pub fn with_scope(mut self, dependency_scope: DependencyScope) -> Self {
        self.dependency_scope = Some(dependency_scope);
        self
    }

    pub fn with_target_framework(mut self, target_framework: &str) -> Self {
        self.target_framework = Some(target_framework.to_string());
        self
    }
}

/// ComponentRegistration port used by detectors to record what they find
///
/// One instance is bound to one manifest location. Implementations must be
/// `Send + Sync`: detectors may register from several threads at once.
pub trait ComponentRegistration: Send + Sync {
    /// Location of the manifest this registration target is bound to
    fn manifest_file_location(&self) -> &str;

    /// Records one occurrence of `detected_component`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The component id is blank
    /// - `usage.parent_component_id` names a component not registered yet
    fn register_usage(
        &self,
        detected_component: DetectedComponent,
        usage: UsageOptions,
    ) -> Result<()>;

    /// Records a package the detector found but could not parse
    fn register_package_parse_failure(&self, skipped_component: &str);

    /// Looks up a component registered at this location; `None` when absent
    fn get_component(&self, component_id: &str) -> Option<DetectedComponent>;

    /// Attributes an extra file (e.g. a lockfile companion) to this location
    fn add_additional_related_file(&self, file_path: &str);
}
