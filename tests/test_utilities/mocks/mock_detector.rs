use component_recorder::prelude::*;

/// One component occurrence the mock detector reports
#[derive(Debug, Clone)]
pub struct MockEntry {
    pub name: String,
    pub version: String,
    pub parent: Option<(String, String)>,
    pub explicit: bool,
    pub development: Option<bool>,
    pub container_details_id: Option<u32>,
}

/// Mock detector that replays a fixed npm manifest into a registration target
///
/// Entries are registered in the order they were added, so parents must be
/// added before their children unless a test wants the referential error.
pub struct MockDetector {
    pub detector_id: String,
    pub entries: Vec<MockEntry>,
    pub parse_failures: Vec<String>,
    pub related_files: Vec<String>,
}

impl MockDetector {
    pub fn new(detector_id: &str) -> Self {
        Self {
            detector_id: detector_id.to_string(),
            entries: Vec::new(),
            parse_failures: Vec::new(),
            related_files: Vec::new(),
        }
    }

    pub fn with_root(mut self, name: &str, version: &str) -> Self {
        self.entries.push(MockEntry {
            name: name.to_string(),
            version: version.to_string(),
            parent: None,
            explicit: true,
            development: None,
            container_details_id: None,
        });
        self
    }

    pub fn with_dependency(
        mut self,
        name: &str,
        version: &str,
        parent: (&str, &str),
        development: Option<bool>,
    ) -> Self {
        self.entries.push(MockEntry {
            name: name.to_string(),
            version: version.to_string(),
            parent: Some((parent.0.to_string(), parent.1.to_string())),
            explicit: false,
            development,
            container_details_id: None,
        });
        self
    }

    /// Sets the container of the most recently added entry
    pub fn in_container(mut self, container_details_id: u32) -> Self {
        if let Some(last) = self.entries.last_mut() {
            last.container_details_id = Some(container_details_id);
        }
        self
    }

    pub fn with_parse_failure(mut self, package: &str) -> Self {
        self.parse_failures.push(package.to_string());
        self
    }

    pub fn with_related_file(mut self, file_path: &str) -> Self {
        self.related_files.push(file_path.to_string());
        self
    }

    pub fn npm_id(name: &str, version: &str) -> String {
        format!("{} {} - Npm", name, version)
    }

    /// Registers every entry, stopping at the first rejected registration
    pub fn scan(&self, registration: &dyn ComponentRegistration) -> Result<()> {
        for file_path in &self.related_files {
            registration.add_additional_related_file(file_path);
        }
        for package in &self.parse_failures {
            registration.register_package_parse_failure(package);
        }

        for entry in &self.entries {
            let mut detected =
                DetectedComponent::new(TypedComponent::npm(&entry.name, &entry.version)?)
                    .with_detector(&self.detector_id);
            if let Some(container_details_id) = entry.container_details_id {
                detected = detected.in_container(container_details_id, None);
            }

            let mut usage = if entry.explicit {
                UsageOptions::explicit()
            } else {
                UsageOptions::new()
            };
            if let Some((name, version)) = &entry.parent {
                usage = usage.with_parent(&Self::npm_id(name, version));
            }
            if let Some(development) = entry.development {
                usage = usage.with_development_dependency(development);
            }

            registration.register_usage(detected, usage)?;
        }
        Ok(())
    }
}
