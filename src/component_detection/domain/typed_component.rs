use crate::shared::error::ensure_not_blank;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ecosystem a component belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    Npm,
    NuGet,
    Maven,
    Pip,
    Go,
    Cargo,
    Linux,
    Other,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentType::Npm => "Npm",
            ComponentType::NuGet => "NuGet",
            ComponentType::Maven => "Maven",
            ComponentType::Pip => "Pip",
            ComponentType::Go => "Go",
            ComponentType::Cargo => "Cargo",
            ComponentType::Linux => "Linux",
            ComponentType::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// TypedComponent value object describing a component's logical identity
///
/// The component id is derived from the identity fields only; metadata such as
/// licenses or authors never participates. Two components with equal ids are the
/// same component as far as the dependency graph is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TypedComponent {
    Npm {
        name: String,
        version: String,
    },
    NuGet {
        name: String,
        version: String,
    },
    Maven {
        group_id: String,
        artifact_id: String,
        version: String,
    },
    Pip {
        name: String,
        version: String,
    },
    Go {
        name: String,
        version: String,
        hash: Option<String>,
    },
    Cargo {
        name: String,
        version: String,
    },
    Linux {
        distribution: String,
        release: String,
        name: String,
        version: String,
    },
    Other {
        name: String,
        version: String,
        download_url: String,
    },
}

/// Validates a required identity field, naming the component type in the error
fn required(input: &str, field: &str, component_type: ComponentType) -> Result<String> {
    ensure_not_blank(input, &format!("{} of component type {}", field, component_type))?;
    Ok(input.to_string())
}

impl TypedComponent {
    pub fn npm(name: &str, version: &str) -> Result<Self> {
        Ok(TypedComponent::Npm {
            name: required(name, "name", ComponentType::Npm)?,
            version: required(version, "version", ComponentType::Npm)?,
        })
    }

    pub fn nuget(name: &str, version: &str) -> Result<Self> {
        Ok(TypedComponent::NuGet {
            name: required(name, "name", ComponentType::NuGet)?,
            version: required(version, "version", ComponentType::NuGet)?,
        })
    }

    pub fn maven(group_id: &str, artifact_id: &str, version: &str) -> Result<Self> {
        Ok(TypedComponent::Maven {
            group_id: required(group_id, "group_id", ComponentType::Maven)?,
            artifact_id: required(artifact_id, "artifact_id", ComponentType::Maven)?,
            version: required(version, "version", ComponentType::Maven)?,
        })
    }

    pub fn pip(name: &str, version: &str) -> Result<Self> {
        Ok(TypedComponent::Pip {
            name: required(name, "name", ComponentType::Pip)?,
            version: required(version, "version", ComponentType::Pip)?,
        })
    }

    /// Go module; `hash` is the pseudo-version commit when one is known
    pub fn go(name: &str, version: &str, hash: Option<&str>) -> Result<Self> {
        let hash = match hash {
            Some(hash) => Some(required(hash, "hash", ComponentType::Go)?),
            None => None,
        };
        Ok(TypedComponent::Go {
            name: required(name, "name", ComponentType::Go)?,
            version: required(version, "version", ComponentType::Go)?,
            hash,
        })
    }

    pub fn cargo(name: &str, version: &str) -> Result<Self> {
        Ok(TypedComponent::Cargo {
            name: required(name, "name", ComponentType::Cargo)?,
            version: required(version, "version", ComponentType::Cargo)?,
        })
    }

    pub fn linux(distribution: &str, release: &str, name: &str, version: &str) -> Result<Self> {
        Ok(TypedComponent::Linux {
            distribution: required(distribution, "distribution", ComponentType::Linux)?,
            release: required(release, "release", ComponentType::Linux)?,
            name: required(name, "name", ComponentType::Linux)?,
            version: required(version, "version", ComponentType::Linux)?,
        })
    }

    pub fn other(name: &str, version: &str, download_url: &str) -> Result<Self> {
        Ok(TypedComponent::Other {
            name: required(name, "name", ComponentType::Other)?,
            version: required(version, "version", ComponentType::Other)?,
            download_url: required(download_url, "download_url", ComponentType::Other)?,
        })
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            TypedComponent::Npm { .. } => ComponentType::Npm,
            TypedComponent::NuGet { .. } => ComponentType::NuGet,
            TypedComponent::Maven { .. } => ComponentType::Maven,
            TypedComponent::Pip { .. } => ComponentType::Pip,
            TypedComponent::Go { .. } => ComponentType::Go,
            TypedComponent::Cargo { .. } => ComponentType::Cargo,
            TypedComponent::Linux { .. } => ComponentType::Linux,
            TypedComponent::Other { .. } => ComponentType::Other,
        }
    }

    /// Computes the stable component id
    ///
    /// Pip ids are lowercased because package index names are case-insensitive.
    /// The Go commit hash is not part of the id.
    pub fn id(&self) -> String {
        let component_type = self.component_type();
        match self {
            TypedComponent::Npm { name, version }
            | TypedComponent::NuGet { name, version }
            | TypedComponent::Cargo { name, version }
            | TypedComponent::Go { name, version, .. } => {
                format!("{} {} - {}", name, version, component_type)
            }
            TypedComponent::Pip { name, version } => {
                format!("{} {} - {}", name, version, component_type).to_lowercase()
            }
            TypedComponent::Maven {
                group_id,
                artifact_id,
                version,
            } => format!("{} {} {} - {}", group_id, artifact_id, version, component_type),
            TypedComponent::Linux {
                distribution,
                release,
                name,
                version,
            } => format!(
                "{} {} {} {} - {}",
                distribution, release, name, version, component_type
            ),
            TypedComponent::Other {
                name,
                version,
                download_url,
            } => format!("{} {} {} - {}", name, version, download_url, component_type),
        }
    }
}

impl fmt::Display for TypedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
