use thiserror::Error;

/// Errors raised by the component recording subsystem.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Every variant is a local precondition or invariant check: nothing here is
/// transient, so there is nothing to retry. Detectors catch these at their own
/// boundary and continue with the next manifest.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// Null/blank component, missing identity or blank location
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Edge added with an unknown parent, or structural read of an unknown id
    #[error("Component '{component_id}' is not registered in the dependency graph\n\n💡 Hint: Detectors must register a parent component before any child that references it")]
    MissingNode { component_id: String },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl RecorderError {
    pub fn invalid_input(field: &str, reason: &str) -> Self {
        RecorderError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_node(component_id: &str) -> Self {
        RecorderError::MissingNode {
            component_id: component_id.to_string(),
        }
    }
}

/// Returns an `InvalidInput` error when `value` is empty or whitespace only.
pub fn ensure_not_blank(value: &str, field: &str) -> Result<(), RecorderError> {
    if value.trim().is_empty() {
        return Err(RecorderError::invalid_input(field, "must not be blank"));
    }
    Ok(())
}
