/// Inbound ports (Driving ports) - Registration interfaces
///
/// Detectors drive the recorder through these interfaces.
pub mod component_registration;

pub use component_registration::{ComponentRegistration, UsageOptions};
