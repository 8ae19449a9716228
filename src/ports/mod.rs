/// Ports module defining the seams of the recording subsystem
///
/// Inbound ports are what detectors call to record components; outbound ports
/// are the read-only views the reporting layer consumes.
pub mod inbound;
pub mod outbound;
