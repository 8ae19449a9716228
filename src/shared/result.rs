/// Type alias for Result with anyhow::Error as the error type.
/// Typed failures are `RecorderError` values wrapped in the anyhow error and can be
/// recovered with `downcast_ref::<RecorderError>()`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
