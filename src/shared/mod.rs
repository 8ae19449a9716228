pub mod error;
pub mod result;

pub use error::RecorderError;
pub use result::Result;
