mod scope_priority;

pub use scope_priority::ScopePriority;
