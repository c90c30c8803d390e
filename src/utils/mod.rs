//! Utility functions and helpers.

pub mod format;
pub mod fs;
pub mod retry;

// Re-exports for convenience
pub use format::*;
pub use fs::*;
pub use retry::RetryPolicy;
