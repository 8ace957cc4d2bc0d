//! Reference data: built-in tables and CSV overrides.

pub mod loader;
pub mod reference;

pub use loader::*;
pub use reference::*;
