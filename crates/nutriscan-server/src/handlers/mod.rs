//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod classify;
pub mod knowledge;
pub mod profile;

// Re-export all handlers for use in router
pub use classify::*;
pub use knowledge::*;
pub use profile::*;
