//! digicalc_core: Core types shared by every digicalc crate.
//!
//! Provides source spans and the helpers used to map them back onto
//! expression text for diagnostics.

pub mod text;

// Re-export commonly used types
pub use text::{TextPos, TextSpan};
