//! URL handling module for Sumi-Sweep
//!
//! This module provides default-scheme normalization and the well-formedness
//! check applied to the root URL and to every discovered link.

mod validate;

// Re-export main functions
pub use validate::{is_valid_url, validate_url, with_default_scheme, DEFAULT_SCHEME, SCHEME_SEPARATOR};
