//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Short code generation and shape validation
//! - [`url_normalizer`] - URL normalization before allocation
//! - [`extract_domain`] - Public base URL derivation from HTTP headers

pub mod code_generator;
pub mod extract_domain;
pub mod url_normalizer;
