//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, PR URL, and timeout resolution tests
//! - `loading`: End-to-end loading from environment, CLI, and files

mod helpers;
