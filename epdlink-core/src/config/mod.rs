//! Configuration types
//!
//! Timing and wait-policy configuration for the link engine. Defaults
//! reproduce the observed controller timings; a TOML loader is available
//! behind the `toml` feature.

#[cfg(feature = "toml")]
pub mod toml;
pub mod types;

#[cfg(feature = "toml")]
pub use self::toml::from_toml;
pub use types::*;
