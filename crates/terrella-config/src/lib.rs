//! Configuration for the Terrella lighting and shading stack.
//!
//! Settings live in a RON file (`terrella.ron`), load with defaults for any
//! missing section, and are validated at this boundary so the shading hot
//! path can assume well-formed constants. CLI flags override file values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, LightingConfig, LogConfig, PlanetConfig, ShadingConfig};
pub use error::ConfigError;
