//! Brick Services Layer
//!
//! File-backed inputs for the expansion engine: settings, entity defaults,
//! tiling patterns and level files.

pub mod error;
pub mod level;
pub mod loader;
pub mod settings;

pub use error::ServiceError;
pub use level::LevelFile;
pub use loader::{load_defaults, load_patterns, read_json};
pub use settings::{ResolverSettings, ScreenSettings, Settings};
