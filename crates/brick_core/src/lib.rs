//! Brick Core
//!
//! The placement-directive model and the machinery that expands it:
//! - Directives (terminal entity placements or further macro calls)
//! - Macro registry and the fixed-point resolver
//! - Entity defaults, tiling patterns and screen metrics consumed by macros
//! - Collection naming shared between producers and the spawn-time lookup

pub mod collection;
pub mod context;
pub mod defaults;
pub mod directive;
pub mod error;
pub mod expansion;
pub mod geometry;
pub mod pattern;
pub mod registry;
pub mod resolver;

pub use glam;

pub use collection::{validate_collections, CollectionError, CollectionName};
pub use context::{Engine, LevelScope, MacroContext, ScreenMetrics};
pub use defaults::{DefaultsProvider, DefaultsTable, ThingDefaults};
pub use directive::{
    Callback, CollectionTag, Directive, DirectiveError, DirectiveKind, Extent, Hook,
};
pub use error::ExpansionError;
pub use expansion::{Expansion, MAX_RECORDS_PER_EXPANSION};
pub use geometry::Anchor;
pub use pattern::{Pattern, PatternEntry, PatternRegistry};
pub use registry::{MacroDefinition, MacroRegistrationError, MacroRegistry};
pub use resolver::{Resolution, Resolver, DEFAULT_MAX_DEPTH};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
