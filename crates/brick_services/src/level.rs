//! Level files: one area's raw creation commands.

use crate::{read_json, ServiceError};
use brick_core::{Directive, LevelScope};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// `{ "map": "1-1", "area": 0, "directives": [ ... ] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub map: String,
    #[serde(default)]
    pub area: usize,
    pub directives: Vec<Directive>,
}

impl LevelFile {
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let level: LevelFile = read_json(path)?;
        info!(
            path = %path.display(),
            map = %level.map,
            area = level.area,
            directives = level.directives.len(),
            "loaded level"
        );
        Ok(level)
    }

    /// Scope handed to macros; the directives double as the area's prethings.
    pub fn scope(&self) -> LevelScope {
        LevelScope {
            map: self.map.clone(),
            area: self.area,
            prethings: self.directives.clone(),
        }
    }
}
