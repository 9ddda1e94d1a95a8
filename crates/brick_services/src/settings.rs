//! Settings management

use crate::{read_json, ServiceError};
use brick_core::{ScreenMetrics, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Engine settings. Sections missing from a file keep their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen: ScreenSettings,
    pub resolver: ResolverSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    /// Pixels per game unit.
    pub unitsize: f64,
    /// Playfield height in pixels.
    pub height: f64,
    /// Floor line in game units.
    pub floor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    pub max_depth: usize,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        let metrics = ScreenMetrics::default();
        Self {
            unitsize: metrics.unitsize,
            height: metrics.height,
            floor: metrics.floor,
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let settings: Settings = read_json(path)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ServiceError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn screen_metrics(&self) -> ScreenMetrics {
        ScreenMetrics {
            unitsize: self.screen.unitsize,
            height: self.screen.height,
            floor: self.screen.floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_screen_metrics() {
        let settings = Settings::default();
        assert_eq!(settings.screen_metrics(), ScreenMetrics::default());
        assert_eq!(settings.resolver.max_depth, 32);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "screen": {{ "unitsize": 2 }} }}"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.screen.unitsize, 2.0);
        assert_eq!(settings.screen.height, 464.0);
        assert_eq!(settings.resolver, ResolverSettings::default());
        assert_eq!(settings.screen_metrics().height_in_units(), 232.0);
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }
}
