// Global configuration: world dimensions, the growth parameter sets for the
// stem and the roots, and the starting environment. Loadable from a YAML or
// JSON file; every top-level field falls back to its default when missing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::environment::{Environment, Resources};
use crate::growable::{GrowthHabit, Influence};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // World/display
    pub width: f64,
    pub height: f64,

    // Growth parameter sets
    pub stem: GrowthHabit,
    pub root: GrowthHabit,

    // Starting conditions
    pub environment: Environment,
    pub resources: Resources,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            stem: GrowthHabit {
                segment_max: 250,
                segment_size: 2.0,
                change_angle_max_deg: 2.0,
                sun_influence: Influence { x: -3.0, y: -3.0 },
                gravity_influence: Influence { x: 0.0, y: -1.0 },
                jitter_influence: Influence { x: 0.0, y: 0.0 },
            },
            root: GrowthHabit {
                segment_max: 150,
                segment_size: 1.0,
                change_angle_max_deg: 10.0,
                sun_influence: Influence { x: 5.0, y: 5.0 },
                gravity_influence: Influence { x: 0.0, y: 1.0 },
                jitter_influence: Influence { x: 5.0, y: 5.0 },
            },
            environment: Environment::default(),
            resources: Resources::default(),
        }
    }
}

impl SimulationConfig {
    /// Loads a config file, dispatching on the extension (.json is JSON,
    /// anything else is treated as YAML).
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path, e))?;
        if path.ends_with(".json") {
            serde_json::from_str(&content).map_err(|e| format!("{}: {}", path, e))
        } else {
            serde_yaml::from_str(&content).map_err(|e| format!("{}: {}", path, e))
        }
    }

    /// Searches the working directory for config.yaml, config.yml or
    /// config.json; falls back to defaults when none parses.
    pub fn from_default_paths() -> Self {
        for path in ["config.yaml", "config.yml", "config.json"] {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        tracing::info!(path, "loaded configuration");
                        return config;
                    }
                    Err(error) => {
                        tracing::warn!(path, %error, "skipping unreadable config");
                    }
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_describe_a_plantable_world() {
        let config = SimulationConfig::default();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.stem.segment_max, 250);
        assert_eq!(config.root.segment_max, 150);
        assert_eq!(config.environment.light_hours, 12);
        assert_eq!(config.resources.carbon_dioxide, 400);
    }

    #[test]
    fn yaml_overrides_merge_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "width: 1024.0").unwrap();
        writeln!(file, "environment:").unwrap();
        writeln!(file, "  light_hours: 8").unwrap();

        let config = SimulationConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.environment.light_hours, 8);
        // Untouched fields keep their defaults.
        assert_eq!(config.height, 600.0);
        assert_eq!(config.environment.temperature, 25);
        assert_eq!(config.stem.segment_max, 250);
    }

    #[test]
    fn json_files_load_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"height": 480.0, "resources": {{"water": 3}}}}"#).unwrap();

        let config = SimulationConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.height, 480.0);
        assert_eq!(config.resources.water, 3);
        assert_eq!(config.resources.nutrients, 2);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let error = SimulationConfig::from_file("/nonexistent/config.yaml").unwrap_err();
        assert!(error.contains("Cannot read"));
        assert!(error.contains("/nonexistent/config.yaml"));
    }

    #[test]
    fn malformed_yaml_reports_the_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "width: [not a number").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let error = SimulationConfig::from_file(&path).unwrap_err();
        assert!(error.contains(&path));
    }
}
