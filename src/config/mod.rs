use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Turns flatter than this (degrees) keep the waypoint as a sharp vertex
pub const DEFAULT_MIN_TURN_DEGREES: f64 = 1.0;
/// Segments per sampled turning arc
pub const DEFAULT_ARC_STEPS: usize = 64;
/// Upper bound on segments per turning arc
pub const MAX_ARC_STEPS: usize = 4096;
/// Length of each perpendicular probe segment, meters
pub const DEFAULT_PROBE_LENGTH_M: f64 = 5000.0;
/// Boundary hits farther than this from the snap point are ignored, meters
pub const DEFAULT_SEARCH_CUTOFF_M: f64 = 5000.0;

fn default_min_turn_degrees() -> f64 {
    DEFAULT_MIN_TURN_DEGREES
}
fn default_arc_steps() -> usize {
    DEFAULT_ARC_STEPS
}
fn default_probe_length_m() -> f64 {
    DEFAULT_PROBE_LENGTH_M
}
fn default_search_cutoff_m() -> f64 {
    DEFAULT_SEARCH_CUTOFF_M
}
fn default_verbose() -> bool {
    false
}

/// Parameters for turning-arc route synthesis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_min_turn_degrees")]
    pub min_turn_degrees: f64,
    #[serde(default = "default_arc_steps")]
    pub arc_steps: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            min_turn_degrees: DEFAULT_MIN_TURN_DEGREES,
            arc_steps: DEFAULT_ARC_STEPS,
        }
    }
}

impl RouteConfig {
    pub fn with_min_turn_degrees(mut self, degrees: f64) -> Self {
        self.min_turn_degrees = degrees;
        self
    }

    pub fn with_arc_steps(mut self, steps: usize) -> Self {
        self.arc_steps = steps.clamp(1, MAX_ARC_STEPS);
        self
    }

    /// Segments actually sampled per arc, whatever was deserialized
    pub fn arc_step_count(&self) -> usize {
        self.arc_steps.clamp(1, MAX_ARC_STEPS)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_ARC_STEPS).contains(&self.arc_steps),
            "arc_steps must be between 1 and {}, got {}",
            MAX_ARC_STEPS,
            self.arc_steps
        );
        ensure!(
            self.min_turn_degrees.is_finite() && (0.0..180.0).contains(&self.min_turn_degrees),
            "min_turn_degrees must be in [0, 180), got {}",
            self.min_turn_degrees
        );
        Ok(())
    }
}

/// Parameters for the fairway width probe
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_length_m")]
    pub probe_length_m: f64,
    #[serde(default = "default_search_cutoff_m")]
    pub search_cutoff_m: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            probe_length_m: DEFAULT_PROBE_LENGTH_M,
            search_cutoff_m: DEFAULT_SEARCH_CUTOFF_M,
        }
    }
}

impl ProbeConfig {
    pub fn with_probe_length(mut self, meters: f64) -> Self {
        self.probe_length_m = meters;
        self
    }

    pub fn with_search_cutoff(mut self, meters: f64) -> Self {
        self.search_cutoff_m = meters;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.probe_length_m.is_finite() && self.probe_length_m > 0.0,
            "probe_length_m must be a positive distance, got {}",
            self.probe_length_m
        );
        ensure!(
            self.search_cutoff_m.is_finite() && self.search_cutoff_m > 0.0,
            "search_cutoff_m must be a positive distance, got {}",
            self.search_cutoff_m
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    /// First parsable config file from the standard search paths
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                // Runs before the logger exists
                match toml::from_str::<Self>(&contents) {
                    Ok(config) => match config.validate() {
                        Ok(()) => return Some(config),
                        Err(e) => eprintln!("Warning: Ignoring config file {:?}: {}", path, e),
                    },
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.route.validate()?;
        self.probe.validate()
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("fairway-geom.toml"));
    paths.push(PathBuf::from(".fairway-geom.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fairway-geom").join("config.toml"));
        paths.push(config_dir.join("fairway-geom.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fairway-geom.toml"));
    }

    paths
}
