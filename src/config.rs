use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use officemap_geometry::{ClipRegion, GeometryError};
use officemap_navigation::RrtConfig;
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "OFFICEMAP";

/// Window title and size in pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            title: "Office Layout with Routes".to_string(),
            width: 800,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Simulation steps per second.
    pub tick_hz: f64,
    /// Fixed seed for route planning; entropy when unset.
    pub seed: Option<u64>,
    /// Speed change applied by the `+` and `-` keys.
    pub speed_step: f32,
    /// Whether agents move as soon as the window opens.
    pub animate: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            tick_hz: 60.0,
            seed: None,
            speed_step: 0.1,
            animate: true,
        }
    }
}

/// Visible region; also bounds RRT sampling.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClipSettings {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for ClipSettings {
    fn default() -> Self {
        ClipSettings {
            left: -750.0,
            right: 550.0,
            bottom: -550.0,
            top: 600.0,
        }
    }
}

impl ClipSettings {
    pub fn region(&self) -> Result<ClipRegion, GeometryError> {
        ClipRegion::new(self.left, self.right, self.bottom, self.top)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub simulation: SimulationSettings,
    pub clip: ClipSettings,
    pub rrt: RrtConfig,
}

/// Loads settings from `config/default.toml` (optional) and `OFFICEMAP__*`
/// environment variables, e.g. `OFFICEMAP__RRT__MAX_ITERATIONS=2000`.
pub fn load_settings() -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    match build_settings(sources()) {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

/// Window settings for `window_conf`, which runs before logging is set up.
/// Loads silently and falls back to defaults; `load_settings` reports errors
/// once the subscriber is installed.
pub fn window_settings() -> WindowSettings {
    build_settings(sources()).map(|s| s.window).unwrap_or_default()
}

fn sources() -> ConfigBuilder<DefaultState> {
    Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
}

fn build_settings(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        build_settings(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_empty_source_gives_defaults() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.rrt, RrtConfig::default());
        assert_eq!(settings.simulation.tick_hz, 60.0);
        assert_eq!(settings.simulation.seed, None);
        assert!(settings.clip.region().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let settings = from_toml(
            r#"
            [simulation]
            seed = 42
            animate = false

            [rrt]
            max_iterations = 2500
            goal_sample_rate = 0.05

            [clip]
            left = -1000.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.simulation.seed, Some(42));
        assert!(!settings.simulation.animate);
        assert_eq!(settings.simulation.speed_step, 0.1);
        assert_eq!(settings.rrt.max_iterations, 2500);
        assert_eq!(settings.rrt.step_size, 20.0);
        assert!((settings.rrt.goal_sample_rate - 0.05).abs() < 1e-6);
        assert_eq!(settings.clip.left, -1000.0);
        assert_eq!(settings.clip.right, 550.0);
        assert_eq!(settings.window, WindowSettings::default());
    }

    #[test]
    fn test_inverted_clip_region_rejected() {
        let settings = from_toml(
            r#"
            [clip]
            left = 600.0
            right = 500.0
            "#,
        )
        .unwrap();
        assert!(settings.clip.region().is_err());
    }

    #[test]
    fn test_window_settings_match_full_load() {
        let expected = build_settings(sources()).map(|s| s.window).unwrap_or_default();
        assert_eq!(window_settings(), expected);
        assert!(window_settings().width > 0);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        assert!(from_toml("[rrt]\nmax_iterations = \"lots\"").is_err());
    }
}
