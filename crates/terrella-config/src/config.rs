//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "terrella.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated time and sun model settings.
    pub lighting: LightingConfig,
    /// Surface and atmosphere shading constants.
    pub shading: ShadingConfig,
    /// Planet geometry.
    pub planet: PlanetConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Simulated time and sun model configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Simulated start instant, RFC 3339 (e.g. "2024-06-21T12:00:00Z").
    /// Empty means "now".
    pub start_date: String,
    /// Time acceleration multiplier. 0 starts paused.
    pub time_speed: f64,
    /// Use the cheap location-free sun model.
    pub simplified: bool,
    /// Observer latitude in degrees, if a location is set.
    pub latitude_deg: Option<f64>,
    /// Observer longitude in degrees, if a location is set.
    pub longitude_deg: Option<f64>,
    /// Directional light intensity.
    pub intensity: f32,
    /// Ambient fill intensity.
    pub ambient_intensity: f32,
}

/// Shading constants shared by the surface and shell passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadingConfig {
    /// Atmosphere color over the lit hemisphere, linear RGB.
    pub atmosphere_day_color: [f32; 3],
    /// Atmosphere color along the terminator, linear RGB.
    pub atmosphere_twilight_color: [f32; 3],
    /// Roughness remap window low edge.
    pub roughness_low: f32,
    /// Roughness remap window high edge.
    pub roughness_high: f32,
    /// Atmosphere sphere scale over the planet radius; must match the
    /// rendered shell mesh.
    pub atmosphere_scale: f32,
    /// Haze strength.
    pub haze_strength: f32,
    /// Haze e-folding length in meters.
    pub haze_falloff_m: f32,
    /// Upper clamp on the haze blend factor.
    pub haze_max: f32,
    /// Halo brightness on the shell.
    pub halo_strength: f32,
    /// Halo fresnel exponent.
    pub halo_power: f32,
    /// Camera-altitude fade length for the halo, meters.
    pub height_fade_m: f32,
}

/// Planet geometry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planet radius in meters.
    pub radius_m: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Log filter (e.g. "info", "debug,terrella_lighting=trace").
    pub level: String,
}

// --- Default implementations ---

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            time_speed: 1.0,
            simplified: true,
            latitude_deg: None,
            longitude_deg: None,
            intensity: 1.0,
            ambient_intensity: 0.15,
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            atmosphere_day_color: [0.30, 0.57, 0.94],
            atmosphere_twilight_color: [0.96, 0.42, 0.16],
            roughness_low: 0.25,
            roughness_high: 0.35,
            atmosphere_scale: 1.04,
            haze_strength: 0.85,
            haze_falloff_m: 220_000.0,
            haze_max: 0.85,
            halo_strength: 0.9,
            halo_power: 2.5,
            height_fade_m: 600_000.0,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius_m: 6_371_000.0,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload / Validate ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `terrella.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Boundary validation.
    ///
    /// The shading formulas divide by the falloff constants and assume the
    /// atmosphere sphere encloses the planet; nothing downstream re-checks,
    /// so every violation must be caught here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid(message));

        if !self.lighting.start_date.is_empty()
            && chrono::DateTime::parse_from_rfc3339(&self.lighting.start_date).is_err()
        {
            return invalid(format!(
                "start_date must be RFC 3339, got {:?}",
                self.lighting.start_date
            ));
        }
        if let Some(lat) = self.lighting.latitude_deg
            && !(-90.0..=90.0).contains(&lat)
        {
            return invalid(format!("latitude_deg must be within [-90, 90], got {lat}"));
        }
        if let Some(lon) = self.lighting.longitude_deg
            && !(-180.0..=180.0).contains(&lon)
        {
            return invalid(format!(
                "longitude_deg must be within [-180, 180], got {lon}"
            ));
        }
        if self.lighting.latitude_deg.is_some() != self.lighting.longitude_deg.is_some() {
            return invalid("latitude_deg and longitude_deg must be set together".to_string());
        }

        let shading = &self.shading;
        for (name, value) in [
            ("haze_falloff_m", shading.haze_falloff_m),
            ("height_fade_m", shading.height_fade_m),
            ("halo_power", shading.halo_power),
        ] {
            if !(value > 0.0) {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if !(0.0..=1.0).contains(&shading.haze_max) {
            return invalid(format!(
                "haze_max must be within [0, 1], got {}",
                shading.haze_max
            ));
        }
        if shading.atmosphere_scale <= 1.0 {
            return invalid(format!(
                "atmosphere_scale must exceed 1.0, got {}",
                shading.atmosphere_scale
            ));
        }
        if shading.roughness_low >= shading.roughness_high {
            return invalid(format!(
                "roughness_low ({}) must be below roughness_high ({})",
                shading.roughness_low, shading.roughness_high
            ));
        }
        if !(self.planet.radius_m > 0.0) {
            return invalid(format!(
                "planet radius_m must be positive, got {}",
                self.planet.radius_m
            ));
        }
        Ok(())
    }
}
