//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terrella command-line arguments.
///
/// CLI values override settings loaded from `terrella.ron`.
#[derive(Parser, Debug)]
#[command(name = "terrella", about = "Simulated-sun planet lighting")]
pub struct CliArgs {
    /// Simulated start instant, RFC 3339 (e.g. 2024-06-21T12:00:00Z).
    #[arg(long)]
    pub date: Option<String>,

    /// Time acceleration multiplier (0 = paused).
    #[arg(long)]
    pub time_speed: Option<f64>,

    /// Observer latitude in degrees. Requires --lon.
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Observer longitude in degrees. Requires --lat.
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,

    /// Force the cheap location-free sun model.
    #[arg(long)]
    pub simplified: Option<bool>,

    /// Log filter (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref date) = args.date {
            self.lighting.start_date = date.clone();
        }
        if let Some(speed) = args.time_speed {
            self.lighting.time_speed = speed;
        }
        if let Some(lat) = args.lat {
            self.lighting.latitude_deg = Some(lat);
        }
        if let Some(lon) = args.lon {
            self.lighting.longitude_deg = Some(lon);
        }
        if let Some(simplified) = args.simplified {
            self.lighting.simplified = simplified;
        }
        if let Some(ref level) = args.log_level {
            self.log.level = level.clone();
        }
    }
}
