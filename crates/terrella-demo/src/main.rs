//! Headless demo: sweep the simulated sun across one day and shade probes.
//!
//! Loads `terrella.ron` (CLI flags override it), drives the lighting
//! controller through a full simulated day, and runs the CPU reference
//! shading at three probe points — subsolar, terminator, antisolar — with
//! flat fallback texture colors standing in for real imagery.
//!
//! Run with `cargo run -p terrella-demo -- --lat 48.85 --lon 2.35
//! --date 2024-06-21T04:00:00Z --time-speed 3600`.

mod logging;

use chrono::{DateTime, Utc};
use clap::Parser;
use glam::Vec3;
use tracing::info;

use terrella_config::{CliArgs, Config};
use terrella_lighting::{
    LightingController, ambient_from_elevation, sun_intensity_from_elevation,
};
use terrella_shading::{
    ShellShadingInput, SharedShadingParams, SurfaceShadingInput, shade_shell, shade_surface,
};
use terrella_solar::solar_position;

/// Flat fallback colors used when no real imagery is loaded. The shading
/// stage treats them exactly like sampled textures.
const FALLBACK_DAY: Vec3 = Vec3::new(0.16, 0.32, 0.50);
const FALLBACK_NIGHT: Vec3 = Vec3::new(0.08, 0.06, 0.02);

/// Steps per simulated day (one per quarter hour).
const STEPS_PER_DAY: u32 = 96;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let config_dir = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("terrella")))
        .unwrap_or_else(|| ".".into());

    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args);
    config.validate()?;
    logging::init(&config.log.level);

    let start = if config.lighting.start_date.is_empty() {
        Utc::now()
    } else {
        DateTime::parse_from_rfc3339(&config.lighting.start_date)?.with_timezone(&Utc)
    };

    let mut controller = LightingController::new(start);
    controller.set_time_speed(config.lighting.time_speed);
    controller.set_simplified_mode(config.lighting.simplified);
    if let (Some(lat), Some(lon)) = (config.lighting.latitude_deg, config.lighting.longitude_deg) {
        controller.set_location(lat, lon);
    }
    controller.set_intensity(config.lighting.intensity);
    controller.set_ambient_intensity(config.lighting.ambient_intensity);

    let params = shading_params(&config);
    params.validate()?;
    let planet_radius = config.planet.radius_m as f32;

    info!(
        start = %start,
        time_speed = config.lighting.time_speed,
        simplified = config.lighting.simplified,
        "starting day sweep"
    );

    let speed = config.lighting.time_speed;
    if speed == 0.0 {
        log_step(&controller, &config, &params, planet_radius);
        info!("clock is paused; single snapshot only");
        return Ok(());
    }

    // Wall-clock delta that moves simulated time one quarter hour per step,
    // in the direction of the configured speed.
    let dt_seconds = 900.0 / speed.abs();
    for step in 0..STEPS_PER_DAY {
        controller.update(dt_seconds);
        if step % 4 == 3 {
            log_step(&controller, &config, &params, planet_radius);
        }
    }

    info!("day sweep complete");
    Ok(())
}

fn shading_params(config: &Config) -> SharedShadingParams {
    let shading = &config.shading;
    SharedShadingParams {
        atmosphere_day_color: Vec3::from_array(shading.atmosphere_day_color),
        atmosphere_twilight_color: Vec3::from_array(shading.atmosphere_twilight_color),
        roughness_low: shading.roughness_low,
        roughness_high: shading.roughness_high,
        atmosphere_scale: shading.atmosphere_scale,
        haze_strength: shading.haze_strength,
        haze_falloff_m: shading.haze_falloff_m,
        haze_max: shading.haze_max,
        halo_strength: shading.halo_strength,
        halo_power: shading.halo_power,
        height_fade_m: shading.height_fade_m,
    }
}

/// Log the solar state and the shaded probe colors for the current instant.
fn log_step(
    controller: &LightingController,
    config: &Config,
    params: &SharedShadingParams,
    planet_radius: f32,
) {
    let time = controller.time_info();
    let sun = controller.sun();
    let elevation = sun.direction.y;

    if let (Some(lat), Some(lon)) = (config.lighting.latitude_deg, config.lighting.longitude_deg) {
        let position = solar_position(controller.clock().now(), lat, lon);
        info!(
            date = %time.date,
            hours = time.hours,
            minutes = time.minutes,
            altitude_deg = position.altitude.to_degrees(),
            azimuth_deg = position.azimuth.to_degrees(),
            intensity = sun_intensity_from_elevation(elevation),
            ambient = ambient_from_elevation(elevation),
            "solar track"
        );
    } else {
        info!(
            date = %time.date,
            hours = time.hours,
            minutes = time.minutes,
            elevation,
            intensity = sun_intensity_from_elevation(elevation),
            "solar track (simplified)"
        );
    }

    let sun_dir = sun.direction;
    // A stable axis perpendicular to the sun direction for the terminator probe.
    let across = sun_dir.cross(Vec3::Y).normalize_or(Vec3::X);
    for (name, normal) in [
        ("subsolar", sun_dir),
        ("terminator", across),
        ("antisolar", -sun_dir),
    ] {
        let input = SurfaceShadingInput {
            world_position: normal * planet_radius,
            normal,
            camera_position: normal * planet_radius * 3.0,
            sun_direction: sun_dir,
            day_sample: FALLBACK_DAY,
            night_sample: FALLBACK_NIGHT,
            roughness: 0.3,
            cloud: 0.25,
            overlay_sample: None,
            use_imagery: false,
            planet_radius,
        };
        let color = shade_surface(&input, params);
        info!(probe = name, r = color.x, g = color.y, b = color.z, "surface probe");
    }

    // Halo probe at the limb as seen from above the subsolar point.
    let limb_normal = across;
    let shell = shade_shell(
        &ShellShadingInput {
            world_position: limb_normal * planet_radius * params.atmosphere_scale,
            normal: limb_normal,
            camera_position: sun_dir * planet_radius * 3.0,
            sun_direction: sun_dir,
            planet_radius,
        },
        params,
    );
    info!(
        alpha = shell.alpha,
        r = shell.color.x,
        g = shell.color.y,
        b = shell.color.z,
        "halo probe"
    );
}
