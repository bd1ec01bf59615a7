use serde::{Deserialize, Serialize};

use crate::bodies::{JUPITER, MARS, PLANETS};
use crate::error::{OrreryError, Result};

/// Saturn ring tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingStyle {
    /// Many concentric bands (`ring_radial_divisions`).
    Thick,
    /// Inner and outer edge only.
    Thin,
}

/// Every tunable of the scene. Missing JSON fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // Camera
    pub camera_distance: f32,
    pub max_latitude: f32,
    pub rotate_speed: f32,
    pub latitude_speed: f32,

    // Projection
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Initial viewport in pixels (width, height).
    pub viewport: (f32, f32),

    // Tessellation
    pub planet_bands: u32,
    pub sun_bands: u32,
    pub moon_bands: u32,
    pub asteroid_bands: u32,
    pub background_bands: u32,
    pub background_scale: f32,
    pub orbit_segments: u32,

    // Saturn ring
    pub ring_style: RingStyle,
    pub ring_radial_divisions: u32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_segments: u32,

    // Asteroid belt
    pub asteroid_count: usize,
    /// Gap kept between the belt and the Mars / Jupiter orbits.
    pub asteroid_margin: f32,
    /// (min, max) asteroid scale.
    pub asteroid_size: (f32, f32),
    /// Shared angular speed of the belt, radians per simulated second.
    pub asteroid_speed: f32,
    pub asteroid_seed: u64,

    /// Initial speed slider value.
    pub speed_multiplier: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_distance: 30.0,
            max_latitude: std::f32::consts::FRAC_PI_2 - 0.01,
            rotate_speed: 0.01,
            latitude_speed: 0.01,

            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
            viewport: (800.0, 600.0),

            planet_bands: 50,
            sun_bands: 100,
            moon_bands: 30,
            asteroid_bands: 10,
            background_bands: 50,
            background_scale: 50.0,
            orbit_segments: 100,

            ring_style: RingStyle::Thick,
            ring_radial_divisions: 20,
            ring_inner: 1.2,
            ring_outer: 1.6,
            ring_segments: 50,

            asteroid_count: 500,
            asteroid_margin: 2.0,
            asteroid_size: (0.05, 0.15),
            asteroid_speed: 0.01,
            asteroid_seed: 0x5EED,

            speed_multiplier: 1.0,
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Radial divisions implied by `ring_style`.
    pub fn ring_divisions(&self) -> u32 {
        match self.ring_style {
            RingStyle::Thick => self.ring_radial_divisions,
            RingStyle::Thin => 1,
        }
    }

    /// Belt annulus for the given Mars and Jupiter orbit radii.
    pub fn asteroid_belt_bounds(&self, mars_orbit: f32, jupiter_orbit: f32) -> (f32, f32) {
        (mars_orbit + self.asteroid_margin, jupiter_orbit - self.asteroid_margin)
    }

    /// Reject settings that would build a degenerate scene.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("camera_distance", self.camera_distance),
            ("max_latitude", self.max_latitude),
            ("fov_y_degrees", self.fov_y_degrees),
            ("z_near", self.z_near),
            ("background_scale", self.background_scale),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(OrreryError::invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.max_latitude >= std::f32::consts::FRAC_PI_2 {
            return Err(OrreryError::invalid("max_latitude must stay below π/2"));
        }
        if self.fov_y_degrees >= 180.0 {
            return Err(OrreryError::invalid("fov_y_degrees must be below 180"));
        }
        if self.z_near >= self.z_far {
            return Err(OrreryError::invalid(format!(
                "z_near ({}) must be less than z_far ({})",
                self.z_near, self.z_far
            )));
        }

        let bands = [
            ("planet_bands", self.planet_bands),
            ("sun_bands", self.sun_bands),
            ("moon_bands", self.moon_bands),
            ("asteroid_bands", self.asteroid_bands),
            ("background_bands", self.background_bands),
            ("ring_radial_divisions", self.ring_radial_divisions),
        ];
        for (name, value) in bands {
            if value == 0 {
                return Err(OrreryError::invalid(format!("{name} must be at least 1")));
            }
        }
        if self.orbit_segments < 3 || self.ring_segments < 3 {
            return Err(OrreryError::invalid("orbit_segments and ring_segments must be at least 3"));
        }

        if self.ring_inner < 0.0 || self.ring_inner >= self.ring_outer {
            return Err(OrreryError::invalid(format!(
                "ring needs 0 <= inner < outer (inner={}, outer={})",
                self.ring_inner, self.ring_outer
            )));
        }
        let (size_min, size_max) = self.asteroid_size;
        if size_min <= 0.0 || size_min > size_max {
            return Err(OrreryError::invalid(format!(
                "asteroid_size must satisfy 0 < min <= max (min={size_min}, max={size_max})"
            )));
        }
        if !(self.asteroid_margin >= 0.0 && self.asteroid_margin.is_finite()) {
            return Err(OrreryError::invalid("asteroid_margin must be finite and not negative"));
        }
        let (inner, outer) = self.asteroid_belt_bounds(PLANETS[MARS].orbit_radius, PLANETS[JUPITER].orbit_radius);
        if !(inner < outer) {
            return Err(OrreryError::invalid(format!(
                "asteroid_margin {} leaves no belt between Mars and Jupiter (inner={inner}, outer={outer})",
                self.asteroid_margin
            )));
        }
        if !self.speed_multiplier.is_finite() || !self.asteroid_speed.is_finite() {
            return Err(OrreryError::invalid("speeds must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.ring_divisions(), 20);
        assert_eq!(config.asteroid_count, 500);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SceneConfig::from_json(r#"{ "ring_style": "thin", "asteroid_speed": 0.00001 }"#).unwrap();
        assert_eq!(config.ring_style, RingStyle::Thin);
        assert_eq!(config.ring_divisions(), 1);
        assert_eq!(config.asteroid_speed, 0.00001);
        assert_eq!(config.camera_distance, 30.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            r#"{ "planet_bands": 0 }"#,
            r#"{ "z_near": 200.0 }"#,
            r#"{ "ring_inner": 2.0, "ring_outer": 1.0 }"#,
            r#"{ "asteroid_size": [0.3, 0.1] }"#,
            r#"{ "orbit_segments": 2 }"#,
            r#"{ "max_latitude": 1.6 }"#,
            r#"{ "asteroid_margin": 5.0 }"#,
            r#"{ "asteroid_margin": -1.0 }"#,
        ];
        for json in cases {
            let err = SceneConfig::from_json(json).unwrap_err();
            assert!(matches!(err, OrreryError::InvalidParameter(_)), "{json} gave {err}");
        }
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(SceneConfig::from_json("not json"), Err(OrreryError::Config(_))));
    }

    #[test]
    fn belt_bounds_apply_margin() {
        let config = SceneConfig::default();
        let (inner, outer) = config.asteroid_belt_bounds(8.8, 16.4);
        assert!((inner - 10.8).abs() < 1e-5);
        assert!((outer - 14.4).abs() < 1e-5);
    }

    #[test]
    fn margin_must_leave_a_belt() {
        // Mars at 8.8 and Jupiter at 16.4 leave 7.6 units; a margin of 3.7 still fits.
        SceneConfig::from_json(r#"{ "asteroid_margin": 3.7 }"#).unwrap();
        assert!(SceneConfig::from_json(r#"{ "asteroid_margin": 3.9 }"#).is_err());
    }
}
