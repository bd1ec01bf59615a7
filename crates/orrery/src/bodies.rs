//! Built-in solar system preset: visual orbit radii, sizes, and speeds.
//!
//! Distances and sizes are chosen for readability, not to scale. Initial
//! angles are raw radians.

use std::collections::HashMap;

use glam::Vec3;

use crate::assets::manifest::{AssetManifest, TextureDescriptor};

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

/// Gap between neighboring orbits in the preset layout.
const ORBIT_SPACING: f32 = 2.0;

/// One planet of the preset.
#[derive(Debug, Clone, Copy)]
pub struct PlanetPreset {
    pub name: &'static str,
    pub texture: &'static str,
    pub orbit_radius: f32,
    pub scale: f32,
    pub orbit_speed: f32,
    pub rotation_speed: f32,
    /// Starting orbit and spin angle, radians.
    pub initial_angle: f32,
}

pub const PLANETS: [PlanetPreset; PLANET_COUNT] = [
    PlanetPreset {
        name: "Mercury", texture: "mercury",
        orbit_radius: ORBIT_SPACING * 1.38, scale: 0.2,
        orbit_speed: 0.071, rotation_speed: 0.107, initial_angle: 135.0,
    },
    PlanetPreset {
        name: "Venus", texture: "venus",
        orbit_radius: ORBIT_SPACING * 2.0, scale: 0.3,
        orbit_speed: 0.035, rotation_speed: 0.002, initial_angle: 35.0,
    },
    PlanetPreset {
        name: "Earth", texture: "earth",
        orbit_radius: ORBIT_SPACING * 3.0, scale: 0.4,
        orbit_speed: 0.017, rotation_speed: 0.004, initial_angle: 180.0,
    },
    PlanetPreset {
        name: "Mars", texture: "mars",
        orbit_radius: ORBIT_SPACING * 4.4, scale: 0.4,
        orbit_speed: 0.009, rotation_speed: 0.006, initial_angle: 285.0,
    },
    PlanetPreset {
        name: "Jupiter", texture: "jupiter",
        orbit_radius: ORBIT_SPACING * 8.2, scale: 0.7,
        orbit_speed: 0.001, rotation_speed: 0.001, initial_angle: 100.0,
    },
    PlanetPreset {
        name: "Saturn", texture: "saturn",
        orbit_radius: ORBIT_SPACING * 12.58, scale: 0.6,
        orbit_speed: 0.0005, rotation_speed: 0.0005, initial_angle: 130.0,
    },
    PlanetPreset {
        name: "Uranus", texture: "uranus",
        orbit_radius: ORBIT_SPACING * 15.14, scale: 0.5,
        orbit_speed: 0.0002, rotation_speed: 0.0008, initial_angle: 60.0,
    },
    PlanetPreset {
        name: "Neptune", texture: "neptune",
        orbit_radius: ORBIT_SPACING * 20.28, scale: 0.5,
        orbit_speed: 0.0001, rotation_speed: 0.0005, initial_angle: 85.0,
    },
];

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_NAME: &str = "Sun";
pub const SUN_TEXTURE: &str = "sun";
pub const SUN_SCALE: f32 = 2.0;
pub const SUN_ROTATION_SPEED: f32 = 0.1;
pub const SUN_EMISSION: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Emission of everything the Sun lights.
pub const PLANET_EMISSION: Vec3 = Vec3::splat(0.3);

// ── Moon ─────────────────────────────────────────────────────────────

pub const MOON_NAME: &str = "Moon";
pub const MOON_TEXTURE: &str = "moon";
pub const MOON_ORBIT_RADIUS: f32 = 0.5;
pub const MOON_ORBIT_SPEED: f32 = 0.005;
pub const MOON_ROTATION_SPEED: f32 = 0.01;
pub const MOON_SCALE: f32 = 0.1;

// ── Everything else ──────────────────────────────────────────────────

pub const RING_NAME: &str = "Saturn ring";
pub const RING_TEXTURE: &str = "saturn_ring";
pub const BACKGROUND_TEXTURE: &str = "stars";
pub const ASTEROID_TEXTURES: [&str; 3] = ["asteroid", "asteroid1", "asteroid2"];

/// Color of the orbit guide loops.
pub const ORBIT_GUIDE_COLOR: Vec3 = Vec3::splat(0.5);

/// Manifest pointing every preset texture at its conventional image path.
pub fn default_manifest() -> AssetManifest {
    let files = [
        (SUN_TEXTURE, "image/2k_sun.jpg"),
        ("mercury", "image/2k_mercury.jpg"),
        ("venus", "image/2k_venus_surface.jpg"),
        ("earth", "image/2k_earth_daymap.jpg"),
        ("mars", "image/2k_mars.jpg"),
        ("jupiter", "image/2k_jupiter.jpg"),
        ("saturn", "image/2k_saturn.jpg"),
        ("uranus", "image/2k_uranus.jpg"),
        ("neptune", "image/2k_neptune.jpg"),
        (MOON_TEXTURE, "image/2k_moon.jpg"),
        (RING_TEXTURE, "image/2k_saturn_ring_alpha.png"),
        (BACKGROUND_TEXTURE, "image/2k_stars_milky_way.jpg"),
        ("asteroid", "image/asteroid.jpg"),
        ("asteroid1", "image/asteroid1.jpg"),
        ("asteroid2", "image/asteroid2.jpg"),
    ];
    let textures: HashMap<String, TextureDescriptor> = files
        .iter()
        .map(|&(name, path)| (name.to_string(), TextureDescriptor { path: path.to_string() }))
        .collect();
    AssetManifest {
        textures,
        asteroid_textures: ASTEROID_TEXTURES.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbits_are_strictly_increasing() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius, "{} vs {}", pair[0].name, pair[1].name);
        }
        assert_eq!(PLANETS[EARTH].name, "Earth");
        assert_eq!(PLANETS[SATURN].name, "Saturn");
    }

    #[test]
    fn belt_fits_between_mars_and_jupiter() {
        let gap = PLANETS[JUPITER].orbit_radius - PLANETS[MARS].orbit_radius;
        assert!(gap > 2.0 * 2.0, "belt margin would invert the annulus");
    }

    #[test]
    fn default_manifest_covers_every_texture() {
        let manifest = default_manifest();
        for planet in &PLANETS {
            assert!(manifest.path(planet.texture).is_some(), "missing {}", planet.texture);
        }
        for name in [SUN_TEXTURE, MOON_TEXTURE, RING_TEXTURE, BACKGROUND_TEXTURE] {
            assert!(manifest.path(name).is_some(), "missing {name}");
        }
        assert_eq!(manifest.asteroid_textures.len(), 3);
    }
}
