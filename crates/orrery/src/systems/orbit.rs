//! Orbital state updates for circular orbits at constant angular speed.
//!
//! Angles are plain accumulators and are never wrapped. A zero speed
//! multiplier freezes the scene; a negative one runs it backwards.

use crate::components::body::{Asteroid, Body};

/// Advance every body's orbit and spin angle by `speed * dt * multiplier`.
///
/// Each body is updated independently, so the order of `bodies` never matters.
pub fn advance(bodies: &mut [Body], dt: f32, speed_multiplier: f32) {
    let step = dt * speed_multiplier;
    for body in bodies.iter_mut() {
        body.orbit_angle += body.orbit_speed * step;
        body.rotation_angle += body.rotation_speed * step;
    }
}

/// Advance the whole belt at one shared angular speed. Asteroids never spin.
pub fn advance_asteroids(asteroids: &mut [Asteroid], angular_speed: f32, dt: f32, speed_multiplier: f32) {
    let delta = angular_speed * dt * speed_multiplier;
    for rock in asteroids.iter_mut() {
        rock.angle += delta;
    }
}
