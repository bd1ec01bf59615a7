//! Asteroid belt generation.
//!
//! The belt is drawn once at scene construction from a seeded [`Rng`], so a
//! given seed always reproduces the same belt.

use std::f32::consts::TAU;

use crate::api::types::TextureId;
use crate::components::body::Asteroid;
use crate::error::{OrreryError, Result};
use crate::systems::rng::Rng;

/// Scatter `count` asteroids uniformly over the annulus `[inner, outer]`.
///
/// Angle ~ U[0, 2π), radius ~ U[inner, outer), size ~ U[min, max), texture
/// picked uniformly from `textures`.
pub fn generate_asteroid_belt(
    count: usize,
    inner_radius: f32,
    outer_radius: f32,
    size_range: (f32, f32),
    textures: &[TextureId],
    rng: &mut Rng,
) -> Result<Vec<Asteroid>> {
    if !(inner_radius.is_finite() && outer_radius.is_finite()) || inner_radius < 0.0 || inner_radius >= outer_radius {
        return Err(OrreryError::invalid(format!(
            "asteroid belt needs 0 <= inner < outer (inner={inner_radius}, outer={outer_radius})"
        )));
    }
    let (size_min, size_max) = size_range;
    if size_min <= 0.0 || size_min > size_max {
        return Err(OrreryError::invalid(format!(
            "asteroid size range must satisfy 0 < min <= max (min={size_min}, max={size_max})"
        )));
    }
    if textures.is_empty() {
        return Err(OrreryError::invalid("asteroid belt needs at least one texture"));
    }

    let belt = (0..count)
        .map(|_| Asteroid {
            angle: rng.range(0.0, TAU),
            radius: rng.range(inner_radius, outer_radius),
            size: rng.range(size_min, size_max),
            texture: textures[rng.next_int(textures.len() as u32) as usize],
        })
        .collect();

    log::debug!(
        "asteroid belt: {} rocks between r={} and r={}",
        count,
        inner_radius,
        outer_radius
    );
    Ok(belt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXTURES: [TextureId; 3] = [TextureId(7), TextureId(8), TextureId(9)];

    #[test]
    fn belt_stays_inside_annulus() {
        let mut rng = Rng::new(0x5EED);
        let (inner, outer) = (10.8, 14.4);
        let belt = generate_asteroid_belt(500, inner, outer, (0.05, 0.15), &TEXTURES, &mut rng).unwrap();
        assert_eq!(belt.len(), 500);
        for rock in &belt {
            assert!(rock.radius >= inner && rock.radius <= outer, "radius {}", rock.radius);
            assert!(rock.angle >= 0.0 && rock.angle < TAU, "angle {}", rock.angle);
            assert!(rock.size >= 0.05 && rock.size <= 0.15, "size {}", rock.size);
            assert!(TEXTURES.contains(&rock.texture));
        }
    }

    #[test]
    fn same_seed_same_belt() {
        let a = generate_asteroid_belt(50, 1.0, 2.0, (0.1, 0.2), &TEXTURES, &mut Rng::new(3)).unwrap();
        let b = generate_asteroid_belt(50, 1.0, 2.0, (0.1, 0.2), &TEXTURES, &mut Rng::new(3)).unwrap();
        let c = generate_asteroid_belt(50, 1.0, 2.0, (0.1, 0.2), &TEXTURES, &mut Rng::new(4)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn every_texture_gets_used() {
        let belt = generate_asteroid_belt(300, 1.0, 2.0, (0.1, 0.2), &TEXTURES, &mut Rng::new(11)).unwrap();
        for tex in TEXTURES {
            assert!(belt.iter().any(|r| r.texture == tex), "texture {:?} never picked", tex);
        }
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let mut rng = Rng::new(1);
        assert!(generate_asteroid_belt(10, 5.0, 4.0, (0.1, 0.2), &TEXTURES, &mut rng).is_err());
        assert!(generate_asteroid_belt(10, 4.0, 5.0, (0.3, 0.2), &TEXTURES, &mut rng).is_err());
        assert!(generate_asteroid_belt(10, 4.0, 5.0, (0.1, 0.2), &[], &mut rng).is_err());
    }

    #[test]
    fn empty_belt_is_allowed() {
        let belt = generate_asteroid_belt(0, 4.0, 5.0, (0.1, 0.2), &TEXTURES, &mut Rng::new(1)).unwrap();
        assert!(belt.is_empty());
    }
}
