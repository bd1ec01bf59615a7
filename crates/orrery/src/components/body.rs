use glam::Vec3;

use crate::api::types::{BodyId, MeshId, TextureId};
use crate::extensions::transform::OrbitPose;

/// How a body is shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Diffuse light from the Sun plus the body's emission color.
    Lit,
    /// Texture only; no normal matrix or light position is sent.
    Unlit,
}

/// The Sun, a planet, a moon, or an attachment such as a ring.
///
/// Only the two angle fields change after construction; the orbital updater
/// advances them every frame.
#[derive(Debug, Clone)]
pub struct Body {
    /// Name used for lookup and logging ("Sun", "Earth", "Saturn ring", ...).
    pub name: String,
    /// Distance from the parent's center. 0 for the Sun and attachments.
    pub orbit_radius: f32,
    /// Radians, unbounded.
    pub orbit_angle: f32,
    /// Self-spin about the local Y axis, radians, unbounded.
    pub rotation_angle: f32,
    /// Radians per simulated second.
    pub orbit_speed: f32,
    /// Radians per simulated second.
    pub rotation_speed: f32,
    pub scale: f32,
    /// Light contribution independent of the Sun.
    pub emission: Vec3,
    pub mesh: MeshId,
    pub texture: TextureId,
    pub material: Material,
    /// Lookup relation only; the scene owns every body.
    pub parent: Option<BodyId>,
}

impl Body {
    pub fn new(name: impl Into<String>, mesh: MeshId, texture: TextureId) -> Self {
        Self {
            name: name.into(),
            orbit_radius: 0.0,
            orbit_angle: 0.0,
            rotation_angle: 0.0,
            orbit_speed: 0.0,
            rotation_speed: 0.0,
            scale: 1.0,
            emission: Vec3::ZERO,
            mesh,
            texture,
            material: Material::Lit,
            parent: None,
        }
    }

    // -- Builder pattern --

    /// Circular orbit of `radius` starting at `angle`, advancing at `speed` rad/s.
    pub fn with_orbit(mut self, radius: f32, angle: f32, speed: f32) -> Self {
        self.orbit_radius = radius;
        self.orbit_angle = angle;
        self.orbit_speed = speed;
        self
    }

    pub fn with_spin(mut self, angle: f32, speed: f32) -> Self {
        self.rotation_angle = angle;
        self.rotation_speed = speed;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_emission(mut self, emission: Vec3) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn pose(&self) -> OrbitPose {
        OrbitPose {
            orbit_radius: self.orbit_radius,
            orbit_angle: self.orbit_angle,
            rotation_angle: self.rotation_angle,
            scale: self.scale,
        }
    }
}

/// One rock of the asteroid belt. Orbits the Sun at a shared angular speed and never spins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub angle: f32,
    pub radius: f32,
    pub size: f32,
    pub texture: TextureId,
}

impl Asteroid {
    pub fn pose(&self) -> OrbitPose {
        OrbitPose {
            orbit_radius: self.radius,
            orbit_angle: self.angle,
            rotation_angle: 0.0,
            scale: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let body = Body::new("Earth", MeshId(1), TextureId(3))
            .with_orbit(6.0, 180.0, 0.017)
            .with_spin(180.0, 0.004)
            .with_scale(0.4)
            .with_emission(Vec3::splat(0.3));
        assert_eq!(body.orbit_radius, 6.0);
        assert_eq!(body.orbit_speed, 0.017);
        assert_eq!(body.rotation_speed, 0.004);
        assert_eq!(body.material, Material::Lit);
        assert!(body.parent.is_none());

        let pose = body.pose();
        assert_eq!(pose.orbit_radius, 6.0);
        assert_eq!(pose.rotation_angle, 180.0);
        assert_eq!(pose.scale, 0.4);
    }

    #[test]
    fn asteroid_pose_has_no_spin() {
        let rock = Asteroid { angle: 1.0, radius: 12.0, size: 0.1, texture: TextureId(0) };
        let pose = rock.pose();
        assert_eq!(pose.rotation_angle, 0.0);
        assert_eq!(pose.scale, 0.1);
        assert_eq!(pose.orbit_radius, 12.0);
    }
}
