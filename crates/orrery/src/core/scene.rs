use glam::Vec2;

use crate::api::config::{RingStyle, SceneConfig};
use crate::api::types::{BodyId, MeshId, TextureId};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::TextureRegistry;
use crate::bodies::{self, PLANETS};
use crate::components::body::{Asteroid, Body, Material};
use crate::components::mesh::{
    build_background_sphere, build_circle, build_ring, build_sphere, build_thin_ring, Mesh,
};
use crate::core::time::FrameClock;
use crate::error::{OrreryError, Result};
use crate::extensions::transform::TransformGraph;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::{OrbitCamera, Projection};
use crate::renderer::instance::DrawList;
use crate::renderer::traits::Rasterizer;
use crate::systems::asteroids::generate_asteroid_belt;
use crate::systems::orbit;
use crate::systems::render::{build_draw_list, Backdrop, OrbitGuide, SceneLayout};
use crate::systems::rng::Rng;

/// Everything that changes while the scene runs.
///
/// Owned by [`Scene`] and handed by reference to each system, so systems can
/// be tested without a rendering context.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Indexed by `BodyId`.
    pub bodies: Vec<Body>,
    pub asteroids: Vec<Asteroid>,
    pub camera: OrbitCamera,
    pub projection: Projection,
    pub speed_multiplier: f32,
}

/// One uploaded-or-not mesh.
struct MeshSlot {
    mesh: Mesh,
    /// Needs (re-)upload to the rasterizer.
    dirty: bool,
}

/// The solar system scene: meshes, bodies, camera and the per-frame pipeline.
pub struct Scene {
    config: SceneConfig,
    state: SimulationState,
    layout: SceneLayout,
    meshes: Vec<MeshSlot>,
    textures: TextureRegistry,
    clock: FrameClock,
    draw_list: DrawList,
}

impl Scene {
    /// Build every mesh, body and the asteroid belt once.
    pub fn new(config: SceneConfig, manifest: &AssetManifest) -> Result<Self> {
        config.validate()?;

        let mut textures = TextureRegistry::from_manifest(manifest);
        let mut texture = |name: &str| -> TextureId {
            match textures.get(name) {
                Some(id) => id,
                None => {
                    log::warn!("texture '{}' missing from manifest; it will stay a placeholder", name);
                    textures.register(name, "")
                }
            }
        };

        let mut meshes = Vec::new();
        let mut add_mesh = |mesh: Mesh| -> MeshId {
            meshes.push(MeshSlot { mesh, dirty: true });
            MeshId(meshes.len() as u32 - 1)
        };

        let sun_mesh = add_mesh(build_sphere(config.sun_bands, config.sun_bands)?);
        let planet_mesh = add_mesh(build_sphere(config.planet_bands, config.planet_bands)?);
        let moon_mesh = add_mesh(build_sphere(config.moon_bands, config.moon_bands)?);
        let asteroid_mesh = add_mesh(build_sphere(config.asteroid_bands, config.asteroid_bands)?);
        let background_mesh = add_mesh(build_background_sphere(config.background_bands, config.background_bands)?);
        let ring_mesh = add_mesh(match config.ring_style {
            RingStyle::Thick => build_ring(
                config.ring_inner,
                config.ring_outer,
                config.ring_segments,
                config.ring_radial_divisions,
            )?,
            RingStyle::Thin => build_thin_ring(config.ring_inner, config.ring_outer, config.ring_segments)?,
        });

        // Sun first, then planets in order; attachments after.
        let mut roster = vec![Body::new(bodies::SUN_NAME, sun_mesh, texture(bodies::SUN_TEXTURE))
            .with_spin(0.0, bodies::SUN_ROTATION_SPEED)
            .with_scale(bodies::SUN_SCALE)
            .with_emission(bodies::SUN_EMISSION)];
        for planet in &PLANETS {
            roster.push(
                Body::new(planet.name, planet_mesh, texture(planet.texture))
                    .with_orbit(planet.orbit_radius, planet.initial_angle, planet.orbit_speed)
                    .with_spin(planet.initial_angle, planet.rotation_speed)
                    .with_scale(planet.scale)
                    .with_emission(bodies::PLANET_EMISSION),
            );
        }
        let planet_id = |index: usize| BodyId(index as u32 + 1);

        roster.push(
            Body::new(bodies::MOON_NAME, moon_mesh, texture(bodies::MOON_TEXTURE))
                .with_orbit(bodies::MOON_ORBIT_RADIUS, 0.0, bodies::MOON_ORBIT_SPEED)
                .with_spin(0.0, bodies::MOON_ROTATION_SPEED)
                .with_scale(bodies::MOON_SCALE)
                .with_emission(bodies::PLANET_EMISSION)
                .with_parent(planet_id(bodies::EARTH)),
        );
        roster.push(
            Body::new(bodies::RING_NAME, ring_mesh, texture(bodies::RING_TEXTURE))
                .with_material(Material::Unlit)
                .with_parent(planet_id(bodies::SATURN)),
        );

        let mut graph = TransformGraph::new();
        for (i, body) in roster.iter().enumerate() {
            let id = BodyId(i as u32);
            graph.register(id);
            if body.parent.is_some() {
                graph.set_parent(id, body.parent)?;
            }
        }

        let mut guides = Vec::with_capacity(PLANETS.len());
        for (i, planet) in PLANETS.iter().enumerate() {
            let mesh = add_mesh(build_circle(planet.orbit_radius, config.orbit_segments)?);
            guides.push(OrbitGuide { body: planet_id(i), mesh });
        }

        let belt_names: Vec<String> = if manifest.asteroid_textures.is_empty() {
            bodies::ASTEROID_TEXTURES.iter().map(|s| s.to_string()).collect()
        } else {
            manifest.asteroid_textures.clone()
        };
        let belt_textures: Vec<TextureId> = belt_names.iter().map(|name| texture(name.as_str())).collect();
        let backdrop = Backdrop {
            mesh: background_mesh,
            texture: texture(bodies::BACKGROUND_TEXTURE),
            scale: config.background_scale,
        };

        let (inner, outer) = config.asteroid_belt_bounds(
            PLANETS[bodies::MARS].orbit_radius,
            PLANETS[bodies::JUPITER].orbit_radius,
        );
        let mut rng = Rng::new(config.asteroid_seed);
        let asteroids = generate_asteroid_belt(
            config.asteroid_count,
            inner,
            outer,
            config.asteroid_size,
            &belt_textures,
            &mut rng,
        )?;

        let state = SimulationState {
            bodies: roster,
            asteroids,
            camera: OrbitCamera::from_config(&config),
            projection: Projection::from_config(&config),
            speed_multiplier: config.speed_multiplier,
        };
        let layout = SceneLayout {
            graph,
            backdrop,
            guides,
            guide_color: bodies::ORBIT_GUIDE_COLOR,
            asteroid_mesh,
            asteroid_emission: bodies::PLANET_EMISSION,
        };

        log::info!(
            "scene: {} bodies, {} asteroids, {} meshes, {} textures",
            state.bodies.len(),
            state.asteroids.len(),
            meshes.len(),
            textures.len()
        );

        Ok(Self {
            config,
            state,
            layout,
            meshes,
            textures,
            clock: FrameClock::new(),
            draw_list: DrawList::new(),
        })
    }

    /// Apply one input event. Only camera, speed and viewport state change.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.state.camera.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.state.camera.pointer_up(),
            InputEvent::PointerMove { x, y } => self.state.camera.pointer_move(Vec2::new(x, y)),
            InputEvent::SpeedChanged { value } => self.set_speed_multiplier(value),
            InputEvent::Resize { width, height } => {
                if self.state.projection.set_viewport(width as f32, height as f32) {
                    log::debug!("viewport resized to {}x{}", width, height);
                } else {
                    log::debug!("ignoring zero-sized viewport {}x{}", width, height);
                }
            }
        }
    }

    /// Apply every queued event in arrival order.
    pub fn drain_input(&mut self, queue: &mut InputQueue) {
        for event in queue.drain() {
            self.handle_input(event);
        }
    }

    /// Run one frame: poll textures, advance orbits, rebuild the draw list.
    pub fn tick(&mut self, now_seconds: f64) {
        self.textures.poll();

        let dt = self.clock.tick(now_seconds);
        let speed = self.state.speed_multiplier;
        orbit::advance(&mut self.state.bodies, dt, speed);
        orbit::advance_asteroids(&mut self.state.asteroids, self.config.asteroid_speed, dt, speed);

        let view = self.state.camera.view_matrix();
        let projection = self.state.projection.matrix();
        build_draw_list(&mut self.draw_list, &self.layout, &self.state, view, projection);
        self.draw_list.flatten();
    }

    /// Upload every mesh not yet uploaded (or rebuilt since the last upload).
    /// Returns how many meshes were sent.
    pub fn upload_meshes<R: Rasterizer>(&mut self, rasterizer: &mut R) -> Result<usize> {
        let mut sent = 0;
        for (i, slot) in self.meshes.iter_mut().enumerate() {
            if !slot.dirty {
                continue;
            }
            rasterizer.upload_mesh(MeshId(i as u32), &slot.mesh)?;
            slot.dirty = false;
            sent += 1;
        }
        if sent > 0 {
            log::debug!("uploaded {} meshes to {}", sent, rasterizer.backend());
        }
        Ok(sent)
    }

    /// Hand the current draw list to the rasterizer, in order.
    pub fn submit<R: Rasterizer>(&self, rasterizer: &mut R) {
        for request in self.draw_list.iter() {
            rasterizer.submit(request);
        }
    }

    /// Move a planet to a new orbit radius and rebuild its orbit guide.
    /// Only bodies with an orbit guide (the planets) can be moved.
    pub fn set_orbit_radius(&mut self, id: BodyId, radius: f32) -> Result<()> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(OrreryError::invalid(format!("orbit radius must be positive, got {radius}")));
        }
        let guide_mesh = match self.layout.guides.iter().find(|g| g.body == id) {
            Some(guide) => guide.mesh,
            None => return Err(OrreryError::invalid(format!("body {} is not a planet", id.0))),
        };
        let mesh = build_circle(radius, self.config.orbit_segments)?;
        let body = self
            .state
            .bodies
            .get_mut(id.index())
            .ok_or_else(|| OrreryError::invalid(format!("no body with id {}", id.0)))?;
        body.orbit_radius = radius;

        let slot = &mut self.meshes[guide_mesh.index()];
        slot.mesh = mesh;
        slot.dirty = true;
        log::debug!("{} now orbits at r={}", body.name, radius);
        Ok(())
    }

    pub fn set_speed_multiplier(&mut self, value: f32) {
        if value.is_finite() {
            self.state.speed_multiplier = value;
        } else {
            log::warn!("ignoring non-finite speed multiplier {}", value);
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.state.speed_multiplier
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.state.bodies.get(id.index())
    }

    /// Look up a body by name.
    pub fn body_id(&self, name: &str) -> Option<BodyId> {
        self.state
            .bodies
            .iter()
            .position(|b| b.name == name)
            .map(|i| BodyId(i as u32))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.state.bodies
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.state.asteroids
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.state.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.state.projection
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.index()).map(|slot| &slot.mesh)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn orbit_guides(&self) -> &[OrbitGuide] {
        &self.layout.guides
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }
}
