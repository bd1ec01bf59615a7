pub mod api;
pub mod assets;
pub mod bodies;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{RingStyle, SceneConfig};
pub use api::types::{BodyId, MeshId, TextureId};
pub use assets::manifest::{AssetManifest, TextureDescriptor};
pub use assets::registry::{TextureEvent, TextureRegistry, TextureSender, TextureState, PLACEHOLDER_COLOR};
pub use components::body::{Asteroid, Body, Material};
pub use components::mesh::{
    build_background_sphere, build_circle, build_ring, build_sphere, build_thin_ring, IndexBuffer, Mesh,
    Primitive,
};
pub use core::scene::{Scene, SimulationState};
pub use core::time::FrameClock;
pub use error::{OrreryError, Result};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{DragState, OrbitCamera, Projection};
pub use renderer::instance::{DrawInstance, DrawKind, DrawList, DrawRequest};
pub use renderer::traits::Rasterizer;
pub use systems::asteroids::generate_asteroid_belt;
pub use systems::orbit::{advance, advance_asteroids};
pub use systems::render::{build_draw_list, Backdrop, OrbitGuide, SceneLayout};
pub use systems::rng::Rng;

pub use extensions::{compose_body_transform, BodyTransform, OrbitPose, TransformGraph};
