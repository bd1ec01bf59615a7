use glam::{Mat4, Vec3};

use crate::api::types::{BodyId, MeshId, TextureId};
use crate::components::body::Material;
use crate::components::mesh::Primitive;
use crate::core::scene::SimulationState;
use crate::extensions::transform::{compose_body_transform, OrbitPose, TransformGraph};
use crate::renderer::instance::{DrawKind, DrawList, DrawRequest};

/// Star sphere surrounding the camera.
#[derive(Debug, Clone, Copy)]
pub struct Backdrop {
    pub mesh: MeshId,
    pub texture: TextureId,
    pub scale: f32,
}

/// Line loop tracing one body's orbit.
#[derive(Debug, Clone, Copy)]
pub struct OrbitGuide {
    pub body: BodyId,
    pub mesh: MeshId,
}

/// Static draw structure of a scene: everything the draw list needs besides
/// the animated state.
#[derive(Debug)]
pub struct SceneLayout {
    pub graph: TransformGraph,
    pub backdrop: Backdrop,
    pub guides: Vec<OrbitGuide>,
    pub guide_color: Vec3,
    pub asteroid_mesh: MeshId,
    pub asteroid_emission: Vec3,
}

/// Rebuild `list` for one frame.
///
/// Order: backdrop, orbit guides, then the body hierarchy depth-first (Sun,
/// then each planet followed by its moons and rings), then the asteroid belt.
/// The light position is the origin in view space, computed once here and
/// shared by every lit draw.
pub fn build_draw_list(list: &mut DrawList, layout: &SceneLayout, state: &SimulationState, view: Mat4, projection: Mat4) {
    list.clear();
    let light = view.transform_point3(Vec3::ZERO);

    let backdrop_pose = OrbitPose {
        scale: layout.backdrop.scale,
        ..Default::default()
    };
    list.push(DrawRequest {
        kind: DrawKind::Background,
        mesh: layout.backdrop.mesh,
        texture: Some(layout.backdrop.texture),
        model_view: compose_body_transform(view, &backdrop_pose, None).model_view,
        projection,
        normal: None,
        light_position: None,
        emission: Vec3::ZERO,
        primitive: Primitive::Triangles,
    });

    for guide in &layout.guides {
        list.push(DrawRequest {
            kind: DrawKind::OrbitGuide(guide.body),
            mesh: guide.mesh,
            texture: None,
            model_view: view,
            projection,
            normal: None,
            light_position: None,
            emission: layout.guide_color,
            primitive: Primitive::LineLoop,
        });
    }

    let bodies = &state.bodies;
    layout.graph.walk(
        view,
        |id| bodies.get(id.index()).map(|b| b.pose()).unwrap_or_default(),
        |id, xf| {
            let Some(body) = bodies.get(id.index()) else {
                return;
            };
            let lit = body.material == Material::Lit;
            list.push(DrawRequest {
                kind: DrawKind::Body(id),
                mesh: body.mesh,
                texture: Some(body.texture),
                model_view: xf.model_view,
                projection,
                normal: lit.then_some(xf.normal),
                light_position: lit.then_some(light),
                emission: body.emission,
                primitive: Primitive::Triangles,
            });
        },
    );

    for (i, rock) in state.asteroids.iter().enumerate() {
        let xf = compose_body_transform(view, &rock.pose(), None);
        list.push(DrawRequest {
            kind: DrawKind::Asteroid(i),
            mesh: layout.asteroid_mesh,
            texture: Some(rock.texture),
            model_view: xf.model_view,
            projection,
            normal: Some(xf.normal),
            light_position: Some(light),
            emission: layout.asteroid_emission,
            primitive: Primitive::Triangles,
        });
    }
}
