use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::api::types::{BodyId, MeshId, TextureId};
use crate::components::mesh::Primitive;

/// What a draw request is drawing. Used for ordering checks and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Background,
    /// Orbit guide of the given planet.
    OrbitGuide(BodyId),
    Body(BodyId),
    /// Index into the asteroid belt.
    Asteroid(usize),
}

/// One draw call for the rasterizer.
///
/// `normal` and `light_position` are only present for lit materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub kind: DrawKind,
    pub mesh: MeshId,
    /// `None` for untextured geometry such as orbit guides.
    pub texture: Option<TextureId>,
    pub model_view: Mat4,
    pub projection: Mat4,
    pub normal: Option<Mat4>,
    /// Sun position in view space.
    pub light_position: Option<Vec3>,
    pub emission: Vec3,
    pub primitive: Primitive,
}

impl DrawRequest {
    pub fn is_lit(&self) -> bool {
        self.normal.is_some()
    }
}

/// Flat per-draw record read by the JavaScript rasterizer straight out of WASM memory.
/// Must match the JS reader: 57 floats = 228 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DrawInstance {
    /// Column-major model-view matrix.
    pub model_view: [f32; 16],
    /// Column-major projection matrix.
    pub projection: [f32; 16],
    /// Column-major normal matrix; identity when unlit.
    pub normal: [f32; 16],
    pub light_position: [f32; 3],
    pub emission: [f32; 3],
    pub mesh_id: f32,
    /// -1.0 when untextured.
    pub texture_id: f32,
    /// Bit 0: lit. Bit 1: line loop.
    pub flags: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 57;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_LIT: u32 = 1;
    pub const FLAG_LINE_LOOP: u32 = 1 << 1;

    pub fn flag_bits(&self) -> u32 {
        self.flags as u32
    }
}

impl From<&DrawRequest> for DrawInstance {
    fn from(req: &DrawRequest) -> Self {
        let mut flags = 0;
        if req.is_lit() {
            flags |= Self::FLAG_LIT;
        }
        if req.primitive == Primitive::LineLoop {
            flags |= Self::FLAG_LINE_LOOP;
        }
        Self {
            model_view: req.model_view.to_cols_array(),
            projection: req.projection.to_cols_array(),
            normal: req.normal.unwrap_or(Mat4::IDENTITY).to_cols_array(),
            light_position: req.light_position.unwrap_or(Vec3::ZERO).to_array(),
            emission: req.emission.to_array(),
            mesh_id: req.mesh.0 as f32,
            texture_id: req.texture.map_or(-1.0, |t| t.0 as f32),
            flags: flags as f32,
        }
    }
}

/// Ordered draw requests for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    requests: Vec<DrawRequest>,
    /// Flattened copy of `requests`, rebuilt by [`DrawList::flatten`].
    instances: Vec<DrawInstance>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            requests: Vec::with_capacity(1024),
            instances: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.requests.clear();
        self.instances.clear();
    }

    pub fn push(&mut self, request: DrawRequest) {
        self.requests.push(request);
    }

    pub fn requests(&self) -> &[DrawRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawRequest> {
        self.requests.iter()
    }

    /// Rebuild the flat instance buffer from the current requests.
    pub fn flatten(&mut self) {
        self.instances.clear();
        self.instances.extend(self.requests.iter().map(DrawInstance::from));
    }

    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The instance buffer viewed as plain floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for reads from WASM memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}
