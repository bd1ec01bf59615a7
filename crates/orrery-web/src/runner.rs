use orrery::{
    AssetManifest, BodyId, DrawInstance, IndexBuffer, InputEvent, InputQueue, Mesh, MeshId, Primitive,
    Rasterizer, DrawRequest, Result, Scene, SceneConfig, TextureId,
};

/// Rasterizer half that lives in Rust: remembers which meshes JavaScript
/// must (re-)upload. JavaScript then reads the arrays by id.
#[derive(Debug, Default)]
pub struct UploadQueue {
    pending: Vec<u32>,
}

impl UploadQueue {
    /// Ids queued since the last call, in upload order.
    pub fn take(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.pending)
    }
}

impl Rasterizer for UploadQueue {
    fn backend(&self) -> &'static str {
        "webgl"
    }

    fn upload_mesh(&mut self, id: MeshId, _mesh: &Mesh) -> Result<()> {
        if !self.pending.contains(&id.0) {
            self.pending.push(id.0);
        }
        Ok(())
    }

    // JavaScript walks the flat instance buffer itself.
    fn submit(&mut self, _request: &DrawRequest) {}
}

/// Scene runner that wires the scene loop to the browser.
///
/// The wasm exports keep one `SceneRunner` in a `thread_local!` and forward
/// to it, because wasm-bindgen cannot export the scene directly.
pub struct SceneRunner {
    scene: Scene,
    input: InputQueue,
    uploads: UploadQueue,
}

impl SceneRunner {
    pub fn new(config: SceneConfig, manifest: &AssetManifest) -> Result<Self> {
        let mut scene = Scene::new(config, manifest)?;
        let mut uploads = UploadQueue::default();
        scene.upload_meshes(&mut uploads)?;
        Ok(Self {
            scene,
            input: InputQueue::new(),
            uploads,
        })
    }

    /// Parse JSON config and manifest. Empty strings select the defaults.
    pub fn from_json(config_json: &str, manifest_json: &str) -> Result<Self> {
        let config = if config_json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json(config_json)?
        };
        let manifest = if manifest_json.trim().is_empty() {
            orrery::bodies::default_manifest()
        } else {
            AssetManifest::from_json(manifest_json)?
        };
        Self::new(config, &manifest)
    }

    /// Push an input event into the queue. Applied at the start of the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame. `now_ms` is the requestAnimationFrame timestamp.
    pub fn tick(&mut self, now_ms: f64) {
        self.scene.drain_input(&mut self.input);
        self.scene.tick(now_ms / 1000.0);
        if let Err(err) = self.scene.upload_meshes(&mut self.uploads) {
            log::error!("mesh upload failed: {}", err);
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn set_orbit_radius(&mut self, body: &str, radius: f32) -> Result<()> {
        let id: BodyId = self
            .scene
            .body_id(body)
            .ok_or_else(|| orrery::OrreryError::InvalidParameter(format!("unknown body '{body}'")))?;
        self.scene.set_orbit_radius(id, radius)?;
        // Queue the rebuilt guide now so JS can fetch it before the next frame.
        self.scene.upload_meshes(&mut self.uploads)?;
        Ok(())
    }

    // ---- Textures ----

    pub fn texture_loaded(&mut self, id: u32) {
        self.scene.textures_mut().sender().loaded(TextureId(id));
    }

    pub fn texture_failed(&mut self, id: u32, reason: &str) {
        self.scene.textures_mut().sender().failed(TextureId(id), reason);
    }

    pub fn texture_count(&self) -> u32 {
        self.scene.textures().len() as u32
    }

    /// Texture id for `name`, or -1.
    pub fn texture_id(&self, name: &str) -> i32 {
        self.scene.textures().get(name).map_or(-1, |id| id.0 as i32)
    }

    pub fn texture_path(&self, id: u32) -> String {
        self.scene.textures().path(TextureId(id)).unwrap_or_default().to_string()
    }

    pub fn placeholder_color(&self) -> Vec<u8> {
        self.scene.textures().placeholder_color().to_vec()
    }

    // ---- Meshes ----

    pub fn take_uploads(&mut self) -> Vec<u32> {
        self.uploads.take()
    }

    pub fn mesh_count(&self) -> u32 {
        self.scene.mesh_count() as u32
    }

    fn mesh(&self, id: u32) -> Option<&Mesh> {
        self.scene.mesh(MeshId(id))
    }

    pub fn mesh_positions_ptr(&self, id: u32) -> *const f32 {
        self.mesh(id).map_or(std::ptr::null(), |m| m.positions.as_ptr())
    }

    pub fn mesh_positions_len(&self, id: u32) -> u32 {
        self.mesh(id).map_or(0, |m| m.positions.len() as u32)
    }

    pub fn mesh_normals_ptr(&self, id: u32) -> *const f32 {
        self.mesh(id)
            .and_then(|m| m.normals.as_ref())
            .map_or(std::ptr::null(), |n| n.as_ptr())
    }

    pub fn mesh_normals_len(&self, id: u32) -> u32 {
        self.mesh(id)
            .and_then(|m| m.normals.as_ref())
            .map_or(0, |n| n.len() as u32)
    }

    pub fn mesh_uvs_ptr(&self, id: u32) -> *const f32 {
        self.mesh(id).map_or(std::ptr::null(), |m| m.uvs.as_ptr())
    }

    pub fn mesh_uvs_len(&self, id: u32) -> u32 {
        self.mesh(id).map_or(0, |m| m.uvs.len() as u32)
    }

    /// Raw index bytes; read with [`SceneRunner::mesh_index_stride`].
    pub fn mesh_indices_ptr(&self, id: u32) -> *const u8 {
        match self.mesh(id).and_then(|m| m.indices.as_ref()) {
            Some(IndexBuffer::U16(v)) => v.as_ptr() as *const u8,
            Some(IndexBuffer::U32(v)) => v.as_ptr() as *const u8,
            None => std::ptr::null(),
        }
    }

    pub fn mesh_indices_len(&self, id: u32) -> u32 {
        self.mesh(id).map_or(0, |m| m.index_count() as u32)
    }

    /// Bytes per index: 2, 4, or 0 for non-indexed meshes.
    pub fn mesh_index_stride(&self, id: u32) -> u32 {
        self.mesh(id)
            .and_then(|m| m.indices.as_ref())
            .map_or(0, |i| i.stride() as u32)
    }

    /// 0 = triangles, 1 = line loop.
    pub fn mesh_primitive(&self, id: u32) -> u32 {
        match self.mesh(id).map(|m| m.primitive) {
            Some(Primitive::LineLoop) => 1,
            _ => 0,
        }
    }

    // ---- Draw list ----

    pub fn draw_instances_ptr(&self) -> *const f32 {
        self.scene.draw_list().instances_ptr()
    }

    pub fn draw_instance_count(&self) -> u32 {
        self.scene.draw_list().instance_count()
    }

    pub fn draw_instance_floats(&self) -> u32 {
        DrawInstance::FLOATS as u32
    }
}
