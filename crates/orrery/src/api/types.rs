/// Index of a body in the scene's body list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Index of a mesh in the scene's mesh table.
/// The rasterizer receives the same id when the mesh is uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Handle to a texture in the texture registry.
/// Valid from the moment it is registered, whether or not the image has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TextureId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MeshId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TextureId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
