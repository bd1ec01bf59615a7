use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Asset manifest naming every texture the scene uses.
/// Loaded from a JSON file at runtime; the JS loader fetches the paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Texture lookup: name → image descriptor.
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
    /// Texture names the asteroid belt picks from, in order.
    #[serde(default)]
    pub asteroid_textures: Vec<String>,
}

/// Describes a single image file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Relative path to the image (e.g., "textures/earth.jpg").
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn path(&self, name: &str) -> Option<&str> {
        self.textures.get(name).map(|t| t.path.as_str())
    }

    /// Names in sorted order, so texture ids are stable across runs.
    pub fn texture_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.textures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
