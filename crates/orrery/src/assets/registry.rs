use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::api::types::TextureId;
use crate::assets::manifest::AssetManifest;
use crate::error::OrreryError;

/// 1×1 RGBA color every texture shows until (unless) its image arrives.
pub const PLACEHOLDER_COLOR: [u8; 4] = [0, 0, 255, 255];

/// Load state of one texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureState {
    /// Handle is valid; the placeholder is drawn.
    Pending,
    /// Image decoded and uploaded by the loader.
    Ready,
    /// Load failed. The placeholder is drawn forever.
    Failed(String),
}

/// Completion message sent by the (asynchronous) loader.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureEvent {
    Loaded(TextureId),
    Failed { id: TextureId, reason: String },
}

/// Loader-side handle. Cheap to clone; never blocks.
#[derive(Debug, Clone)]
pub struct TextureSender {
    tx: Sender<TextureEvent>,
}

impl TextureSender {
    pub fn loaded(&self, id: TextureId) {
        // The registry owns the receiver; a send can only fail once the scene is gone.
        let _ = self.tx.send(TextureEvent::Loaded(id));
    }

    pub fn failed(&self, id: TextureId, reason: impl Into<String>) {
        let _ = self.tx.send(TextureEvent::Failed {
            id,
            reason: reason.into(),
        });
    }
}

struct TextureEntry {
    name: String,
    path: String,
    state: TextureState,
}

/// Registry of named textures, built from an AssetManifest.
///
/// Handles are valid immediately. The render path reads the current state
/// with [`TextureRegistry::state`]; the loader reports completion through a
/// [`TextureSender`], and [`TextureRegistry::poll`] applies those reports
/// once per frame without waiting.
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    by_name: HashMap<String, TextureId>,
    tx: Sender<TextureEvent>,
    rx: Receiver<TextureEvent>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Build a registry from a parsed AssetManifest. Ids follow sorted name order.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut registry = Self::new();
        for name in manifest.texture_names() {
            let path = manifest.path(name).unwrap_or_default();
            registry.register(name, path);
        }
        registry
    }

    /// Register a texture, or return the existing id for `name`.
    pub fn register(&mut self, name: &str, path: &str) -> TextureId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            name: name.to_string(),
            path: path.to_string(),
            state: TextureState::Pending,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look up a texture by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.index()).map(|e| e.name.as_str())
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.index()).map(|e| e.path.as_str())
    }

    pub fn state(&self, id: TextureId) -> Option<&TextureState> {
        self.entries.get(id.index()).map(|e| &e.state)
    }

    pub fn is_ready(&self, id: TextureId) -> bool {
        matches!(self.state(id), Some(TextureState::Ready))
    }

    pub fn placeholder_color(&self) -> [u8; 4] {
        PLACEHOLDER_COLOR
    }

    pub fn sender(&self) -> TextureSender {
        TextureSender { tx: self.tx.clone() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (id, name, path) in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &str, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (TextureId(i as u32), e.name.as_str(), e.path.as_str()))
    }

    /// Apply every pending loader report. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    fn apply(&mut self, event: TextureEvent) -> bool {
        let id = match &event {
            TextureEvent::Loaded(id) | TextureEvent::Failed { id, .. } => *id,
        };
        let Some(entry) = self.entries.get_mut(id.index()) else {
            log::warn!("texture report for unknown id {}", id.0);
            return false;
        };
        if entry.state != TextureState::Pending {
            log::debug!("texture '{}' already settled, ignoring {:?}", entry.name, event);
            return false;
        }
        match event {
            TextureEvent::Loaded(_) => {
                log::debug!("texture '{}' ready", entry.name);
                entry.state = TextureState::Ready;
            }
            TextureEvent::Failed { reason, .. } => {
                let err = OrreryError::AssetLoad {
                    texture: entry.name.clone(),
                    reason: reason.clone(),
                };
                log::warn!("{}; drawing placeholder", err);
                entry.state = TextureState::Failed(reason);
            }
        }
        true
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> (TextureRegistry, TextureId, TextureId) {
        let mut reg = TextureRegistry::new();
        let sun = reg.register("sun", "textures/sun.jpg");
        let earth = reg.register("earth", "textures/earth.jpg");
        (reg, sun, earth)
    }

    #[test]
    fn handles_are_pending_until_polled() {
        let (mut reg, sun, _) = registry();
        assert_eq!(reg.state(sun), Some(&TextureState::Pending));

        reg.sender().loaded(sun);
        // Nothing changes until the frame loop polls.
        assert_eq!(reg.state(sun), Some(&TextureState::Pending));
        assert_eq!(reg.poll(), 1);
        assert!(reg.is_ready(sun));
    }

    #[test]
    fn failure_keeps_placeholder_forever() {
        let (mut reg, _, earth) = registry();
        let tx = reg.sender();
        tx.failed(earth, "decode error");
        tx.loaded(earth);
        assert_eq!(reg.poll(), 1);
        assert_eq!(reg.state(earth), Some(&TextureState::Failed("decode error".into())));
        assert_eq!(reg.placeholder_color(), [0, 0, 255, 255]);
    }

    #[test]
    fn register_is_idempotent_by_name() {
        let (mut reg, sun, _) = registry();
        assert_eq!(reg.register("sun", "other.jpg"), sun);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.path(sun), Some("textures/sun.jpg"));
        assert_eq!(reg.get("earth"), Some(TextureId(1)));
        assert_eq!(reg.name(TextureId(1)), Some("earth"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let (mut reg, _, _) = registry();
        reg.sender().loaded(TextureId(99));
        assert_eq!(reg.poll(), 0);
        assert_eq!(reg.state(TextureId(99)), None);
    }

    #[test]
    fn from_manifest_uses_sorted_names() {
        let manifest = AssetManifest::from_json(
            r#"{ "textures": { "venus": { "path": "v.jpg" }, "mars": { "path": "m.jpg" } } }"#,
        )
        .unwrap();
        let reg = TextureRegistry::from_manifest(&manifest);
        assert_eq!(reg.get("mars"), Some(TextureId(0)));
        assert_eq!(reg.get("venus"), Some(TextureId(1)));
        let names: Vec<&str> = reg.iter().map(|(_, name, _)| name).collect();
        assert_eq!(names, vec!["mars", "venus"]);
    }
}
