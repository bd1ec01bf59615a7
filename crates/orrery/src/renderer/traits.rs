//! Rasterizer capability consumed by the scene.
//!
//! In the browser build the rasterizer is JavaScript (WebGL) reading the
//! mesh arrays and the flat draw-instance buffer out of WASM memory. This
//! trait is the same contract for Rust-side backends and for tests.

use crate::api::types::MeshId;
use crate::components::mesh::Mesh;
use crate::error::Result;

use super::instance::DrawRequest;

/// A graphics backend the scene can upload meshes to and draw through.
///
/// # Example Implementation
///
/// ```ignore
/// struct GlRasterizer {
///     gl: glow::Context,
///     buffers: HashMap<MeshId, GpuMesh>,
/// }
///
/// impl Rasterizer for GlRasterizer {
///     fn backend(&self) -> &'static str { "webgl" }
///
///     fn upload_mesh(&mut self, id: MeshId, mesh: &Mesh) -> Result<()> {
///         // Create vertex/index buffers, replacing any previous upload of `id`...
///     }
///
///     fn submit(&mut self, request: &DrawRequest) {
///         // Bind program + uniforms, issue the indexed or line-loop draw...
///     }
/// }
/// ```
pub trait Rasterizer {
    /// Backend identifier (e.g. "webgl", "recording").
    fn backend(&self) -> &'static str;

    /// Upload vertex and index arrays for `id`. Uploading the same id again
    /// replaces the earlier buffers. Failure here is an initialization failure.
    fn upload_mesh(&mut self, id: MeshId, mesh: &Mesh) -> Result<()>;

    /// Issue one draw. Never fails; a missing texture draws the placeholder.
    /// The viewport itself is the projection's concern, see `Projection::set_viewport`.
    fn submit(&mut self, request: &DrawRequest);
}

/// Test double that records everything it is asked to do.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingRasterizer {
    /// (mesh id, vertex count, index count) per upload, in order.
    pub uploads: Vec<(MeshId, usize, usize)>,
    pub submitted: Vec<DrawRequest>,
    /// When set, every upload fails with an initialization error.
    pub fail_uploads: bool,
}

#[cfg(test)]
impl Rasterizer for RecordingRasterizer {
    fn backend(&self) -> &'static str {
        "recording"
    }

    fn upload_mesh(&mut self, id: MeshId, mesh: &Mesh) -> Result<()> {
        if self.fail_uploads {
            return Err(crate::error::OrreryError::Initialization("no graphics context".into()));
        }
        self.uploads.push((id, mesh.vertex_count(), mesh.index_count()));
        Ok(())
    }

    fn submit(&mut self, request: &DrawRequest) {
        self.submitted.push(*request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::build_circle;

    #[test]
    fn recording_rasterizer_records_uploads() {
        let mut raster = RecordingRasterizer::default();
        let circle = build_circle(2.0, 16).unwrap();
        raster.upload_mesh(MeshId(3), &circle).unwrap();
        assert_eq!(raster.backend(), "recording");
        assert_eq!(raster.uploads, vec![(MeshId(3), 17, circle.index_count())]);
    }

    #[test]
    fn failing_upload_is_fatal() {
        let mut raster = RecordingRasterizer {
            fail_uploads: true,
            ..Default::default()
        };
        let circle = build_circle(2.0, 16).unwrap();
        let err = raster.upload_mesh(MeshId(0), &circle).unwrap_err();
        assert!(!err.is_recoverable());
    }
}
