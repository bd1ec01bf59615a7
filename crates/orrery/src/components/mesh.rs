//! Procedural mesh generation.
//!
//! Every builder is a pure function: the same parameters always produce the
//! same arrays. Meshes are built once when the scene is constructed, then
//! shared read-only by every body that references them.

use std::f32::consts::{PI, TAU};

use crate::error::{OrreryError, Result};

/// How the rasterizer should assemble the vertex stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Indexed triangle list.
    Triangles,
    /// Closed polyline through every position, no index buffer.
    LineLoop,
}

/// Triangle indices, narrowed to u16 when the vertex count allows it.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Pick the narrowest index type that can address `vertex_count` vertices.
    pub fn from_u32(indices: Vec<u32>, vertex_count: usize) -> Self {
        if vertex_count <= u16::MAX as usize + 1 {
            IndexBuffer::U16(indices.into_iter().map(|i| i as u16).collect())
        } else {
            IndexBuffer::U32(indices)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            IndexBuffer::U16(v) => v.get(i).map(|&x| x as u32),
            IndexBuffer::U32(v) => v.get(i).copied(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Bytes per index (2 or 4).
    pub fn stride(&self) -> usize {
        match self {
            IndexBuffer::U16(_) => 2,
            IndexBuffer::U32(_) => 4,
        }
    }
}

/// Immutable vertex data for one drawable shape.
///
/// `positions` and `normals` have stride 3, `uvs` stride 2. Triangle meshes
/// carry an index buffer whose length is a multiple of 3; line loops carry none.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Option<Vec<f32>>,
    pub uvs: Vec<f32>,
    pub indices: Option<IndexBuffer>,
    pub primitive: Primitive,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of indices, or 0 for non-indexed meshes.
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, IndexBuffer::len)
    }

    /// Position of vertex `i` as `[x, y, z]`.
    pub fn position(&self, i: usize) -> [f32; 3] {
        let p = &self.positions[i * 3..i * 3 + 3];
        [p[0], p[1], p[2]]
    }

    /// Number of elements the rasterizer draws: indices for triangles, vertices for loops.
    pub fn element_count(&self) -> usize {
        match self.primitive {
            Primitive::Triangles => self.index_count(),
            Primitive::LineLoop => self.vertex_count(),
        }
    }
}

/// Vertex and index counts of a (rows × cols) quad grid, or an error when
/// either count does not fit a `u32` index.
fn grid_counts(rows: u32, cols: u32) -> Result<(usize, usize)> {
    let vertices = rows
        .checked_add(1)
        .zip(cols.checked_add(1))
        .and_then(|(r, c)| r.checked_mul(c));
    let indices = rows.checked_mul(cols).and_then(|quads| quads.checked_mul(6));
    match (vertices, indices) {
        (Some(v), Some(i)) => Ok((v as usize, i as usize)),
        _ => Err(OrreryError::invalid(format!(
            "{rows}x{cols} grid is too large for 32-bit indices"
        ))),
    }
}

/// Two triangles per quad of a (rows × cols) vertex grid with `cols + 1` vertices per row.
/// Counts must already be checked with [`grid_counts`].
fn grid_indices(rows: u32, cols: u32, index_count: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(index_count);
    for row in 0..rows {
        for col in 0..cols {
            let first = row * (cols + 1) + col;
            let second = first + cols + 1;
            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }
    indices
}

fn sphere(lat_bands: u32, lon_bands: u32, normal_sign: f32) -> Result<Mesh> {
    if lat_bands == 0 || lon_bands == 0 {
        return Err(OrreryError::invalid(format!(
            "sphere needs at least one band in each direction (lat={lat_bands}, lon={lon_bands})"
        )));
    }

    let (vertex_count, index_count) = grid_counts(lat_bands, lon_bands)?;
    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut normals = Vec::with_capacity(vertex_count * 3);
    let mut uvs = Vec::with_capacity(vertex_count * 2);

    for lat in 0..=lat_bands {
        let theta = lat as f32 * PI / lat_bands as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=lon_bands {
            let phi = lon as f32 * TAU / lon_bands as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = cos_phi * sin_theta;
            let y = cos_theta;
            let z = sin_phi * sin_theta;

            positions.extend_from_slice(&[x, y, z]);
            normals.extend_from_slice(&[normal_sign * x, normal_sign * y, normal_sign * z]);
            uvs.push(1.0 - lon as f32 / lon_bands as f32);
            uvs.push(1.0 - lat as f32 / lat_bands as f32);
        }
    }

    let indices = grid_indices(lat_bands, lon_bands, index_count);

    Ok(Mesh {
        positions,
        normals: Some(normals),
        uvs,
        indices: Some(IndexBuffer::from_u32(indices, vertex_count)),
        primitive: Primitive::Triangles,
    })
}

/// Unit UV-sphere with outward normals. Scale is applied by the transform, not baked in.
pub fn build_sphere(lat_bands: u32, lon_bands: u32) -> Result<Mesh> {
    sphere(lat_bands, lon_bands, 1.0)
}

/// Same geometry as [`build_sphere`] with normals facing inward.
/// The camera always sits inside the starfield sphere.
pub fn build_background_sphere(lat_bands: u32, lon_bands: u32) -> Result<Mesh> {
    sphere(lat_bands, lon_bands, -1.0)
}

/// Flat annulus in the XZ plane made of `radial_divisions + 1` concentric
/// rings of `segments + 1` vertices. UV = (segment fraction, ring fraction).
pub fn build_ring(
    inner_radius: f32,
    outer_radius: f32,
    segments: u32,
    radial_divisions: u32,
) -> Result<Mesh> {
    if !(inner_radius.is_finite() && outer_radius.is_finite())
        || inner_radius < 0.0
        || inner_radius >= outer_radius
    {
        return Err(OrreryError::invalid(format!(
            "ring radii must satisfy 0 <= inner < outer (inner={inner_radius}, outer={outer_radius})"
        )));
    }
    if segments < 3 {
        return Err(OrreryError::invalid(format!(
            "ring needs at least 3 segments, got {segments}"
        )));
    }
    if radial_divisions == 0 {
        return Err(OrreryError::invalid("ring needs at least one radial division"));
    }

    let (vertex_count, index_count) = grid_counts(radial_divisions, segments)?;
    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut uvs = Vec::with_capacity(vertex_count * 2);

    let step = TAU / segments as f32;
    let ring_step = (outer_radius - inner_radius) / radial_divisions as f32;

    for r in 0..=radial_divisions {
        let radius = inner_radius + r as f32 * ring_step;
        for i in 0..=segments {
            let (sin, cos) = (i as f32 * step).sin_cos();
            positions.extend_from_slice(&[radius * cos, 0.0, radius * sin]);
            uvs.push(i as f32 / segments as f32);
            uvs.push(r as f32 / radial_divisions as f32);
        }
    }

    let indices = grid_indices(radial_divisions, segments, index_count);

    Ok(Mesh {
        positions,
        normals: None,
        uvs,
        indices: Some(IndexBuffer::from_u32(indices, vertex_count)),
        primitive: Primitive::Triangles,
    })
}

/// Single-band ring: only the inner and outer edge.
pub fn build_thin_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Result<Mesh> {
    build_ring(inner_radius, outer_radius, segments, 1)
}

/// Position-only closed polyline of `segments + 1` points on a circle in the XZ plane.
/// The last point repeats the first.
pub fn build_circle(radius: f32, segments: u32) -> Result<Mesh> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(OrreryError::invalid(format!(
            "circle radius must be positive, got {radius}"
        )));
    }
    if segments < 3 {
        return Err(OrreryError::invalid(format!(
            "circle needs at least 3 segments, got {segments}"
        )));
    }

    let step = TAU / segments as f32;
    let mut positions = Vec::with_capacity((segments as usize + 1) * 3);
    for i in 0..=segments {
        // Wrap the final sample to angle 0 so the loop closes exactly.
        let angle = if i == segments { 0.0 } else { i as f32 * step };
        let (sin, cos) = angle.sin_cos();
        positions.extend_from_slice(&[radius * cos, 0.0, radius * sin]);
    }

    Ok(Mesh {
        positions,
        normals: None,
        uvs: Vec::new(),
        indices: None,
        primitive: Primitive::LineLoop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_valid_triangles(mesh: &Mesh) {
        let indices = mesh.indices.as_ref().expect("triangle mesh has indices");
        assert_eq!(indices.len() % 3, 0);
        let n = mesh.vertex_count() as u32;
        assert!(indices.iter().all(|i| i < n));
    }

    #[test]
    fn sphere_counts_match_band_formula() {
        for (lat, lon) in [(1, 1), (2, 3), (10, 10), (50, 50), (30, 7)] {
            let mesh = build_sphere(lat, lon).unwrap();
            assert_eq!(mesh.vertex_count(), ((lat + 1) * (lon + 1)) as usize);
            assert_eq!(mesh.index_count(), (6 * lat * lon) as usize);
            assert_eq!(mesh.uvs.len(), mesh.vertex_count() * 2);
            assert_valid_triangles(&mesh);
        }
    }

    #[test]
    fn sphere_normals_are_unit_length() {
        let mesh = build_sphere(12, 24).unwrap();
        let normals = mesh.normals.as_ref().unwrap();
        for n in normals.chunks(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < EPS, "normal length {len}");
        }
    }

    #[test]
    fn sphere_first_vertex_is_north_pole() {
        let mesh = build_sphere(4, 4).unwrap();
        let [x, y, z] = mesh.position(0);
        assert!(x.abs() < EPS && (y - 1.0).abs() < EPS && z.abs() < EPS);
        assert_eq!(&mesh.uvs[0..2], &[1.0, 1.0]);
    }

    #[test]
    fn sphere_first_quad_winding() {
        let mesh = build_sphere(2, 3).unwrap();
        let idx: Vec<u32> = mesh.indices.as_ref().unwrap().iter().take(6).collect();
        // first = 0, second = lonBands + 1 = 4
        assert_eq!(idx, vec![0, 4, 1, 4, 5, 1]);
    }

    #[test]
    fn degenerate_sphere_is_rejected() {
        assert!(matches!(build_sphere(0, 10), Err(OrreryError::InvalidParameter(_))));
        assert!(matches!(build_sphere(10, 0), Err(OrreryError::InvalidParameter(_))));
        assert!(matches!(
            build_background_sphere(0, 0),
            Err(OrreryError::InvalidParameter(_))
        ));
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert!(matches!(build_sphere(u32::MAX, 2), Err(OrreryError::InvalidParameter(_))));
        assert!(matches!(build_sphere(70_000, 70_000), Err(OrreryError::InvalidParameter(_))));
        // Vertex count fits, index count does not.
        assert!(matches!(build_background_sphere(30_000, 30_000), Err(OrreryError::InvalidParameter(_))));
        assert!(matches!(build_ring(0.5, 1.0, u32::MAX, 1), Err(OrreryError::InvalidParameter(_))));
        assert!(matches!(build_ring(0.5, 1.0, 3, u32::MAX), Err(OrreryError::InvalidParameter(_))));
    }

    #[test]
    fn background_normals_negate_sphere_normals() {
        let outer = build_sphere(9, 17).unwrap();
        let inner = build_background_sphere(9, 17).unwrap();
        assert_eq!(outer.positions, inner.positions);
        assert_eq!(outer.uvs, inner.uvs);
        assert_eq!(outer.indices, inner.indices);
        let a = outer.normals.unwrap();
        let b = inner.normals.unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(*y, -*x);
        }
    }

    #[test]
    fn large_sphere_switches_to_u32_indices() {
        let small = build_sphere(50, 50).unwrap();
        assert_eq!(small.indices.as_ref().unwrap().stride(), 2);
        let large = build_sphere(300, 300).unwrap();
        assert_eq!(large.indices.as_ref().unwrap().stride(), 4);
        assert_valid_triangles(&large);
    }

    #[test]
    fn ring_counts_and_radii() {
        let mesh = build_ring(1.2, 1.6, 50, 20).unwrap();
        assert_eq!(mesh.vertex_count(), 21 * 51);
        assert_eq!(mesh.index_count(), 6 * 20 * 50);
        assert_valid_triangles(&mesh);
        for i in 0..mesh.vertex_count() {
            let [x, y, z] = mesh.position(i);
            let r = (x * x + z * z).sqrt();
            assert_eq!(y, 0.0);
            assert!(r >= 1.2 - EPS && r <= 1.6 + EPS, "r = {r}");
        }
        // Last ring sits on the outer edge with v = 1.
        let last_uv = &mesh.uvs[mesh.uvs.len() - 2..];
        assert!((last_uv[0] - 1.0).abs() < EPS && (last_uv[1] - 1.0).abs() < EPS);
    }

    #[test]
    fn thin_ring_has_two_edges() {
        let mesh = build_thin_ring(1.2, 1.6, 8).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * 9);
        assert_eq!(mesh.index_count(), 6 * 8);
        assert_valid_triangles(&mesh);
    }

    #[test]
    fn degenerate_rings_are_rejected() {
        assert!(build_ring(1.6, 1.2, 50, 20).is_err());
        assert!(build_ring(1.2, 1.2, 50, 20).is_err());
        assert!(build_ring(-1.0, 1.2, 50, 20).is_err());
        assert!(build_ring(1.2, 1.6, 2, 20).is_err());
        assert!(build_ring(1.2, 1.6, 50, 0).is_err());
    }

    #[test]
    fn circle_is_closed_and_on_radius() {
        for segments in [3, 4, 100, 257] {
            let mesh = build_circle(8.8, segments).unwrap();
            assert_eq!(mesh.vertex_count(), segments as usize + 1);
            assert_eq!(mesh.primitive, Primitive::LineLoop);
            assert!(mesh.indices.is_none());
            assert_eq!(mesh.position(0), mesh.position(segments as usize));
            for i in 0..mesh.vertex_count() {
                let [x, y, z] = mesh.position(i);
                assert_eq!(y, 0.0);
                assert!(((x * x + z * z).sqrt() - 8.8).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn degenerate_circles_are_rejected() {
        assert!(build_circle(5.0, 2).is_err());
        assert!(build_circle(0.0, 100).is_err());
        assert!(build_circle(f32::NAN, 100).is_err());
    }

    #[test]
    fn builders_are_deterministic() {
        assert_eq!(build_sphere(7, 9).unwrap(), build_sphere(7, 9).unwrap());
        assert_eq!(build_ring(1.0, 2.0, 12, 3).unwrap(), build_ring(1.0, 2.0, 12, 3).unwrap());
    }
}
