// extensions/transform.rs
//
// Transform composition for the body hierarchy.
//
// Composition order, right-to-left as applied to a vertex:
//   parent * translate(orbital offset) * rotate_y(spin) * scale
//
// Children (the Moon, Saturn's ring) compose against the parent's orbit frame,
// i.e. the parent matrix after translation but before spin and scale.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register(earth);
//   graph.register(moon);
//   graph.set_parent(moon, Some(earth))?;
//   graph.walk(view, |id| bodies[id.index()].pose(), |id, xf| { /* draw */ });

use std::collections::HashMap;

use glam::{Mat4, Quat, Vec3};

use crate::api::types::BodyId;
use crate::error::{OrreryError, Result};

/// The animated placement of a body relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    pub orbit_radius: f32,
    pub orbit_angle: f32,
    pub rotation_angle: f32,
    pub scale: f32,
}

impl Default for OrbitPose {
    fn default() -> Self {
        Self {
            orbit_radius: 0.0,
            orbit_angle: 0.0,
            rotation_angle: 0.0,
            scale: 1.0,
        }
    }
}

/// Model-view matrix of a body and the matching normal matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub model_view: Mat4,
    /// Inverse-transpose of `model_view`.
    pub normal: Mat4,
}

/// Position on a circular orbit in the XZ plane.
pub fn orbital_offset(radius: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * cos, 0.0, radius * sin)
}

/// Parent matrix translated to the body's orbital position, before spin and scale.
pub fn orbit_frame(parent: Mat4, pose: &OrbitPose) -> Mat4 {
    parent * Mat4::from_translation(orbital_offset(pose.orbit_radius, pose.orbit_angle))
}

/// Inverse-transpose, kept general even though every scale in the scene is uniform.
pub fn normal_matrix(model_view: Mat4) -> Mat4 {
    model_view.inverse().transpose()
}

/// Compose a body's model-view matrix.
///
/// `parent` is the parent's orbit frame for children; `None` means the body
/// hangs directly off the camera `view`. Matrices are taken by value, so no
/// caller-visible matrix is ever modified.
pub fn compose_body_transform(view: Mat4, pose: &OrbitPose, parent: Option<Mat4>) -> BodyTransform {
    let frame = orbit_frame(parent.unwrap_or(view), pose);
    let local = Mat4::from_scale_rotation_translation(
        Vec3::splat(pose.scale),
        Quat::from_rotation_y(pose.rotation_angle),
        Vec3::ZERO,
    );
    let model_view = frame * local;
    BodyTransform {
        model_view,
        normal: normal_matrix(model_view),
    }
}

/// Node in the body hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<BodyId>,
    children: Vec<BodyId>,
}

/// Parent/child relation between bodies.
///
/// Roots and children keep insertion order, which is the draw order.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<BodyId, TransformNode>,
    /// Bodies with no parent (top-level).
    roots: Vec<BodyId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body as a root. Registering twice is a no-op.
    pub fn register(&mut self, id: BodyId) {
        if self.nodes.contains_key(&id) {
            return;
        }
        self.nodes.insert(id, TransformNode::default());
        self.roots.push(id);
    }

    /// Set the parent of a body. Pass `None` to make it a root.
    /// Fails if the body would become its own ancestor.
    pub fn set_parent(&mut self, child: BodyId, parent: Option<BodyId>) -> Result<()> {
        if let Some(p) = parent {
            if p == child || self.is_ancestor(child, p) {
                return Err(OrreryError::invalid(format!(
                    "parenting body {} under {} would create a cycle",
                    child.0, p.0
                )));
            }
            self.register(p);
        }
        self.register(child);

        // Remove from old parent's children
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }
        Ok(())
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    fn is_ancestor(&self, ancestor: BodyId, id: BodyId) -> bool {
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.parent(p);
        }
        false
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: BodyId) -> &[BodyId] {
        match self.nodes.get(&id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    pub fn roots(&self) -> &[BodyId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first traversal from every root in order.
    ///
    /// `visit` sees each body before its children. Roots compose against
    /// `view`; children compose against their parent's orbit frame.
    pub fn walk<P, V>(&self, view: Mat4, pose_of: P, mut visit: V)
    where
        P: Fn(BodyId) -> OrbitPose,
        V: FnMut(BodyId, BodyTransform),
    {
        for &root in &self.roots {
            self.walk_recursive(root, view, None, &pose_of, &mut visit);
        }
    }

    fn walk_recursive<P, V>(&self, id: BodyId, view: Mat4, parent: Option<Mat4>, pose_of: &P, visit: &mut V)
    where
        P: Fn(BodyId) -> OrbitPose,
        V: FnMut(BodyId, BodyTransform),
    {
        let pose = pose_of(id);
        visit(id, compose_body_transform(view, &pose, parent));

        let frame = orbit_frame(parent.unwrap_or(view), &pose);
        for &child in self.children(id) {
            self.walk_recursive(child, view, Some(frame), pose_of, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn orbital_offset_quarter_turn() {
        assert!(approx(orbital_offset(10.0, 0.0), Vec3::new(10.0, 0.0, 0.0)));
        let p = orbital_offset(10.0, FRAC_PI_2);
        assert!((p.x).abs() < 1e-5 && (p.z - 10.0).abs() < 1e-5, "p = {p}");
    }

    #[test]
    fn sun_is_view_times_spin_and_scale() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 30.0), Vec3::ZERO, Vec3::Y);
        let pose = OrbitPose { rotation_angle: 0.7, scale: 2.0, ..Default::default() };
        let xf = compose_body_transform(view, &pose, None);
        let expected = view * Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::splat(2.0));
        assert!(xf.model_view.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn translation_applies_before_spin() {
        // With identity view, the body's origin lands on the orbit, regardless of spin.
        let pose = OrbitPose { orbit_radius: 5.0, orbit_angle: 0.0, rotation_angle: 1.3, scale: 0.5 };
        let xf = compose_body_transform(Mat4::IDENTITY, &pose, None);
        assert!(approx(xf.model_view.transform_point3(Vec3::ZERO), Vec3::new(5.0, 0.0, 0.0)));
        // A point on the unit sphere is scaled, then spun, then translated.
        let p = xf.model_view.transform_point3(Vec3::X);
        let expected = Vec3::new(5.0, 0.0, 0.0) + Quat::from_rotation_y(1.3) * Vec3::new(0.5, 0.0, 0.0);
        assert!(approx(p, expected));
    }

    #[test]
    fn normal_matrix_is_inverse_transpose() {
        let pose = OrbitPose { orbit_radius: 3.0, orbit_angle: 0.4, rotation_angle: 0.2, scale: 0.3 };
        let view = Mat4::look_at_rh(Vec3::new(4.0, 5.0, 6.0), Vec3::ZERO, Vec3::Y);
        let xf = compose_body_transform(view, &pose, None);
        let product = xf.normal.transpose() * xf.model_view;
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn composition_is_idempotent() {
        let view = Mat4::look_at_rh(Vec3::new(1.0, 2.0, 30.0), Vec3::ZERO, Vec3::Y);
        let pose = OrbitPose { orbit_radius: 8.8, orbit_angle: 285.0, rotation_angle: 285.0, scale: 0.4 };
        let a = compose_body_transform(view, &pose, None);
        let b = compose_body_transform(view, &pose, None);
        assert_eq!(a.model_view.to_cols_array(), b.model_view.to_cols_array());
        assert_eq!(a.normal.to_cols_array(), b.normal.to_cols_array());
    }

    #[test]
    fn child_uses_pre_rotation_frame() {
        let earth = BodyId(0);
        let moon = BodyId(1);
        let mut graph = TransformGraph::new();
        graph.register(earth);
        graph.register(moon);
        graph.set_parent(moon, Some(earth)).unwrap();

        let poses = [
            // Earth spins a quarter turn; the Moon's placement must ignore it.
            OrbitPose { orbit_radius: 6.0, orbit_angle: 0.0, rotation_angle: FRAC_PI_2, scale: 0.4 },
            OrbitPose { orbit_radius: 0.5, orbit_angle: 0.0, rotation_angle: 0.0, scale: 0.1 },
        ];

        let mut seen = Vec::new();
        graph.walk(Mat4::IDENTITY, |id| poses[id.index()], |id, xf| {
            seen.push((id, xf.model_view.transform_point3(Vec3::ZERO)));
        });

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, earth);
        assert_eq!(seen[1].0, moon);
        assert!(approx(seen[1].1, Vec3::new(6.5, 0.0, 0.0)), "moon at {}", seen[1].1);
    }

    #[test]
    fn walk_visits_children_right_after_parent() {
        let mut graph = TransformGraph::new();
        for i in 0..4 {
            graph.register(BodyId(i));
        }
        graph.set_parent(BodyId(3), Some(BodyId(1))).unwrap();

        let mut order = Vec::new();
        graph.walk(Mat4::IDENTITY, |_| OrbitPose::default(), |id, _| order.push(id.0));
        assert_eq!(order, vec![0, 1, 3, 2]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut graph = TransformGraph::new();
        graph.register(BodyId(0));
        graph.register(BodyId(1));
        graph.set_parent(BodyId(1), Some(BodyId(0))).unwrap();
        assert!(graph.set_parent(BodyId(0), Some(BodyId(1))).is_err());
        assert!(graph.set_parent(BodyId(0), Some(BodyId(0))).is_err());
        assert_eq!(graph.roots(), &[BodyId(0)]);
    }

    #[test]
    fn reparenting_moves_child() {
        let mut graph = TransformGraph::new();
        for i in 0..3 {
            graph.register(BodyId(i));
        }
        graph.set_parent(BodyId(2), Some(BodyId(0))).unwrap();
        graph.set_parent(BodyId(2), Some(BodyId(1))).unwrap();
        assert!(graph.children(BodyId(0)).is_empty());
        assert_eq!(graph.children(BodyId(1)), &[BodyId(2)]);

        graph.set_parent(BodyId(2), None).unwrap();
        assert_eq!(graph.parent(BodyId(2)), None);
        assert!(graph.roots().contains(&BodyId(2)));
    }
}
