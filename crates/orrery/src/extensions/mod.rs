// extensions/mod.rs
//
// Scene-graph helpers that sit on top of the plain body data.
// Bodies stay flat; the hierarchy and transform composition live here.

pub mod transform;

pub use transform::{
    compose_body_transform, normal_matrix, orbit_frame, orbital_offset, BodyTransform, OrbitPose,
    TransformGraph,
};
