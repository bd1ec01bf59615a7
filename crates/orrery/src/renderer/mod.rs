pub mod camera;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{DragState, OrbitCamera, Projection};
pub use instance::{DrawInstance, DrawKind, DrawList, DrawRequest};
pub use traits::Rasterizer;
