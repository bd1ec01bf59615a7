use glam::{Mat4, Vec2, Vec3};

use crate::api::config::SceneConfig;

/// Pointer drag state of the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// A press is held; `last` is the most recent pointer position seen.
    Dragging { last: Vec2 },
}

/// Orbit camera circling the origin at a fixed distance.
///
/// Only the two angles are stored; the eye position is derived from them
/// whenever the view matrix is built.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Rotation around the Y axis (radians), unbounded.
    pub longitude: f32,
    /// Elevation above the XZ plane (radians), always within `±max_latitude`.
    pub latitude: f32,
    /// Distance from the origin.
    pub distance: f32,
    pub max_latitude: f32,
    /// Radians of longitude per pixel of horizontal drag.
    pub rotate_speed: f32,
    /// Radians of latitude per pixel of vertical drag.
    pub latitude_speed: f32,
    drag: DragState,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            distance: 30.0,
            max_latitude: std::f32::consts::FRAC_PI_2 - 0.01,
            rotate_speed: 0.01,
            latitude_speed: 0.01,
            drag: DragState::Idle,
        }
    }
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            distance: config.camera_distance,
            max_latitude: config.max_latitude,
            rotate_speed: config.rotate_speed,
            latitude_speed: config.latitude_speed,
            ..Default::default()
        }
    }

    /// Idle -> Dragging, capturing the press position. Non-finite positions are ignored.
    pub fn pointer_down(&mut self, pos: Vec2) {
        if !pos.is_finite() {
            log::warn!("ignoring non-finite pointer position {}", pos);
            return;
        }
        self.drag = DragState::Dragging { last: pos };
    }

    /// Any state -> Idle. Motion stops immediately.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Rotate by the delta from the previous pointer position. Ignored while idle.
    pub fn pointer_move(&mut self, pos: Vec2) {
        if !pos.is_finite() {
            log::warn!("ignoring non-finite pointer position {}", pos);
            return;
        }
        if let DragState::Dragging { last } = self.drag {
            let delta = pos - last;
            self.drag_by(delta.x, delta.y);
            self.drag = DragState::Dragging { last: pos };
        }
    }

    /// Apply a screen-space drag delta directly. A delta that would leave the
    /// angles non-finite is dropped.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        let longitude = self.longitude + dx * self.rotate_speed;
        let latitude = self.latitude - dy * self.latitude_speed;
        if !(longitude.is_finite() && latitude.is_finite()) {
            log::warn!("ignoring non-finite drag ({}, {})", dx, dy);
            return;
        }
        self.longitude = longitude;
        self.latitude = latitude.clamp(-self.max_latitude, self.max_latitude);
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        Vec3::new(
            self.distance * sin_lon * cos_lat,
            self.distance * sin_lat,
            self.distance * cos_lon * cos_lat,
        )
    }

    /// Right-handed look-at toward the origin with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view, radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45f32.to_radians(),
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut projection = Self {
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.z_near,
            far: config.z_far,
            ..Default::default()
        };
        projection.set_viewport(config.viewport.0, config.viewport.1);
        projection
    }

    /// OpenGL-style clip space (depth in [-1, 1]).
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Update the aspect ratio. Returns false (and keeps the old aspect) for
    /// a zero-sized viewport, e.g. a minimized canvas.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.aspect = width / height;
        true
    }
}
