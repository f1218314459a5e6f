//! Camera and orbit-offset types shared with both frontends.
//!
//! Nothing here touches platform APIs, so the same types serve the native
//! and web targets. The frontends consume them to build view-projection
//! matrices and to fold pointer drags into the model pose on views that
//! allow orbiting.

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_BASE_DISTANCE, CAMERA_FOV_Y, CAMERA_ZFAR, CAMERA_ZNEAR, ORBIT_PITCH_LIMIT,
    ORBIT_SENSITIVITY, ORBIT_SETTLE_TAU_SEC, ZOOM_MIN,
};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The showcase camera: fixed on the +Z axis looking at the origin,
    /// dollied by the view's zoom (`distance = base / zoom`).
    pub fn showcase(aspect: f32, zoom: f32) -> Self {
        let distance = CAMERA_BASE_DISTANCE / zoom.max(ZOOM_MIN);
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_Y,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Accumulated pointer-drag offset, added to the interpolated rotation on
/// views with `orbit: true` and eased back to rest everywhere else.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    dragging: bool,
    last_x: f32,
    last_y: f32,
}

impl OrbitState {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Fold a pointer move into yaw/pitch. No-op unless a drag is active.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        self.yaw += dx * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + dy * ORBIT_SENSITIVITY).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    pub fn end(&mut self) {
        self.dragging = false;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Ease the offset back toward rest; called per frame while the active
    /// view does not allow orbiting.
    pub fn settle(&mut self, dt_sec: f32) {
        let alpha = 1.0 - (-dt_sec / ORBIT_SETTLE_TAU_SEC).exp();
        self.yaw -= self.yaw * alpha;
        self.pitch -= self.pitch * alpha;
        if self.yaw.abs() < 1e-4 {
            self.yaw = 0.0;
        }
        if self.pitch.abs() < 1e-4 {
            self.pitch = 0.0;
        }
    }

    /// The drag offset as an XYZ euler delta (pitch on X, yaw on Y).
    #[inline]
    pub fn rotation_offset(&self) -> Vec3 {
        Vec3::new(self.pitch, self.yaw, 0.0)
    }
}
