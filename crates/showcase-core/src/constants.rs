use glam::Vec3;

// Shared visual tuning constants used by both the web and native frontends.

// Camera
pub const CAMERA_BASE_DISTANCE: f32 = 6.0; // eye distance at zoom 1.0
pub const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const ZOOM_MIN: f32 = 0.25; // dolly clamp so a tiny zoom never sends the eye to infinity

// Model placement
pub const MODEL_OFFSET: [f32; 3] = [0.0, 0.0, 0.0];

// Orbit interaction
pub const ORBIT_SENSITIVITY: f32 = 0.005; // radians per CSS pixel of drag
pub const ORBIT_PITCH_LIMIT: f32 = 1.2; // radians, keeps the model from flipping
pub const ORBIT_SETTLE_TAU_SEC: f32 = 0.35; // return-to-rest time constant off orbit views

// Bloom post chain
pub const BLOOM_THRESHOLD: f32 = 1.0;
pub const BLOOM_STRENGTH: f32 = 0.55;

// Scene lighting (directional, world space)
pub const KEY_LIGHT_DIR: [f32; 3] = [0.55, 0.75, 0.35];
pub const FILL_LIGHT_DIR: [f32; 3] = [-0.6, -0.1, 0.45];

// Native preview scroll feel
pub const WHEEL_LINE_PX: f32 = 96.0; // pixels of synthetic scroll per wheel line

#[inline]
pub fn model_offset_vec3() -> Vec3 {
    Vec3::new(MODEL_OFFSET[0], MODEL_OFFSET[1], MODEL_OFFSET[2])
}
