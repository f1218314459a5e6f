use glam::{Vec3, Vec4};
use showcase_core::camera::{Camera, OrbitState};
use showcase_core::constants::{CAMERA_BASE_DISTANCE, ORBIT_PITCH_LIMIT};

#[test]
fn zoom_dollies_the_eye_toward_the_target() {
    let near = Camera::showcase(16.0 / 9.0, 2.0);
    let far = Camera::showcase(16.0 / 9.0, 1.0);
    assert!((far.eye.z - CAMERA_BASE_DISTANCE).abs() < 1e-6);
    assert!((near.eye.z - CAMERA_BASE_DISTANCE / 2.0).abs() < 1e-6);
    assert_eq!(near.target, Vec3::ZERO);
}

#[test]
fn tiny_zoom_values_do_not_send_the_eye_to_infinity() {
    let cam = Camera::showcase(1.0, 0.0001);
    assert!(cam.eye.z.is_finite());
    assert!(cam.eye.z <= CAMERA_BASE_DISTANCE / 0.25 + 1e-3);
}

#[test]
fn view_proj_maps_the_origin_in_front_of_the_camera() {
    let cam = Camera::showcase(16.0 / 9.0, 1.0);
    let clip = cam.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc_z = clip.z / clip.w;
    assert!(clip.w > 0.0, "origin should be in front of the eye");
    assert!((0.0..=1.0).contains(&ndc_z));
}

#[test]
fn drag_accumulates_only_while_active() {
    let mut orbit = OrbitState::default();
    orbit.drag_to(50.0, 20.0);
    assert_eq!(orbit.rotation_offset(), Vec3::ZERO);

    orbit.begin(100.0, 100.0);
    orbit.drag_to(140.0, 100.0);
    assert!(orbit.yaw > 0.0);
    assert!(orbit.pitch.abs() < 1e-6);

    orbit.end();
    let frozen = orbit.rotation_offset();
    orbit.drag_to(500.0, 500.0);
    assert_eq!(orbit.rotation_offset(), frozen);
}

#[test]
fn pitch_is_clamped() {
    let mut orbit = OrbitState::default();
    orbit.begin(0.0, 0.0);
    orbit.drag_to(0.0, 100_000.0);
    assert!(orbit.pitch <= ORBIT_PITCH_LIMIT + 1e-6);
    orbit.drag_to(0.0, -200_000.0);
    assert!(orbit.pitch >= -ORBIT_PITCH_LIMIT - 1e-6);
}

#[test]
fn settle_decays_to_rest() {
    let mut orbit = OrbitState::default();
    orbit.begin(0.0, 0.0);
    orbit.drag_to(300.0, -120.0);
    orbit.end();
    assert!(orbit.yaw != 0.0 || orbit.pitch != 0.0);
    for _ in 0..240 {
        orbit.settle(1.0 / 60.0);
    }
    assert_eq!(orbit.rotation_offset(), Vec3::ZERO);
}
