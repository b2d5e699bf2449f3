use std::f32::consts::{PI, TAU};

use deck3d_cards::tween::{damp_factor, rate_from_per_frame};
use deck3d_engine::render::CameraMatrices;
use glam::{Mat4, Vec3};

/// Keeps the orbit off the poles where `look_at` degenerates.
const POLE_EPSILON: f32 = 1e-6;

/// Radius multiplier per wheel line.
pub const DOLLY_STEP: f32 = 0.95;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, near: f32, far: f32) -> Self {
        Self { fov_y, near, far, aspect: 1.0 }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Right-handed projection with wgpu's `0..1` depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Orbit controls around `target` in spherical coordinates.
///
/// `azimuth` turns about +Y starting at +Z, `polar` is measured from +Y.
/// Rotation input accumulates into a pending delta. `update` applies all of
/// it, or with damping a frame-rate independent share of it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    radius: f32,
    azimuth: f32,
    polar: f32,

    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,

    /// Share of the pending rotation applied per 60 Hz frame.
    pub damping: Option<f32>,
    pub min_polar: f32,
    pub max_polar: f32,
    pub zoom: bool,
    pub min_radius: f32,
    pub max_radius: f32,
    pub rotate_speed: f32,
    /// Input is ignored while false; pending motion still settles.
    pub enabled: bool,
}

impl OrbitCamera {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(POLE_EPSILON);
        let azimuth = offset.x.atan2(offset.z);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        Self {
            target,
            radius,
            azimuth,
            polar,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
            damping: None,
            min_polar: 0.0,
            max_polar: PI,
            zoom: true,
            min_radius: 0.0,
            max_radius: f32::INFINITY,
            rotate_speed: 1.0,
            enabled: true,
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.damping = Some(factor.clamp(0.0, 1.0));
        self
    }

    pub fn with_polar_limits(mut self, min: f32, max: f32) -> Self {
        self.min_polar = min;
        self.max_polar = max;
        self
    }

    pub fn with_zoom(mut self, zoom: bool) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_radius_limits(mut self, min: f32, max: f32) -> Self {
        self.min_radius = min;
        self.max_radius = max;
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    #[inline]
    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Pointer drag in logical pixels; a drag across the full height is one turn.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        self.pending_azimuth -= TAU * dx / viewport_height * self.rotate_speed;
        self.pending_polar -= TAU * dy / viewport_height * self.rotate_speed;
    }

    /// Wheel input in lines; positive moves toward the target.
    pub fn dolly(&mut self, lines: f32) {
        if !self.enabled || !self.zoom || lines == 0.0 {
            return;
        }
        self.pending_scale *= DOLLY_STEP.powf(lines);
    }

    /// Applies pending input. Returns true while motion is still settling.
    pub fn update(&mut self, dt: f32) -> bool {
        let share = match self.damping {
            Some(d) if d < 1.0 => damp_factor(rate_from_per_frame(1.0 - d, 60.0), dt),
            _ => 1.0,
        };

        self.azimuth += self.pending_azimuth * share;
        self.polar += self.pending_polar * share;
        self.polar = self
            .polar
            .clamp(self.min_polar, self.max_polar)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.radius = (self.radius * self.pending_scale).clamp(self.min_radius.max(POLE_EPSILON), self.max_radius);
        self.pending_scale = 1.0;

        self.pending_azimuth *= 1.0 - share;
        self.pending_polar *= 1.0 - share;
        if self.pending_azimuth.abs() < 1e-6 {
            self.pending_azimuth = 0.0;
        }
        if self.pending_polar.abs() < 1e-6 {
            self.pending_polar = 0.0;
        }
        self.pending_azimuth != 0.0 || self.pending_polar != 0.0
    }

    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + self.radius * Vec3::new(sp * sa, cp, sp * ca)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn matrices(&self, lens: &PerspectiveCamera) -> CameraMatrices {
        CameraMatrices { view: self.view(), proj: lens.projection(), eye: self.eye() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn spherical_round_trip() {
        let cam = OrbitCamera::new(Vec3::new(0.0, 3.2, 8.0), Vec3::ZERO);
        assert!(close(cam.eye(), Vec3::new(0.0, 3.2, 8.0)));
        assert!((cam.radius() - (3.2f32 * 3.2 + 64.0).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn drag_right_orbits_toward_negative_x() {
        let mut cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO);
        cam.rotate_by_pixels(100.0, 0.0, 800.0);
        cam.update(1.0 / 60.0);
        assert!(cam.eye().x < 0.0);
        assert!((cam.eye().length() - 7.0).abs() < 1e-4);
        assert!((cam.azimuth() + TAU / 8.0).abs() < 1e-5);
    }

    #[test]
    fn polar_limits_hold() {
        let mut cam =
            OrbitCamera::new(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO).with_polar_limits(PI / 2.2, PI / 1.8);
        cam.rotate_by_pixels(0.0, 400.0, 800.0);
        cam.update(0.016);
        assert!((cam.polar() - PI / 2.2).abs() < 1e-5);
        cam.rotate_by_pixels(0.0, -2000.0, 800.0);
        cam.update(0.016);
        assert!((cam.polar() - PI / 1.8).abs() < 1e-5);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO).with_damping(0.05);
        cam.rotate_by_pixels(-80.0, 0.0, 800.0);
        let target = TAU * 0.1;

        assert!(cam.update(1.0 / 60.0));
        assert!((cam.azimuth() - target * 0.05).abs() < 1e-4);

        for _ in 0..600 {
            cam.update(1.0 / 60.0);
        }
        assert!((cam.azimuth() - target).abs() < 1e-3);
    }

    #[test]
    fn damping_is_frame_rate_independent() {
        let mut a = OrbitCamera::new(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO).with_damping(0.05);
        let mut b = a.clone();
        a.rotate_by_pixels(50.0, 0.0, 800.0);
        b.rotate_by_pixels(50.0, 0.0, 800.0);
        a.update(1.0 / 30.0);
        b.update(1.0 / 60.0);
        b.update(1.0 / 60.0);
        assert!((a.azimuth() - b.azimuth()).abs() < 1e-5);
    }

    #[test]
    fn wheel_dolly_respects_zoom_and_limits() {
        let mut cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).with_radius_limits(2.0, 12.0);
        cam.dolly(1.0);
        cam.update(0.016);
        assert!((cam.radius() - 9.5).abs() < 1e-4);

        cam.dolly(-100.0);
        cam.update(0.016);
        assert!((cam.radius() - 12.0).abs() < 1e-4);

        let mut fixed = OrbitCamera::new(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO).with_zoom(false);
        fixed.dolly(3.0);
        fixed.update(0.016);
        assert!((fixed.radius() - 7.0).abs() < 1e-5);
    }

    #[test]
    fn disabled_camera_ignores_input() {
        let mut cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO);
        cam.enabled = false;
        cam.rotate_by_pixels(300.0, 300.0, 800.0);
        cam.update(0.016);
        assert!(close(cam.eye(), Vec3::new(0.0, 0.0, 7.0)));
    }

    #[test]
    fn projection_uses_aspect() {
        let mut lens = PerspectiveCamera::new(50.0, 0.1, 1000.0);
        lens.set_aspect(2.0);
        lens.set_aspect(f32::NAN);
        assert_eq!(lens.aspect, 2.0);
        let p = lens.projection();
        assert!((p.x_axis.x * 2.0 - p.y_axis.y).abs() < 1e-5);
    }
}
