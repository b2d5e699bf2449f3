use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, XYZ euler rotation (radians) and uniform scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform { position: Vec3::ZERO, rotation: Vec3::ZERO, scale: 1.0 };

    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.position)
    }

    /// World matrix of `self` nested under `parent`.
    pub fn under(&self, parent: &Transform) -> Mat4 {
        parent.matrix() * self.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_is_identity() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_order_applies_z_first() {
        // XYZ: the point is rotated about Z, then Y, then X.
        let t = Transform::default().with_rotation(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        let p = t.matrix().transform_point3(Vec3::X);
        // Z turns +X into +Y, then X turns +Y into +Z.
        assert!(close(p, Vec3::Z));
    }

    #[test]
    fn scale_rotate_translate() {
        let t = Transform::at(Vec3::new(1.0, 2.0, 3.0)).with_rotation(Vec3::new(0.0, PI, 0.0)).with_scale(2.0);
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(close(p, Vec3::new(-1.0, 2.0, 3.0)));
    }

    #[test]
    fn parented_transform() {
        let parent = Transform::at(Vec3::new(0.0, -2.0, -5.0));
        let child = Transform::default().with_rotation(Vec3::new(0.0, PI, 0.0));
        let m = child.under(&parent);
        assert!(close(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, -2.0, -5.0)));
        assert!(close(m.transform_vector3(Vec3::Z), Vec3::NEG_Z));
    }
}
