//! Pointer rays and hit tests against card boxes.

use deck3d_engine::coords::{Vec2, Viewport};
use deck3d_engine::geometry::Aabb;
use glam::{Mat4, Vec3, Vec4Swizzles};

/// Planes have no thickness; give them some so the slab test can hit them.
const MIN_THICKNESS: f32 = 1e-3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

/// Ray from the camera through `pointer` (logical pixels, origin top-left).
pub fn screen_to_ray(pointer: Vec2, viewport: Viewport, view: Mat4, proj: Mat4) -> Option<Ray> {
    if !viewport.is_valid() {
        return None;
    }
    let ndc_x = pointer.x / viewport.width * 2.0 - 1.0;
    let ndc_y = 1.0 - pointer.y / viewport.height * 2.0;

    let inv = (proj * view).inverse();
    let unproject = |z: f32| {
        let p = inv * glam::Vec4::new(ndc_x, ndc_y, z, 1.0);
        p.xyz() / p.w
    };
    let near = unproject(0.0);
    let far = unproject(1.0);
    let dir = (far - near).try_normalize()?;
    Some(Ray { origin: near, dir })
}

/// Distance along `ray` to the box `bounds` placed by `model`, if hit in front.
///
/// The ray is moved into the box's local space so rotation and scale need
/// no special handling; the parameter `t` is the same in both spaces.
pub fn intersect_box(ray: &Ray, model: Mat4, bounds: Aabb) -> Option<f32> {
    let inv = model.inverse();
    if !inv.is_finite() {
        return None;
    }
    let origin = inv.transform_point3(ray.origin);
    let dir = inv.transform_vector3(ray.dir);
    let bounds = bounds.thickened(MIN_THICKNESS);

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
        if d.abs() < 1e-12 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((lo - o) / d, (hi - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// The key of the closest box hit by `ray`.
pub fn pick_nearest<K>(ray: &Ray, boxes: impl IntoIterator<Item = (K, Mat4, Aabb)>) -> Option<K> {
    boxes
        .into_iter()
        .filter_map(|(key, model, bounds)| intersect_box(ray, model, bounds).map(|t| (t, key)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{EulerRot, Quat};

    fn card() -> Aabb {
        Aabb::new(Vec3::new(-1.0, -1.5, 0.0), Vec3::new(1.0, 1.5, 0.0))
    }

    fn forward(x: f32, y: f32) -> Ray {
        Ray { origin: Vec3::new(x, y, 10.0), dir: Vec3::NEG_Z }
    }

    #[test]
    fn center_pointer_looks_forward() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(50f32.to_radians(), 1.5, 0.1, 100.0);
        let ray = screen_to_ray(Vec2::new(600.0, 400.0), Viewport::new(1200.0, 800.0), view, proj).unwrap();
        assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
        assert!((ray.origin.x).abs() < 1e-4 && (ray.origin.y).abs() < 1e-4);
    }

    #[test]
    fn pointer_above_center_points_up() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(50f32.to_radians(), 1.0, 0.1, 100.0);
        let ray = screen_to_ray(Vec2::new(400.0, 100.0), Viewport::new(800.0, 800.0), view, proj).unwrap();
        assert!(ray.dir.y > 0.0);
        assert!(screen_to_ray(Vec2::zero(), Viewport::new(0.0, 0.0), view, proj).is_none());
    }

    #[test]
    fn hits_plane_card() {
        let t = intersect_box(&forward(0.5, 1.0), Mat4::IDENTITY, card()).unwrap();
        assert!((t - 10.0).abs() < 1e-2);
        assert!(intersect_box(&forward(1.5, 0.0), Mat4::IDENTITY, card()).is_none());
    }

    #[test]
    fn respects_rotation_and_translation() {
        let model = Mat4::from_rotation_translation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2), Vec3::new(3.0, 0.0, 0.0));
        // Rotated a quarter turn the card is wide, not tall.
        assert!(intersect_box(&forward(4.4, 0.0), model, card()).is_some());
        assert!(intersect_box(&forward(3.0, 1.3), model, card()).is_none());
    }

    #[test]
    fn respects_scale() {
        let model = Mat4::from_scale(Vec3::splat(1.5));
        assert!(intersect_box(&forward(1.4, 0.0), model, card()).is_some());
        assert!(intersect_box(&forward(1.6, 0.0), model, card()).is_none());
    }

    #[test]
    fn boxes_behind_the_ray_are_missed() {
        let ray = Ray { origin: Vec3::new(0.0, 0.0, -5.0), dir: Vec3::NEG_Z };
        assert!(intersect_box(&ray, Mat4::IDENTITY, card()).is_none());
    }

    #[test]
    fn nearest_hit_wins() {
        let front = Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5));
        let back = Mat4::from_translation(Vec3::new(0.2, 0.0, -0.5));
        let tilted = Mat4::from_quat(Quat::from_euler(EulerRot::XYZ, 0.0, 0.3, 0.0));
        let boxes = vec![("back", back, card()), ("front", front, card()), ("tilted", tilted, card())];
        assert_eq!(pick_nearest(&forward(0.0, 0.0), boxes), Some("front"));
        assert_eq!(pick_nearest::<u32>(&forward(0.0, 0.0), Vec::new()), None);
    }
}
