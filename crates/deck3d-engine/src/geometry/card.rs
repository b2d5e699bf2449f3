use glam::Vec3;

use super::Mesh;

/// Card as a thin box centered on the origin, front facing +Z.
///
/// Groups are `[Sides, Front, Back]`. The back face's texture is oriented so
/// it reads upright when the card is turned about Y.
pub fn card_box(width: f32, height: f32, depth: f32) -> Mesh {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut mesh = Mesh::default();

    let start = mesh.index_count();
    mesh.push_quad(Vec3::new(hw, 0.0, 0.0), Vec3::NEG_Z, Vec3::Y, hd, hh);
    mesh.push_quad(Vec3::new(-hw, 0.0, 0.0), Vec3::Z, Vec3::Y, hd, hh);
    mesh.push_quad(Vec3::new(0.0, hh, 0.0), Vec3::X, Vec3::NEG_Z, hw, hd);
    mesh.push_quad(Vec3::new(0.0, -hh, 0.0), Vec3::X, Vec3::Z, hw, hd);
    mesh.end_group(start);

    let start = mesh.index_count();
    mesh.push_quad(Vec3::new(0.0, 0.0, hd), Vec3::X, Vec3::Y, hw, hh);
    mesh.end_group(start);

    let start = mesh.index_count();
    mesh.push_quad(Vec3::new(0.0, 0.0, -hd), Vec3::NEG_X, Vec3::Y, hw, hh);
    mesh.end_group(start);

    mesh
}

/// Card as two back-to-back quads with no thickness. Groups are `[Front, Back]`.
pub fn card_planes(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut mesh = Mesh::default();

    let start = mesh.index_count();
    mesh.push_quad(Vec3::ZERO, Vec3::X, Vec3::Y, hw, hh);
    mesh.end_group(start);

    let start = mesh.index_count();
    mesh.push_quad(Vec3::ZERO, Vec3::NEG_X, Vec3::Y, hw, hh);
    mesh.end_group(start);

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_normal(mesh: &Mesh, group: usize) -> Vec3 {
        let first = mesh.indices[mesh.groups[group].start as usize];
        Vec3::from_array(mesh.vertices[first as usize].normal)
    }

    #[test]
    fn box_groups_are_sides_front_back() {
        let mesh = card_box(2.5, 3.5, 0.04);
        assert_eq!(mesh.groups.len(), 3);
        assert_eq!(mesh.groups[0].len(), 4 * 6);
        assert_eq!(mesh.groups[1].len(), 6);
        assert_eq!(mesh.groups[2].len(), 6);
        assert_eq!(group_normal(&mesh, 1), Vec3::Z);
        assert_eq!(group_normal(&mesh, 2), Vec3::NEG_Z);
    }

    #[test]
    fn box_side_normals_point_outward() {
        let mesh = card_box(2.0, 3.0, 0.5);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!(p.dot(n) > 0.0, "normal {n} at {p} points inward");
        }
    }

    #[test]
    fn box_bounds_match_dimensions() {
        let b = card_box(2.5, 3.5, 0.04).bounds();
        assert!((b.size() - Vec3::new(2.5, 3.5, 0.04)).abs().max_element() < 1e-6);
        assert!(b.center().length() < 1e-6);
    }

    #[test]
    fn back_uv_is_mirrored_in_x() {
        let mesh = card_planes(2.0, 3.0);
        let front_tl = mesh.vertices[0];
        let back_tl = mesh.vertices[4];
        assert_eq!(front_tl.uv, [0.0, 0.0]);
        assert_eq!(back_tl.uv, [0.0, 0.0]);
        assert_eq!(front_tl.position[0], -1.0);
        assert_eq!(back_tl.position[0], 1.0);
    }

    #[test]
    fn planes_have_front_and_back_groups() {
        let mesh = card_planes(2.0, 3.0);
        assert_eq!(mesh.groups, vec![0..6, 6..12]);
        assert_eq!(group_normal(&mesh, 0), Vec3::Z);
        assert_eq!(group_normal(&mesh, 1), Vec3::NEG_Z);
    }
}
