//! Scene decoration behind the cards: the table's star field and the fan's floor grid.

use std::f32::consts::TAU;

use deck3d_engine::paint::Color;
use deck3d_engine::render::{LineVertex, PointInstance};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Radians per second the star field turns about +Y.
pub const STAR_SPIN: f32 = 0.01;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StarField {
    pub count: usize,
    /// Inner radius of the shell the stars fill.
    pub radius: f32,
    /// Shell thickness beyond `radius`.
    pub depth: f32,
    /// Sprite size multiplier.
    pub factor: f32,
    pub saturation: f32,
    pub seed: u64,
}

impl Default for StarField {
    fn default() -> Self {
        Self { count: 5000, radius: 100.0, depth: 50.0, factor: 4.0, saturation: 0.0, seed: 0x5eed }
    }
}

impl StarField {
    /// Stars spiral inward from `radius + depth`; hue cycles once over the field.
    pub fn generate(&self) -> Vec<PointInstance> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let step = self.depth / self.count.max(1) as f32;
        let mut r = self.radius + self.depth;

        (0..self.count)
            .map(|i| {
                r -= step * rng.r#gen::<f32>();
                let polar = (1.0 - rng.r#gen::<f32>() * 2.0).acos();
                let azimuth = rng.r#gen::<f32>() * TAU;
                let position = spherical(r, polar, azimuth);

                let [cr, cg, cb] = hsl(i as f32 / self.count as f32, self.saturation, 0.9);
                let color = Color::from_straight(cr, cg, cb, 1.0).to_linear_rgb();
                PointInstance {
                    position: position.to_array(),
                    size: (0.5 + 0.5 * rng.r#gen::<f32>()) * self.factor,
                    color: [color[0], color[1], color[2], 1.0],
                }
            })
            .collect()
    }
}

fn spherical(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let (sp, cp) = polar.sin_cos();
    let (sa, ca) = azimuth.sin_cos();
    radius * Vec3::new(sp * sa, cp, sp * ca)
}

fn hsl(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l; 3];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloorGrid {
    pub size: f32,
    pub divisions: u32,
    pub center: Color,
    pub lines: Color,
    pub opacity: f32,
}

impl Default for FloorGrid {
    fn default() -> Self {
        Self {
            size: 20.0,
            divisions: 20,
            center: Color::from_hex(0x444444),
            lines: Color::from_hex(0x222222),
            opacity: 0.35,
        }
    }
}

impl FloorGrid {
    /// Line-list vertices on the XZ plane, two lines per division step.
    pub fn generate(&self) -> Vec<LineVertex> {
        let half = self.size * 0.5;
        let step = self.size / self.divisions.max(1) as f32;
        let mid = self.divisions / 2;
        let premul = |c: Color| {
            let [r, g, b] = c.to_linear_rgb();
            let a = self.opacity;
            [r * a, g * a, b * a, a]
        };

        let mut out = Vec::with_capacity((self.divisions as usize + 1) * 4);
        for i in 0..=self.divisions {
            let k = -half + i as f32 * step;
            let color = premul(if i == mid { self.center } else { self.lines });
            out.extend([
                LineVertex { position: [-half, 0.0, k], color },
                LineVertex { position: [half, 0.0, k], color },
                LineVertex { position: [k, 0.0, -half], color },
                LineVertex { position: [k, 0.0, half], color },
            ]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_fill_the_shell() {
        let field = StarField::default();
        let stars = field.generate();
        assert_eq!(stars.len(), 5000);
        for s in &stars {
            let r = Vec3::from_array(s.position).length();
            assert!((field.radius - 1e-3..=field.radius + field.depth + 1e-3).contains(&r), "r = {r}");
            assert!((2.0..=4.0).contains(&s.size));
        }
    }

    #[test]
    fn stars_are_gray_without_saturation() {
        for s in (StarField { count: 50, ..StarField::default() }).generate() {
            assert_eq!(s.color[0], s.color[1]);
            assert_eq!(s.color[1], s.color[2]);
        }
    }

    #[test]
    fn stars_are_deterministic_per_seed() {
        let a = StarField { count: 10, ..StarField::default() }.generate();
        let b = StarField { count: 10, ..StarField::default() }.generate();
        let c = StarField { count: 10, seed: 7, ..StarField::default() }.generate();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hsl_primaries() {
        let red = hsl(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
        let green = hsl(1.0 / 3.0, 1.0, 0.5);
        assert!((green[1] - 1.0).abs() < 1e-6 && green[0].abs() < 1e-6);
    }

    #[test]
    fn grid_layout() {
        let grid = FloorGrid::default();
        let verts = grid.generate();
        assert_eq!(verts.len(), 21 * 4);
        assert!(verts.iter().all(|v| v.position[1] == 0.0));
        assert!(verts.iter().all(|v| v.position[0].abs() <= 10.0 && v.position[2].abs() <= 10.0));

        let center = &verts[10 * 4];
        let other = &verts[0];
        assert_eq!(center.position[2], 0.0);
        assert!(center.color[0] > other.color[0]);
        assert!((center.color[3] - 0.35).abs() < 1e-6);
    }
}
