use deck3d_engine::render::SceneLights;
use glam::Vec3;

/// A positioned light with white color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlacedLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// Ambient, one directional and an optional point light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: f32,
    /// The directional light shines from `position` toward the origin.
    pub directional: PlacedLight,
    pub point: Option<PlacedLight>,
}

impl LightRig {
    pub fn table() -> Self {
        Self {
            ambient: 0.5,
            directional: PlacedLight { position: Vec3::new(8.0, 15.0, 8.0), intensity: 1.5 },
            point: Some(PlacedLight { position: Vec3::new(-5.0, -5.0, -5.0), intensity: 0.2 }),
        }
    }

    pub fn fan() -> Self {
        Self {
            ambient: 0.65,
            directional: PlacedLight { position: Vec3::new(5.0, 8.0, 5.0), intensity: 1.0 },
            point: None,
        }
    }

    pub fn scene_lights(&self) -> SceneLights {
        let point = self.point.unwrap_or(PlacedLight { position: Vec3::ZERO, intensity: 0.0 });
        SceneLights {
            ambient: [self.ambient; 3],
            directional_dir: self.directional.position.normalize_or_zero(),
            directional: [self.directional.intensity; 3],
            point_position: point.position,
            point: [point.intensity; 3],
        }
    }
}
