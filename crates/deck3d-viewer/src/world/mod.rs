//! Camera, picking, placement and lighting for the 3D scene.

pub mod backdrop;
pub mod camera;
pub mod lighting;
pub mod picking;
pub mod transform;

pub use backdrop::{FloorGrid, StarField, STAR_SPIN};
pub use camera::{OrbitCamera, PerspectiveCamera};
pub use lighting::LightRig;
pub use picking::{pick_nearest, screen_to_ray};
pub use transform::Transform;
