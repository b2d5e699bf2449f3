//! CPU-side meshes for card geometry.

mod card;
mod mesh;

pub use card::{card_box, card_planes};
pub use mesh::{Aabb, Mesh, Vertex};
