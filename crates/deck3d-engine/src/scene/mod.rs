//! 2D draw stream consumed by the overlay rasterizer.
//!
//! Ordering is deterministic: z-index first, then insertion order.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::Border;
pub use z_index::ZIndex;
