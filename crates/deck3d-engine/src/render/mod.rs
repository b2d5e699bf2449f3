//! GPU rendering.
//!
//! The 3D scene renders into float targets (`targets`), `bloom` composites
//! them into the surface, and `overlay` blends the CPU-rasterized 2D layer on
//! top. Each renderer owns its pipelines and buffers.

mod common;
mod ctx;
mod uniforms;

pub mod bloom;
pub mod lines;
pub mod mesh;
pub mod overlay;
pub mod raster;
pub mod targets;
pub mod texture;

pub use bloom::{Backdrop, BloomRenderer, BloomSettings};
pub use ctx::{RenderCtx, RenderTarget};
pub use lines::{LineBatch, LineDraw, LineRenderer, LineVertex, PointCloud, PointInstance};
pub use mesh::{CameraMatrices, GpuMesh, Material, MaterialDesc, MeshDraw, MeshRenderer, SceneLights};
pub use overlay::OverlayRenderer;
pub use targets::{FrameTargets, DEPTH_FORMAT, HDR_FORMAT};
pub use texture::{GpuTexture, TextureError};
