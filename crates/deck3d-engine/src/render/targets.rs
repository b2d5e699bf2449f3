use super::texture::GpuTexture;

pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen targets for the 3D scene, resized with the surface.
///
/// The bloom pair is rendered at a fixed height so blur radius is
/// resolution independent.
pub struct FrameTargets {
    pub hdr: GpuTexture,
    pub depth: GpuTexture,
    pub bloom: [GpuTexture; 2],
    blur_height: u32,
    generation: u64,
}

impl FrameTargets {
    pub fn new(device: &wgpu::Device, width: u32, height: u32, blur_height: u32) -> Self {
        let (hdr, depth, bloom) = Self::create(device, width, height, blur_height);
        Self { hdr, depth, bloom, blur_height, generation: 0 }
    }

    fn create(device: &wgpu::Device, width: u32, height: u32, blur_height: u32) -> (GpuTexture, GpuTexture, [GpuTexture; 2]) {
        let hdr = GpuTexture::attachment(device, "deck3d hdr", width, height, HDR_FORMAT);
        let depth = GpuTexture::attachment(device, "deck3d depth", width, height, DEPTH_FORMAT);
        let (bw, bh) = bloom_size(width, height, blur_height);
        let bloom = [
            GpuTexture::attachment(device, "deck3d bloom a", bw, bh, HDR_FORMAT),
            GpuTexture::attachment(device, "deck3d bloom b", bw, bh, HDR_FORMAT),
        ];
        (hdr, depth, bloom)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.hdr.width, self.hdr.height)
    }

    /// Bumped whenever the textures are recreated; bind groups key on it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Recreates the targets when the surface size changed. Returns `true` if it did.
    pub fn ensure(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if self.size() == (width, height) {
            return false;
        }
        let (hdr, depth, bloom) = Self::create(device, width, height, self.blur_height);
        self.hdr = hdr;
        self.depth = depth;
        self.bloom = bloom;
        self.generation += 1;
        log::debug!("frame targets resized to {width}x{height}");
        true
    }
}

/// Bloom target size: `blur_height` tall (never taller than the frame), aspect preserved.
pub fn bloom_size(width: u32, height: u32, blur_height: u32) -> (u32, u32) {
    let (width, height) = (width.max(1), height.max(1));
    let bh = blur_height.clamp(1, height);
    let bw = ((width as u64 * bh as u64 + height as u64 / 2) / height as u64).max(1) as u32;
    (bw, bh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bloom_keeps_aspect_at_fixed_height() {
        assert_eq!(bloom_size(1920, 1080, 300), (533, 300));
        assert_eq!(bloom_size(1280, 720, 300), (533, 300));
    }

    #[test]
    fn bloom_never_upscales() {
        assert_eq!(bloom_size(400, 200, 300), (400, 200));
        assert_eq!(bloom_size(0, 0, 300), (1, 1));
    }
}
