use resvg::tiny_skia::Pixmap;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture data is {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("texture size {width}x{height} is empty")]
    Empty { width: u32, height: u32 },
    #[error("texture size {width}x{height} exceeds the device limit {limit}")]
    TooLarge { width: u32, height: u32, limit: u32 },
}

/// A sampled 2D texture with its default view.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
}

impl GpuTexture {
    /// Uploads premultiplied RGBA8 pixels with a full CPU-built mip chain.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
        srgb: bool,
    ) -> Result<Self, TextureError> {
        check_rgba8(width, height, pixels.len())?;
        let limit = device.limits().max_texture_dimension_2d;
        if width > limit || height > limit {
            return Err(TextureError::TooLarge { width, height, limit });
        }

        let levels = mip_chain(width, height, pixels);
        let format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: levels.len() as u32 + 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        write_level(queue, &texture, 0, width, height, pixels);
        for (i, level) in levels.iter().enumerate() {
            write_level(queue, &texture, i as u32 + 1, level.width, level.height, &level.pixels);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { texture, view, width, height, format })
    }

    pub fn from_pixmap(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        pixmap: &Pixmap,
    ) -> Result<Self, TextureError> {
        Self::from_rgba8(device, queue, label, pixmap.width(), pixmap.height(), pixmap.data(), true)
    }

    /// 1x1 texture, used where a material has no map.
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, rgba: [u8; 4]) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        write_level(queue, &texture, 0, 1, 1, &rgba);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view, width: 1, height: 1, format: wgpu::TextureFormat::Rgba8UnormSrgb }
    }

    /// Render-target texture that can also be sampled.
    pub fn attachment(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view, width, height, format }
    }

    /// Single-level texture rewritten from the CPU, e.g. every time the overlay changes.
    pub fn dynamic(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view, width, height, format }
    }

    /// Replaces the base level in place. Mip levels are not regenerated.
    pub fn write_rgba8(&self, queue: &wgpu::Queue, pixels: &[u8]) -> Result<(), TextureError> {
        check_rgba8(self.width, self.height, pixels.len())?;
        write_level(queue, &self.texture, 0, self.width, self.height, pixels);
        Ok(())
    }
}

fn check_rgba8(width: u32, height: u32, len: usize) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::Empty { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if len != expected {
        return Err(TextureError::SizeMismatch { width, height, expected, actual: len });
    }
    Ok(())
}

fn write_level(queue: &wgpu::Queue, texture: &wgpu::Texture, mip_level: u32, width: u32, height: u32, pixels: &[u8]) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
    );
}

/// One downsampled level of a mip chain.
#[derive(Debug, Clone)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Box-filtered levels below the base, down to 1x1.
///
/// Averaging premultiplied texels is exact, so transparent card corners do
/// not bleed dark fringes into smaller levels.
pub fn mip_chain(width: u32, height: u32, pixels: &[u8]) -> Vec<MipLevel> {
    let mut out: Vec<MipLevel> = Vec::new();
    let (mut w, mut h) = (width, height);

    while w > 1 || h > 1 {
        let src: &[u8] = out.last().map(|l| l.pixels.as_slice()).unwrap_or(pixels);
        let (nw, nh) = ((w / 2).max(1), (h / 2).max(1));
        let mut dst = vec![0u8; nw as usize * nh as usize * 4];

        for y in 0..nh {
            for x in 0..nw {
                let sx = [(x * 2).min(w - 1), (x * 2 + 1).min(w - 1)];
                let sy = [(y * 2).min(h - 1), (y * 2 + 1).min(h - 1)];
                for c in 0..4 {
                    let sum: u32 = sy
                        .iter()
                        .flat_map(|&yy| sx.iter().map(move |&xx| (yy, xx)))
                        .map(|(yy, xx)| src[((yy * w + xx) * 4) as usize + c] as u32)
                        .sum();
                    dst[((y * nw + x) * 4) as usize + c] = ((sum + 2) / 4) as u8;
                }
            }
        }

        out.push(MipLevel { width: nw, height: nh, pixels: dst });
        (w, h) = (nw, nh);
    }

    out
}

/// Linear filtering, clamped edges, trilinear across mips.
pub fn linear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}
