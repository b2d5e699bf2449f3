use std::num::NonZeroU64;

use bytemuck::Pod;

/// Growable uniform buffer addressed with dynamic offsets, one slot per draw.
pub(crate) struct DynamicUniforms {
    label: &'static str,
    layout: wgpu::BindGroupLayout,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    item_size: u64,
    stride: u64,
    capacity: u64,
    staging: Vec<u8>,
}

impl DynamicUniforms {
    pub(crate) fn new(device: &wgpu::Device, label: &'static str, item_size: u64, visibility: wgpu::ShaderStages) -> Self {
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = item_size.div_ceil(align) * align;

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(item_size),
                },
                count: None,
            }],
        });

        let capacity = 16;
        let (buffer, bind_group) = Self::allocate(device, label, &layout, item_size, stride, capacity);

        Self {
            label,
            layout,
            buffer,
            bind_group,
            item_size,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &'static str,
        layout: &wgpu::BindGroupLayout,
        item_size: u64,
        stride: u64,
        capacity: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(item_size),
                }),
            }],
        });
        (buffer, bind_group)
    }

    pub(crate) fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub(crate) fn offset(&self, index: usize) -> u32 {
        (index as u64 * self.stride) as u32
    }

    /// Uploads `items` into consecutive slots, growing the buffer when needed.
    pub(crate) fn write<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[T]) {
        debug_assert_eq!(std::mem::size_of::<T>() as u64, self.item_size);
        if items.is_empty() {
            return;
        }

        let needed = items.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            let (buffer, bind_group) =
                Self::allocate(device, self.label, &self.layout, self.item_size, self.stride, self.capacity);
            self.buffer = buffer;
            self.bind_group = bind_group;
            log::debug!("{} grown to {} slots", self.label, self.capacity);
        }

        self.staging.clear();
        self.staging.resize((self.stride * needed) as usize, 0);
        for (i, item) in items.iter().enumerate() {
            let at = i * self.stride as usize;
            self.staging[at..at + self.item_size as usize].copy_from_slice(bytemuck::bytes_of(item));
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);
    }
}
