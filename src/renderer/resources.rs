use crate::texture::DecodedTexture;

pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// A GPU texture together with everything needed to sample it.
pub struct TextureBinding {
    pub(crate) label: &'static str,
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl TextureBinding {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &'static str,
        width: u32,
        height: u32,
        usage: wgpu::TextureUsages,
        sampler: &wgpu::SamplerDescriptor,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(sampler);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            label,
            texture,
            view,
            bind_group,
            width,
            height,
        }
    }

    fn release(self) {
        log::debug!("Releasing {} ({}x{})", self.label, self.width, self.height);
        drop(self.bind_group);
        drop(self.view);
        self.texture.destroy();
    }
}

/// The two textures the renderer owns for its whole lifetime: the decoded map
/// and the offscreen target it is composited into every frame. Both have the
/// map's dimensions.
pub struct ResourceTable {
    pub(crate) source: TextureBinding,
    pub(crate) offscreen: TextureBinding,
}

impl ResourceTable {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        map: &DecodedTexture,
    ) -> Self {
        // Unscaled copy, texel centres line up exactly.
        let source = TextureBinding::new(
            device,
            layout,
            "Map Texture",
            map.width,
            map.height,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            &wgpu::SamplerDescriptor {
                label: Some("Map Sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            },
        );

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &source.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            map.rgba.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * map.width),
                rows_per_image: Some(map.height),
            },
            wgpu::Extent3d {
                width: map.width,
                height: map.height,
                depth_or_array_layers: 1,
            },
        );

        // Bilinear; longitude wraps around the seam, latitude stops at the poles.
        let offscreen = TextureBinding::new(
            device,
            layout,
            "Offscreen Target",
            map.width,
            map.height,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            &wgpu::SamplerDescriptor {
                label: Some("Offscreen Sampler"),
                address_mode_u: wgpu::AddressMode::Repeat,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            },
        );

        log::info!(
            "Created map texture and offscreen target ({}x{})",
            map.width,
            map.height
        );

        Self { source, offscreen }
    }

    /// Render target first, then the map.
    pub fn release(self) {
        self.offscreen.release();
        self.source.release();
    }
}
