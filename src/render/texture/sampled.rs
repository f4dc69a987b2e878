//! Sampled 2D textures uploaded from CPU data

use wgpu::{Device, Extent3d, Queue, TextureView};

use crate::assets::TextureData;
use crate::terrain::NoiseField;

pub struct SampledTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: TextureView,
}

impl SampledTexture {
    #[allow(clippy::too_many_arguments)]
    fn upload(
        device: &Device,
        queue: &Queue,
        label: &str,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        bytes_per_row: u32,
        data: &[u8],
    ) -> Self {
        let size = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: None,
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Colour texture. Stored as plain unorm; shaders decode gamma themselves.
    pub fn from_rgba(device: &Device, queue: &Queue, label: &str, data: &TextureData) -> Self {
        Self::upload(
            device,
            queue,
            label,
            wgpu::TextureFormat::Rgba8Unorm,
            data.width,
            data.height,
            data.bytes_per_row(),
            &data.rgba,
        )
    }

    /// Single-channel height noise.
    pub fn from_noise(device: &Device, queue: &Queue, noise: &NoiseField) -> Self {
        let n = noise.resolution();
        Self::upload(
            device,
            queue,
            "height_noise",
            wgpu::TextureFormat::R8Unorm,
            n,
            n,
            n,
            noise.texels(),
        )
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }
}
