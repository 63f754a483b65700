//! RGBA8 textures with their sampler and bind group

use image::RgbaImage;

use super::batch::TextureId;
use super::scene::TextureSizes;
use crate::sim::LAYER_COUNT;

/// A sampled 2D texture ready to bind at group 1
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub size: (u32, u32),
}

impl GpuTexture {
    /// Layout shared by every sprite texture: view at 0, sampler at 1
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let size = (image.width().max(1), image.height().max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Pixel art: no smoothing, no wrap bleed at sheet frame edges
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
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

        let texture = Self {
            texture,
            bind_group,
            size,
        };
        texture.write(queue, image);
        log::debug!("Uploaded texture '{}' {}x{}", label, size.0, size.1);
        texture
    }

    /// Replace the pixels; ignored if the image size no longer matches
    pub fn write(&self, queue: &wgpu::Queue, image: &RgbaImage) {
        if (image.width(), image.height()) != self.size {
            log::warn!(
                "Texture upload skipped: image is {}x{}, texture is {}x{}",
                image.width(),
                image.height(),
                self.size.0,
                self.size.1
            );
            return;
        }
        queue.write_texture(
            self.texture.as_image_copy(),
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.size.0),
                rows_per_image: Some(self.size.1),
            },
            extent(self.size),
        );
    }
}

/// Every texture the scene can reference
pub struct TextureSet {
    pub layers: [GpuTexture; LAYER_COUNT],
    pub player: GpuTexture,
    pub hazard: GpuTexture,
    pub text: GpuTexture,
}

impl TextureSet {
    pub fn get(&self, id: TextureId) -> &GpuTexture {
        match id {
            TextureId::Layer(i) => &self.layers[i.min(LAYER_COUNT - 1)],
            TextureId::Player => &self.player,
            TextureId::Hazard => &self.hazard,
            TextureId::Text => &self.text,
        }
    }

    pub fn sizes(&self) -> TextureSizes {
        TextureSizes {
            layers: [0, 1, 2].map(|i| self.layers[i].size),
            player: self.player.size,
            hazard: self.hazard.size,
            text: self.text.size,
        }
    }
}

fn extent((width, height): (u32, u32)) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}
