//! Frame rendering: uniforms first, then the sky pass and the scene pass.

use std::sync::Arc;

use winit::window::Window;

use super::buffer::{CameraBuffer, GroundBuffer};
use super::context::GpuContext;
use super::pipeline::{GrassPipeline, ParticlePipeline, SkyPipeline, TerrainPipeline};
use super::texture::{DepthTexture, SampledTexture};
use crate::assets::{AssetLoader, PendingAsset, TextureData};
use crate::core::Result;
use crate::core::camera::Camera;
use crate::frame::FrameState;
use crate::grass::GrassField;
use crate::particles::ParticleUniform;
use crate::scene::SceneConfig;
use crate::sky::SkyDome;
use crate::terrain::{GroundLighting, GroundUniform, NoiseField, TerrainMesh, TerrainUniform};

/// Swap in a finished texture load. Returns true once the load is resolved,
/// whether it succeeded or not.
fn poll_texture(
    pending: &mut Option<PendingAsset<TextureData>>,
    slot: &mut SampledTexture,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    name: &str,
) -> bool {
    let Some(handle) = pending.as_mut() else {
        return false;
    };
    let label = handle.label().to_string();
    let done = handle.poll_complete(|result| match result {
        Ok(data) => {
            log::info!("Loaded {} ({}x{}) from {}", name, data.width, data.height, label);
            *slot = SampledTexture::from_rgba(device, queue, name, &data);
        }
        Err(e) => log::warn!("Failed to load {} from {}: {}; keeping fallback", name, label, e),
    });
    if done {
        *pending = None;
    }
    done
}

pub struct Renderer {
    ctx: GpuContext,
    depth: DepthTexture,
    camera: CameraBuffer,
    ground: GroundBuffer,
    sky: SkyPipeline,
    terrain: TerrainPipeline,
    grass: GrassPipeline,
    particles: ParticlePipeline,
    sky_dome: SkyDome,
    grass_field: GrassField,
    lighting: GroundLighting,
    particle_size: f32,
    blade_diffuse: SampledTexture,
    blade_alpha: SampledTexture,
    pending_diffuse: Option<PendingAsset<TextureData>>,
    pending_alpha: Option<PendingAsset<TextureData>>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, config: &SceneConfig, loader: &AssetLoader) -> Result<Self> {
        let ctx = GpuContext::new(window).await?;
        let (width, height) = ctx.size();
        let device = &ctx.device;
        let queue = &ctx.queue;
        let format = ctx.format();

        let noise = NoiseField::generate(&config.terrain.noise)?;
        let mesh = TerrainMesh::from_config(&config.terrain)?;
        let grass_field = GrassField::new(config.grass.clone(), config.terrain.width)?;

        let noise_texture = SampledTexture::from_noise(device, queue, &noise);
        let white = TextureData::white();
        let blade_diffuse = SampledTexture::from_rgba(device, queue, "blade_diffuse", &white);
        let blade_alpha = SampledTexture::from_rgba(device, queue, "blade_alpha", &white);

        let camera = CameraBuffer::new(device);
        let ground = GroundBuffer::new(device, &noise_texture);
        ground.update(queue, &GroundUniform::from(&config.terrain));

        let sky = SkyPipeline::new(device, format);
        let terrain = TerrainPipeline::new(device, format, camera.bind_group_layout(), ground.bind_group_layout(), &mesh);
        let grass = GrassPipeline::new(
            device,
            format,
            camera.bind_group_layout(),
            ground.bind_group_layout(),
            &grass_field,
            &blade_diffuse,
            &blade_alpha,
        );
        let particles = ParticlePipeline::new(device, format, camera.bind_group_layout(), config.particles.count);
        let depth = DepthTexture::new(device, width, height);

        let pending_diffuse = Some(loader.load_texture(&config.assets.blade_diffuse));
        let pending_alpha = Some(loader.load_texture(&config.assets.blade_alpha));

        Ok(Self {
            ctx,
            depth,
            camera,
            ground,
            sky,
            terrain,
            grass,
            particles,
            sky_dome: SkyDome::new(config.sky.clone(), width, height),
            grass_field,
            lighting: config.terrain.lighting.clone(),
            particle_size: config.particles.size,
            blade_diffuse,
            blade_alpha,
            pending_diffuse,
            pending_alpha,
        })
    }

    /// Pick up finished blade texture loads.
    pub fn poll_assets(&mut self) {
        let device = &self.ctx.device;
        let queue = &self.ctx.queue;
        let diffuse = poll_texture(&mut self.pending_diffuse, &mut self.blade_diffuse, device, queue, "blade_diffuse");
        let alpha = poll_texture(&mut self.pending_alpha, &mut self.blade_alpha, device, queue, "blade_alpha");
        if diffuse || alpha {
            self.grass.set_textures(device, &self.blade_diffuse, &self.blade_alpha);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.ctx.resize(width, height);
        self.depth.resize(&self.ctx.device, width, height);
        self.sky_dome.resize(width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        self.ctx.size()
    }

    /// Draw one frame from an immutable frame state.
    pub fn render(&mut self, frame: &FrameState, camera: &Camera) -> Result<()> {
        let queue = &self.ctx.queue;
        let snapshot = &frame.snapshot;

        self.camera.update(queue, camera);
        self.sky.update(queue, &self.sky_dome.uniform(snapshot, camera, frame.cloud_time));
        let mut terrain = TerrainUniform::new(&self.lighting, snapshot);
        if let Some(text) = &frame.text {
            terrain = terrain.with_underglow(&text.underglow());
        }
        self.terrain.update(queue, &terrain);
        self.grass.update(queue, &self.grass_field.uniform(snapshot, frame.elapsed));
        self.particles.update(queue, &frame.particles, &ParticleUniform::new(snapshot, self.particle_size));

        let output = match self.ctx.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                log::error!("Surface unavailable ({}), reconfiguring", e);
                let (w, h) = self.ctx.size();
                self.ctx.resize(w, h);
                return Ok(());
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sky_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            self.sky.draw(&mut pass);
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_bind_group(0, self.camera.bind_group(), &[]);
            pass.set_bind_group(1, self.ground.bind_group(), &[]);
            self.terrain.draw(&mut pass);
            self.grass.draw(&mut pass);
            self.particles.draw(&mut pass);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
