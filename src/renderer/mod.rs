//! wgpu rendering: textured sprite quads plus a bitmap text overlay
//!
//! The scene is laid out in a fixed world resolution (the configured window
//! size) and stretched to whatever the surface currently is.

pub mod batch;
pub mod context;
pub mod pipeline;
pub mod scene;
pub mod text;
pub mod texture;
pub mod vertex;

use std::sync::Arc;

use image::RgbaImage;
use winit::window::Window;

pub use batch::{Quad, SpriteBatch, TextureId};
pub use context::GpuContext;
pub use pipeline::SpritePipeline;
pub use scene::{TextureSizes, build_scene};
pub use text::TextOverlay;
pub use texture::{GpuTexture, TextureSet};

use crate::assets::Assets;
use crate::sim::GameState;

pub struct Renderer {
    pub ctx: GpuContext,
    pipeline: SpritePipeline,
    textures: TextureSet,
    overlay: TextOverlay,
    batch: SpriteBatch,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        vsync: bool,
        world_size: (u32, u32),
        assets: &Assets,
    ) -> anyhow::Result<Self> {
        let ctx = GpuContext::new(window, vsync)?;
        let pipeline = SpritePipeline::new(&ctx, world_size);
        let overlay = TextOverlay::new(world_size.0, world_size.1);

        let upload = |image: &RgbaImage, label: &str| {
            GpuTexture::from_image(&ctx.device, &ctx.queue, &pipeline.texture_layout, image, label)
        };
        let textures = TextureSet {
            layers: [
                upload(&assets.layers[0], "layer_far"),
                upload(&assets.layers[1], "layer_mid"),
                upload(&assets.layers[2], "layer_near"),
            ],
            player: upload(&assets.player.image, "player_sheet"),
            hazard: upload(&assets.hazard.image, "hazard_sheet"),
            text: upload(&overlay.canvas, "text_overlay"),
        };

        Ok(Self {
            ctx,
            pipeline,
            textures,
            overlay,
            batch: SpriteBatch::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    /// Draw one frame of `state`; skipped if no surface image is available
    pub fn render(&mut self, state: &GameState) {
        if self.overlay.update(state.phase) {
            self.textures.text.write(&self.ctx.queue, &self.overlay.canvas);
        }

        build_scene(state, &self.textures.sizes(), &mut self.batch);

        let Some((output, view)) = self.ctx.begin_frame() else {
            return;
        };
        self.pipeline
            .render(&self.ctx, &view, &self.batch, &self.textures);
        output.present();
    }
}
