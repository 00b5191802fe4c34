//! GPU replay of a recorded frame.
//!
//! Each layer is drawn as solid shapes followed by its text, so overlay
//! shapes cover base-layer text. Clip rectangles become scissor rects for
//! shapes and glyphon text bounds for text.

use glyphon::{
    Attrs, Buffer, Cache, Color as GlyphonColor, FontSystem, Metrics, Resolution, Shaping,
    SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer, Viewport,
};
use wgpu::util::DeviceExt;

use dropdown_gpu::{ClearColor, GpuContext};

use crate::color_pipeline::{ColorPipeline, ShapeBatch};
use crate::constants::LINE_HEIGHT_FACTOR;
use crate::error::Result;
use crate::layout::Bounds;
use crate::renderer::{Color, DrawCommand, Layer, Renderer};

const LAYERS: [Layer; 2] = [Layer::Base, Layer::Overlay];

/// Owns the pipelines and glyph caches used to put frames on screen.
pub struct Presenter {
    color_pipeline: ColorPipeline,
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    /// One text renderer per layer, sharing the atlas
    text_renderers: Vec<TextRenderer>,
}

impl Presenter {
    pub fn new(gpu: &GpuContext) -> Self {
        let cache = Cache::new(&gpu.device);
        let mut atlas = TextAtlas::new(&gpu.device, &gpu.queue, &cache, gpu.format());
        let text_renderers = LAYERS
            .iter()
            .map(|_| {
                TextRenderer::new(
                    &mut atlas,
                    &gpu.device,
                    wgpu::MultisampleState::default(),
                    None,
                )
            })
            .collect();
        let viewport = Viewport::new(&gpu.device, &cache);

        log::info!("Presenter initialized with format: {:?}", gpu.format());

        Self {
            color_pipeline: ColorPipeline::new(&gpu.device, gpu.format()),
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            viewport,
            atlas,
            text_renderers,
        }
    }

    /// Draw `frame` to the surface. `scale_factor` converts the frame's
    /// logical pixels to the surface's physical pixels.
    pub fn present(
        &mut self,
        gpu: &GpuContext,
        frame: &Renderer,
        scale_factor: f32,
        clear: ClearColor,
    ) -> Result<()> {
        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (width, height) = (gpu.width(), gpu.height());
        self.viewport
            .update(&gpu.queue, Resolution { width, height });

        let mut batches = Vec::with_capacity(LAYERS.len());
        for (index, layer) in LAYERS.iter().enumerate() {
            let commands = frame.layer_commands(*layer);
            let batch = ShapeBatch::from_commands(commands, frame.viewport());
            let buffer = (!batch.is_empty()).then(|| {
                gpu.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Shape Vertex Buffer"),
                        contents: bytemuck::cast_slice(&batch.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    })
            });
            self.prepare_text(gpu, index, commands, scale_factor)?;
            batches.push((batch, buffer));
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.into()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for (index, (batch, buffer)) in batches.iter().enumerate() {
                if let Some(buffer) = buffer {
                    pass.set_pipeline(&self.color_pipeline.render_pipeline);
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    for draw in &batch.draws {
                        let Some([x, y, w, h]) =
                            scissor_rect(draw.clip, scale_factor, width, height)
                        else {
                            continue;
                        };
                        pass.set_scissor_rect(x, y, w, h);
                        pass.draw(draw.vertices.clone(), 0..1);
                    }
                    pass.set_scissor_rect(0, 0, width, height);
                }

                self.text_renderers[index].render(&self.atlas, &self.viewport, &mut pass)?;
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.atlas.trim();

        Ok(())
    }

    fn prepare_text(
        &mut self,
        gpu: &GpuContext,
        index: usize,
        commands: &[DrawCommand],
        scale_factor: f32,
    ) -> Result<()> {
        let (width, height) = (gpu.width(), gpu.height());

        let mut buffers = Vec::new();
        for command in commands {
            let DrawCommand::Text {
                content,
                position,
                size,
                color,
                clip,
            } = command
            else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            let font_size = size * scale_factor;
            let mut buffer = Buffer::new(
                &mut self.font_system,
                Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR),
            );
            buffer.set_size(&mut self.font_system, None, None);
            buffer.set_text(
                &mut self.font_system,
                content,
                &Attrs::new(),
                Shaping::Advanced,
                None,
            );
            buffer.shape_until_scroll(&mut self.font_system, false);
            buffers.push((buffer, *position, *color, *clip));
        }

        let areas = buffers.iter().map(|(buffer, (x, y), color, clip)| TextArea {
            buffer,
            left: x * scale_factor,
            top: y * scale_factor,
            scale: 1.0,
            bounds: text_bounds(*clip, scale_factor, width, height),
            default_color: glyphon_color(*color),
            custom_glyphs: &[],
        });

        self.text_renderers[index].prepare(
            &gpu.device,
            &gpu.queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        )?;

        Ok(())
    }
}

/// Physical scissor rectangle for a logical clip, clamped to the surface.
/// `None` when the clip covers no pixels.
pub fn scissor_rect(
    clip: Option<Bounds>,
    scale_factor: f32,
    width: u32,
    height: u32,
) -> Option<[u32; 4]> {
    let Some(clip) = clip else {
        return Some([0, 0, width, height]);
    };

    let left = (clip.x * scale_factor).floor().clamp(0.0, width as f32);
    let top = (clip.y * scale_factor).floor().clamp(0.0, height as f32);
    let right = (clip.right() * scale_factor).ceil().clamp(0.0, width as f32);
    let bottom = (clip.bottom() * scale_factor).ceil().clamp(0.0, height as f32);

    if right <= left || bottom <= top {
        return None;
    }

    Some([
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ])
}

fn text_bounds(clip: Option<Bounds>, scale_factor: f32, width: u32, height: u32) -> TextBounds {
    match clip {
        Some(clip) => TextBounds {
            left: (clip.x * scale_factor).floor() as i32,
            top: (clip.y * scale_factor).floor() as i32,
            right: (clip.right() * scale_factor).ceil() as i32,
            bottom: (clip.bottom() * scale_factor).ceil() as i32,
        },
        None => TextBounds {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        },
    }
}

fn glyphon_color(color: Color) -> GlyphonColor {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    GlyphonColor::rgba(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    )
}
