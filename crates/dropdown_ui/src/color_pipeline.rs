//! Solid-color pipeline for rectangles and triangles.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::layout::{Bounds, Size};
use crate::renderer::{Color, DrawCommand};

/// Vertex for colored shapes (no texture)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ColorVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Pipeline for rendering solid color triangles
pub struct ColorPipeline {
    pub render_pipeline: wgpu::RenderPipeline,
}

impl ColorPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader_source = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.position = vec4<f32>(input.position, 0.0, 1.0);
    output.color = input.color;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Color Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Color Pipeline Layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Color Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ColorVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // No culling for 2D
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self { render_pipeline }
    }
}

/// A run of vertices sharing one clip rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDraw {
    pub vertices: Range<u32>,
    pub clip: Option<Bounds>,
}

/// Triangles for every shape command of a layer, in paint order.
#[derive(Debug, Default)]
pub struct ShapeBatch {
    pub vertices: Vec<ColorVertex>,
    pub draws: Vec<ShapeDraw>,
}

impl ShapeBatch {
    /// Tessellate the rect and triangle commands; text commands are skipped.
    pub fn from_commands(commands: &[DrawCommand], viewport: Size) -> Self {
        let mut batch = Self::default();

        for command in commands {
            let start = batch.vertices.len() as u32;
            match command {
                DrawCommand::FillRect { bounds, color, .. } => {
                    let tl = (bounds.x, bounds.y);
                    let tr = (bounds.right(), bounds.y);
                    let br = (bounds.right(), bounds.bottom());
                    let bl = (bounds.x, bounds.bottom());
                    batch.push_triangle([tl, tr, br], *color, viewport);
                    batch.push_triangle([tl, br, bl], *color, viewport);
                }
                DrawCommand::Triangle { points, color, .. } => {
                    batch.push_triangle(*points, *color, viewport);
                }
                DrawCommand::Text { .. } => continue,
            }
            let end = batch.vertices.len() as u32;
            batch.extend_draw(start..end, command.clip());
        }

        batch
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn push_triangle(&mut self, points: [(f32, f32); 3], color: Color, viewport: Size) {
        let color = color.to_array();
        for (x, y) in points {
            self.vertices.push(ColorVertex {
                position: to_ndc(x, y, viewport),
                color,
            });
        }
    }

    /// Merge with the previous draw when the clip is unchanged.
    fn extend_draw(&mut self, vertices: Range<u32>, clip: Option<Bounds>) {
        match self.draws.last_mut() {
            Some(last) if last.clip == clip && last.vertices.end == vertices.start => {
                last.vertices.end = vertices.end;
            }
            _ => self.draws.push(ShapeDraw { vertices, clip }),
        }
    }
}

/// Convert from logical screen coordinates to NDC (-1 to 1, y up).
pub fn to_ndc(x: f32, y: f32, viewport: Size) -> [f32; 2] {
    [
        (x / viewport.width) * 2.0 - 1.0,
        1.0 - (y / viewport.height) * 2.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn test_ndc_corners() {
        assert_eq!(to_ndc(0.0, 0.0, VIEWPORT), [-1.0, 1.0]);
        assert_eq!(to_ndc(200.0, 100.0, VIEWPORT), [1.0, -1.0]);
        assert_eq!(to_ndc(100.0, 50.0, VIEWPORT), [0.0, 0.0]);
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let commands = vec![DrawCommand::FillRect {
            bounds: Bounds::new(0.0, 0.0, 100.0, 50.0),
            color: Color::WHITE,
            clip: None,
        }];
        let batch = ShapeBatch::from_commands(&commands, VIEWPORT);
        assert_eq!(batch.vertices.len(), 6);
        assert_eq!(batch.draws, vec![ShapeDraw { vertices: 0..6, clip: None }]);
    }

    #[test]
    fn test_clip_changes_split_draws() {
        let clip = Some(Bounds::new(0.0, 0.0, 10.0, 10.0));
        let rect = |clip| DrawCommand::FillRect {
            bounds: Bounds::new(0.0, 0.0, 5.0, 5.0),
            color: Color::rgb(0.0, 0.0, 0.0),
            clip,
        };
        let commands = vec![
            rect(clip),
            rect(clip),
            DrawCommand::Text {
                content: "skip".to_string(),
                position: (0.0, 0.0),
                size: 14.0,
                color: Color::WHITE,
                clip,
            },
            DrawCommand::Triangle {
                points: [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
                color: Color::WHITE,
                clip: None,
            },
        ];

        let batch = ShapeBatch::from_commands(&commands, VIEWPORT);

        assert_eq!(
            batch.draws,
            vec![
                ShapeDraw { vertices: 0..12, clip },
                ShapeDraw { vertices: 12..15, clip: None },
            ]
        );
    }
}
