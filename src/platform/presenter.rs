//=========================================================================
// Frame Presenter
//
// Draws the latest `DisplayList` into the window with wgpu.
//
// Responsibilities:
// - Own the surface, device and the single quad pipeline
// - Convert a frame into clear color + instanced quads (`QuadBatch`)
// - Recover from lost/outdated surfaces by reconfiguring
//
// Notes:
// Every rect is one instance of a 4-vertex strip; the fragment shader
// rounds corners with a box SDF. Text has no font backend and is
// skipped.
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use log::*;
use winit::window::Window;

//=== Internal Imports ====================================================

use crate::core::geometry::{Rect, ScreenSize};
use crate::core::platform_bridge::PlatformError;
use crate::core::render::{Color, DisplayList, DrawCommand};

//=== Constants ===========================================================

const QUAD_SHADER_SRC: &str = include_str!("quad.wgsl");

/// Corner radius of rounded rects, relative to their shorter side.
const CORNER_RATIO: f32 = 0.25;

const INITIAL_CAPACITY: usize = 256;

//=== QuadInstance ========================================================

/// Per-instance vertex data, laid out to match `quad.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct QuadInstance {
    /// Top-left corner in clip space.
    pub top_left: [f32; 2],
    pub bottom_right: [f32; 2],
    /// Half extents in screen pixels, for the corner SDF.
    pub half_size: [f32; 2],
    pub radius: f32,
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl QuadInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32,
        4 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn new(rect: Rect, radius: f32, color: Color, screen: ScreenSize) -> Self {
        let to_clip = |point: Vec2| {
            [
                point.x / screen.width_f() * 2.0 - 1.0,
                1.0 - point.y / screen.height_f() * 2.0,
            ]
        };
        let top_left = rect.top_left();

        Self {
            top_left: to_clip(top_left),
            bottom_right: to_clip(top_left + rect.size()),
            half_size: (rect.size() / 2.0).to_array(),
            radius,
            color: linear_rgba(color),
        }
    }
}

//=== QuadBatch ===========================================================

/// A frame flattened into what the GPU pass needs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuadBatch {
    pub clear: Color,
    pub quads: Vec<QuadInstance>,
}

impl QuadBatch {
    /// A `Clear` discards whatever was drawn before it.
    pub(crate) fn from_frame(frame: &DisplayList, screen: ScreenSize) -> Self {
        let mut batch = Self {
            clear: Color::BLACK,
            quads: Vec::with_capacity(frame.len()),
        };

        for command in frame.commands() {
            match command {
                DrawCommand::Clear(color) => {
                    batch.clear = *color;
                    batch.quads.clear();
                }
                DrawCommand::FillRect { rect, color } => {
                    batch.quads.push(QuadInstance::new(*rect, 0.0, *color, screen));
                }
                DrawCommand::RoundedRect { size, center, color } => {
                    let radius = size.min_element() * CORNER_RATIO;
                    let rect = Rect::from_center(*center, *size);
                    batch.quads.push(QuadInstance::new(rect, radius, *color, screen));
                }
                DrawCommand::Text { .. } => {}
            }
        }
        batch
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_rgba(color: Color) -> [f32; 4] {
    [
        srgb_to_linear(color.r),
        srgb_to_linear(color.g),
        srgb_to_linear(color.b),
        1.0,
    ]
}

//=== Presenter ===========================================================

pub(crate) struct Presenter {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    /// Logical layout size the scenes draw in.
    screen: ScreenSize,
}

impl Presenter {
    //--- Construction -----------------------------------------------------

    /// Blocks on adapter/device setup for `window`.
    ///
    /// # Errors
    ///
    /// [`PlatformError::GraphicsInit`] when no surface, adapter or device
    /// is available.
    pub(crate) fn new(window: Arc<Window>, screen: ScreenSize) -> Result<Self, PlatformError> {
        pollster::block_on(Self::init(window, screen))
    }

    async fn init(window: Arc<Window>, screen: ScreenSize) -> Result<Self, PlatformError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| PlatformError::GraphicsInit(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PlatformError::GraphicsInit(e.to_string()))?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .map_err(|e| PlatformError::GraphicsInit(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| PlatformError::GraphicsInit("surface has no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_quad_pipeline(&device, format);
        let instance_buffer = create_instance_buffer(&device, INITIAL_CAPACITY);

        info!(
            target: "platform",
            "Presenter ready: {:?} {}x{} via {:?}",
            format,
            config.width,
            config.height,
            adapter.get_info().backend
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            instance_buffer,
            capacity: INITIAL_CAPACITY,
            screen,
        })
    }

    //--- Surface ----------------------------------------------------------

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    //--- present() --------------------------------------------------------

    pub(crate) fn present(&mut self, frame: &DisplayList) {
        let batch = QuadBatch::from_frame(frame, self.screen);

        if batch.quads.len() > self.capacity {
            self.capacity = batch.quads.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.capacity);
            debug!(target: "platform", "Quad buffer grown to {} instances", self.capacity);
        }
        if !batch.quads.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&batch.quads));
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!(target: "platform", "Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                warn!(target: "platform", "Skipping frame: {}", e);
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        {
            let [r, g, b, _] = linear_rgba(batch.clear);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !batch.quads.is_empty() {
                let bytes = (batch.quads.len() * std::mem::size_of::<QuadInstance>()) as u64;
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.instance_buffer.slice(..bytes));
                pass.draw(0..4, 0..batch.quads.len() as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        trace!(target: "platform", "Presented {} quads", batch.quads.len());
    }
}

//=== GPU Resources =======================================================

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Instances"),
        size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_quad_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Quad Shader"),
        source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(QUAD_SHADER_SRC)),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Quad Pipeline Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Quad Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[QuadInstance::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
