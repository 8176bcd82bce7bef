//! wgpu implementation of [`DisplaySurface`]
//!
//! Two pipelines share one shader module: `blit` samples an uploaded image,
//! `fill` draws vertex colors. Draw calls are recorded between
//! `begin_frame` and `present` and replayed in a single render pass.

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use super::surface::{DisplaySurface, ImageId, TextOverlay};
use super::transform::TRANSFORM;
use super::vertex::{BlitVertex, FillVertex};
use crate::error::Error;

struct GpuImage {
    // Kept alive for the bind group
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

enum PendingDraw {
    Blit {
        image: ImageId,
        buffer: wgpu::Buffer,
        count: u32,
    },
    Fill {
        buffer: wgpu::Buffer,
        count: u32,
    },
}

pub struct GpuSurface {
    window: Arc<Window>,
    title: String,
    overlay: String,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    blit_pipeline: wgpu::RenderPipeline,
    fill_pipeline: wgpu::RenderPipeline,
    transform_bind_group: wgpu::BindGroup,
    image_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    images: HashMap<ImageId, GpuImage>,
    next_id: u32,
    clear: wgpu::Color,
    pending: Vec<PendingDraw>,
}

impl GpuSurface {
    pub async fn new(window: Arc<Window>, title: &str) -> Result<Self, Error> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| Error::Surface(format!("create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Surface(format!("no suitable adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scroller-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| Error::Surface(format!("request device: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Surface("surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("transform"),
            contents: bytemuck::cast_slice(&TRANSFORM),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transform_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("transform_bind_group"),
            layout: &transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let image_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("image_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("image_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let blit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blit_pipeline_layout"),
            bind_group_layouts: &[&transform_layout, &image_layout],
            immediate_size: 0,
        });
        let fill_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fill_pipeline_layout"),
            bind_group_layouts: &[&transform_layout],
            immediate_size: 0,
        });

        let blit_pipeline = create_pipeline(
            &device,
            &shader,
            &blit_layout,
            "blit_pipeline",
            ("vs_blit", "fs_blit"),
            BlitVertex::desc(),
            config.format,
        );
        let fill_pipeline = create_pipeline(
            &device,
            &shader,
            &fill_layout,
            "fill_pipeline",
            ("vs_fill", "fs_fill"),
            FillVertex::desc(),
            config.format,
        );

        Ok(Self {
            window,
            title: title.to_owned(),
            overlay: String::new(),
            surface,
            device,
            queue,
            config,
            blit_pipeline,
            fill_pipeline,
            transform_bind_group,
            image_layout,
            sampler,
            images: HashMap::new(),
            next_id: 1,
            clear: wgpu::Color::TRANSPARENT,
            pending: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn vertex_buffer(&self, label: &str, contents: &[u8]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    label: &str,
    (vs, fs): (&str, &str),
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

impl DisplaySurface for GpuSurface {
    fn create_image(&mut self, width: u32, height: u32, rgba: &[u8]) -> ImageId {
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("image"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            texture.as_image_copy(),
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("image_bind_group"),
            layout: &self.image_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let id = ImageId(self.next_id);
        self.next_id += 1;
        self.images.insert(
            id,
            GpuImage {
                _texture: texture,
                bind_group,
            },
        );
        log::debug!("Uploaded image {:?} ({}x{})", id, width, height);
        id
    }

    fn destroy_image(&mut self, id: ImageId) {
        if self.images.remove(&id).is_none() {
            log::error!("Image {:?} destroyed twice", id);
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn begin_frame(&mut self, clear: [f32; 4]) {
        let [r, g, b, a] = clear.map(f64::from);
        self.clear = wgpu::Color { r, g, b, a };
        self.pending.clear();
    }

    fn draw_blit(&mut self, image: ImageId, vertices: &[BlitVertex]) {
        let buffer = self.vertex_buffer("blit_vertices", bytemuck::cast_slice(vertices));
        self.pending.push(PendingDraw::Blit {
            image,
            buffer,
            count: vertices.len() as u32,
        });
    }

    fn draw_fill(&mut self, vertices: &[FillVertex]) {
        let buffer = self.vertex_buffer("fill_vertices", bytemuck::cast_slice(vertices));
        self.pending.push(PendingDraw::Fill {
            buffer,
            count: vertices.len() as u32,
        });
    }

    fn present(&mut self) -> Result<(), Error> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.pending.clear();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                self.pending.clear();
                return Ok(());
            }
            Err(e) => return Err(Error::Surface(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_bind_group(0, &self.transform_bind_group, &[]);
            for draw in &self.pending {
                match draw {
                    PendingDraw::Blit {
                        image,
                        buffer,
                        count,
                    } => {
                        let Some(gpu_image) = self.images.get(image) else {
                            log::error!("Draw with released image {:?}", image);
                            continue;
                        };
                        render_pass.set_pipeline(&self.blit_pipeline);
                        render_pass.set_bind_group(1, &gpu_image.bind_group, &[]);
                        render_pass.set_vertex_buffer(0, buffer.slice(..));
                        render_pass.draw(0..*count, 0..1);
                    }
                    PendingDraw::Fill { buffer, count } => {
                        render_pass.set_pipeline(&self.fill_pipeline);
                        render_pass.set_vertex_buffer(0, buffer.slice(..));
                        render_pass.draw(0..*count, 0..1);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.pending.clear();

        Ok(())
    }
}

impl TextOverlay for GpuSurface {
    /// No font atlas here; the text goes into the window title
    fn draw_text(&mut self, _canvas: (f32, f32), text: &str) {
        if self.overlay != text {
            self.overlay = text.to_owned();
            self.window.set_title(&format!("{} | {}", self.title, text));
        }
    }
}
