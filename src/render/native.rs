use std::iter;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytemuck::bytes_of;
use egui::epaint::ImageDelta;
use egui::TextureId;
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use super::common::{present_frame, FrameTarget, GlobalUniform, ObjectConstants};
use super::shared::SHADER;
use crate::scene::{DrawCommand, FrameState, MeshKind, Shading};
use crate::shapes::{create_cone, create_cube, create_sphere, MeshData, VERTEX_STRIDE};
use crate::ui::OverlayFrame;

const SPHERE_RADIUS: f32 = 0.5;
const CONE_RADIUS: f32 = 0.75;
const CONE_HEIGHT: f32 = 1.0;
const MESH_SEGMENTS: u32 = 64;
const INITIAL_OBJECT_SLOTS: usize = 8;

/// GPU renderer backed by wgpu that draws the lit scene and the settings overlay.
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth: DepthBuffer,
    pipelines: Pipelines,
    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_slots: Vec<ObjectSlot>,
    meshes: SceneMeshes,
    overlay: egui_wgpu::Renderer,
}

impl Renderer {
    /// Initializes the GPU renderer for the provided window.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(anyhow!("window has zero area"));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            flags: wgpu::InstanceFlags::default(),
            memory_budget_thresholds: Default::default(),
            backend_options: Default::default(),
        });
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to acquire GPU adapter")?;
        let adapter_info = adapter.get_info();
        info!(
            "using adapter {} ({:?})",
            adapter_info.name, adapter_info.backend
        );

        let device_descriptor = wgpu::DeviceDescriptor {
            label: Some("renderer-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: Default::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
        };
        let (device, queue) = adapter
            .request_device(&device_descriptor)
            .await
            .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|mode| {
                    matches!(
                        mode,
                        wgpu::PresentMode::Mailbox | wgpu::PresentMode::Immediate
                    )
                })
                .unwrap_or(wgpu::PresentMode::Fifo),
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        info!(
            "surface configured: {}x{} {:?} {:?}",
            config.width, config.height, config.format, config.present_mode
        );

        let depth = DepthBuffer::create(&device, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lighting-shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let global_layout = uniform_layout::<GlobalUniform>(&device, "global-bind-layout");
        let object_layout = uniform_layout::<ObjectConstants>(&device, "object-bind-layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("renderer-pipeline-layout"),
            bind_group_layouts: &[&global_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let global_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("global-uniform"),
            size: std::mem::size_of::<GlobalUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("global-bind-group"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        let pipelines = Pipelines::new(&device, &pipeline_layout, &shader, surface_format);
        let meshes = SceneMeshes::new(&device);
        let object_slots = (0..INITIAL_OBJECT_SLOTS)
            .map(|_| ObjectSlot::new(&device, &object_layout))
            .collect();

        let overlay = egui_wgpu::Renderer::new(
            &device,
            surface_format,
            egui_wgpu::RendererOptions::default(),
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            depth,
            pipelines,
            global_buffer,
            global_bind_group,
            object_layout,
            object_slots,
            meshes,
            overlay,
        })
    }

    /// Returns the identifier of the window owned by the renderer.
    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    /// Exposes the inner window for event handling.
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Largest texture the overlay may upload.
    pub fn max_texture_side(&self) -> usize {
        self.device.limits().max_texture_dimension_2d as usize
    }

    /// Resizes the swap chain to match the new dimensions.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthBuffer::create(&self.device, new_size.width, new_size.height);
        debug!("surface resized to {}x{}", new_size.width, new_size.height);
    }

    /// Draws one frame of the scene followed by the overlay, then presents.
    ///
    /// Overlay textures are updated even when the surface is unavailable.
    pub fn render(
        &mut self,
        frame: &FrameState,
        overlay: &OverlayFrame,
    ) -> Result<(), wgpu::SurfaceError> {
        present_frame(self, frame, overlay)
    }

    fn ensure_object_slots(&mut self, count: usize) {
        while self.object_slots.len() < count {
            self.object_slots
                .push(ObjectSlot::new(&self.device, &self.object_layout));
        }
    }
}

impl FrameTarget for Renderer {
    type Error = wgpu::SurfaceError;

    fn upload_texture(&mut self, id: TextureId, delta: &ImageDelta) {
        self.overlay
            .update_texture(&self.device, &self.queue, id, delta);
    }

    fn draw_frame(
        &mut self,
        frame: &FrameState,
        overlay: &OverlayFrame,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("renderer-encoder"),
            });

        self.queue.write_buffer(
            &self.global_buffer,
            0,
            bytes_of(&GlobalUniform::from_frame(frame)),
        );
        self.ensure_object_slots(frame.draws.len());
        for (slot, draw) in self.object_slots.iter().zip(frame.draws.iter()) {
            let constants = ObjectConstants::new(draw.model, draw.shading);
            self.queue.write_buffer(&slot.buffer, 0, bytes_of(&constants));
        }

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: overlay.pixels_per_point,
        };
        let overlay_commands = self.overlay.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &overlay.primitives,
            &screen,
        );

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: frame.background.x as f64,
                            g: frame.background.y as f64,
                            b: frame.background.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.global_bind_group, &[]);
            for (slot, draw) in self.object_slots.iter().zip(frame.draws.iter()) {
                let mesh = self.meshes.get(draw.mesh);
                pass.set_pipeline(self.pipelines.select(draw, frame.draw_as_points));
                pass.set_bind_group(1, &slot.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex.slice(..));
                if frame.draw_as_points {
                    pass.draw(0..mesh.vertex_count, 0..1);
                } else {
                    pass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("overlay-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.overlay
                .render(&mut pass.forget_lifetime(), &overlay.primitives, &screen);
        }

        self.queue
            .submit(overlay_commands.into_iter().chain(iter::once(encoder.finish())));
        output.present();
        Ok(())
    }

    fn free_texture(&mut self, id: &TextureId) {
        self.overlay.free_texture(id);
    }
}

fn uniform_layout<T>(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
            },
            count: None,
        }],
    })
}

/// Lit and unlit shading, each as filled triangles and as points.
struct Pipelines {
    lit: wgpu::RenderPipeline,
    lit_points: wgpu::RenderPipeline,
    unlit: wgpu::RenderPipeline,
    unlit_points: wgpu::RenderPipeline,
}

impl Pipelines {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
    ) -> Self {
        let build = |label, fragment, topology| {
            create_pipeline(device, layout, shader, format, label, fragment, topology)
        };
        Self {
            lit: build("lit-pipeline", "fs_lit", wgpu::PrimitiveTopology::TriangleList),
            lit_points: build("lit-points-pipeline", "fs_lit", wgpu::PrimitiveTopology::PointList),
            unlit: build("unlit-pipeline", "fs_unlit", wgpu::PrimitiveTopology::TriangleList),
            unlit_points: build(
                "unlit-points-pipeline",
                "fs_unlit",
                wgpu::PrimitiveTopology::PointList,
            ),
        }
    }

    fn select(&self, draw: &DrawCommand, points: bool) -> &wgpu::RenderPipeline {
        match (draw.shading, points) {
            (Shading::Lit, false) => &self.lit,
            (Shading::Lit, true) => &self.lit_points,
            (Shading::Unlit(_), false) => &self.unlit,
            (Shading::Unlit(_), true) => &self.unlit_points,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    label: &str,
    fragment_entry: &str,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let cull_mode = match topology {
        wgpu::PrimitiveTopology::TriangleList => Some(wgpu::Face::Back),
        _ => None,
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: (VERTEX_STRIDE * std::mem::size_of::<f32>()) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: (3 * std::mem::size_of::<f32>()) as u64,
                        shader_location: 1,
                    },
                ],
            }],
        },
        primitive: wgpu::PrimitiveState {
            topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthBuffer::FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        multiview: None,
        cache: None,
    })
}

/// Uniform buffer and bind group reused by the draw at the same index every frame.
struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object-uniform"),
            size: std::mem::size_of::<ObjectConstants>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object-bind-group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

struct SceneMeshes {
    cube: MeshBuffers,
    sphere: MeshBuffers,
    cone: MeshBuffers,
}

impl SceneMeshes {
    fn new(device: &wgpu::Device) -> Self {
        Self {
            cube: MeshBuffers::from_mesh(device, &create_cube(1.0, 1.0, 1.0), "cube"),
            sphere: MeshBuffers::from_mesh(
                device,
                &create_sphere(SPHERE_RADIUS, MESH_SEGMENTS),
                "sphere",
            ),
            cone: MeshBuffers::from_mesh(
                device,
                &create_cone(CONE_RADIUS, CONE_HEIGHT, MESH_SEGMENTS),
                "cone",
            ),
        }
    }

    fn get(&self, kind: MeshKind) -> &MeshBuffers {
        match kind {
            MeshKind::Cube => &self.cube,
            MeshKind::Sphere => &self.sphere,
            MeshKind::Cone => &self.cone,
        }
    }
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    vertex_count: u32,
    index_count: u32,
}

impl MeshBuffers {
    fn from_mesh(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex,
            index,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
        }
    }
}

struct DepthBuffer {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthBuffer {
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    fn create(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}
