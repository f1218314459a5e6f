use std::path::PathBuf;

use clap::Parser;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use showcase_core::animate::Interpolator;
use showcase_core::camera::{Camera, OrbitState};
use showcase_core::constants::{
    model_offset_vec3, FILL_LIGHT_DIR, KEY_LIGHT_DIR, WHEEL_LINE_PX,
};
use showcase_core::mesh::{product_watch, ProductMesh};
use showcase_core::scroll::ScrollState;
use showcase_core::view::{default_deck, ShadingParams, ViewDeck, SHADING_STANDARD};

#[derive(Parser, Debug)]
#[command(name = "showcase", about = "Native preview of the scrollcase product showcase")]
struct Args {
    /// Path to a view deck JSON file (an array of view descriptors)
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Isolate a single named part of the product model
    #[arg(long)]
    part: Option<String>,

    /// View to start on
    #[arg(long, default_value_t = 0)]
    view: usize,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn load_deck(args: &Args) -> anyhow::Result<ViewDeck> {
    match &args.deck {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(ViewDeck::from_json(&text)?)
        }
        None => Ok(default_deck()),
    }
}

const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    key_light: [f32; 4],
    fill_light: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct BackgroundUniforms {
    top: [f32; 4],
    bottom: [f32; 4],
    resolution: [f32; 2],
    time: f32,
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    _pad0: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    model: [f32; 16],
    color: [f32; 4],
    params: [f32; 4],
}

/// What one frame of the preview renders, already interpolated.
struct SceneFrame {
    rotation: Vec3,
    zoom: f32,
    background: showcase_core::view::Background,
    shading: ShadingParams,
    wireframe: bool,
    time: f32,
}

struct PartDraw {
    name: String,
    index_start: u32,
    index_count: u32,
    edge_start: u32,
    edge_count: u32,
    base_vertex: i32,
}

// The preview renders the same scene and background passes as the web
// frontend but resolves the HDR target straight to the swapchain, skipping
// the bloom chain.
struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    background_pipeline: wgpu::RenderPipeline,
    background_uniforms: wgpu::Buffer,
    background_bg: wgpu::BindGroup,

    scene_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    scene_uniforms: wgpu::Buffer,
    scene_bg: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    edge_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    parts: Vec<PartDraw>,

    resolve_pipeline: wgpu::RenderPipeline,
    resolve_uniforms: wgpu::Buffer,
    resolve_bgl: wgpu::BindGroupLayout,
    resolve_bg: wgpu::BindGroup,
    linear_sampler: wgpu::Sampler,
    hdr_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,

    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, mesh: &ProductMesh) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        // geometry
        let mut vertices: Vec<showcase_core::mesh::Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut edges: Vec<u32> = Vec::new();
        let mut parts = Vec::with_capacity(mesh.parts().len());
        for part in mesh.parts() {
            parts.push(PartDraw {
                name: part.name.clone(),
                index_start: indices.len() as u32,
                index_count: part.indices.len() as u32,
                edge_start: edges.len() as u32,
                edge_count: part.edges.len() as u32,
                base_vertex: vertices.len() as i32,
            });
            vertices.extend_from_slice(&part.vertices);
            indices.extend_from_slice(&part.indices);
            edges.extend_from_slice(&part.edges);
        }
        use wgpu::util::DeviceExt;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vb"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_ib"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_edges"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<InstanceData>() * parts.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // scene pipelines
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(showcase_core::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniforms.as_entire_binding(),
            }],
        });
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let scene_pipeline = make_scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "fs_main",
            wgpu::PrimitiveTopology::TriangleList,
        );
        let wire_pipeline = make_scene_pipeline(
            &device,
            &scene_pl,
            &scene_shader,
            "fs_wire",
            wgpu::PrimitiveTopology::LineList,
        );

        // background layer
        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(showcase_core::BACKGROUND_WGSL.into()),
        });
        let background_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let background_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("background_uniforms"),
            size: std::mem::size_of::<BackgroundUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let background_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background_bg"),
            layout: &background_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: background_uniforms.as_entire_binding(),
            }],
        });
        let background_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pl"),
            bind_group_layouts: &[&background_bgl],
            push_constant_ranges: &[],
        });
        let background_pipeline = make_fullscreen_pipeline(
            &device,
            &background_pl,
            &background_shader,
            "fs_main",
            HDR_FORMAT,
        );

        // HDR resolve to the swapchain
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(showcase_core::POST_WGSL.into()),
        });
        let resolve_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("resolve_bgl"),
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
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let resolve_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("resolve_uniforms"),
            size: std::mem::size_of::<PostUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let resolve_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("resolve_pl"),
            bind_group_layouts: &[&resolve_bgl],
            push_constant_ranges: &[],
        });
        let resolve_pipeline =
            make_fullscreen_pipeline(&device, &resolve_pl, &post_shader, "fs_resolve", format);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let (hdr_view, depth_view) =
            create_targets(&device, config.width, config.height);
        let resolve_bg = make_resolve_bind_group(
            &device,
            &resolve_bgl,
            &hdr_view,
            &linear_sampler,
            &resolve_uniforms,
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            background_pipeline,
            background_uniforms,
            background_bg,
            scene_pipeline,
            wire_pipeline,
            scene_uniforms,
            scene_bg,
            vertex_buffer,
            index_buffer,
            edge_buffer,
            instance_buffer,
            parts,
            resolve_pipeline,
            resolve_uniforms,
            resolve_bgl,
            resolve_bg,
            linear_sampler,
            hdr_view,
            depth_view,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        let (hdr_view, depth_view) = create_targets(&self.device, self.width, self.height);
        self.hdr_view = hdr_view;
        self.depth_view = depth_view;
        self.resolve_bg = make_resolve_bind_group(
            &self.device,
            &self.resolve_bgl,
            &self.hdr_view,
            &self.linear_sampler,
            &self.resolve_uniforms,
        );
    }

    fn render(&mut self, frame_in: &SceneFrame) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let camera = Camera::showcase(aspect, frame_in.zoom);
        self.queue.write_buffer(
            &self.scene_uniforms,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: camera.view_proj().to_cols_array_2d(),
                eye: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
                key_light: [KEY_LIGHT_DIR[0], KEY_LIGHT_DIR[1], KEY_LIGHT_DIR[2], 0.0],
                fill_light: [FILL_LIGHT_DIR[0], FILL_LIGHT_DIR[1], FILL_LIGHT_DIR[2], 0.0],
            }),
        );
        self.queue.write_buffer(
            &self.background_uniforms,
            0,
            bytemuck::bytes_of(&BackgroundUniforms {
                top: [
                    frame_in.background.top[0],
                    frame_in.background.top[1],
                    frame_in.background.top[2],
                    1.0,
                ],
                bottom: [
                    frame_in.background.bottom[0],
                    frame_in.background.bottom[1],
                    frame_in.background.bottom[2],
                    1.0,
                ],
                resolution: [self.width as f32, self.height as f32],
                time: frame_in.time,
                _pad: 0.0,
            }),
        );
        self.queue.write_buffer(
            &self.resolve_uniforms,
            0,
            bytemuck::bytes_of(&PostUniforms {
                resolution: [self.width as f32, self.height as f32],
                time: frame_in.time,
                _pad0: 0.0,
                blur_dir: [0.0, 0.0],
                bloom_strength: 0.0,
                threshold: 0.0,
            }),
        );

        let model = Mat4::from_translation(model_offset_vec3())
            * Mat4::from_euler(
                glam::EulerRot::XYZ,
                frame_in.rotation.x,
                frame_in.rotation.y,
                frame_in.rotation.z,
            );
        let mut instances: SmallVec<[InstanceData; 8]> = SmallVec::new();
        for part in &self.parts {
            let s = part_shading(&part.name, frame_in.shading);
            instances.push(InstanceData {
                model: model.to_cols_array(),
                color: [s.color.x, s.color.y, s.color.z, 1.0],
                params: [s.roughness, s.metalness, s.clearcoat, s.mode as f32],
            });
        }
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("background_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.background_pipeline);
            rpass.set_bind_group(0, &self.background_bg, &[]);
            rpass.draw(0..3, 0..1);
        }
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            if frame_in.wireframe {
                rpass.set_pipeline(&self.wire_pipeline);
                rpass.set_index_buffer(self.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for (i, part) in self.parts.iter().enumerate() {
                    rpass.draw_indexed(
                        part.edge_start..part.edge_start + part.edge_count,
                        part.base_vertex,
                        i as u32..i as u32 + 1,
                    );
                }
            } else {
                rpass.set_pipeline(&self.scene_pipeline);
                rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for (i, part) in self.parts.iter().enumerate() {
                    rpass.draw_indexed(
                        part.index_start..part.index_start + part.index_count,
                        part.base_vertex,
                        i as u32..i as u32 + 1,
                    );
                }
            }
        }
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("resolve_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.resolve_pipeline);
            rpass.set_bind_group(0, &self.resolve_bg, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_targets(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::TextureView, wgpu::TextureView) {
    let color = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("hdr_tex"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: HDR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    (
        color.create_view(&wgpu::TextureViewDescriptor::default()),
        depth.create_view(&wgpu::TextureViewDescriptor::default()),
    )
}

fn make_resolve_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    hdr_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("resolve_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(hdr_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}

fn make_fullscreen_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("fullscreen_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<showcase_core::mesh::Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 5,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 64,
                    shader_location: 6,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 80,
                    shader_location: 7,
                },
            ],
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

/// Hardware keeps its character regardless of the view's tint; mirrors the
/// web renderer.
fn part_shading(name: &str, base: ShadingParams) -> ShadingParams {
    if base.mode != SHADING_STANDARD {
        return base;
    }
    let mut s = base;
    match name {
        "bezel" | "crown" => {
            s.metalness = s.metalness.max(0.85);
            s.roughness *= 0.7;
        }
        "strap_upper" | "strap_lower" => {
            s.roughness = s.roughness.max(0.5);
            s.metalness *= 0.4;
        }
        _ => {}
    }
    s
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let deck = load_deck(&args)?;
    let mut mesh = product_watch();
    if let Some(name) = &args.part {
        if !mesh.retain_part(name) {
            let available = product_watch().part_names().collect::<Vec<_>>().join(", ");
            anyhow::bail!("unknown part {name:?}; available: {available}");
        }
        log::info!("isolating part {name:?}");
    }

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("scrollcase")
        .with_inner_size(LogicalSize::new(args.width, args.height))
        .build(&event_loop)
        .expect("window");

    let mut state = pollster::block_on(GpuState::new(&window, &mesh)).expect("gpu");

    // synthetic scroll: one window height per view, driven by the wheel
    let start_view = args.view.min(deck.len() - 1);
    let mut offset_px = start_view as f32 * state.height as f32;
    let mut scroll = ScrollState::default();
    let mut interpolator = Interpolator::new();
    let mut orbit = OrbitState::default();
    let mut cursor = (0.0_f32, 0.0_f32);
    let mut shown_index: Option<usize> = None;
    let start = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => state.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::MouseWheel { delta, .. },
                ..
            } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                let max = deck.len() as f32 * state.height as f32 - 1.0;
                offset_px = (offset_px - dy).clamp(0.0, max.max(0.0));
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event: key, .. },
                ..
            } => {
                if key.state == ElementState::Pressed {
                    let h = state.height as f32;
                    let current = scroll.view_index;
                    let target = match key.logical_key {
                        Key::Named(NamedKey::ArrowDown) | Key::Named(NamedKey::PageDown) => {
                            Some((current + 1).min(deck.len() - 1))
                        }
                        Key::Named(NamedKey::ArrowUp) | Key::Named(NamedKey::PageUp) => {
                            Some(current.saturating_sub(1))
                        }
                        Key::Named(NamedKey::Home) => Some(0),
                        Key::Named(NamedKey::End) => Some(deck.len() - 1),
                        Key::Named(NamedKey::Escape) => {
                            elwt.exit();
                            None
                        }
                        _ => None,
                    };
                    if let Some(t) = target {
                        offset_px = t as f32 * h;
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                cursor = (position.x as f32, position.y as f32);
                orbit.drag_to(cursor.0, cursor.1);
            }
            Event::WindowEvent {
                event:
                    WindowEvent::MouseInput {
                        state: button_state,
                        button: MouseButton::Left,
                        ..
                    },
                ..
            } => match button_state {
                ElementState::Pressed => {
                    if deck.view(scroll.view_index).orbit {
                        orbit.begin(cursor.0, cursor.1);
                    }
                }
                ElementState::Released => orbit.end(),
            },
            Event::AboutToWait => {
                scroll.apply(offset_px, state.height as f32, deck.len());
                let view = deck.view(scroll.view_index);
                if shown_index != Some(scroll.view_index) {
                    shown_index = Some(scroll.view_index);
                    state
                        .window
                        .set_title(&format!("scrollcase - {}", view.title));
                    log::info!("view {}: {}", scroll.view_index, view.title);
                }
                if !view.orbit && !orbit.is_dragging() {
                    orbit.settle(1.0 / 60.0);
                }
                let params = interpolator.sample(&deck, scroll);
                let frame = SceneFrame {
                    rotation: params.rotation + orbit.rotation_offset(),
                    zoom: params.zoom,
                    background: params.background,
                    shading: view.material.shading(),
                    wireframe: view.wireframe,
                    time: start.elapsed().as_secs_f32(),
                };
                match state.render(&frame) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
    Ok(())
}
