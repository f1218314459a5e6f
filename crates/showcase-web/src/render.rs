use glam::{Mat4, Vec3};
use showcase_core::camera::Camera;
use showcase_core::constants::{
    model_offset_vec3, BLOOM_STRENGTH, BLOOM_THRESHOLD, FILL_LIGHT_DIR, KEY_LIGHT_DIR,
};
use showcase_core::mesh::{product_watch, MeshPart, ProductMesh};
use showcase_core::view::{Background, ShadingParams, SHADING_STANDARD};
use smallvec::SmallVec;
use web_sys as web;
use wgpu::util::DeviceExt;

pub(crate) mod background;
pub(crate) mod helpers;
pub(crate) mod post;
pub(crate) mod targets;

use background::BackgroundUniforms;
use targets::{RenderTargets, HDR_FORMAT};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    key_light: [f32; 4],
    fill_light: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    _pad0: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceData {
    model: [f32; 16],
    color: [f32; 4],
    params: [f32; 4],
}

/// Everything the renderer needs for one frame, already interpolated.
pub struct SceneFrame {
    pub rotation: Vec3,
    pub zoom: f32,
    pub background: Background,
    pub shading: ShadingParams,
    pub wireframe: bool,
    pub post: bool,
    pub time: f32,
}

/// Draw ranges for one named part inside the shared buffers.
struct PartDraw {
    name: String,
    index_start: u32,
    index_count: u32,
    edge_start: u32,
    edge_count: u32,
    base_vertex: i32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    background: background::BackgroundResources,

    scene_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    edge_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    parts: Vec<PartDraw>,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    bg_hdr: wgpu::BindGroup,
    bg_blur_from_a: wgpu::BindGroup,
    bg_blur_from_b: wgpu::BindGroup,
    bg_bloom_final: wgpu::BindGroup,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
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
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // geometry, concatenated into shared buffers with per-part ranges
        let mesh = product_watch();
        let (vertex_buffer, index_buffer, edge_buffer, parts) = upload_mesh(&device, &mesh);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<InstanceData>() * parts.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

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
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
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

        let background = background::create_background_resources(&device, HDR_FORMAT);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(showcase_core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let targets = RenderTargets::create(&device, width, height);
        let (bg_hdr, bg_blur_from_a, bg_blur_from_b, bg_bloom_final) =
            make_post_bind_groups(&device, &post, &targets, &linear_sampler);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            background,
            scene_pipeline,
            wire_pipeline,
            scene_uniform_buffer,
            scene_bind_group,
            vertex_buffer,
            index_buffer,
            edge_buffer,
            instance_buffer,
            parts,
            targets,
            linear_sampler,
            post,
            bg_hdr,
            bg_blur_from_a,
            bg_blur_from_b,
            bg_bloom_final,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            let (bg_hdr, bg_blur_from_a, bg_blur_from_b, bg_bloom_final) =
                make_post_bind_groups(&self.device, &self.post, &self.targets, &self.linear_sampler);
            self.bg_hdr = bg_hdr;
            self.bg_blur_from_a = bg_blur_from_a;
            self.bg_blur_from_b = bg_blur_from_b;
            self.bg_bloom_final = bg_bloom_final;
        }
    }

    pub fn render(&mut self, frame_in: &SceneFrame) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.write_uniforms(frame_in);

        // background gradient straight into the HDR target
        post::blit(
            &mut encoder,
            "background_pass",
            &self.targets.hdr_view,
            wgpu::Color::BLACK,
            &self.background.pipeline,
            &self.background.bind_group,
            None,
        );

        // product on top, depth-tested
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
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

        if frame_in.post {
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.bright_pipeline,
                &self.bg_hdr,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_h_pass",
                &self.targets.bloom_b_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.bg_blur_from_a,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_v_pass",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.bg_blur_from_b,
                None,
            );
            post::blit(
                &mut encoder,
                "composite_pass",
                &view,
                wgpu::Color::BLACK,
                &self.post.composite_pipeline,
                &self.bg_hdr,
                Some(&self.bg_bloom_final),
            );
        } else {
            post::blit(
                &mut encoder,
                "resolve_pass",
                &view,
                wgpu::Color::BLACK,
                &self.post.resolve_pipeline,
                &self.bg_hdr,
                None,
            );
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_uniforms(&mut self, frame_in: &SceneFrame) {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let camera = Camera::showcase(aspect, frame_in.zoom);
        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: camera.view_proj().to_cols_array_2d(),
                eye: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
                key_light: pad_dir(KEY_LIGHT_DIR),
                fill_light: pad_dir(FILL_LIGHT_DIR),
            }),
        );

        self.queue.write_buffer(
            &self.background.uniform_buffer,
            0,
            bytemuck::bytes_of(&BackgroundUniforms {
                top: pad_rgb(frame_in.background.top),
                bottom: pad_rgb(frame_in.background.bottom),
                resolution: [self.width as f32, self.height as f32],
                time: frame_in.time,
                _pad: 0.0,
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

        let (bw, bh) = self.targets.bloom_size();
        let post_uniforms = |resolution: [f32; 2], blur_dir: [f32; 2]| PostUniforms {
            resolution,
            time: frame_in.time,
            _pad0: 0.0,
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
        };
        self.queue.write_buffer(
            &self.post.uniform_main,
            0,
            bytemuck::bytes_of(&post_uniforms(
                [self.width as f32, self.height as f32],
                [0.0, 0.0],
            )),
        );
        self.queue.write_buffer(
            &self.post.uniform_blur_h,
            0,
            bytemuck::bytes_of(&post_uniforms([bw as f32, bh as f32], [1.0, 0.0])),
        );
        self.queue.write_buffer(
            &self.post.uniform_blur_v,
            0,
            bytemuck::bytes_of(&post_uniforms([bw as f32, bh as f32], [0.0, 1.0])),
        );
    }
}

/// Hardware keeps its character regardless of the view's tint: bezels and
/// crowns read as polished metal, straps as matte.
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

fn pad_dir(d: [f32; 3]) -> [f32; 4] {
    [d[0], d[1], d[2], 0.0]
}

fn pad_rgb(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}

fn upload_mesh(
    device: &wgpu::Device,
    mesh: &ProductMesh,
) -> (wgpu::Buffer, wgpu::Buffer, wgpu::Buffer, Vec<PartDraw>) {
    let mut vertices: Vec<showcase_core::mesh::Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut edges: Vec<u32> = Vec::new();
    let mut parts = Vec::with_capacity(mesh.parts().len());
    for part in mesh.parts() {
        parts.push(part_draw(part, vertices.len(), indices.len(), edges.len()));
        vertices.extend_from_slice(&part.vertices);
        indices.extend_from_slice(&part.indices);
        edges.extend_from_slice(&part.edges);
    }
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
    (vertex_buffer, index_buffer, edge_buffer, parts)
}

fn part_draw(part: &MeshPart, vertex_base: usize, index_base: usize, edge_base: usize) -> PartDraw {
    PartDraw {
        name: part.name.clone(),
        index_start: index_base as u32,
        index_count: part.indices.len() as u32,
        edge_start: edge_base as u32,
        edge_count: part.edges.len() as u32,
        base_vertex: vertex_base as i32,
    }
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: mesh vertices
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
        // slot 1: per-part instance data (model matrix columns, color, params)
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

fn make_post_bind_groups(
    device: &wgpu::Device,
    post: &post::PostResources,
    targets: &RenderTargets,
    sampler: &wgpu::Sampler,
) -> (wgpu::BindGroup, wgpu::BindGroup, wgpu::BindGroup, wgpu::BindGroup) {
    let group0 = |label: &str, view: &wgpu::TextureView, uniforms: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &post.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
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
    };
    let bg_hdr = group0("bg_hdr", &targets.hdr_view, &post.uniform_main);
    let bg_blur_from_a = group0("bg_blur_from_a", &targets.bloom_a_view, &post.uniform_blur_h);
    let bg_blur_from_b = group0("bg_blur_from_b", &targets.bloom_b_view, &post.uniform_blur_v);
    let bg_bloom_final = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom_final"),
        layout: &post.bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    (bg_hdr, bg_blur_from_a, bg_blur_from_b, bg_bloom_final)
}
