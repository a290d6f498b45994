//! WGPU forward renderer for scenes
//!
//! One pipeline draws every mesh: a global uniform (camera and primary light)
//! at group 0 and a per-mesh uniform (transform and material) at group 1.
//! Mesh buffers are uploaded the first frame a mesh is seen, so meshes that
//! appear later (async model loads) need no extra bookkeeping.

use std::{collections::HashMap, iter, sync::Arc};

use wgpu::util::DeviceExt;
use wgpu::TextureFormat;

use crate::error::XrError;
use crate::gfx::scene::{MeshId, Scene, SceneMesh, Vertex3D};
use crate::wgpu_utils::{binding_types, UniformBuffer};

use super::texture_resource::TextureResource;
use super::uniforms::{GlobalUniform, MeshUniform};

/// GPU copies of one mesh
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform: UniformBuffer<MeshUniform>,
    bind_group: wgpu::BindGroup,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,

    pipeline: wgpu::RenderPipeline,

    global_ubo: UniformBuffer<GlobalUniform>,
    global_bind_group: wgpu::BindGroup,
    mesh_layout: wgpu::BindGroupLayout,
    gpu_meshes: HashMap<MeshId, GpuMesh>,
}

impl RenderEngine {
    /// Creates a renderer drawing into `window`
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, XrError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(XrError::NoSurfaceFormat)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{} {:?} on {}",
            config.width,
            config.height,
            format,
            adapter.get_info().name
        );

        let depth_texture = TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_layout = binding_types::single_uniform_layout(&device, "Globals Bind Group Layout");
        let mesh_layout = binding_types::single_uniform_layout(&device, "Mesh Bind Group Layout");

        let global_ubo = UniformBuffer::new_with_data(&device, &GlobalUniform::from_scene(&Scene::new()));
        let global_bind_group = global_ubo.create_bind_group(&device, &global_layout, "Global Bind Group");

        let pipeline = Self::create_pipeline(&device, format, &global_layout, &mesh_layout);

        Ok(RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            depth_texture,
            format,
            pipeline,
            global_ubo,
            global_bind_group,
            mesh_layout,
            gpu_meshes: HashMap::new(),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        format: TextureFormat,
        global_layout: &wgpu::BindGroupLayout,
        mesh_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[global_layout, mesh_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc()],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }

    fn upload_mesh(&self, id: MeshId, mesh: &SceneMesh, uniform: &MeshUniform) -> GpuMesh {
        let vertices = mesh.geometry.to_vertices();
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = UniformBuffer::new_with_data(&self.device, uniform);
        let bind_group = uniform.create_bind_group(&self.device, &self.mesh_layout, &format!("{} Bind Group", mesh.name));

        log::debug!(
            "Uploaded mesh {} '{}' ({} vertices, {} triangles)",
            id.index(),
            mesh.name,
            mesh.geometry.vertex_count(),
            mesh.geometry.triangle_count()
        );

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.geometry.indices.len() as u32,
            uniform,
            bind_group,
        }
    }

    /// Uploads new meshes and refreshes every uniform
    fn prepare(&mut self, scene: &Scene) {
        self.global_ubo.update_content(&self.queue, GlobalUniform::from_scene(scene));

        for (id, mesh) in scene.mesh_entries() {
            let uniform = MeshUniform::new(mesh, scene.material_for_mesh(mesh));
            match self.gpu_meshes.get_mut(&id) {
                Some(gpu) => {
                    gpu.uniform.update_content(&self.queue, uniform);
                }
                None => {
                    let gpu = self.upload_mesh(id, mesh, &uniform);
                    self.gpu_meshes.insert(id, gpu);
                }
            }
        }
    }

    /// Drops GPU copies of the previous scene's meshes
    pub fn reset_scene_resources(&mut self) {
        self.gpu_meshes.clear();
    }

    /// Renders the scene and then `overlay` on top of it
    ///
    /// Returns the number of meshes drawn. Surface errors are returned to the
    /// caller, which decides whether to reconfigure or skip the frame.
    pub fn render_frame<F>(&mut self, scene: &Scene, overlay: F) -> Result<u32, wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.format),
            ..Default::default()
        });

        self.prepare(scene);

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let [r, g, b, a] = scene.clear_color;
        let mut draw_calls = 0;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.global_bind_group, &[]);

            for (id, mesh) in scene.mesh_entries() {
                if !mesh.visible {
                    continue;
                }
                let Some(gpu) = self.gpu_meshes.get(&id) else {
                    continue;
                };
                if gpu.index_count == 0 {
                    continue;
                }

                render_pass.set_bind_group(1, &gpu.bind_group, &[]);
                render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                render_pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                draw_calls += 1;
            }
        }

        overlay(&self.device, &self.queue, &mut encoder, &surface_texture_view);

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(draw_calls)
    }

    /// Reconfigures the surface and depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reapplies the current configuration after a lost or outdated surface
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }
}
