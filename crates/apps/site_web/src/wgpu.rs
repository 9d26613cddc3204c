#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use gpu::{LightBlock, MAX_LIGHTS, MeshBatch, RenderFrame};
    use std::borrow::Cow;
    use viewer::FrameSink;

    use crate::error::SiteError;

    const MESH_SHADER: &str = r#"
struct Light {
    position_kind: vec4<f32>,
    color: vec4<f32>,
    cone: vec4<f32>,
};

struct Globals {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient_count: vec4<f32>,
    lights: array<Light, 8>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
    @location(3) pbr: vec2<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
    @location(3) pbr: vec2<f32>,
) -> VsOut {
    let world = globals.model * vec4<f32>(position, 1.0);
    // Uniform scale only, so the model matrix also carries normals.
    let n = (globals.model * vec4<f32>(normal, 0.0)).xyz;
    return VsOut(globals.view_proj * world, world.xyz, n, color, pbr);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let v = normalize(globals.camera_pos.xyz - in.world_pos);
    let metalness = in.pbr.x;
    let roughness = clamp(in.pbr.y, 0.04, 1.0);
    let diffuse_color = in.color * (1.0 - metalness);
    let f0 = mix(vec3<f32>(0.04), in.color, metalness);
    let shininess = mix(128.0, 4.0, roughness);

    var rgb = globals.ambient_count.rgb * in.color;
    let count = u32(globals.ambient_count.w);
    for (var i = 0u; i < count; i = i + 1u) {
        let light = globals.lights[i];
        let kind = light.position_kind.w;
        var l = normalize(light.position_kind.xyz);
        var cone = 1.0;
        if (kind > 0.5) {
            l = normalize(light.position_kind.xyz - in.world_pos);
        }
        if (kind > 1.5) {
            let axis = normalize(-light.position_kind.xyz);
            cone = smoothstep(light.cone.x, max(light.cone.y, light.cone.x + 1e-4), dot(-l, axis));
        }
        let ndotl = max(dot(n, l), 0.0);
        let h = normalize(l + v);
        let spec = pow(max(dot(n, h), 0.0), shininess);
        rgb = rgb + light.color.rgb * cone * (diffuse_color * ndotl + f0 * spec * ndotl);
    }
    return vec4<f32>(rgb, 1.0);
}
"#;

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Vertex {
        position: [f32; 3],
        normal: [f32; 3],
        color: [f32; 3],
        pbr: [f32; 2],
    }

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct GpuLight {
        position_kind: [f32; 4],
        color: [f32; 4],
        cone: [f32; 4],
    }

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Globals {
        view_proj: [[f32; 4]; 4],
        model: [[f32; 4]; 4],
        camera_pos: [f32; 4],
        ambient_count: [f32; 4],
        lights: [GpuLight; MAX_LIGHTS],
    }

    impl Globals {
        fn from_frame(frame: &RenderFrame) -> Self {
            let c = frame.camera_position;
            Self {
                view_proj: frame.view_proj,
                model: frame.model,
                camera_pos: [c[0], c[1], c[2], frame.opacity],
                ambient_count: frame.lights.ambient_count,
                lights: gpu_lights(&frame.lights),
            }
        }
    }

    fn gpu_lights(block: &LightBlock) -> [GpuLight; MAX_LIGHTS] {
        block.lights.map(|l| GpuLight {
            position_kind: l.position_kind,
            color: l.color,
            cone: l.cone,
        })
    }

    struct GpuMesh {
        vertex_buffer: ::wgpu::Buffer,
        index_buffer: ::wgpu::Buffer,
        index_count: u32,
        generation: u64,
    }

    pub struct WgpuBackend {
        _instance: &'static ::wgpu::Instance,
        surface: ::wgpu::Surface<'static>,
        device: ::wgpu::Device,
        queue: ::wgpu::Queue,
        config: ::wgpu::SurfaceConfiguration,
        pipeline: ::wgpu::RenderPipeline,
        uniform_buffer: ::wgpu::Buffer,
        uniform_bind_group: ::wgpu::BindGroup,
        depth_view: ::wgpu::TextureView,
        mesh: Option<GpuMesh>,
    }

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("site-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: ::wgpu::TextureFormat::Depth24Plus,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    pub async fn init_backend(
        canvas: web_sys::HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<WgpuBackend, SiteError> {
        // `wgpu::Surface` must not outlive its `wgpu::Instance`; the instance
        // lives as long as the page.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| SiteError::Gpu(format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SiteError::Gpu(format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("site-wgpu-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| SiteError::Gpu(format!("device error: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SiteError::Gpu("surface reports no formats".to_string()))?;
        // Transparent canvas: prefer premultiplied alpha when offered.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&::wgpu::CompositeAlphaMode::PreMultiplied)
        {
            ::wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(::wgpu::CompositeAlphaMode::Auto)
        };

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("site-mesh-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(MESH_SHADER)),
        });

        let uniform_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("site-globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
                label: Some("site-globals-bgl"),
                entries: &[::wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: ::wgpu::BindingType::Buffer {
                        ty: ::wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("site-globals-bg"),
            layout: &uniform_bind_group_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("site-mesh-pipeline-layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some("site-mesh-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: ::wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Vertex,
                    attributes: &::wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x3,
                        3 => Float32x2,
                    ],
                }],
            },
            fragment: Some(::wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(::wgpu::BlendState::REPLACE),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                // Imported assets do not agree on winding.
                cull_mode: None,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(::wgpu::DepthStencilState {
                format: ::wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: true,
                depth_compare: ::wgpu::CompareFunction::Less,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        tracing::info!(?format, ?alpha_mode, width, height, "wgpu backend ready");

        Ok(WgpuBackend {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            mesh: None,
        })
    }

    impl WgpuBackend {
        pub fn resize(&mut self, width: u32, height: u32) {
            self.config.width = width.max(1);
            self.config.height = height.max(1);
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }

        fn draw(&self, frame: &RenderFrame) -> Result<(), SiteError> {
            let surface_texture = self
                .surface
                .get_current_texture()
                .map_err(|e| SiteError::Gpu(format!("surface acquire failed: {e}")))?;
            let view = surface_texture
                .texture
                .create_view(&::wgpu::TextureViewDescriptor::default());

            self.queue.write_buffer(
                &self.uniform_buffer,
                0,
                bytemuck::bytes_of(&Globals::from_frame(frame)),
            );

            let mut encoder = self
                .device
                .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                    label: Some("site-mesh-encoder"),
                });

            {
                let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                    label: Some("site-mesh-pass"),
                    color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        depth_slice: None,
                        ops: ::wgpu::Operations {
                            load: ::wgpu::LoadOp::Clear(::wgpu::Color::TRANSPARENT),
                            store: ::wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(::wgpu::Operations {
                            load: ::wgpu::LoadOp::Clear(1.0),
                            store: ::wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                    multiview_mask: None,
                });

                let current = self
                    .mesh
                    .as_ref()
                    .filter(|m| Some(m.generation) == frame.model_generation);
                if let Some(mesh) = current {
                    rpass.set_pipeline(&self.pipeline);
                    rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rpass.set_index_buffer(mesh.index_buffer.slice(..), ::wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }

            self.queue.submit(std::iter::once(encoder.finish()));
            surface_texture.present();
            Ok(())
        }
    }

    impl FrameSink for WgpuBackend {
        fn upload(&mut self, generation: u64, batch: &MeshBatch) {
            let vertices: Vec<Vertex> = batch
                .vertices
                .iter()
                .map(|v| Vertex {
                    position: v.position,
                    normal: v.normal,
                    color: v.color,
                    pbr: v.pbr,
                })
                .collect();
            let vertex_buffer = self
                .device
                .create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                    label: Some("site-mesh-vertices"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: ::wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                    label: Some("site-mesh-indices"),
                    contents: bytemuck::cast_slice(&batch.indices),
                    usage: ::wgpu::BufferUsages::INDEX,
                });
            tracing::debug!(generation, vertices = vertices.len(), "uploaded mesh");
            self.mesh = Some(GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: batch.index_count(),
                generation,
            });
        }

        fn render(&mut self, frame: &RenderFrame) {
            // Fully faded canvas: nothing visible to draw.
            if frame.opacity <= 0.0 {
                return;
            }
            if let Err(err) = self.draw(frame) {
                tracing::warn!(error = %err, "frame dropped");
                self.surface.configure(&self.device, &self.config);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::{MeshBatch, RenderFrame};
    use viewer::FrameSink;

    use crate::error::SiteError;

    #[derive(Debug, Default)]
    pub struct WgpuBackend;

    pub async fn init_backend(
        _canvas: web_sys::HtmlCanvasElement,
        _width: u32,
        _height: u32,
    ) -> Result<WgpuBackend, SiteError> {
        Err(SiteError::Gpu(
            "wgpu initialization is only available on wasm32 targets".to_string(),
        ))
    }

    impl WgpuBackend {
        pub fn resize(&mut self, _width: u32, _height: u32) {}
    }

    impl FrameSink for WgpuBackend {
        fn upload(&mut self, _generation: u64, _batch: &MeshBatch) {}
        fn render(&mut self, _frame: &RenderFrame) {}
    }
}

pub use imp::{WgpuBackend, init_backend};
