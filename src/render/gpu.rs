use bytemuck::{bytes_of, Pod, Zeroable};
use glam::Mat3;
use log::{debug, info, warn};
use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::geometry::{TorusGeometry, Vertex};
use crate::scene::Scene;

use super::common::{CameraParams, LightParams, MeshParams};
use super::shared::SHADER;

/// Samples per pixel when the surface format supports multisampling.
const MSAA_SAMPLES: u32 = 4;

/// GPU renderer backed by wgpu that draws the torus scene onto a
/// transparent, antialiased surface.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    depth: RenderTarget,
    msaa: Option<RenderTarget>,
    pipeline: wgpu::RenderPipeline,
    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    mesh: Option<MeshBuffers>,
}

impl Renderer {
    /// Initializes the GPU renderer for a window or canvas.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, RenderError> {
        let (width, height) = (size.0.max(1), size.1.max(1));

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: backends(),
            ..Default::default()
        });
        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("renderer-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: base_limits().using_resolution(adapter.limits()),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;

        // Prefer a compositing mode that lets the page show through.
        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|mode| surface_caps.alpha_modes.contains(mode))
        .or_else(|| surface_caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let sample_count = if adapter
            .get_texture_format_features(surface_format)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };
        info!(
            "renderer ready: {:?}, {sample_count}x MSAA, {alpha_mode:?} alpha",
            adapter.get_info().backend
        );

        let depth = RenderTarget::depth(&device, width, height, sample_count);
        let msaa = RenderTarget::multisampled(&device, &config, sample_count);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("renderer-shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let global_layout = uniform_layout::<GlobalUniform>(&device, "global-bind-layout");
        let object_layout = uniform_layout::<ObjectConstants>(&device, "object-bind-layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("renderer-pipeline-layout"),
            bind_group_layouts: &[&global_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let (global_buffer, global_bind_group) =
            uniform_binding::<GlobalUniform>(&device, &global_layout, "global");
        let (object_buffer, object_bind_group) =
            uniform_binding::<ObjectConstants>(&device, &object_layout, "object");

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("renderer-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x3
                    ],
                }],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: RenderTarget::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sample_count,
            depth,
            msaa,
            pipeline,
            global_buffer,
            global_bind_group,
            object_buffer,
            object_bind_group,
            mesh: None,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Resizes the swap chain and attachments. Zero-sized requests are ignored.
    pub fn resize(&mut self, new_size: (u32, u32)) {
        if new_size.0 == 0 || new_size.1 == 0 || new_size == self.size() {
            return;
        }
        self.config.width = new_size.0;
        self.config.height = new_size.1;
        self.reconfigure();
    }

    /// Draws one frame, recovering from a lost or outdated surface by
    /// reconfiguring it and skipping the frame. Only out-of-memory is fatal.
    pub fn draw(&mut self, scene: &Scene) -> Result<(), RenderError> {
        match self.render(scene) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost or outdated; reconfiguring");
                self.reconfigure();
                Ok(())
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface timeout; skipping frame");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Releases GPU buffers and textures right away instead of waiting for
    /// the device to be dropped.
    pub fn dispose(mut self) {
        if let Some(mesh) = self.mesh.take() {
            mesh.vertex.destroy();
            mesh.index.destroy();
        }
        self.global_buffer.destroy();
        self.object_buffer.destroy();
        self.depth.texture.destroy();
        if let Some(msaa) = self.msaa.take() {
            msaa.texture.destroy();
        }
        info!("renderer resources released");
    }

    fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        if self.mesh.is_none() {
            self.mesh = Some(MeshBuffers::from_geometry(
                &self.device,
                &scene.mesh.geometry,
                "torus",
            ));
        }
        self.write_uniforms(scene);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("renderer-encoder"),
            });

        let (color_view, resolve_target) = match self.msaa.as_ref() {
            Some(msaa) => (&msaa.view, Some(&view)),
            None => (&view, None),
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("main-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.global_bind_group, &[]);
        pass.set_bind_group(1, &self.object_bind_group, &[]);
        if let Some(mesh) = self.mesh.as_ref() {
            pass.set_vertex_buffer(0, mesh.vertex.slice(..));
            pass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }

        drop(pass);
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn write_uniforms(&self, scene: &Scene) {
        let camera = CameraParams::from_scene(scene);
        let light = LightParams::from_scene(scene);
        let mesh = MeshParams::from_scene(scene);

        let globals = GlobalUniform {
            view_proj: camera.view_proj.to_cols_array_2d(),
            camera_position: camera.position.extend(1.0).into(),
            light_direction: light.direction.extend(0.0).into(),
            light_color: light.color.extend(light.intensity).into(),
            ambient: light.ambient.extend(1.0).into(),
        };
        let constants = ObjectConstants {
            model: mesh.model.to_cols_array_2d(),
            normal: mat3_to_3x4(mesh.normal),
            base_color: mesh.base_color.extend(1.0).into(),
            material: [
                mesh.roughness,
                mesh.metalness,
                if mesh.vertex_colors { 1.0 } else { 0.0 },
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.global_buffer, 0, bytes_of(&globals));
        self.queue
            .write_buffer(&self.object_buffer, 0, bytes_of(&constants));
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth = RenderTarget::depth(
            &self.device,
            self.config.width,
            self.config.height,
            self.sample_count,
        );
        self.msaa = RenderTarget::multisampled(&self.device, &self.config, self.sample_count);
    }
}

#[cfg(target_arch = "wasm32")]
fn backends() -> wgpu::Backends {
    wgpu::Backends::GL
}

#[cfg(not(target_arch = "wasm32"))]
fn backends() -> wgpu::Backends {
    wgpu::Backends::PRIMARY
}

#[cfg(target_arch = "wasm32")]
fn base_limits() -> wgpu::Limits {
    wgpu::Limits::downlevel_webgl2_defaults()
}

#[cfg(not(target_arch = "wasm32"))]
fn base_limits() -> wgpu::Limits {
    wgpu::Limits::default()
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

fn uniform_binding<T>(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label}-uniform")),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label}-bind-group")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (buffer, bind_group)
}

fn mat3_to_3x4(matrix: Mat3) -> [[f32; 4]; 3] {
    let cols = matrix.to_cols_array();
    [
        [cols[0], cols[1], cols[2], 0.0],
        [cols[3], cols[4], cols[5], 0.0],
        [cols[6], cols[7], cols[8], 0.0],
    ]
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn from_geometry(device: &wgpu::Device, geometry: &TorusGeometry, label: &str) -> Self {
        let vertices = geometry.vertices();
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex,
            index,
            index_count: geometry.indices().len() as u32,
        }
    }
}

/// Texture plus view used as a render attachment.
struct RenderTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl RenderTarget {
    const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    fn depth(device: &wgpu::Device, width: u32, height: u32, sample_count: u32) -> Self {
        Self::create(
            device,
            "depth-texture",
            width,
            height,
            sample_count,
            Self::DEPTH_FORMAT,
        )
    }

    /// Color target resolved into the swap chain, only needed with MSAA.
    fn multisampled(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<Self> {
        (sample_count > 1).then(|| {
            Self::create(
                device,
                "msaa-texture",
                config.width,
                config.height,
                sample_count,
                config.format,
            )
        })
    }

    fn create(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        sample_count: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct GlobalUniform {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    light_direction: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ObjectConstants {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
    base_color: [f32; 4],
    material: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layouts_match_wgsl_alignment() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 128);
        assert_eq!(std::mem::size_of::<ObjectConstants>(), 144);
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectConstants>() % 16, 0);
    }

    #[test]
    fn vertex_stride_matches_attribute_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 9 * std::mem::size_of::<f32>());
    }

    #[test]
    fn normal_matrix_columns_are_padded() {
        let padded = mat3_to_3x4(Mat3::IDENTITY);
        assert_eq!(padded[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(padded[2], [0.0, 0.0, 1.0, 0.0]);
    }
}
