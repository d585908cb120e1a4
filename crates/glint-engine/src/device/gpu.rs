use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::debug::human_readable_size;

use super::driver::vendor_name;
use super::surface;
use super::{
    ContextError, ContextFormat, DriverInfo, DriverSummary, LimitFamily, RenderContext,
    SurfaceErrorAction,
};

/// Optional features worth reporting, by display name.
const REPORTED_FEATURES: &[(&str, wgpu::Features)] = &[
    ("depth clip control", wgpu::Features::DEPTH_CLIP_CONTROL),
    ("depth32float stencil8", wgpu::Features::DEPTH32FLOAT_STENCIL8),
    ("texture compression bc", wgpu::Features::TEXTURE_COMPRESSION_BC),
    ("texture compression etc2", wgpu::Features::TEXTURE_COMPRESSION_ETC2),
    ("texture compression astc", wgpu::Features::TEXTURE_COMPRESSION_ASTC),
    ("timestamp query", wgpu::Features::TIMESTAMP_QUERY),
    ("indirect first instance", wgpu::Features::INDIRECT_FIRST_INSTANCE),
    ("shader f16", wgpu::Features::SHADER_F16),
    ("rg11b10ufloat renderable", wgpu::Features::RG11B10UFLOAT_RENDERABLE),
    ("bgra8unorm storage", wgpu::Features::BGRA8UNORM_STORAGE),
    ("float32 filterable", wgpu::Features::FLOAT32_FILTERABLE),
];

/// wgpu objects bound to one window surface.
struct GpuState {
    /// Keeps the window alive for the `'static` surface.
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl GpuState {
    /// Adapter/device acquisition is asynchronous under wgpu.
    async fn new(window: Arc<Window>, format: &ContextFormat) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("glint device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format =
            surface::choose_surface_format(&caps).context("no supported surface formats")?;

        if format.samples > 0 {
            log::debug!(
                "{}x multisampling requested; swapchain images are single-sampled",
                format.samples
            );
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: format.present_mode(),
            alpha_mode: surface::choose_alpha_mode(&caps),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Picks up size changes made by the windowing system since the last frame.
    ///
    /// A 0x0 surface (minimized window) cannot be configured; only the tracked
    /// size changes until the window is restored.
    fn sync_size(&mut self) {
        let new_size = self.window.inner_size();
        if new_size == self.size {
            return;
        }

        self.size = new_size;
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("glint frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    fn handle_surface_error(&self, err: &SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::for_error(err);
        if action == SurfaceErrorAction::Reconfigure && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

/// One acquired swapchain image plus the encoder recording into it.
///
/// Lives between `make_current` and `swap`/`done_current`. Holding it blocks
/// acquisition of the next image.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// `RenderContext` backed by a wgpu device and window surface.
///
/// - `make_current` acquires the next swapchain image and an encoder
/// - `swap` submits the encoder and presents the image
/// - `done_current` submits pending work and discards an unpresented image
#[derive(Default)]
pub struct WgpuContext {
    state: Option<GpuState>,
    frame: Option<GpuFrame>,
    lost: bool,
}

impl WgpuContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the native objects are alive.
    pub fn is_created(&self) -> bool {
        self.state.is_some()
    }

    /// Set after an unrecoverable surface error. Rendering cannot resume.
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn device(&self) -> Option<&wgpu::Device> {
        self.state.as_ref().map(|s| &s.device)
    }

    pub fn queue(&self) -> Option<&wgpu::Queue> {
        self.state.as_ref().map(|s| &s.queue)
    }

    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.state.as_ref().map(|s| s.config.format)
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> Option<PhysicalSize<u32>> {
        self.state.as_ref().map(|s| s.size)
    }

    /// The frame acquired by the last `make_current`, if any.
    ///
    /// `None` while not current, or when the surface skipped this frame.
    pub fn frame_mut(&mut self) -> Option<&mut GpuFrame> {
        self.frame.as_mut()
    }

    /// Records a clear of the current frame's color target.
    pub fn clear(&mut self, color: wgpu::Color) {
        let Some(frame) = self.frame.as_mut() else {
            return;
        };

        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    /// Submits the recorded commands and hands back the unpresented image.
    fn submit(&mut self) -> Option<wgpu::SurfaceTexture> {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = self.frame.take()?;
        let state = self.state.as_ref()?;

        state.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        Some(surface_texture)
    }
}

impl RenderContext for WgpuContext {
    type Handle = Arc<Window>;

    fn create(&mut self, handle: &Arc<Window>, format: &ContextFormat) -> Result<(), ContextError> {
        let state = pollster::block_on(GpuState::new(handle.clone(), format))
            .map_err(|e| ContextError::new(format!("{e:#}")))?;

        let info = state.adapter.get_info();
        log::info!(
            "render context created on {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        self.state = Some(state);
        self.frame = None;
        self.lost = false;
        Ok(())
    }

    fn make_current(&mut self) {
        if self.frame.is_some() {
            return;
        }

        let Some(state) = self.state.as_mut() else {
            log::warn!("make_current called on a released context");
            return;
        };

        state.sync_size();
        if state.size.width == 0 || state.size.height == 0 {
            return;
        }

        match state.begin_frame() {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => {
                let action = state.handle_surface_error(&err);
                log::debug!("frame acquisition failed ({err}): {action:?}");
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface lost beyond recovery");
                    self.lost = true;
                }
            }
        }
    }

    fn done_current(&mut self) {
        // An image that was not swapped is dropped without presenting.
        drop(self.submit());
    }

    fn swap(&mut self) {
        let Some(surface_texture) = self.submit() else {
            return;
        };

        if let Some(state) = self.state.as_ref() {
            state.window.pre_present_notify();
        }

        surface_texture.present();
    }

    fn release(&mut self) {
        self.frame = None;
        if self.state.take().is_some() {
            log::debug!("render context released");
        }
    }
}

impl DriverInfo for WgpuContext {
    fn driver_summary(&self) -> Option<DriverSummary> {
        let state = self.state.as_ref()?;
        let info = state.adapter.get_info();
        let features = state.adapter.features();
        let limits = state.adapter.limits();

        let vendor = match vendor_name(info.vendor) {
            Some(name) => format!("{name} ({:#06x})", info.vendor),
            None => format!("{:#06x}", info.vendor),
        };

        let version = format!("{} {}", info.driver, info.driver_info)
            .trim()
            .to_string();

        let extensions = REPORTED_FEATURES
            .iter()
            .filter(|(_, flag)| features.contains(*flag))
            .map(|(name, _)| name.to_string())
            .collect();

        let limits = vec![
            LimitFamily::new("Textures")
                .with("max 1d size", limits.max_texture_dimension_1d)
                .with("max 2d size", limits.max_texture_dimension_2d)
                .with("max 3d size", limits.max_texture_dimension_3d)
                .with("max array layers", limits.max_texture_array_layers),
            LimitFamily::new("Buffers")
                .with("max size", human_readable_size(u64::from(limits.max_buffer_size)))
                .with(
                    "max uniform binding",
                    human_readable_size(u64::from(limits.max_uniform_buffer_binding_size)),
                )
                .with("max vertex buffers", limits.max_vertex_buffers),
            LimitFamily::new("Bindings")
                .with("max bind groups", limits.max_bind_groups)
                .with("max vertex attributes", limits.max_vertex_attributes),
        ];

        Some(DriverSummary {
            vendor,
            renderer: info.name,
            version: if version.is_empty() {
                "unknown".to_string()
            } else {
                version
            },
            backend: format!("{:?}", info.backend),
            device_type: format!("{:?}", info.device_type),
            extensions,
            limits,
        })
    }
}
