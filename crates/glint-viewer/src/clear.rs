use glint_engine::debug;
use glint_engine::device::WgpuContext;
use glint_engine::objects::{
    Attachment, FramebufferInfo, Object, ObjectId, ObjectRegistry, TextureInfo,
};
use glint_engine::window::{WindowCtx, WindowEventHandler};

/// Clears the window every frame and keeps a registry describing the
/// swapchain so the debug report has something to show.
pub struct ClearHandler {
    color: wgpu::Color,
    registry: ObjectRegistry,
    framebuffer: Option<ObjectId>,
    swapchain: Option<ObjectId>,
    frames: u64,
}

impl ClearHandler {
    pub fn new(color: wgpu::Color) -> Self {
        Self {
            color,
            registry: ObjectRegistry::new(),
            framebuffer: None,
            swapchain: None,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Re-registers the default framebuffer and its color target.
    fn register_surface(&mut self, context: &WgpuContext) {
        for id in [self.framebuffer.take(), self.swapchain.take()].into_iter().flatten() {
            self.registry.remove(id);
        }

        let Some(format) = context.surface_format() else {
            return;
        };
        let size = context.size().unwrap_or_default();

        let swapchain = self.registry.register_labeled(
            "swapchain",
            TextureInfo {
                width: size.width,
                height: size.height,
                depth: 1,
                format: format!("{format:?}"),
                bytes_per_pixel: format.block_copy_size(None).unwrap_or(4),
                mip_levels: 1,
            },
        );
        let framebuffer = self.registry.register_labeled(
            "default",
            FramebufferInfo {
                default: true,
                complete: true,
                attachments: vec![Attachment {
                    point: "color0".to_string(),
                    target: swapchain,
                }],
            },
        );

        self.swapchain = Some(swapchain);
        self.framebuffer = Some(framebuffer);
    }
}

impl WindowEventHandler<WgpuContext> for ClearHandler {
    fn initialize_event(&mut self, _window: &mut WindowCtx<'_>, context: &mut WgpuContext) {
        self.register_surface(context);
        debug::print_all(&*context, &self.registry);
    }

    fn resize_event(
        &mut self,
        _window: &mut WindowCtx<'_>,
        _context: &mut WgpuContext,
        width: u32,
        height: u32,
    ) {
        let Some(id) = self.swapchain else {
            return;
        };
        if let Some(Object::Texture(texture)) = self.registry.get_mut(id) {
            texture.width = width;
            texture.height = height;
        }
        log::debug!("resized to {width}x{height}");
    }

    fn paint_event(&mut self, _window: &mut WindowCtx<'_>, context: &mut WgpuContext) {
        context.clear(self.color);
        self.frames += 1;
    }

    fn idle_event(&mut self, window: &mut WindowCtx<'_>) {
        window.request_repaint();
    }

    fn deinitialize_event(&mut self, _window: &mut WindowCtx<'_>, _context: &mut WgpuContext) {
        debug::print_object_info(&self.registry);
        log::info!("rendered {} frames", self.frames);
    }
}
