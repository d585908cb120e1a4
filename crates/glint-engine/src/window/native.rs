//! winit-backed platform window and event loop.
//!
//! The winit `EventLoop` is shared between `NativeEventLoop` and the windows it
//! hands out, so `create` can run synchronously before `run` takes the loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Fullscreen, WindowId};

use crate::device::{ContextFormat, WgpuContext};

use super::{EventLoop, LoopHandle, PlatformWindow, Window};

type SharedLoop = Rc<RefCell<Option<winit::event_loop::EventLoop<()>>>>;

/// Native desktop window with a wgpu render context.
pub struct WinitWindow {
    event_loop: SharedLoop,
    window: Option<Arc<winit::window::Window>>,
    pending_close: bool,
}

impl WinitWindow {
    pub fn id(&self) -> Option<WindowId> {
        self.window.as_ref().map(|w| w.id())
    }

    pub fn winit(&self) -> Option<&winit::window::Window> {
        self.window.as_deref()
    }

    /// Consumes a pending `close()` request.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_close)
    }
}

impl PlatformWindow for WinitWindow {
    type Handle = Arc<winit::window::Window>;
    type Context = WgpuContext;

    fn create(&mut self, format: &ContextFormat, title: &str, width: u32, height: u32) -> Result<()> {
        let event_loop = self.event_loop.borrow();
        let Some(event_loop) = event_loop.as_ref() else {
            bail!("windows must be created before the event loop runs");
        };

        let attrs = winit::window::Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height));

        // Creation through the inactive loop keeps `create` synchronous.
        #[allow(deprecated)]
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::debug!("native window {:?} created for {format}", window.id());
        self.window = Some(Arc::new(window));
        self.pending_close = false;
        Ok(())
    }

    fn new_context(&self) -> WgpuContext {
        WgpuContext::new()
    }

    fn close(&mut self) {
        if self.window.is_some() {
            self.pending_close = true;
        }
    }

    fn destroy(&mut self) {
        if let Some(window) = self.window.take() {
            log::debug!("native window {:?} destroyed", window.id());
        }
        self.pending_close = false;
    }

    fn show(&mut self) {
        if let Some(w) = &self.window {
            w.set_visible(true);
        }
    }

    fn hide(&mut self) {
        if let Some(w) = &self.window {
            w.set_visible(false);
        }
    }

    fn full_screen(&mut self) {
        if let Some(w) = &self.window {
            w.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }

    fn windowed(&mut self) {
        if let Some(w) = &self.window {
            w.set_fullscreen(None);
        }
    }

    fn repaint(&mut self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn handle(&self) -> Option<Arc<winit::window::Window>> {
        self.window.clone()
    }

    fn width(&self) -> u32 {
        self.window.as_ref().map_or(0, |w| w.inner_size().width)
    }

    fn height(&self) -> u32 {
        self.window.as_ref().map_or(0, |w| w.inner_size().height)
    }
}

/// Blocking winit event loop.
pub struct NativeEventLoop {
    handle: LoopHandle,
    event_loop: SharedLoop,
}

impl NativeEventLoop {
    pub fn new() -> Result<Self> {
        let event_loop =
            winit::event_loop::EventLoop::new().context("failed to create winit EventLoop")?;

        Ok(Self {
            handle: LoopHandle::new(),
            event_loop: Rc::new(RefCell::new(Some(event_loop))),
        })
    }

    /// An uncreated window bound to this loop.
    pub fn new_window(&self) -> WinitWindow {
        WinitWindow {
            event_loop: self.event_loop.clone(),
            window: None,
            pending_close: false,
        }
    }
}

impl EventLoop for NativeEventLoop {
    type Window = WinitWindow;

    fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    fn run(self, window: &mut Window<WinitWindow>) -> Result<i32> {
        let event_loop = self
            .event_loop
            .borrow_mut()
            .take()
            .context("event loop already ran")?;

        let mut dispatcher = Dispatcher {
            window,
            handle: self.handle.clone(),
        };

        event_loop
            .run_app(&mut dispatcher)
            .context("winit event loop terminated with error")?;

        Ok(self.handle.exit_code().unwrap_or(0))
    }
}

/// Routes winit callbacks into the window controller.
struct Dispatcher<'a> {
    window: &'a mut Window<WinitWindow>,
    handle: LoopHandle,
}

impl Dispatcher<'_> {
    fn repaint(&mut self) {
        if let Err(err) = self.window.on_repaint() {
            log::warn!("repaint skipped: {err}");
            return;
        }

        if self.window.context().is_some_and(WgpuContext::is_lost) {
            log::error!("render context lost; quitting");
            self.handle.quit(1);
        }
    }

    fn exit_if_quit(&self, event_loop: &ActiveEventLoop) {
        if self.handle.quit_requested() {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for Dispatcher<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_closed() {
            self.handle.quit(0);
            event_loop.exit();
            return;
        }
        self.window.repaint();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.native().id() != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.window.on_close(),

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.window.on_resize();
                self.window.repaint();
            }

            WindowEvent::RedrawRequested => self.repaint(),

            _ => {}
        }

        self.exit_if_quit(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.native_mut().take_close_request() {
            self.window.on_close();
        }

        if !self.handle.quit_requested() {
            self.window.on_idle();
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        self.exit_if_quit(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Tear down while the platform is still alive.
        self.window.on_close();
    }
}
