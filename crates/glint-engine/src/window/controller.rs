use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::device::{ContextFormat, RenderContext};

use super::{LoopHandle, PlatformWindow, WindowConfig, WindowCtx, WindowError, WindowEventHandler};

/// Shared, interior-mutable event handler for contexts of type `C`.
pub type SharedHandler<C> = Rc<RefCell<dyn WindowEventHandler<C>>>;

/// Window controller.
///
/// Owns one platform window and, after a successful `create`, one render
/// context. Routes lifecycle notifications to at most one attached handler,
/// bracketing every context-bound callback with `make_current`/`done_current`.
///
/// The handler is held weakly: dropping the last strong reference detaches it.
pub struct Window<P: PlatformWindow> {
    native: P,
    context: Option<P::Context>,
    event_handler: Option<Weak<RefCell<dyn WindowEventHandler<P::Context>>>>,
    event_loop: LoopHandle,
    quit_on_destroy: bool,
    closed: bool,
}

impl<P: PlatformWindow> Window<P> {
    /// Wraps a platform window driven by the loop behind `event_loop`.
    pub fn new(native: P, event_loop: LoopHandle) -> Self {
        Self {
            native,
            context: None,
            event_handler: None,
            event_loop,
            quit_on_destroy: true,
            closed: false,
        }
    }

    pub fn native(&self) -> &P {
        &self.native
    }

    pub fn native_mut(&mut self) -> &mut P {
        &mut self.native
    }

    pub fn context(&self) -> Option<&P::Context> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut P::Context> {
        self.context.as_mut()
    }

    pub fn event_loop(&self) -> &LoopHandle {
        &self.event_loop
    }

    /// Whether a live handler is attached.
    pub fn has_handler(&self) -> bool {
        self.event_handler
            .as_ref()
            .is_some_and(|h| h.strong_count() > 0)
    }

    pub fn handle(&self) -> Option<P::Handle> {
        self.native.handle()
    }

    pub fn width(&self) -> u32 {
        self.native.width()
    }

    pub fn height(&self) -> u32 {
        self.native.height()
    }

    pub fn set_quit_on_destroy(&mut self, enable: bool) {
        self.quit_on_destroy = enable;
    }

    pub fn quits_on_destroy(&self) -> bool {
        self.quit_on_destroy
    }

    /// Set once `on_close` has torn the window down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Creates the native window and its render context.
    ///
    /// The window must come up at exactly `width` x `height`. An attached
    /// handler is promoted only when the context was created successfully.
    pub fn create(
        &mut self,
        format: &ContextFormat,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(), WindowError> {
        if self.context.is_some() {
            log::debug!("tearing down previous render context");
            self.teardown_context();
        }

        if let Err(err) = self.native.create(format, title, width, height) {
            log::error!("creating native window failed: {err:#}");
            return Err(WindowError::NativeCreation(format!("{err:#}")));
        }

        let actual = (self.native.width(), self.native.height());
        if actual != (width, height) {
            let err = WindowError::SizeMismatch {
                requested: (width, height),
                actual,
            };
            log::error!("{err}");
            self.native.destroy();
            return Err(err);
        }

        let Some(handle) = self.native.handle() else {
            let err = WindowError::NativeCreation("native window has no handle".to_string());
            log::error!("{err}");
            self.native.destroy();
            return Err(err);
        };

        let mut context = self.native.new_context();
        if let Err(err) = context.create(&handle, format) {
            log::error!("{err}");
            context.release();
            return Err(WindowError::ContextCreation(err));
        }

        log::debug!("window {title:?} created at {width}x{height} with {format}");
        self.context = Some(context);
        self.closed = false;

        self.promote_context();
        Ok(())
    }

    /// `create` from a `WindowConfig`, applying its quit-on-destroy flag.
    pub fn create_with(&mut self, config: &WindowConfig) -> Result<(), WindowError> {
        self.set_quit_on_destroy(config.quit_on_destroy);
        self.create(&config.format, &config.title, config.width, config.height)
    }

    /// Replaces the attached handler and promotes it if a context exists.
    pub fn attach<H>(&mut self, handler: &Rc<RefCell<H>>)
    where
        H: WindowEventHandler<P::Context> + 'static,
    {
        let shared: SharedHandler<P::Context> = handler.clone();
        self.event_handler = Some(Rc::downgrade(&shared));
        log::debug!("event handler attached");

        self.promote_context();
    }

    /// Detaches the current handler, if any. The context is left untouched.
    pub fn detach(&mut self) {
        if self.event_handler.take().is_some() {
            log::debug!("event handler detached");
        }
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.native.close();
        }
    }

    pub fn show(&mut self) {
        self.native.show();
    }

    pub fn hide(&mut self) {
        self.native.hide();
    }

    pub fn full_screen(&mut self) {
        self.native.full_screen();
    }

    pub fn windowed(&mut self) {
        self.native.windowed();
    }

    pub fn repaint(&mut self) {
        self.native.repaint();
    }

    /// Quits the event loop driving this window.
    pub fn quit(&self, code: i32) {
        self.event_loop.quit(code);
    }

    /// Delivers initialize + resize to the handler with the context current.
    ///
    /// No-op unless both a context and a handler exist.
    fn promote_context(&mut self) {
        let Some(handler) = self.handler() else {
            return;
        };
        let Some(context) = self.context.as_mut() else {
            return;
        };

        let (width, height) = (self.native.width(), self.native.height());
        let mut ctx = WindowCtx::new(width, height, &self.event_loop);

        context.make_current();
        if let Some(mut h) = borrow_handler(&handler) {
            h.initialize_event(&mut ctx, context);
            h.resize_event(&mut ctx, context, width, height);
        }
        context.done_current();

        let requests = ctx.requests();
        self.apply_requests(requests);
    }

    /// Paints and swaps. Errors without a context.
    pub fn on_repaint(&mut self) -> Result<(), WindowError> {
        let handler = self.handler();
        let Some(context) = self.context.as_mut() else {
            return Err(WindowError::NoContext);
        };

        let mut ctx = WindowCtx::new(self.native.width(), self.native.height(), &self.event_loop);

        context.make_current();
        if let Some(mut h) = handler.as_ref().and_then(borrow_handler) {
            h.paint_event(&mut ctx, context);
        }
        context.swap();
        context.done_current();

        let requests = ctx.requests();
        self.apply_requests(requests);
        Ok(())
    }

    /// Forwards the current native size to the handler.
    pub fn on_resize(&mut self) {
        let Some(handler) = self.handler() else {
            return;
        };
        let Some(context) = self.context.as_mut() else {
            return;
        };

        let (width, height) = (self.native.width(), self.native.height());
        let mut ctx = WindowCtx::new(width, height, &self.event_loop);

        context.make_current();
        if let Some(mut h) = borrow_handler(&handler) {
            h.resize_event(&mut ctx, context, width, height);
        }
        context.done_current();

        let requests = ctx.requests();
        self.apply_requests(requests);
    }

    /// Forwards an idle notification. The context is not made current.
    pub fn on_idle(&mut self) {
        let Some(handler) = self.handler() else {
            return;
        };

        let mut ctx = WindowCtx::new(self.native.width(), self.native.height(), &self.event_loop);
        if let Some(mut h) = borrow_handler(&handler) {
            h.idle_event(&mut ctx);
        }

        let requests = ctx.requests();
        self.apply_requests(requests);
    }

    /// Tears the window down: deinitialize, release the context, destroy the
    /// native window, then quit the loop if configured to.
    ///
    /// Safe without a context. Calls after the first are ignored.
    pub fn on_close(&mut self) {
        if self.closed {
            log::debug!("close ignored: window already closed");
            return;
        }

        self.teardown_context();

        self.native.destroy();
        self.closed = true;
        log::debug!("window closed");

        if self.quit_on_destroy {
            self.event_loop.quit(0);
        }
    }

    /// Deinitializes the handler with the context current, then releases it.
    fn teardown_context(&mut self) {
        let Some(mut context) = self.context.take() else {
            return;
        };

        if let Some(handler) = self.handler() {
            let mut ctx = WindowCtx::new(self.native.width(), self.native.height(), &self.event_loop);

            context.make_current();
            if let Some(mut h) = borrow_handler(&handler) {
                h.deinitialize_event(&mut ctx, &mut context);
            }
            context.done_current();
        }

        context.release();
    }

    /// Upgrades the attached handler, detaching it if it was dropped.
    fn handler(&mut self) -> Option<SharedHandler<P::Context>> {
        let handler = self.event_handler.as_ref()?.upgrade();
        if handler.is_none() {
            log::debug!("event handler was dropped; detaching");
            self.event_handler = None;
        }
        handler
    }

    fn apply_requests(&mut self, (close, repaint): (bool, bool)) {
        if close {
            self.close();
        } else if repaint {
            self.repaint();
        }
    }
}

fn borrow_handler<C>(
    handler: &SharedHandler<C>,
) -> Option<RefMut<'_, dyn WindowEventHandler<C> + 'static>> {
    match handler.try_borrow_mut() {
        Ok(h) => Some(h),
        Err(_) => {
            log::warn!("event handler is already borrowed; event dropped");
            None
        }
    }
}
