use super::LoopHandle;

/// Per-callback view of the window handed to event handlers.
///
/// Close and repaint requests are applied by the controller after the
/// callback returns.
pub struct WindowCtx<'a> {
    /// Client area width in physical pixels.
    pub width: u32,
    /// Client area height in physical pixels.
    pub height: u32,
    event_loop: &'a LoopHandle,
    close_requested: bool,
    repaint_requested: bool,
}

impl<'a> WindowCtx<'a> {
    pub(crate) fn new(width: u32, height: u32, event_loop: &'a LoopHandle) -> Self {
        Self {
            width,
            height,
            event_loop,
            close_requested: false,
            repaint_requested: false,
        }
    }

    /// Closes the window once the current callback returns.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Schedules another paint event.
    pub fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    /// Quits the event loop driving this window.
    pub fn quit(&self, code: i32) {
        self.event_loop.quit(code);
    }

    pub fn event_loop(&self) -> &LoopHandle {
        self.event_loop
    }

    pub(crate) fn requests(&self) -> (bool, bool) {
        (self.close_requested, self.repaint_requested)
    }
}

/// Callbacks a window delivers to its attached handler.
///
/// Every callback except `idle_event` runs with `context` current. Handlers
/// must tolerate `initialize_event` more than once: it is delivered on every
/// promotion (context creation and each attach).
#[allow(unused_variables)]
pub trait WindowEventHandler<C> {
    fn initialize_event(&mut self, window: &mut WindowCtx<'_>, context: &mut C) {}

    fn resize_event(&mut self, window: &mut WindowCtx<'_>, context: &mut C, width: u32, height: u32) {}

    fn paint_event(&mut self, window: &mut WindowCtx<'_>, context: &mut C) {}

    /// Called when the event queue runs dry. No context is current.
    fn idle_event(&mut self, window: &mut WindowCtx<'_>) {}

    fn deinitialize_event(&mut self, window: &mut WindowCtx<'_>, context: &mut C) {}
}
