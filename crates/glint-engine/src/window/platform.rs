use anyhow::Result;

use crate::device::{ContextFormat, RenderContext};

/// Platform window adapter.
///
/// One implementation per windowing backend. The controller owns exactly one
/// and drives it; implementations never call back into the controller
/// directly; the backend's event loop does that.
pub trait PlatformWindow {
    /// Native handle a render context attaches to.
    type Handle: Clone;

    /// Render context type this platform produces.
    type Context: RenderContext<Handle = Self::Handle>;

    /// Creates the native window with a client area of `width` x `height`.
    fn create(&mut self, format: &ContextFormat, title: &str, width: u32, height: u32) -> Result<()>;

    /// Allocates an uncreated render context for this platform.
    fn new_context(&self) -> Self::Context;

    /// Asks the window to close. The platform routes this back as a close event.
    fn close(&mut self);

    /// Destroys the native window immediately.
    fn destroy(&mut self);

    fn show(&mut self);

    fn hide(&mut self);

    fn full_screen(&mut self);

    fn windowed(&mut self);

    /// Schedules a repaint event.
    fn repaint(&mut self);

    /// `None` before `create` and after `destroy`.
    fn handle(&self) -> Option<Self::Handle>;

    /// Client area width in physical pixels; 0 without a native window.
    fn width(&self) -> u32;

    /// Client area height in physical pixels; 0 without a native window.
    fn height(&self) -> u32;
}
