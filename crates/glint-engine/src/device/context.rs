use std::fmt;

use super::ContextFormat;

/// Failure to create a rendering context.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextError(pub String);

impl ContextError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render context creation failed: {}", self.0)
    }
}

impl std::error::Error for ContextError {}

/// Native rendering context bound to one window.
///
/// Current/not-current is a bracketing discipline left to the caller: every
/// `make_current` must be paired with `done_current` on the same thread, and
/// `swap` is only meaningful between the two.
pub trait RenderContext {
    /// Window handle type the context attaches to.
    type Handle;

    /// Creates the native context for `handle`.
    fn create(&mut self, handle: &Self::Handle, format: &ContextFormat) -> Result<(), ContextError>;

    fn make_current(&mut self);

    fn done_current(&mut self);

    /// Presents the back buffer.
    fn swap(&mut self);

    /// Destroys the native context. The value may be dropped afterwards.
    fn release(&mut self);
}
