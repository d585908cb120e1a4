use std::fmt;

use crate::device::ContextError;

/// Failures surfaced by the window controller.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// The platform could not create the native window.
    NativeCreation(String),

    /// The native window came up at a different size than requested.
    SizeMismatch {
        requested: (u32, u32),
        actual: (u32, u32),
    },

    /// The native window exists but its render context could not be created.
    ContextCreation(ContextError),

    /// A context-bound operation ran before `create` succeeded or after close.
    NoContext,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::NativeCreation(msg) => write!(f, "creating native window failed: {msg}"),
            WindowError::SizeMismatch { requested, actual } => write!(
                f,
                "native window is {}x{}, requested {}x{}",
                actual.0, actual.1, requested.0, requested.1
            ),
            WindowError::ContextCreation(err) => write!(f, "{err}"),
            WindowError::NoContext => f.write_str("window has no render context"),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::ContextCreation(err) => Some(err),
            _ => None,
        }
    }
}
