use crate::device::ContextFormat;

/// Window creation parameters.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub format: ContextFormat,

    /// Quit the event loop (code 0) once the window is destroyed.
    pub quit_on_destroy: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            width: 1280,
            height: 720,
            format: ContextFormat::default(),
            quit_on_destroy: true,
        }
    }
}
