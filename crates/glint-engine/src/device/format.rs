use std::fmt;

/// Context profile requested from the driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Profile {
    #[default]
    Core,
    Compatibility,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Core => f.write_str("core"),
            Profile::Compatibility => f.write_str("compatibility"),
        }
    }
}

/// Requested rendering-context configuration.
///
/// Passed to both the native window (pixel format selection) and the render
/// context. Backends treat fields they cannot honour as hints.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ContextFormat {
    /// API version as `(major, minor)`.
    pub version: (u8, u8),

    pub profile: Profile,

    /// Depth buffer size in bits. Zero disables the depth buffer.
    pub depth_bits: u8,

    /// Stencil buffer size in bits.
    pub stencil_bits: u8,

    /// Multisample count. Zero disables multisampling.
    pub samples: u8,

    /// Synchronize buffer swaps with the display refresh.
    pub vsync: bool,
}

impl Default for ContextFormat {
    fn default() -> Self {
        Self {
            version: (3, 2),
            profile: Profile::Core,
            depth_bits: 24,
            stencil_bits: 8,
            samples: 0,
            vsync: true,
        }
    }
}

impl ContextFormat {
    pub fn with_version(mut self, major: u8, minor: u8) -> Self {
        self.version = (major, minor);
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_samples(mut self, samples: u8) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Present mode matching the vsync request.
    ///
    /// `AutoNoVsync` falls back to FIFO where tearing modes are unsupported.
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

impl fmt::Display for ContextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.version;
        write!(
            f,
            "{major}.{minor} {} (depth {}, stencil {}",
            self.profile, self.depth_bits, self.stencil_bits
        )?;
        if self.samples > 0 {
            write!(f, ", {}x msaa", self.samples)?;
        }
        if self.vsync {
            f.write_str(", vsync")?;
        }
        f.write_str(")")
    }
}
