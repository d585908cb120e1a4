/// How `make_current` reacts to a failed image acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Configure the surface again and retry next frame.
    Reconfigure,
    /// Transient; this frame is dropped.
    SkipFrame,
    /// Unrecoverable. The context is marked lost.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn for_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

/// First sRGB 8-bit format the surface supports, else whatever it lists first.
pub(crate) fn choose_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ]
    .into_iter()
    .find(|f| caps.formats.contains(f))
    .or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    caps.alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    fn caps(formats: Vec<TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            ..Default::default()
        }
    }

    #[test]
    fn srgb_format_is_preferred() {
        let caps = caps(vec![TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb]);
        assert_eq!(choose_surface_format(&caps), Some(TextureFormat::Rgba8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_format() {
        let caps = caps(vec![TextureFormat::Rgb10a2Unorm, TextureFormat::Bgra8Unorm]);
        assert_eq!(choose_surface_format(&caps), Some(TextureFormat::Rgb10a2Unorm));
        assert_eq!(choose_surface_format(&self::caps(Vec::new())), None);
    }

    #[test]
    fn alpha_mode_defaults_to_auto() {
        let caps = wgpu::SurfaceCapabilities {
            alpha_modes: Vec::new(),
            ..Default::default()
        };
        assert_eq!(choose_alpha_mode(&caps), wgpu::CompositeAlphaMode::Auto);
    }

    #[test]
    fn alpha_mode_takes_first_supported() {
        let caps = wgpu::SurfaceCapabilities {
            alpha_modes: vec![
                wgpu::CompositeAlphaMode::PreMultiplied,
                wgpu::CompositeAlphaMode::Opaque,
            ],
            ..Default::default()
        };
        assert_eq!(choose_alpha_mode(&caps), wgpu::CompositeAlphaMode::PreMultiplied);
    }

    #[test]
    fn only_out_of_memory_is_fatal() {
        use wgpu::SurfaceError::*;

        assert_eq!(SurfaceErrorAction::for_error(&Lost), SurfaceErrorAction::Reconfigure);
        assert_eq!(SurfaceErrorAction::for_error(&Outdated), SurfaceErrorAction::Reconfigure);
        assert_eq!(SurfaceErrorAction::for_error(&Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(SurfaceErrorAction::for_error(&OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
