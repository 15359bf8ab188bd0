use super::SurfaceErrorAction;
use crate::coords::RenderSize;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = caps.formats.first().copied()?;

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| caps.formats.contains(f)) {
            return Some(f);
        }
    }

    Some(first)
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a surface error to a frame-loop action, reconfiguring when the
/// swapchain went stale.
pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: RenderSize,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if !size.is_empty() {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            ..Default::default()
        }
    }

    #[test]
    fn srgb_is_preferred_when_available() {
        let c = caps(vec![
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ]);
        assert_eq!(choose_surface_format(&c, true), Some(wgpu::TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(wgpu::TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&caps(vec![]), true), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let c = caps(vec![wgpu::TextureFormat::Bgra8Unorm]);
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&c, None), wgpu::CompositeAlphaMode::Opaque);
    }
}
