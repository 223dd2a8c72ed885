/// Initialization parameters for the graphics layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GraphicsConfig {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: the back buffer is plain BGRA8 unorm and clear colors
    /// are written as given.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO waits for vertical blank, one present per refresh.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,

    /// Enables backend validation and collects its messages into errors.
    pub debug: bool,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            debug: cfg!(debug_assertions),
        }
    }
}

impl GraphicsConfig {
    pub(crate) fn instance_flags(&self) -> wgpu::InstanceFlags {
        if self.debug {
            wgpu::InstanceFlags::debugging()
        } else {
            wgpu::InstanceFlags::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_vsync_bgra_back_buffer() {
        let cfg = GraphicsConfig::default();
        assert!(!cfg.prefer_srgb);
        assert_eq!(cfg.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(cfg.debug, cfg!(debug_assertions));
    }

    #[test]
    fn debug_enables_validation() {
        let cfg = GraphicsConfig { debug: true, ..Default::default() };
        assert!(cfg.instance_flags().contains(wgpu::InstanceFlags::VALIDATION));

        let cfg = GraphicsConfig { debug: false, ..Default::default() };
        assert!(cfg.instance_flags().is_empty());
    }
}
