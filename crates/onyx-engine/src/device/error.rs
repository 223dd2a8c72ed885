use crate::error::ErrorCode;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface must be reconfigured; rendering may resume next frame.
    Reconfigure,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable failure with the given code.
    Fatal(ErrorCode),
    /// The device is gone; it must be recreated.
    DeviceRemoved,
}

/// Classifies a failed back-buffer acquisition.
///
/// A lost device takes precedence over whatever the surface reported: once the
/// device is gone every surface error is a symptom of it.
pub fn classify_surface_error(err: &wgpu::SurfaceError, device_lost: bool) -> SurfaceErrorAction {
    if device_lost {
        return SurfaceErrorAction::DeviceRemoved;
    }

    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigure,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal(ErrorCode::from_surface_error(err)),
    }
}
