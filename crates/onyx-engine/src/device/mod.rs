//! GPU device + swap chain management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swap chain)
//! - clearing and presenting the back buffer
//! - turning surface failures, device loss and validation output into `GraphicsError`

mod diagnostics;
mod error;
mod frame;
mod graphics;
mod init;
mod surface;

pub use diagnostics::{DeviceLoss, DiagnosticQueue};
pub use error::{classify_surface_error, SurfaceErrorAction};
pub use frame::FramePresent;
pub use graphics::Graphics;
pub use init::GraphicsConfig;
