use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::{ErrorCode, GraphicsError};

use super::diagnostics::{frame_outcome, DeviceLoss, DeviceLossSlot, DiagnosticQueue};
use super::error::{classify_surface_error, SurfaceErrorAction};
use super::frame::{FramePresent, GpuFrame};
use super::surface;
use super::GraphicsConfig;

/// Owns the GPU device, the swap chain and the frame currently being built.
///
/// Lifetime is tied 1:1 to the window it renders into (`'w`). All wgpu handles
/// are released when this value is dropped.
///
/// A frame is built with [`clear_buffer`](Self::clear_buffer) and finished with
/// [`end_frame`](Self::end_frame), which submits and presents it.
pub struct Graphics<'w> {
    /// Window the surface presents into.
    window: &'w Window,

    /// Surface bound to the window.
    surface: wgpu::Surface<'w>,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    debug: bool,
    diagnostics: DiagnosticQueue,
    device_loss: DeviceLossSlot,

    /// Back buffer acquired for the frame in progress.
    frame: Option<GpuFrame>,
}

impl<'w> Graphics<'w> {
    /// Creates the device and swap chain for `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: &'w Window, config: GraphicsConfig) -> Result<Self, GraphicsError> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(GraphicsError::init("window has zero size"));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: config.instance_flags(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| GraphicsError::init(format!("failed to create wgpu surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GraphicsError::init(format!("failed to find a suitable GPU adapter: {e}")))?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("onyx device"),
                required_features: config.required_features,
                required_limits: config.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| GraphicsError::init(format!("failed to create wgpu device/queue: {e}")))?;

        let diagnostics = DiagnosticQueue::new();
        let device_loss = DeviceLossSlot::default();
        install_handlers(&device, config.debug, &diagnostics, &device_loss);

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, config.prefer_srgb)
            .ok_or_else(|| GraphicsError::init("no supported surface formats"))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: surface::choose_present_mode(&caps.present_modes, config.present_mode),
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes, config.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: config.desired_maximum_frame_latency,
        };

        surface.configure(&device, &surface_config);
        log::debug!(
            "surface configured: {}x{} {:?} {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            surface_config.present_mode
        );

        Ok(Self {
            window,
            surface,
            adapter,
            device,
            queue,
            config: surface_config,
            size,
            debug: config.debug,
            diagnostics,
            device_loss,
            frame: None,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Reconfigures the surface after a resize.
    ///
    /// Any frame in progress is dropped without presenting.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.frame = None;
        let configured = surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
        if !configured {
            log::debug!("surface resize to {}x{} deferred", new_size.width, new_size.height);
        }
    }

    /// Clears the back buffer to an opaque color.
    ///
    /// Acquires the back buffer if this frame has none yet. When the surface
    /// cannot hand one out (resize, timeout) the clear is dropped and the frame
    /// will be skipped.
    pub fn clear_buffer(&mut self, r: f32, g: f32, b: f32) -> Result<(), GraphicsError> {
        let color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        if let Some(frame) = self.acquire()? {
            frame.clear(color);
        }
        Ok(())
    }

    /// Submits the frame and queues it for display.
    ///
    /// Device loss is checked before anything else so it is never reported as
    /// an ordinary failure. With `debug` on, validation messages queued since
    /// the last reported frame turn into a [`GraphicsError::Info`], whether this
    /// frame was presented or skipped.
    pub fn end_frame(&mut self) -> Result<FramePresent, GraphicsError> {
        self.check_device()?;

        self.acquire()?;
        let presented = match self.frame.take() {
            Some(frame) => {
                self.queue.submit(std::iter::once(frame.encoder.finish()));
                drop(frame.view);
                self.window.pre_present_notify();
                frame.surface_texture.present();
                FramePresent::Presented
            }
            None => FramePresent::Skipped,
        };

        frame_outcome(self.device_loss.get(), self.debug, self.take_info())?;
        Ok(presented)
    }

    /// Returns the device-removed error if the device has been lost.
    pub fn check_device(&mut self) -> Result<(), GraphicsError> {
        match self.device_loss.get() {
            Some(loss) => {
                self.frame = None;
                Err(self.device_removed_error(loss))
            }
            None => Ok(()),
        }
    }

    pub fn is_device_lost(&self) -> bool {
        self.device_loss.is_lost()
    }

    fn acquire(&mut self) -> Result<Option<&mut GpuFrame>, GraphicsError> {
        if self.frame.is_none() {
            match self.surface.get_current_texture() {
                Ok(surface_texture) => {
                    self.frame = Some(GpuFrame::new(&self.device, surface_texture));
                }
                Err(err) => self.handle_surface_error(err)?,
            }
        }

        Ok(self.frame.as_mut())
    }

    fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> Result<(), GraphicsError> {
        match classify_surface_error(&err, self.device_loss.is_lost()) {
            SurfaceErrorAction::Reconfigure => {
                log::debug!("surface {err:?}; reconfiguring");
                surface::reconfigure(&self.surface, &self.device, &self.config, self.size);
                Ok(())
            }
            SurfaceErrorAction::SkipFrame => {
                log::debug!("surface {err:?}; skipping frame");
                Ok(())
            }
            SurfaceErrorAction::Fatal(code) => {
                Err(GraphicsError::hr_with_info(code, self.take_info()))
            }
            SurfaceErrorAction::DeviceRemoved => {
                let loss = self.device_loss.get().unwrap_or(DeviceLoss {
                    reason: ErrorCode::DeviceRemoved,
                    message: String::new(),
                });
                Err(self.device_removed_error(loss))
            }
        }
    }

    #[track_caller]
    fn device_removed_error(&self, loss: DeviceLoss) -> GraphicsError {
        GraphicsError::device_removed(loss.reason, loss.message, self.take_info())
    }

    fn take_info(&self) -> Vec<String> {
        if self.debug {
            self.diagnostics.take()
        } else {
            Vec::new()
        }
    }
}

/// Routes device loss and uncaptured errors into shared state.
///
/// wgpu panics on uncaptured errors unless a handler is installed, so one is
/// always present; messages are only queued in debug mode.
fn install_handlers(
    device: &wgpu::Device,
    debug: bool,
    diagnostics: &DiagnosticQueue,
    device_loss: &DeviceLossSlot,
) {
    let slot = device_loss.clone();
    device.set_device_lost_callback(move |reason, message| {
        log::error!("graphics device lost ({reason:?}): {message}");
        slot.set(DeviceLoss::from_wgpu(reason, message));
    });

    device.on_uncaptured_error(uncaptured_error_handler(debug, diagnostics.clone()));
}

fn uncaptured_error_handler(
    debug: bool,
    queue: DiagnosticQueue,
) -> Arc<dyn wgpu::UncapturedErrorHandler> {
    Arc::new(move |e: wgpu::Error| {
        log::error!("uncaptured wgpu error: {e}");
        if debug {
            queue.push(e.to_string());
        }
    })
}
