/// Represents a single acquired back buffer.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames.
pub(crate) struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    pub(crate) fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("onyx frame encoder"),
        });

        Self {
            surface_texture,
            view,
            encoder,
        }
    }

    /// Records a pass that clears the back buffer to `color`.
    pub(crate) fn clear(&mut self, color: wgpu::Color) {
        let _rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("onyx clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }
}

/// Outcome of `Graphics::end_frame`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FramePresent {
    /// The back buffer was submitted and queued for display.
    Presented,
    /// No back buffer could be acquired this frame (resize, timeout).
    Skipped,
}
