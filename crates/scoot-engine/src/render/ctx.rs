use crate::coords::Viewport;
use crate::paint::Color;

/// What a shape renderer needs from the GPU layer for one frame: device and
/// queue handles, the surface format its pipeline must target, and the
/// logical viewport for pixel-to-NDC conversion.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

/// Where a renderer records its pass: the frame's encoder and color view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

impl RenderTarget<'_> {
    /// Records a pass that clears the color view and does nothing else.
    /// Runs before the shape renderers, which all load the existing contents.
    pub fn clear(&mut self, color: Color) {
        let clear = wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        };
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scoot clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear), store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }
}
