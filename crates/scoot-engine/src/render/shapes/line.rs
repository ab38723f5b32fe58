use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    self, InstanceBuffer, QuadBuffers, ScreenBinding, bind_quads, instanced_quad_pipeline,
    load_pass, screen_ubo_layout_entry, write_screen_uniform,
};

/// Line segment renderer.
///
/// Each segment is one instance; the vertex shader extrudes the unit quad
/// along the segment and across its normal by the line width. Degenerate
/// (zero-length or zero-width) segments are skipped on the CPU side.
#[derive(Default)]
pub struct LineRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    binding: Option<ScreenBinding>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders line segments contained in `draw_list` into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.ensure_pipeline(ctx);
        if self.binding.is_none()
            && let Some(bgl) = self.bind_group_layout.as_ref()
        {
            self.binding = Some(ScreenBinding::new(ctx.device, bgl, "scoot line screen"));
        }
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "scoot line quad"));
        }

        let mut instances: Vec<LineInstance> = Vec::new();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Line(cmd) = &item.cmd else { continue };
            if cmd.width <= 0.0 || cmd.from == cmd.to {
                continue;
            }
            instances.push(LineInstance {
                p0: [cmd.from.x, cmd.from.y],
                p1: [cmd.to.x, cmd.to.y],
                width: cmd.width,
                color: [cmd.color.r, cmd.color.g, cmd.color.b, cmd.color.a],
            });
        }
        if instances.is_empty() {
            return;
        }

        let Some(binding) = self.binding.as_ref() else { return };
        write_screen_uniform(ctx.queue, &binding.ubo, ctx.viewport);
        self.instances
            .upload(ctx.device, ctx.queue, "scoot line instances", 16, &instances);

        let (Some(pipeline), Some(binding), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.binding.as_ref(),
            self.quad.as_ref(),
            self.instances.get(),
        ) else {
            return;
        };

        let mut rpass = load_pass(target.encoder, target.view, "scoot line pass");
        bind_quads(&mut rpass, pipeline, quad, instance_vbo);
        rpass.set_bind_group(0, &binding.bind_group, &[]);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let module = common::shader(ctx.device, "scoot line shader", include_str!("shaders/line.wgsl"));
        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scoot line bgl"),
                entries: &[screen_ubo_layout_entry(0)],
            });

        self.pipeline = Some(instanced_quad_pipeline(
            ctx.device,
            "scoot line pipeline",
            &module,
            &bgl,
            LineInstance::layout(),
            ctx.surface_format,
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bgl);

        // The binding references the old layout; rebuild it.
        self.binding = None;
    }
}

/// One segment: endpoints, width, premultiplied color. 36 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    width: f32,
    color: [f32; 4],
}

common::instance_layout!(LineInstance: 1 => Float32x2, 2 => Float32x2, 3 => Float32, 4 => Float32x4);
