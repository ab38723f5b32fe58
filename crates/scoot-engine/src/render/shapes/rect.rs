use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    self, InstanceBuffer, QuadBuffers, ScreenBinding, bind_quads, instanced_quad_pipeline,
    load_pass, screen_ubo_layout_entry, write_screen_uniform,
};

/// Solid rectangle renderer.
///
/// Geometry arrives in logical pixels and is converted to NDC in the vertex
/// shader. Every rectangle of the frame goes out in one instanced call.
#[derive(Default)]
pub struct RectRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    binding: Option<ScreenBinding>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders rectangles contained in `draw_list` into `target`.
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
            self.binding = Some(ScreenBinding::new(ctx.device, bgl, "scoot rect screen"));
        }
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "scoot rect quad"));
        }

        let mut instances: Vec<RectInstance> = Vec::new();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Rect(cmd) = &item.cmd else { continue };
            let r = cmd.rect.normalized();
            if r.is_empty() {
                continue;
            }
            instances.push(RectInstance {
                origin: [r.origin.x, r.origin.y],
                size: [r.size.x, r.size.y],
                color: [cmd.color.r, cmd.color.g, cmd.color.b, cmd.color.a],
            });
        }
        if instances.is_empty() {
            return;
        }

        let Some(binding) = self.binding.as_ref() else { return };
        write_screen_uniform(ctx.queue, &binding.ubo, ctx.viewport);
        self.instances
            .upload(ctx.device, ctx.queue, "scoot rect instances", 64, &instances);

        let (Some(pipeline), Some(binding), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.binding.as_ref(),
            self.quad.as_ref(),
            self.instances.get(),
        ) else {
            return;
        };

        let mut rpass = load_pass(target.encoder, target.view, "scoot rect pass");
        bind_quads(&mut rpass, pipeline, quad, instance_vbo);
        rpass.set_bind_group(0, &binding.bind_group, &[]);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let module = common::shader(ctx.device, "scoot rect shader", include_str!("shaders/rect.wgsl"));
        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scoot rect bgl"),
                entries: &[screen_ubo_layout_entry(0)],
            });

        self.pipeline = Some(instanced_quad_pipeline(
            ctx.device,
            "scoot rect pipeline",
            &module,
            &bgl,
            RectInstance::layout(),
            ctx.surface_format,
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bgl);

        // The binding references the old layout; rebuild it.
        self.binding = None;
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

common::instance_layout!(RectInstance: 1 => Float32x2, 2 => Float32x2, 3 => Float32x4);
