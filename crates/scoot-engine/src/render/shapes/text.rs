use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    self, InstanceBuffer, QuadBuffers, bind_quads, clamp_linear_sampler, create_screen_ubo,
    instanced_quad_pipeline, load_pass, sampler_layout_entry, screen_ubo_layout_entry,
    texture_layout_entry, write_screen_uniform,
};

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs

#[derive(Clone, Copy)]
struct AtlasSlot {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf-packed R8Unorm glyph atlas.
///
/// Glyphs are placed left to right; when a glyph does not fit on the current
/// shelf a new one is started below it. Once the last shelf overflows the
/// atlas is marked full and further placements are refused. The slot cache is
/// keyed by `GlyphRasterConfig` (font identity + glyph index + pixel size),
/// so a glyph repeated across frames is rasterized and uploaded only once.
struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
    slots: HashMap<GlyphRasterConfig, AtlasSlot>,
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scoot glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
            slots: HashMap::new(),
        }
    }

    fn get(&self, key: &GlyphRasterConfig) -> Option<AtlasSlot> {
        self.slots.get(key).copied()
    }

    fn contains(&self, key: &GlyphRasterConfig) -> bool {
        self.slots.contains_key(key)
    }

    /// Uploads a rasterized glyph and records its UV slot. Returns `None`
    /// when the atlas has no room left.
    fn place(
        &mut self,
        queue: &wgpu::Queue,
        key: GlyphRasterConfig,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<AtlasSlot> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!(
                "glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); \
                 some glyphs will not be rendered"
            );
            self.full = true;
            return None;
        }

        let (gx, gy) = (self.cursor_x, self.cursor_y);

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );

        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);

        let px = 1.0 / ATLAS_SIZE as f32;
        let slot = AtlasSlot {
            uv_min: [gx as f32 * px, gy as f32 * px],
            uv_max: [(gx + w) as f32 * px, (gy + h) as f32 * px],
        };
        self.slots.insert(key, slot);
        Some(slot)
    }
}

/// Renderer for `DrawCmd::Text`.
///
/// Shapes runs with fontdue's layout engine, rasterizes new glyphs into a
/// [`GlyphAtlas`] on first use, and draws every glyph of the frame in one
/// instanced call.
#[derive(Default)]
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    screen_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    atlas: Option<GlyphAtlas>,

    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,

    // Reusable across frames; created on first use since `Layout` has no
    // `Default` for the coordinate system we want.
    layout: Option<Layout<()>>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders all `DrawCmd::Text` entries in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        font_system: &FontSystem,
    ) {
        self.ensure_pipeline(ctx);
        if self.sampler.is_none() {
            self.sampler = Some(clamp_linear_sampler(ctx.device, "scoot text sampler"));
        }
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "scoot text quad"));
        }
        if self.atlas.is_none() {
            self.atlas = Some(GlyphAtlas::new(ctx.device));
            self.bind_group = None;
        }

        let labels: Vec<_> = draw_list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Text(cmd) => Some(cmd.clone()),
                _ => None,
            })
            .collect();

        let mut instances: Vec<GlyphInstance> = Vec::new();
        let layout = self
            .layout
            .get_or_insert_with(|| Layout::new(CoordinateSystem::PositiveYDown));

        for label in &labels {
            let Some(font) = font_system.get(label.font) else {
                log::warn!("TextRenderer: unknown {:?}, skipping", label.font);
                continue;
            };

            layout.reset(&LayoutSettings {
                x: label.origin.x,
                y: label.origin.y,
                ..LayoutSettings::default()
            });
            layout.append(&[font], &TextStyle::new(&label.text, label.size, 0));

            // The glyph positions are copied out so the borrow on the layout
            // ends before the atlas is mutated.
            let mut placed: Vec<PlacedGlyph> = Vec::new();
            for g in layout.glyphs() {
                if g.char_data.rasterize() && g.width > 0 && g.height > 0 {
                    placed.push(PlacedGlyph {
                        key: g.key,
                        min: [g.x, g.y],
                        max: [g.x + g.width as f32, g.y + g.height as f32],
                    });
                }
            }

            let Some(atlas) = self.atlas.as_mut() else { return };
            let color = [label.color.r, label.color.g, label.color.b, label.color.a];

            for glyph in placed {
                if !atlas.contains(&glyph.key) {
                    let (metrics, bitmap) = font.rasterize_config(glyph.key);
                    if metrics.width > 0 && metrics.height > 0 {
                        atlas.place(
                            ctx.queue,
                            glyph.key,
                            &bitmap,
                            metrics.width as u32,
                            metrics.height as u32,
                        );
                    }
                }
                if let Some(slot) = atlas.get(&glyph.key) {
                    instances.push(GlyphInstance {
                        dst_min: glyph.min,
                        dst_max: glyph.max,
                        uv_min: slot.uv_min,
                        uv_max: slot.uv_max,
                        color,
                    });
                }
            }
        }

        if instances.is_empty() {
            return;
        }

        self.ensure_bindings(ctx);
        let Some(ubo) = self.screen_ubo.as_ref() else { return };
        write_screen_uniform(ctx.queue, ubo, ctx.viewport);
        self.instances
            .upload(ctx.device, ctx.queue, "scoot text instances", 64, &instances);

        let (Some(pipeline), Some(bind_group), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.quad.as_ref(),
            self.instances.get(),
        ) else {
            return;
        };

        let mut rpass = load_pass(target.encoder, target.view, "scoot text pass");
        bind_quads(&mut rpass, pipeline, quad, instance_vbo);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let module = common::shader(
            ctx.device,
            "scoot text shader",
            include_str!("shaders/text.wgsl"),
        );
        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scoot text bgl"),
                entries: &[
                    screen_ubo_layout_entry(0),
                    texture_layout_entry(1),
                    sampler_layout_entry(2),
                ],
            });

        self.pipeline = Some(instanced_quad_pipeline(
            ctx.device,
            "scoot text pipeline",
            &module,
            &bgl,
            GlyphInstance::layout(),
            ctx.surface_format,
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bgl);

        // Bindings reference the old layout; rebuild them.
        self.bind_group = None;
        self.screen_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.screen_ubo.is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(atlas) = self.atlas.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let ubo = create_screen_ubo(ctx.device, "scoot text screen ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scoot text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.screen_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

/// Screen placement of one laid-out glyph, captured out of the fontdue
/// layout's borrow.
struct PlacedGlyph {
    key: GlyphRasterConfig,
    min: [f32; 2],
    max: [f32; 2],
}

/// One laid-out glyph: screen-space corners, atlas UVs, text color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

common::instance_layout!(
    GlyphInstance: 1 => Float32x2, 2 => Float32x2, 3 => Float32x2, 4 => Float32x2, 5 => Float32x4
);
