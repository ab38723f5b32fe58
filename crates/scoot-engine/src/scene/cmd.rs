use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;
use crate::texture::TextureId;

use super::{DrawList, ZIndex};

/// Renderer-agnostic draw command. One variant per shape renderer under
/// `render::shapes`; extending the scene means a new payload struct, a new
/// variant, a push helper below, and a matching renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Line(LineCmd),
    Sprite(SpriteCmd),
    Text(TextCmd),
}

/// Solid rectangle fill.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Line segment, rendered as a quad extruded `width` logical pixels across
/// the segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

/// Textured quad. Samples the whole texture into `rect`; `tint` multiplies
/// the sampled color (white = unmodified).
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub texture: TextureId,
    pub rect: Rect,
    pub tint: Color,
}

/// One unwrapped line of text; overlay callers position each line explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text in logical pixels.
    pub origin: Vec2,
}

impl DrawList {
    /// Records a solid rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push(z, DrawCmd::Rect(RectCmd { rect, color }));
    }

    /// Records a line segment.
    #[inline]
    pub fn push_line(&mut self, z: ZIndex, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(z, DrawCmd::Line(LineCmd { from, to, width, color }));
    }

    /// Records a sprite.
    #[inline]
    pub fn push_sprite(&mut self, z: ZIndex, texture: TextureId, rect: Rect, tint: Color) {
        self.push(z, DrawCmd::Sprite(SpriteCmd { texture, rect, tint }));
    }

    /// Records one line of text.
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        let cmd = TextCmd {
            text: text.into(),
            font,
            size,
            color,
            origin,
        };
        self.push(z, DrawCmd::Text(cmd));
    }
}
