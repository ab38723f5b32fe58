use std::path::{Path, PathBuf};

use scoot_engine::coords::{Rect, Vec2};
use scoot_engine::core::{App, AppControl, FrameCtx};
use scoot_engine::input::Key;
use scoot_engine::paint::Color;
use scoot_engine::render::{LineRenderer, RectRenderer, SpriteRenderer, TextRenderer};
use scoot_engine::scene::{DrawList, ZIndex};
use scoot_engine::text::{FontId, FontSystem};
use scoot_engine::texture::{ImageStore, TextureId};
use scoot_engine::time::{FpsCounter, FramePacer};

use crate::player::{MoveInput, PLAYER_SIZE, Player, speed_scalar};

/// Frame cap target when the cap toggle is on.
const CAP_FPS: u32 = 60;

/// Resolves an asset relative to the crate, independent of the working
/// directory `cargo run` happens to use.
fn asset_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}

/// The two keyboard-driven feature flags. Both start enabled.
#[derive(Debug, Copy, Clone)]
pub struct Toggles {
    /// Frame-rate cap at [`CAP_FPS`]; off means uncapped.
    pub frame_cap: bool,
    /// Delta-time movement; off means a fixed step per frame.
    pub clock: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            frame_cap: true,
            clock: true,
        }
    }
}

pub struct DemoApp {
    player: Player,
    toggles: Toggles,
    pacer: FramePacer,
    fps: FpsCounter,

    font_system: FontSystem,
    overlay_font: Option<FontId>,
    images: ImageStore,
    sprite: Option<TextureId>,

    draw_list: DrawList,
    rect_renderer: RectRenderer,
    line_renderer: LineRenderer,
    sprite_renderer: SpriteRenderer,
    text_renderer: TextRenderer,
}

impl DemoApp {
    /// Builds the app and loads its assets.
    ///
    /// Asset failures are tolerated: without the font the overlay is skipped,
    /// and without the sprite the fallback rectangle stays visible.
    pub fn new() -> Self {
        let mut images = ImageStore::new();
        let sprite = match images.load_file(asset_path("player.png")) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("sprite not loaded, falling back to rectangle: {e}");
                None
            }
        };

        let mut font_system = FontSystem::new();
        let overlay_font = match font_system.load_file(asset_path("overlay.ttf")) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("overlay font not loaded, text disabled: {e}");
                None
            }
        };

        Self {
            player: Player::new(),
            toggles: Toggles::default(),
            pacer: FramePacer::with_target_fps(CAP_FPS),
            fps: FpsCounter::new(),
            font_system,
            overlay_font,
            images,
            sprite,
            draw_list: DrawList::default(),
            rect_renderer: RectRenderer::new(),
            line_renderer: LineRenderer::new(),
            sprite_renderer: SpriteRenderer::new(),
            text_renderer: TextRenderer::new(),
        }
    }

    fn handle_toggles(&mut self, ctx: &FrameCtx<'_, '_>) {
        if ctx.input_frame.pressed(Key::V) {
            self.toggles.frame_cap = !self.toggles.frame_cap;
            if self.toggles.frame_cap {
                self.pacer.set_target_fps(Some(CAP_FPS));
                log::info!("frame cap on ({CAP_FPS} fps)");
            } else {
                self.pacer.set_target_fps(None);
                log::info!("frame cap off (uncapped)");
            }
        }

        if ctx.input_frame.pressed(Key::C) {
            self.toggles.clock = !self.toggles.clock;
            if self.toggles.clock {
                log::info!("clock on (dt-based movement)");
            } else {
                log::info!("clock off (fixed step per frame)");
            }
        }
    }

    fn build_draw_list(&mut self) {
        self.draw_list.clear();

        let fps = self.fps.fps();
        let clock = self.toggles.clock;
        let cap = self.toggles.frame_cap;

        if let Some(font) = self.overlay_font {
            self.draw_list.push_text(
                ZIndex::new(10),
                format!("{fps:.0} FPS"),
                font,
                20.0,
                Color::from_srgb_u8(0, 180, 0, 255),
                Vec2::new(10.0, 10.0),
            );

            let clock_status = if clock {
                "clock: ON (dt-based movement)"
            } else {
                "clock: OFF (fixed step, frame-rate dependent)"
            };
            self.draw_list.push_text(
                ZIndex::new(10),
                clock_status,
                font,
                18.0,
                if clock {
                    Color::from_srgb_u8(0, 120, 0, 255)
                } else {
                    Color::from_srgb_u8(200, 0, 0, 255)
                },
                Vec2::new(10.0, 36.0),
            );

            let cap_status = if cap {
                format!("cap: ON ({CAP_FPS} fps)")
            } else {
                "cap: OFF (uncapped)".to_string()
            };
            self.draw_list.push_text(
                ZIndex::new(10),
                cap_status,
                font,
                18.0,
                Color::from_srgb_u8(90, 90, 90, 255),
                Vec2::new(10.0, 58.0),
            );

            self.draw_list.push_text(
                ZIndex::new(10),
                "WASD: move    V: toggle frame cap    C: toggle clock",
                font,
                18.0,
                Color::from_srgb_u8(90, 90, 90, 255),
                Vec2::new(10.0, 80.0),
            );
        }

        // Static reference line.
        self.draw_list.push_line(
            ZIndex::new(0),
            Vec2::new(0.0, 550.0),
            Vec2::new(100.0, 500.0),
            1.0,
            Color::black(),
        );

        // Rectangle under the sprite: visible only if the sprite failed to
        // load or draw.
        let player_rect = Rect::from_origin_size(
            self.player.pos,
            Vec2::new(PLAYER_SIZE, PLAYER_SIZE),
        );
        self.draw_list
            .push_solid_rect(ZIndex::new(1), player_rect, Color::black());

        if let Some(sprite) = self.sprite {
            self.draw_list
                .push_sprite(ZIndex::new(2), sprite, player_rect, Color::white());
        }
    }
}

impl App for DemoApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        self.handle_toggles(ctx);

        let scalar = speed_scalar(self.toggles.clock, ctx.time.dt);
        let input = MoveInput {
            up: ctx.input.key_down(Key::W),
            down: ctx.input.key_down(Key::S),
            left: ctx.input.key_down(Key::A),
            right: ctx.input.key_down(Key::D),
        };

        self.player.apply(input, scalar);
        self.player.clamp();

        self.fps.tick(ctx.time.dt);
        self.build_draw_list();

        let draw_list = &mut self.draw_list;
        let rects = &mut self.rect_renderer;
        let lines = &mut self.line_renderer;
        let sprites = &mut self.sprite_renderer;
        let texts = &mut self.text_renderer;
        let images = &self.images;
        let fonts = &self.font_system;

        let control = ctx.render(Color::from_srgb_u8(245, 245, 245, 255), |rctx, target| {
            rects.render(rctx, target, draw_list);
            lines.render(rctx, target, draw_list);
            sprites.render(rctx, target, draw_list, images);
            texts.render(rctx, target, draw_list, fonts);
        });

        // Sole rate authority; the surface present mode never blocks.
        self.pacer.pace();

        control
    }
}
