use crate::sprites::SpriteSet;
use crate::state::{Entity, GameState, Mode, Role};

use egui::{Align2, Color32, FontId, Pos2};
use egui_miniquad::EguiMq;
use miniquad::*;
use std::collections::HashMap;

#[repr(C)]
struct Uniforms {
    mvp: [f32; 16],
    color: [f32; 4],
}

#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

const BACKGROUND: (u8, u8, u8) = (102, 107, 87);
const OVERLAY_ALPHA: u8 = 180;

const TITLE_SIZE: f32 = 64.0;
const LARGE_SIZE: f32 = 32.0;
const SMALL_SIZE: f32 = 20.0;
const LINE_SPACING: f32 = 25.0;

const INSTRUCTIONS: [&str; 3] = [
    "Collect Coins, Avoid Monsters",
    "The Higher Your Score, The Faster Things Move",
    "How Many Points Can You Get?",
];

const CONTROLS: [&str; 4] = [
    "Left and Right Arrow Keys: Move Left and Right",
    "Spacebar: Jump (hold to jump higher)",
    "N: Start New Game",
    "ESC: Quit",
];

pub struct Renderer {
    pub ctx: Box<dyn RenderingBackend>,
    pipeline: Pipeline,
    bindings: Bindings,
    textures: HashMap<TextureIndexes, TextureId>,
    egui_mq: EguiMq,
    screen_w: f32,
    screen_h: f32,
}

#[derive(Eq, PartialEq, Hash, Clone, Copy)]
pub enum TextureIndexes {
    White1x1,
    Sprite(Role),
}

/// One line of text to draw, positioned in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub pos: Pos2,
    pub anchor: Align2,
    pub size: f32,
    pub color: Color32,
}

impl TextLine {
    fn centered(text: impl Into<String>, x: f32, y: f32, size: f32, color: Color32) -> TextLine {
        TextLine {
            text: text.into(),
            pos: Pos2::new(x, y),
            anchor: Align2::CENTER_CENTER,
            size,
            color,
        }
    }
}

/// Text for the current mode: the score while playing, otherwise the
/// start or game over screen.
pub fn text_lines(state: &GameState, w: f32, h: f32) -> Vec<TextLine> {
    let red = Color32::from_rgb(255, 0, 0);
    let white = Color32::WHITE;

    match state.mode {
        Mode::Playing => vec![TextLine {
            text: format!("Points: {}", state.score),
            pos: Pos2::new(w - 10.0, 10.0),
            anchor: Align2::RIGHT_TOP,
            size: SMALL_SIZE,
            color: white,
        }],
        Mode::StartScreen => {
            let mut lines = vec![TextLine::centered(
                "Robot Runner",
                w / 2.0,
                h / 4.0,
                TITLE_SIZE,
                red,
            )];
            let start_y = h / 4.0 + 50.0;
            for (i, text) in INSTRUCTIONS.iter().enumerate() {
                let y = start_y + i as f32 * LINE_SPACING;
                lines.push(TextLine::centered(*text, w / 2.0, y, SMALL_SIZE, white));
            }
            lines.push(TextLine::centered(
                "Controls:",
                w / 2.0,
                h / 4.0 + 180.0,
                LARGE_SIZE,
                white,
            ));
            let start_y = h / 2.0 + 100.0;
            for (i, text) in CONTROLS.iter().enumerate() {
                let y = start_y + i as f32 * LINE_SPACING;
                lines.push(TextLine::centered(*text, w / 2.0, y, SMALL_SIZE, white));
            }
            lines
        }
        Mode::GameOver => vec![
            TextLine::centered("GAME OVER", w / 2.0, h / 3.0, TITLE_SIZE, red),
            TextLine::centered(
                format!("Final Score: {}", state.score),
                w / 2.0,
                h / 3.0 + 50.0,
                LARGE_SIZE,
                white,
            ),
            TextLine::centered(
                "Press N for New Game or ESC to Quit",
                w / 2.0,
                h / 2.0 + 100.0,
                SMALL_SIZE,
                white,
            ),
        ],
    }
}

impl Renderer {
    pub fn new(sprites: &SpriteSet, screen_w: f32, screen_h: f32) -> Renderer {
        let mut ctx = window::new_rendering_backend();

        // unit quad with UVs (0..1)
        let vertices: [Vertex; 4] = [
            Vertex {
                pos: [0.0, 0.0],
                uv: [0.0, 0.0],
            },
            Vertex {
                pos: [1.0, 0.0],
                uv: [1.0, 0.0],
            },
            Vertex {
                pos: [1.0, 1.0],
                uv: [1.0, 1.0],
            },
            Vertex {
                pos: [0.0, 1.0],
                uv: [0.0, 1.0],
            },
        ];
        let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

        let vertex_buffer = ctx.new_buffer(
            BufferType::VertexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&vertices),
        );
        let index_buffer = ctx.new_buffer(
            BufferType::IndexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&indices),
        );

        let mut textures = HashMap::new();

        // 1x1 white texture for colored rectangles
        let white_tex_bytes: [u8; 4] = [255, 255, 255, 255];
        let white_texture = ctx.new_texture_from_rgba8(1, 1, &white_tex_bytes);
        ctx.texture_set_filter(white_texture, FilterMode::Nearest, MipmapFilterMode::None);
        textures.insert(TextureIndexes::White1x1, white_texture);

        for role in Role::ALL {
            let sprite = sprites.get(*role);
            let texture =
                ctx.new_texture_from_rgba8(sprite.width as u16, sprite.height as u16, &sprite.rgba);
            // Nearest for pixel art
            ctx.texture_set_filter(texture, FilterMode::Nearest, MipmapFilterMode::None);
            ctx.texture_set_wrap(texture, TextureWrap::Clamp, TextureWrap::Clamp);
            textures.insert(TextureIndexes::Sprite(*role), texture);
        }

        let shader = ctx
            .new_shader(
                ShaderSource::Glsl {
                    vertex: VERTEX_SHADER,
                    fragment: FRAGMENT_SHADER,
                },
                ShaderMeta {
                    images: vec!["tex".to_string()],
                    uniforms: UniformBlockLayout {
                        uniforms: vec![
                            UniformDesc::new("mvp", UniformType::Mat4),
                            UniformDesc::new("color", UniformType::Float4),
                        ],
                    },
                },
            )
            .expect("failed to compile shader");

        let pipeline = ctx.new_pipeline(
            &[BufferLayout::default()],
            &[
                VertexAttribute::new("pos", VertexFormat::Float2),
                VertexAttribute::new("uv", VertexFormat::Float2),
            ],
            shader,
            PipelineParams {
                color_blend: Some(BlendState::new(
                    Equation::Add,
                    BlendFactor::Value(BlendValue::SourceAlpha),
                    BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
                )),
                cull_face: CullFace::Nothing,
                ..Default::default()
            },
        );

        let bindings = Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: vec![white_texture],
        };

        let egui_mq = EguiMq::new(&mut *ctx);

        Renderer {
            ctx,
            pipeline,
            bindings,
            textures,
            egui_mq,
            screen_w,
            screen_h,
        }
    }

    pub fn draw(&mut self, state: &GameState) {
        let (r, g, b) = BACKGROUND;
        let clear = PassAction::Clear {
            color: Some((r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)),
            depth: Some(1.0),
            stencil: Some(0),
        };

        self.ctx.begin_default_pass(clear);
        self.ctx.apply_pipeline(&self.pipeline);

        self.draw_entity(&state.player);
        for coin in &state.coins {
            self.draw_entity(coin);
        }
        for monster in &state.monsters {
            self.draw_entity(monster);
        }

        if state.mode != Mode::Playing {
            let alpha = OVERLAY_ALPHA as f32 / 255.0;
            self.draw_rect(0.0, 0.0, self.screen_w, self.screen_h, [0.0, 0.0, 0.0, alpha]);
        }

        self.ctx.end_render_pass();

        self.draw_text(state);

        self.ctx.commit_frame();
    }

    fn draw_entity(&mut self, entity: &Entity) {
        let (x, y) = entity.pixel_origin();
        let texture = self.textures[&TextureIndexes::Sprite(entity.role)];
        self.draw_quad(
            texture,
            x as f32,
            y as f32,
            entity.w,
            entity.h,
            [1.0, 1.0, 1.0, 1.0],
        );
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let white = self.textures[&TextureIndexes::White1x1];
        self.draw_quad(white, x, y, w, h, color);
    }

    fn draw_quad(&mut self, texture: TextureId, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.bindings.images[0] = texture;
        self.ctx.apply_bindings(&self.bindings);

        let proj = Self::ortho_mvp(self.screen_w, self.screen_h);
        let model = Self::mat4_mul(Self::mat4_translation(x, y), Self::mat4_scale(w, h));
        let mvp = Self::mat4_mul(proj, model);

        let uniforms = Uniforms { mvp, color };
        self.ctx.apply_uniforms(UniformsSource::table(&uniforms));
        self.ctx.draw(0, 6, 1);
    }

    fn draw_text(&mut self, state: &GameState) {
        let lines = text_lines(state, self.screen_w, self.screen_h);

        self.egui_mq.run(&mut *self.ctx, |_mq_ctx, egui_ctx| {
            let painter = egui_ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("hud"),
            ));
            for line in &lines {
                painter.text(
                    line.pos,
                    line.anchor,
                    &line.text,
                    FontId::proportional(line.size),
                    line.color,
                );
            }
        });
        self.egui_mq.draw(&mut *self.ctx);
    }

    /// Pixel coordinates with the origin at the top-left corner.
    fn ortho_mvp(screen_w: f32, screen_h: f32) -> [f32; 16] {
        let l = 0.0;
        let r = screen_w;
        let t = 0.0;
        let b = screen_h;
        let n = -1.0;
        let f = 1.0;
        let sx = 2.0 / (r - l);
        let sy = 2.0 / (t - b);
        let sz = -2.0 / (f - n);
        let tx = -((r + l) / (r - l));
        let ty = -((t + b) / (t - b));
        let tz = -((f + n) / (f - n));
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, sz, 0.0, tx, ty, tz, 1.0,
        ]
    }

    fn mat4_mul(a: [f32; 16], b: [f32; 16]) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        out
    }

    fn mat4_translation(tx: f32, ty: f32) -> [f32; 16] {
        [
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, 0.0, 1.0,
        ]
    }

    fn mat4_scale(sx: f32, sy: f32) -> [f32; 16] {
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ]
    }
}

const VERTEX_SHADER: &str = r#"#version 100
attribute vec2 pos;
attribute vec2 uv;
uniform mat4 mvp;
uniform vec4 color;
varying vec4 v_color;
varying vec2 v_uv;
void main() {
    gl_Position = mvp * vec4(pos, 0.0, 1.0);
    v_color = color;
    v_uv = uv;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec4 v_color;
varying vec2 v_uv;
uniform sampler2D tex;
void main() {
    gl_FragColor = texture2D(tex, v_uv) * v_color;
}
"#;
