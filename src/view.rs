//! Render boundary
//!
//! Turns a `GameState` into a flat list of draw commands in screen space. The
//! host renderer blits the tile map scrolled by `camera_x`, then the sprites in
//! order, then the overlay text. Culling happens here, not in the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cell_of;
use crate::consts::*;
use crate::sim::{Facing, GamePhase, GameState, TileLookup};

/// Atlas cell of the player sprite
pub const PLAYER_SPRITE: (u16, u16) = (8, 8);
/// Atlas cells of the enemy sprite per facing
pub const ENEMY_SPRITE_RIGHT: (u16, u16) = (16, 8);
pub const ENEMY_SPRITE_LEFT: (u16, u16) = (8, 0);

/// Palette indices for overlay text
pub const COLOR_CLEAR: u8 = 11;
pub const COLOR_ALERT: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
    Snowflake,
}

/// One 8x8 sprite blit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    pub kind: SpriteKind,
    /// Top-left corner relative to the viewport
    pub screen_pos: Vec2,
    /// Source cell in the sprite atlas
    pub atlas: (u16, u16),
    pub flip_x: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub pos: (i32, i32),
    pub text: String,
    pub color: u8,
}

impl TextLine {
    fn new(x: i32, y: i32, text: &str, color: u8) -> Self {
        Self {
            pos: (x, y),
            text: text.to_string(),
            color,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    /// Horizontal scroll applied to the tile map
    pub camera_x: f32,
    /// Draw in order, after the tile map
    pub sprites: Vec<SpriteDraw>,
    /// Drawn last, on top of everything
    pub overlay: Vec<TextLine>,
}

impl FrameView {
    /// Build the frame for the current state
    pub fn capture(state: &GameState) -> Self {
        let camera_x = state.camera_x;
        let mut sprites = Vec::new();
        let mut overlay = Vec::new();

        match state.phase {
            GamePhase::Playing => {
                let player = &state.player;
                sprites.push(SpriteDraw {
                    kind: SpriteKind::Player,
                    screen_pos: player.pos() - Vec2::new(camera_x, 0.0),
                    atlas: PLAYER_SPRITE,
                    flip_x: player.facing() == Facing::Left,
                });

                for enemy in &state.enemies {
                    let screen_x = enemy.pos.x - camera_x;
                    if !(-ENEMY_DRAW_MARGIN..=VIEWPORT_WIDTH + ENEMY_DRAW_MARGIN).contains(&screen_x)
                    {
                        continue;
                    }
                    sprites.push(SpriteDraw {
                        kind: SpriteKind::Enemy,
                        screen_pos: Vec2::new(screen_x, enemy.pos.y),
                        atlas: match enemy.facing {
                            Facing::Right => ENEMY_SPRITE_RIGHT,
                            Facing::Left => ENEMY_SPRITE_LEFT,
                        },
                        flip_x: false,
                    });
                }

                for flake in &state.snow.flakes {
                    let screen_x = flake.pos.x - camera_x;
                    if !(0.0..=VIEWPORT_WIDTH).contains(&screen_x) {
                        continue;
                    }
                    sprites.push(SpriteDraw {
                        kind: SpriteKind::Snowflake,
                        screen_pos: Vec2::new(screen_x, flake.pos.y),
                        atlas: flake.pattern,
                        flip_x: false,
                    });
                }
            }
            GamePhase::GameClear => {
                overlay.push(TextLine::new(60, 64, "GAME CLEAR!", COLOR_CLEAR));
                overlay.push(TextLine::new(45, 74, "PRESS R TO RESTART", COLOR_ALERT));
            }
            GamePhase::GameOver => {
                overlay.push(TextLine::new(60, 64, "GAME OVER", COLOR_ALERT));
                overlay.push(TextLine::new(45, 74, "PRESS R TO RESTART", COLOR_ALERT));
            }
        }

        Self {
            camera_x,
            sprites,
            overlay,
        }
    }

    /// Sprites of one kind, in draw order
    pub fn sprites_of(&self, kind: SpriteKind) -> impl Iterator<Item = &SpriteDraw> {
        self.sprites.iter().filter(move |s| s.kind == kind)
    }

    /// Render the viewport as text, one character per tile.
    ///
    /// Terminal-friendly stand-in for the sprite blitter used by the headless
    /// runner: `#` solid, `P` player, `e` enemy, `*` snow, overlay text on top.
    pub fn to_ascii<T: TileLookup + ?Sized>(&self, tiles: &T) -> String {
        let cols = cell_of(VIEWPORT_WIDTH) as usize;
        let rows = cell_of(VIEWPORT_HEIGHT) as usize;
        let first_col = cell_of(self.camera_x);

        let mut cells: Vec<Vec<char>> = (0..rows)
            .map(|y| {
                (0..cols)
                    .map(|x| {
                        if tiles.is_solid(first_col + x as i32, y as i32) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect();

        let mut plot = |x: i32, y: i32, glyph: char| {
            if (0..cols as i32).contains(&x) && (0..rows as i32).contains(&y) {
                cells[y as usize][x as usize] = glyph;
            }
        };

        for sprite in &self.sprites {
            let center = sprite.screen_pos + Vec2::splat(BODY_SIZE / 2.0);
            let glyph = match sprite.kind {
                SpriteKind::Player => 'P',
                SpriteKind::Enemy => 'e',
                SpriteKind::Snowflake => '*',
            };
            plot(cell_of(center.x), cell_of(center.y), glyph);
        }
        for line in &self.overlay {
            let (x, y) = (line.pos.0 / TILE_SIZE as i32, line.pos.1 / TILE_SIZE as i32);
            for (i, ch) in line.text.chars().enumerate() {
                plot(x + i as i32, y, ch);
            }
        }

        let mut out = String::with_capacity((cols + 1) * rows);
        for row in cells {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
