//! Render pass — paints one frame of the game state onto a [`Surface`].
//!
//! No game logic is performed; this module only translates state into draw
//! calls, in a fixed order: background, aliens, bullets, player, HUD.

use crate::background::Image;
use crate::collision::{Bounds, Rect};
use crate::entities::GameState;
use crate::surface::{Surface, C_ALIEN, C_BACKGROUND, C_BULLET, C_HUD, C_PLAYER};

/// HUD text baseline, from the top edge.
const HUD_BASELINE: f32 = 20.0;
const HUD_MARGIN_LEFT: f32 = 10.0;
/// Distance of the lives counter from the right edge.
const HUD_LIVES_OFFSET: f32 = 80.0;

/// Render one complete frame.
pub fn render_frame<S: Surface>(surface: &mut S, state: &GameState, background: Option<&Image>) {
    draw_background(surface, state, background);

    for alien in &state.aliens {
        surface.fill_rect(alien.bounds(), C_ALIEN);
    }
    for bullet in &state.bullets {
        surface.fill_circle(bullet.x, bullet.y, bullet.r, C_BULLET);
    }
    surface.fill_rect(state.player.bounds(), C_PLAYER);

    draw_hud(surface, state);
}

fn draw_background<S: Surface>(surface: &mut S, state: &GameState, background: Option<&Image>) {
    // The solid fill also clears the previous frame's text.
    surface.fill(C_BACKGROUND);
    if let Some(image) = background {
        let dest = Rect { x: 0.0, y: 0.0, w: state.width, h: state.height };
        surface.draw_image(image, dest);
    }
}

fn draw_hud<S: Surface>(surface: &mut S, state: &GameState) {
    surface.fill_text(
        &format!("Score: {}", state.score),
        HUD_MARGIN_LEFT,
        HUD_BASELINE,
        C_HUD,
    );
    surface.fill_text(
        &format!("Lives: {}", state.lives),
        state.width - HUD_LIVES_OFFSET,
        HUD_BASELINE,
        C_HUD,
    );
}
