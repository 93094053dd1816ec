use rand::Rng;

use crate::game::grid::{BOARD, CELL, MAX_COORD, SPRITE};
use crate::game::{Simulation, Sprite};
use crate::style::{Rgb, Style};

use super::Canvas;

/// Grid lines every cell, edge to edge.
pub fn draw_grid(canvas: &mut Canvas, origin: (i32, i32), color: Rgb) {
    let (ox, oy) = origin;
    for k in (0..=MAX_COORD).step_by(CELL as usize) {
        canvas.fill_rect(ox + k, oy, 1, MAX_COORD as u32 + 1, color);
        canvas.fill_rect(ox, oy + k, MAX_COORD as u32 + 1, 1, color);
    }
}

/// Read-only projection of a round onto the canvas at `origin`.
pub fn draw_board<R: Rng>(canvas: &mut Canvas, sim: &Simulation<R>, style: &Style, origin: (i32, i32)) {
    let (ox, oy) = origin;
    canvas.fill_rect(ox, oy, BOARD, BOARD, style.board_background);
    draw_grid(canvas, origin, style.grid);
    for sprite in sim.sprites() {
        let (pos, color) = match sprite {
            Sprite::Food(pos) => (pos, style.food),
            Sprite::Head { pos, dead } => (pos, if dead { style.dead } else { style.head }),
            Sprite::Body { pos, flagged } => (pos, if flagged { style.dead } else { style.body }),
        };
        canvas.fill_rect(ox + pos.x, oy + pos.y, SPRITE, SPRITE, color);
    }
}
