/// Scene painting: turns a session snapshot into drawing calls.
///
/// The painter knows nothing about terminals. Any backend that implements
/// `Surface` in play-area pixel coordinates can display the game.

use crate::domain::geometry::Rect;
use crate::sim::session::Snapshot;

/// Logical colours. Backends choose the actual palette.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Ink {
    Body,
    Beak,
    Eye,
    Obstacle,
    Text,
    Alert,
}

pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, ink: Ink);
    fn fill_ellipse(&mut self, bounds: Rect, ink: Ink);
    fn draw_text(&mut self, x: i32, y: i32, text: &str, ink: Ink);
}

pub const GAME_OVER_TEXT: &str = "Game Over! Press R to Restart";

pub fn paint<S: Surface + ?Sized>(snap: &Snapshot, surface: &mut S) {
    let a = snap.avatar;
    surface.fill_ellipse(a, Ink::Body);
    surface.fill_rect(Rect::new(a.x - 5, a.y + 10, 10, 10), Ink::Beak);
    surface.fill_ellipse(Rect::new(a.x + 15, a.y + 5, 5, 5), Ink::Eye);

    for r in snap.obstacles {
        surface.fill_rect(*r, Ink::Obstacle);
    }

    surface.draw_text(10, 10, &format!("Score: {}", snap.score), Ink::Text);

    if snap.game_over {
        surface.draw_text(
            snap.arena.width / 2 - 100,
            snap.arena.height / 2,
            GAME_OVER_TEXT,
            Ink::Alert,
        );
    }
}
