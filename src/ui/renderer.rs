/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Paint the snapshot into the `front` buffer through `Canvas`
///   2. Compare each cell with the `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The play area is scaled to fill the terminal minus one help row, so a
/// terminal cell covers several play-area pixels in each direction.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::geometry::{Arena, Rect};
use crate::sim::session::Snapshot;
use super::scene::{self, Ink, Surface};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Sky colour. Used for `Clear` as well so inter-row gaps match.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Differs from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y), keeping each cell's background.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x + i;
            if cx >= self.width { break; }
            let bg = self.get(cx, y).bg;
            self.set(cx, y, Cell { ch, fg, bg });
        }
    }
}

fn ink_color(ink: Ink) -> Color {
    match ink {
        Ink::Body => Color::Rgb { r: 245, g: 200, b: 66 },
        Ink::Beak => Color::Rgb { r: 225, g: 110, b: 35 },
        Ink::Eye => Color::Black,
        Ink::Obstacle => Color::Rgb { r: 74, g: 160, b: 40 },
        Ink::Text => Color::White,
        Ink::Alert => Color::Rgb { r: 230, g: 50, b: 50 },
    }
}

// ── Canvas: play-area pixels → terminal cells ──

/// Maps play-area pixels onto a `rows` x `cols` region of a frame buffer.
/// Cell (c, r) covers pixels `[c*W/cols, (c+1)*W/cols)` horizontally.
struct Canvas<'a> {
    buf: &'a mut FrameBuffer,
    arena: Arena,
    cols: usize,
    rows: usize,
}

impl Canvas<'_> {
    fn col_floor(&self, x: i32) -> i64 {
        (x as i64 * self.cols as i64).div_euclid(self.arena.width.max(1) as i64)
    }

    fn row_floor(&self, y: i32) -> i64 {
        (y as i64 * self.rows as i64).div_euclid(self.arena.height.max(1) as i64)
    }

    fn col_ceil(&self, x: i32) -> i64 {
        let w = self.arena.width.max(1) as i64;
        (x as i64 * self.cols as i64 + w - 1).div_euclid(w)
    }

    fn row_ceil(&self, y: i32) -> i64 {
        let h = self.arena.height.max(1) as i64;
        (y as i64 * self.rows as i64 + h - 1).div_euclid(h)
    }

    /// Cell ranges covered by `r`, clipped to the canvas. Non-empty rects
    /// always cover at least one cell before clipping.
    fn cell_span(&self, r: Rect) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        if r.is_empty() { return None; }
        let c0 = self.col_floor(r.x);
        let c1 = self.col_ceil(r.right()).max(c0 + 1);
        let r0 = self.row_floor(r.y);
        let r1 = self.row_ceil(r.bottom()).max(r0 + 1);
        let clip = |v: i64, max: usize| v.clamp(0, max as i64) as usize;
        let cols = clip(c0, self.cols)..clip(c1, self.cols);
        let rows = clip(r0, self.rows)..clip(r1, self.rows);
        (!cols.is_empty() && !rows.is_empty()).then_some((cols, rows))
    }

    /// Pixel coordinates of the centre of cell (c, r).
    fn cell_center(&self, c: usize, r: usize) -> (f32, f32) {
        let px = (c as f32 + 0.5) * self.arena.width as f32 / self.cols as f32;
        let py = (r as f32 + 0.5) * self.arena.height as f32 / self.rows as f32;
        (px, py)
    }

    fn paint_cell(&mut self, c: usize, r: usize, ink: Ink) {
        let cell = match ink {
            // Too small to fill: draw a glyph over whatever is there.
            Ink::Eye => Cell { ch: '●', fg: ink_color(ink), bg: self.buf.get(c, r).bg },
            _ => Cell { ch: ' ', fg: Color::White, bg: ink_color(ink) },
        };
        self.buf.set(c, r, cell);
    }
}

impl Surface for Canvas<'_> {
    fn fill_rect(&mut self, rect: Rect, ink: Ink) {
        let Some((cols, rows)) = self.cell_span(rect) else { return };
        for r in rows {
            for c in cols.clone() {
                self.paint_cell(c, r, ink);
            }
        }
    }

    fn fill_ellipse(&mut self, bounds: Rect, ink: Ink) {
        let Some((cols, rows)) = self.cell_span(bounds) else { return };
        let rx = bounds.width as f32 / 2.0;
        let ry = bounds.height as f32 / 2.0;
        let cx = bounds.x as f32 + rx;
        let cy = bounds.y as f32 + ry;

        let mut painted = false;
        for r in rows.clone() {
            for c in cols.clone() {
                let (px, py) = self.cell_center(c, r);
                let dx = (px - cx) / rx;
                let dy = (py - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.paint_cell(c, r, ink);
                    painted = true;
                }
            }
        }

        // Small ellipses fall between cell centres; keep them visible.
        if !painted {
            let c = self.col_floor(cx as i32).clamp(cols.start as i64, cols.end as i64 - 1);
            let r = self.row_floor(cy as i32).clamp(rows.start as i64, rows.end as i64 - 1);
            self.paint_cell(c as usize, r as usize, ink);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, ink: Ink) {
        let len = text.chars().count();
        let max_col = self.cols.saturating_sub(len) as i64;
        let col = self.col_floor(x).clamp(0, max_col) as usize;
        let row = self.row_floor(y).clamp(0, self.rows.saturating_sub(1) as i64) as usize;
        self.buf.put_str(col, row, text, ink_color(ink));
    }
}

// ── Renderer ──

const HELP_TEXT: &str = " [Space] Flap   [R] Restart   [Esc] Quit ";

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_game_over: Option<bool>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_game_over: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, snap: &Snapshot) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Clean transition into and out of game over
        if self.last_game_over != Some(snap.game_over) {
            self.back.cells.fill(Cell::INVALID);
            self.last_game_over = Some(snap.game_over);
        }

        self.compose(snap);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    fn compose(&mut self, snap: &Snapshot) {
        self.front.clear();
        let cols = self.front.width;
        let rows = self.front.height.saturating_sub(1).max(1);
        if cols == 0 { return; }

        let mut canvas = Canvas { buf: &mut self.front, arena: snap.arena, cols, rows };
        scene::paint(snap, &mut canvas);

        if self.front.height > 1 {
            let help_row = self.front.height - 1;
            self.front.put_str(0, help_row, HELP_TEXT, Color::DarkGrey);
        }
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x == 0 {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
            }
        }

        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(buf: &mut FrameBuffer, w: i32, h: i32) -> Canvas<'_> {
        let (cols, rows) = (buf.width, buf.height);
        Canvas { buf, arena: Arena::new(w, h), cols, rows }
    }

    fn painted(buf: &FrameBuffer, ink: Ink) -> usize {
        buf.cells.iter().filter(|c| c.bg == ink_color(ink)).count()
    }

    #[test]
    fn rect_maps_to_scaled_cells() {
        let mut buf = FrameBuffer::new(80, 30);
        canvas(&mut buf, 800, 600).fill_rect(Rect::new(400, 0, 100, 200), Ink::Obstacle);
        // 10 px per column, 20 px per row
        assert_eq!(painted(&buf, Ink::Obstacle), 10 * 10);
        assert_eq!(buf.get(40, 0).bg, ink_color(Ink::Obstacle));
        assert_eq!(buf.get(50, 0).bg, Cell::BASE_BG);
        assert_eq!(buf.get(40, 10).bg, Cell::BASE_BG);
    }

    #[test]
    fn offscreen_rect_is_clipped() {
        let mut buf = FrameBuffer::new(80, 30);
        let mut c = canvas(&mut buf, 800, 600);
        c.fill_rect(Rect::new(-200, 0, 100, 600), Ink::Obstacle);
        c.fill_rect(Rect::new(900, 0, 100, 600), Ink::Obstacle);
        assert_eq!(painted(&buf, Ink::Obstacle), 0);
    }

    #[test]
    fn partially_visible_rect_is_drawn_at_edge() {
        let mut buf = FrameBuffer::new(80, 30);
        canvas(&mut buf, 800, 600).fill_rect(Rect::new(-50, 0, 60, 20), Ink::Obstacle);
        assert_eq!(buf.get(0, 0).bg, ink_color(Ink::Obstacle));
        assert_eq!(buf.get(1, 0).bg, Cell::BASE_BG);
    }

    #[test]
    fn zero_height_rect_draws_nothing() {
        let mut buf = FrameBuffer::new(80, 30);
        canvas(&mut buf, 800, 600).fill_rect(Rect::new(100, 100, 60, 0), Ink::Obstacle);
        assert_eq!(painted(&buf, Ink::Obstacle), 0);
    }

    #[test]
    fn tiny_ellipse_still_visible() {
        let mut buf = FrameBuffer::new(80, 30);
        canvas(&mut buf, 800, 600).fill_ellipse(Rect::new(55, 205, 5, 5), Ink::Eye);
        assert_eq!(buf.cells.iter().filter(|c| c.ch == '●').count(), 1);
    }

    #[test]
    fn text_is_kept_on_screen() {
        let mut buf = FrameBuffer::new(20, 10);
        canvas(&mut buf, 800, 600).draw_text(790, 590, "Score: 1", Ink::Text);
        assert_eq!(buf.get(12, 9).ch, 'S');
        assert_eq!(buf.get(19, 9).ch, '1');
    }
}
