/// Integer geometry shared by the simulation and the scene painter.
///
/// Coordinates are play-area pixels: origin at the top-left corner,
/// `y` grows downward.

/// Axis-aligned rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// No area: zero or negative width or height.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open overlap test. Rectangles sharing only an edge do not
    /// intersect, and an empty rectangle intersects nothing.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same rectangle moved horizontally by `dx`.
    #[inline]
    pub fn shifted_x(&self, dx: i32) -> Rect {
        Rect { x: self.x + dx, ..*self }
    }
}

/// Size of the play area. Fixed for the lifetime of a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Arena {
    pub const fn new(width: i32, height: i32) -> Self {
        Arena { width, height }
    }

    /// Vertical centre, integer division.
    #[inline]
    pub fn center_y(&self) -> i32 {
        self.height / 2
    }
}
