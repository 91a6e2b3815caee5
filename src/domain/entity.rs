/// The avatar: a box with fixed x that falls under gravity.
///
/// Vertical motion is in pixels per tick. Gravity adds to the velocity
/// every tick; an impulse overwrites it.

use super::geometry::Rect;

/// Fixed horizontal position of the avatar box.
pub const AVATAR_X: i32 = 40;
/// Avatar box is square.
pub const AVATAR_SIZE: i32 = 30;
/// Downward acceleration per tick.
pub const GRAVITY: f32 = 0.5;
/// Velocity set by an upward impulse (negative = up).
pub const FLAP_VELOCITY: f32 = -8.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Avatar {
    pub y: f32,
    pub vy: f32,
}

impl Avatar {
    /// At rest at vertical position `y`.
    pub fn new(y: f32) -> Self {
        Avatar { y, vy: 0.0 }
    }

    /// One tick of gravity: velocity first, then position.
    #[inline]
    pub fn fall(&mut self) {
        self.vy += GRAVITY;
        self.y += self.vy;
    }

    #[inline]
    pub fn flap(&mut self) {
        self.vy = FLAP_VELOCITY;
    }

    /// Collision box. The float position is truncated toward zero.
    pub fn bounds(&self) -> Rect {
        Rect::new(AVATAR_X, self.y as i32, AVATAR_SIZE, AVATAR_SIZE)
    }

    /// Above the top edge or below the bottom edge of a play area `height` tall.
    pub fn out_of_bounds(&self, height: i32) -> bool {
        self.y < 0.0 || self.y > height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fall_applies_velocity_before_position() {
        let mut a = Avatar::new(100.0);
        a.fall();
        assert_eq!(a.vy, 0.5);
        assert_eq!(a.y, 100.5);
        a.fall();
        assert_eq!(a.vy, 1.0);
        assert_eq!(a.y, 101.5);
    }

    #[test]
    fn flap_overrides_accumulated_velocity() {
        let mut a = Avatar::new(300.0);
        for _ in 0..40 { a.fall(); }
        assert!(a.vy > 10.0);
        a.flap();
        assert_eq!(a.vy, FLAP_VELOCITY);
    }

    #[test]
    fn bounds_truncate_position() {
        let a = Avatar { y: 123.9, vy: 0.0 };
        assert_eq!(a.bounds(), Rect::new(40, 123, 30, 30));
    }

    #[test]
    fn below_floor_is_out_of_bounds() {
        assert!(Avatar::new(300.0).out_of_bounds(280));
        assert!(!Avatar::new(280.0).out_of_bounds(280));
    }

    #[test]
    fn above_ceiling_is_out_of_bounds() {
        assert!(Avatar::new(-0.5).out_of_bounds(600));
        assert!(!Avatar::new(0.0).out_of_bounds(600));
    }

    proptest! {
        #[test]
        fn each_fall_adds_gravity(y in 0.0f32..600.0, vy in -8.0f32..20.0, ticks in 1usize..50) {
            let mut a = Avatar { y, vy };
            for _ in 0..ticks {
                let before = a.vy;
                a.fall();
                prop_assert_eq!(a.vy, before + GRAVITY);
            }
        }

        #[test]
        fn flap_always_lands_on_constant(vy in -100.0f32..100.0) {
            let mut a = Avatar { y: 200.0, vy };
            a.flap();
            prop_assert_eq!(a.vy, FLAP_VELOCITY);
        }
    }
}
