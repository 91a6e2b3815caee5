/// Obstacle pair generation.
///
/// A pair is two rectangles at the right edge of the play area sharing x
/// and width, separated vertically by exactly `GAP` pixels.

use rand::Rng;

use super::geometry::{Arena, Rect};

/// Vertical gap between the members of a pair.
pub const GAP: i32 = 150;
/// Minimum distance kept between the gap and either play-area edge.
pub const EDGE_MARGIN: i32 = 100;
pub const MIN_WIDTH: i32 = 45;
/// Exclusive.
pub const MAX_WIDTH: i32 = 240;

/// Build the pair for a given top height and width.
///
/// Heights are clamped at zero so a cramped play area yields a thin or
/// empty member instead of a negative one.
pub fn pipe_pair(arena: Arena, top_height: i32, width: i32) -> [Rect; 2] {
    let top_height = top_height.max(0);
    let bottom_y = top_height + GAP;
    let bottom_height = (arena.height - bottom_y).max(0);
    [
        Rect::new(arena.width, 0, width, top_height),
        Rect::new(arena.width, bottom_y, width, bottom_height),
    ]
}

/// Top heights the spawner may choose from, or `None` when the play area
/// is too short to keep the margin on both sides of the gap.
pub fn top_height_range(arena: Arena) -> Option<std::ops::Range<i32>> {
    let hi = arena.height - GAP - EDGE_MARGIN;
    (hi > EDGE_MARGIN).then_some(EDGE_MARGIN..hi)
}

/// Random pair: uniform top height and width. Short play areas get the
/// gap centred instead.
pub fn spawn_pair<R: Rng + ?Sized>(rng: &mut R, arena: Arena) -> [Rect; 2] {
    let top_height = match top_height_range(arena) {
        Some(range) => rng.random_range(range),
        None => ((arena.height - GAP) / 2).max(0),
    };
    let width = rng.random_range(MIN_WIDTH..MAX_WIDTH);
    pipe_pair(arena, top_height, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn pair_geometry_for_known_top() {
        let arena = Arena::new(800, 500);
        let [top, bottom] = pipe_pair(arena, 150, 60);
        assert_eq!(top, Rect::new(800, 0, 60, 150));
        assert_eq!(bottom, Rect::new(800, 300, 60, 200));
        assert_eq!(top.height + GAP + bottom.height, arena.height);
    }

    #[test]
    fn range_for_normal_arena() {
        assert_eq!(top_height_range(Arena::new(800, 600)), Some(100..350));
    }

    #[test]
    fn range_is_none_when_degenerate() {
        assert_eq!(top_height_range(Arena::new(800, 350)), None);
        assert_eq!(top_height_range(Arena::new(800, 200)), None);
        assert_eq!(top_height_range(Arena::new(800, 351)), Some(100..101));
    }

    #[test]
    fn short_arena_centres_the_gap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let [top, bottom] = spawn_pair(&mut rng, Arena::new(400, 300));
        assert_eq!(top.height, 75);
        assert_eq!(bottom.y, 225);
        assert_eq!(bottom.height, 75);
    }

    #[test]
    fn tiny_arena_does_not_go_negative() {
        let mut rng = Pcg32::seed_from_u64(2);
        let [top, bottom] = spawn_pair(&mut rng, Arena::new(10, 40));
        assert_eq!(top.height, 0);
        assert_eq!(bottom.y, GAP);
        assert_eq!(bottom.height, 0);
    }

    #[test]
    fn flattened_members_cannot_be_hit() {
        let arena = Arena::new(400, 100);
        let [top, bottom] = pipe_pair(arena, 0, 60);
        assert!(top.is_empty() && bottom.is_empty());
        let avatar = Rect::new(400, 0, 30, 100);
        assert!(!top.intersects(&avatar));
        assert!(!bottom.intersects(&avatar));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let arena = Arena::new(800, 600);
        let a = spawn_pair(&mut Pcg32::seed_from_u64(99), arena);
        let b = spawn_pair(&mut Pcg32::seed_from_u64(99), arena);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn random_pairs_respect_ranges(seed in any::<u64>(), height in 351i32..2000, width in 1i32..3000) {
            let arena = Arena::new(width, height);
            let mut rng = Pcg32::seed_from_u64(seed);
            let [top, bottom] = spawn_pair(&mut rng, arena);
            prop_assert_eq!(top.x, arena.width);
            prop_assert_eq!(bottom.x, arena.width);
            prop_assert_eq!(top.width, bottom.width);
            prop_assert!((MIN_WIDTH..MAX_WIDTH).contains(&top.width));
            prop_assert!(top.height >= EDGE_MARGIN);
            prop_assert!(top.height < height - GAP - EDGE_MARGIN);
            prop_assert_eq!(top.y, 0);
            prop_assert_eq!(bottom.y - top.bottom(), GAP);
            prop_assert_eq!(bottom.bottom(), height);
        }

        #[test]
        fn any_arena_yields_valid_pair(seed in any::<u64>(), height in 1i32..351) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let [top, bottom] = spawn_pair(&mut rng, Arena::new(100, height));
            prop_assert!(top.height >= 0 && bottom.height >= 0);
            prop_assert_eq!(bottom.y - top.bottom(), GAP);
        }
    }
}
