/// The active obstacle set.
///
/// Insertion order is kept so collision checks and pruning iterate
/// deterministically. Obstacles only ever move left.

use super::geometry::Rect;

#[derive(Clone, Debug, Default)]
pub struct ObstacleSet {
    items: Vec<Rect>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        ObstacleSet { items: Vec::with_capacity(16) }
    }

    /// Append a spawned pair, top member first.
    pub fn push_pair(&mut self, pair: [Rect; 2]) {
        self.items.extend_from_slice(&pair);
    }

    /// Translate every obstacle `speed` pixels to the left.
    pub fn advance(&mut self, speed: i32) {
        for r in &mut self.items {
            *r = r.shifted_x(-speed);
        }
    }

    /// Drop obstacles whose right edge is left of the play area.
    /// Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|r| r.right() >= 0);
        before - self.items.len()
    }

    /// First obstacle overlapping `bounds`, if any.
    pub fn first_hit(&self, bounds: &Rect) -> Option<&Rect> {
        self.items.iter().find(|r| r.intersects(bounds))
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pair_at(x: i32, width: i32) -> [Rect; 2] {
        [Rect::new(x, 0, width, 150), Rect::new(x, 300, width, 300)]
    }

    #[test]
    fn advance_moves_every_obstacle() {
        let mut set = ObstacleSet::new();
        set.push_pair(pair_at(800, 60));
        set.advance(5);
        assert!(set.as_slice().iter().all(|r| r.x == 795 && r.width == 60));
    }

    #[test]
    fn prune_keeps_partially_visible() {
        let mut set = ObstacleSet::new();
        set.push_pair(pair_at(-60, 60)); // right edge exactly 0
        assert_eq!(set.prune(), 0);
        set.advance(1);
        assert_eq!(set.prune(), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn prune_keeps_order_of_survivors() {
        let mut set = ObstacleSet::new();
        set.push_pair(pair_at(-100, 50));
        set.push_pair(pair_at(400, 80));
        set.prune();
        assert_eq!(set.as_slice(), &pair_at(400, 80));
    }

    #[test]
    fn first_hit_finds_overlap() {
        let mut set = ObstacleSet::new();
        set.push_pair(pair_at(50, 60));
        let avatar = Rect::new(40, 140, 30, 30);
        assert_eq!(set.first_hit(&avatar), Some(&Rect::new(50, 0, 60, 150)));
        let in_gap = Rect::new(40, 200, 30, 30);
        assert_eq!(set.first_hit(&in_gap), None);
    }

    proptest! {
        #[test]
        fn nothing_off_screen_survives_prune(
            xs in proptest::collection::vec((-500i32..900, 45i32..240), 0..20),
            speed in 1i32..15,
        ) {
            let mut set = ObstacleSet::new();
            for (x, w) in xs {
                set.push_pair(pair_at(x, w));
            }
            set.advance(speed);
            set.prune();
            prop_assert!(set.as_slice().iter().all(|r| r.right() >= 0));
        }
    }
}
