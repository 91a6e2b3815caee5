/// Difficulty progression: a pure function of the score.
///
/// Reaching one of the fixed thresholds speeds the obstacles up by one
/// pixel per tick and shortens the spawn interval by 200 ms, never
/// below 1000 ms.

pub const INITIAL_SPEED: i32 = 5;
pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 5000;
pub const SPAWN_INTERVAL_STEP_MS: u64 = 200;
pub const SPAWN_INTERVAL_FLOOR_MS: u64 = 1000;
pub const THRESHOLDS: [u32; 7] = [10, 20, 50, 100, 200, 500, 1000];

/// Scroll speed and spawn cadence in effect for a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Difficulty {
    pub speed: i32,
    pub spawn_interval_ms: u64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty {
            speed: INITIAL_SPEED,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
        }
    }
}

impl Difficulty {
    /// Difficulty after the score became `score`. Unchanged unless `score`
    /// is exactly a threshold.
    pub fn after_score(self, score: u32) -> Difficulty {
        if !THRESHOLDS.contains(&score) {
            return self;
        }
        Difficulty {
            speed: self.speed + 1,
            spawn_interval_ms: self
                .spawn_interval_ms
                .saturating_sub(SPAWN_INTERVAL_STEP_MS)
                .max(SPAWN_INTERVAL_FLOOR_MS),
        }
    }
}
