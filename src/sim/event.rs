/// Events emitted by session operations.
/// The presentation layer consumes these for sound and logging.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CrashCause {
    Obstacle,
    OutOfBounds,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(dead_code)]
pub enum GameEvent {
    Flapped,
    Spawned { score: u32 },
    DifficultyRaised { speed: i32, spawn_interval_ms: u64 },
    Crashed { cause: CrashCause, score: u32 },
    Restarted,
}
