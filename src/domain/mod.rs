/// Pure game rules: geometry, the avatar, obstacles, spawning, difficulty.
/// Nothing here knows about time, terminals, or input devices.

pub mod difficulty;
pub mod entity;
pub mod geometry;
pub mod obstacles;
pub mod spawner;
