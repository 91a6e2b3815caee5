/// The two periodic activities of a session.
///
/// `tick` (every simulation period):
///   1. Gravity on the avatar
///   2. Scroll obstacles left by the current speed
///   3. Prune obstacles fully past the left edge
///   4. Avatar vs obstacle collision
///   5. Avatar vs play-area bounds
///
/// `spawn` (every spawn interval):
///   1. Append a new obstacle pair
///   2. Score +1
///   3. Difficulty policy, possibly re-timing the spawn activity
///
/// Both are no-ops once the session is over. A crash stops both timers.

use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::domain::spawner;
use super::event::{CrashCause, GameEvent};
use super::session::{Phase, Session};

pub fn tick(s: &mut Session) -> Vec<GameEvent> {
    if s.phase != Phase::Running { return vec![]; }

    s.avatar.fall();
    s.obstacles.advance(s.difficulty.speed);
    let pruned = s.obstacles.prune();
    if pruned > 0 {
        debug!("pruned {pruned} obstacles, {} active", s.obstacles.len());
    }

    let cause = if s.obstacles.first_hit(&s.avatar.bounds()).is_some() {
        Some(CrashCause::Obstacle)
    } else if s.avatar.out_of_bounds(s.arena.height) {
        Some(CrashCause::OutOfBounds)
    } else {
        None
    };

    match cause {
        Some(cause) => {
            s.phase = Phase::GameOver;
            s.timers.stop_all();
            info!("crashed ({cause:?}) with score {}", s.score);
            vec![GameEvent::Crashed { cause, score: s.score }]
        }
        None => vec![],
    }
}

pub fn spawn<R: Rng + ?Sized>(s: &mut Session, rng: &mut R) -> Vec<GameEvent> {
    if s.phase != Phase::Running { return vec![]; }

    let pair = spawner::spawn_pair(rng, s.arena);
    debug!("spawned pair at x={} top={} width={}", pair[0].x, pair[0].height, pair[0].width);
    s.obstacles.push_pair(pair);
    s.score += 1;

    let mut events = vec![GameEvent::Spawned { score: s.score }];

    let next = s.difficulty.after_score(s.score);
    if next != s.difficulty {
        s.difficulty = next;
        s.timers.spawn.set_period(Duration::from_millis(next.spawn_interval_ms));
        info!(
            "difficulty raised at score {}: speed={} spawn_interval={:?}",
            s.score, next.speed, s.timers.spawn.period(),
        );
        events.push(GameEvent::DifficultyRaised {
            speed: next.speed,
            spawn_interval_ms: next.spawn_interval_ms,
        });
    }

    events
}
