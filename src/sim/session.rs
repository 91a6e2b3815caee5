/// Session: the complete state of one run, plus the timers that drive it.
///
/// ## Lifecycle
///
///   Running  --crash (step::tick)-->  GameOver
///   GameOver --Command::Restart-->    Running   (fresh state, fresh timers)
///   Running  --Command::Flap-->       Running   (velocity := FLAP_VELOCITY)
///
/// ## Timing
///
/// The session owns one timer per periodic activity. The host calls
/// `advance(now)` as often as it likes; each due activity runs at most once
/// per call. Restart replaces both timers with newly armed ones instead of
/// restarting the old ones, so nothing scheduled before the crash can fire
/// afterwards.

use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::domain::difficulty::Difficulty;
use crate::domain::entity::Avatar;
use crate::domain::geometry::{Arena, Rect};
use crate::domain::obstacles::ObstacleSet;
use super::event::GameEvent;
use super::step;
use super::timer::Timers;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    GameOver,
}

/// Discrete player commands delivered by the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Flap,
    Restart,
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub arena: Arena,
    pub avatar: Rect,
    pub obstacles: &'a [Rect],
    pub score: u32,
    pub game_over: bool,
}

pub struct Session {
    pub arena: Arena,
    pub avatar: Avatar,
    pub obstacles: ObstacleSet,
    pub score: u32,
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub timers: Timers,
    tick_period: Duration,
}

impl Session {
    pub fn new(arena: Arena, tick_period: Duration, now: Instant) -> Self {
        let difficulty = Difficulty::default();
        Session {
            arena,
            avatar: Avatar::new(arena.center_y() as f32),
            obstacles: ObstacleSet::new(),
            score: 0,
            difficulty,
            phase: Phase::Running,
            timers: Timers::started(tick_period, spawn_period(difficulty), now),
            tick_period,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Apply a player command. Flap is ignored after a crash, Restart is
    /// ignored while running.
    pub fn handle(&mut self, cmd: Command, now: Instant) -> Option<GameEvent> {
        match (cmd, self.phase) {
            (Command::Flap, Phase::Running) => {
                self.avatar.flap();
                Some(GameEvent::Flapped)
            }
            (Command::Restart, Phase::GameOver) => {
                self.restart(now);
                Some(GameEvent::Restarted)
            }
            _ => None,
        }
    }

    /// Run whichever periodic activities are due at `now`: tick first,
    /// then spawn.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.timers.tick.poll(now) {
            events.extend(step::tick(self));
        }
        if self.timers.spawn.poll(now) {
            events.extend(step::spawn(self, rng));
        }
        events
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            arena: self.arena,
            avatar: self.avatar.bounds(),
            obstacles: self.obstacles.as_slice(),
            score: self.score,
            game_over: self.is_game_over(),
        }
    }

    fn restart(&mut self, now: Instant) {
        info!("restart after score {}", self.score);
        let arena = self.arena;
        let tick_period = self.tick_period;
        *self = Session::new(arena, tick_period, now);
    }
}

fn spawn_period(d: Difficulty) -> Duration {
    Duration::from_millis(d.spawn_interval_ms)
}
