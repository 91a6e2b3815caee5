/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// The difficulty progression is fixed and not configurable.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::geometry::Arena;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tick_rate: Duration,
    pub arena: Arena,
    pub gamepad: GamepadConfig,
    pub sound: bool,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GamepadConfig {
    pub flap: Vec<String>,
    pub restart: Vec<String>,
    pub quit: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    arena: TomlArena,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlArena {
    #[serde(default = "default_width")]
    width: i32,
    #[serde(default = "default_height")]
    height: i32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_flap")]
    flap: Vec<String>,
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_sound")]
    sound: bool,
    #[serde(default)]
    seed: Option<u64>,
}

/// Largest accepted arena side. Keeps obstacle edge arithmetic in `i32`.
const MAX_ARENA: i32 = 100_000;

// ── Defaults ──

fn default_tick_rate() -> u64 { 8 }
fn default_width() -> i32 { 800 }
fn default_height() -> i32 { 600 }
fn default_flap() -> Vec<String> { vec!["A".into(), "B".into(), "X".into(), "Y".into()] }
fn default_restart() -> Vec<String> { vec!["Start".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }
fn default_sound() -> bool { true }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlArena {
    fn default() -> Self {
        TomlArena { width: default_width(), height: default_height() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            flap: default_flap(),
            restart: default_restart(),
            quit: default_quit(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { sound: default_sound(), seed: None }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        Self::from_toml(load_toml(&candidate_dirs()))
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        if cfg.timing.tick_rate_ms == 0 {
            log::warn!("tick_rate_ms = 0 is not allowed, using 1");
        }
        if cfg.arena.width < 1 || cfg.arena.height < 1 {
            log::warn!(
                "arena {}x{} is too small, clamping to at least 1x1",
                cfg.arena.width, cfg.arena.height,
            );
        }
        if cfg.arena.width > MAX_ARENA || cfg.arena.height > MAX_ARENA {
            log::warn!(
                "arena {}x{} is too large, clamping to at most {MAX_ARENA}x{MAX_ARENA}",
                cfg.arena.width, cfg.arena.height,
            );
        }

        GameConfig {
            tick_rate: Duration::from_millis(cfg.timing.tick_rate_ms.max(1)),
            arena: Arena::new(
                cfg.arena.width.clamp(1, MAX_ARENA),
                cfg.arena.height.clamp(1, MAX_ARENA),
            ),
            gamepad: GamepadConfig {
                flap: cfg.gamepad.flap,
                restart: cfg.gamepad.restart,
                quit: cfg.gamepad.quit,
            },
            sound: cfg.general.sound,
            seed: cfg.general.seed,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so an installed link still finds the real config.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() { continue; }
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                log::info!("using {}", path.display());
                return parse_toml(&text);
            }
            Err(e) => log::warn!("could not read {}: {e}", path.display()),
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str) -> TomlConfig {
    toml::from_str::<TomlConfig>(text).unwrap_or_else(|e| {
        log::warn!("config.toml parse error, using default settings: {e}");
        TomlConfig::default()
    })
}
