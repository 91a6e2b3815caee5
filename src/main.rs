/// Entry point and host loop.
///
/// The loop is the only thread of control. Each frame it drains input,
/// applies commands, lets the session run whichever periodic activities
/// are due, then repaints from a read-only snapshot.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use config::GameConfig;
use sim::event::GameEvent;
use sim::session::{Command, Session};
use ui::gamepad::GamepadState;
use ui::input::{InputState, KEYS_FLAP, KEYS_QUIT, KEYS_RESTART};
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(2);

/// Names the file log output goes to. Unset means no logging.
const LOG_FILE_VAR: &str = "FLAPPER_LOG";

fn main() {
    init_logging();
    let config = GameConfig::load();

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = Pcg32::seed_from_u64(seed);
    log::info!(
        "starting: arena {}x{}, tick {:?}, seed {seed}",
        config.arena.width, config.arena.height, config.tick_rate,
    );

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        log::error!("terminal init failed: {e}");
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = if config.sound { SoundEngine::new() } else { None };
    let mut session = Session::new(config.arena, config.tick_rate, Instant::now());

    let result = game_loop(&mut session, &mut rng, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        log::error!("game loop failed: {e}");
        eprintln!("Game error: {e}");
    }

    log::info!("exit with score {}", session.score);
    println!("Final Score: {}", session.score);
}

/// Install a file logger if `FLAPPER_LOG` is set. The terminal belongs to
/// the renderer, so logs never go to stderr.
fn init_logging() {
    let Some(path) = std::env::var_os(LOG_FILE_VAR).map(PathBuf::from) else { return };
    match File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Warning: could not open log file {}: {e}", path.display()),
    }
}

fn game_loop(
    session: &mut Session,
    rng: &mut Pcg32,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) || gp.quit_pressed() {
            break;
        }

        let now = Instant::now();
        let mut events: Vec<GameEvent> = read_commands(&kb, &gp)
            .into_iter()
            .filter_map(|cmd| session.handle(cmd, now))
            .collect();
        events.extend(session.advance(now, rng));
        process_sound_events(sound, &events);

        renderer.render(&session.snapshot())?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn read_commands(kb: &InputState, gp: &GamepadState) -> Vec<Command> {
    let mut cmds = Vec::with_capacity(2);
    if kb.any_pressed(KEYS_FLAP) || gp.flap_pressed() {
        cmds.push(Command::Flap);
    }
    if kb.any_pressed(KEYS_RESTART) || gp.restart_pressed() {
        cmds.push(Command::Restart);
    }
    cmds
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::Flapped => sfx.play_flap(),
            GameEvent::Spawned { .. } => sfx.play_score(),
            GameEvent::DifficultyRaised { .. } => sfx.play_level_up(),
            GameEvent::Crashed { .. } => sfx.play_crash(),
            GameEvent::Restarted => {}
        }
    }
}
