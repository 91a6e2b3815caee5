/// Gamepad input tracker using gilrs.
///
/// Button mapping is loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   A / B / X / Y   →  Flap
///   Start           →  Restart
///   Select          →  Quit
///
/// Without the "gamepad" feature every query returns false.

#[cfg(feature = "gamepad")]
use gilrs::{Button, EventType, Gilrs};

use crate::config::GamepadConfig;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    L2,
    R2,
    Start,
    Select,
    DPadUp,
}

const BTN_COUNT: usize = 11;

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2"  => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            "UP" | "DPADUP" => Some(Btn::DPadUp),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::LeftTrigger2  => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            Button::DPadUp    => Some(Btn::DPadUp),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
#[derive(Debug, PartialEq)]
struct ActionMap {
    flap: Vec<Btn>,
    restart: Vec<Btn>,
    quit: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            flap:    vec![Btn::A, Btn::B, Btn::X, Btn::Y],
            restart: vec![Btn::Start],
            quit:    vec![Btn::Select],
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Presses seen during the most recent `update()`, indexed by Btn.
    presses: [u8; BTN_COUNT],

    action_map: ActionMap,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                None
            }
        };

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs,
            presses: [0; BTN_COUNT],
            action_map: ActionMap::default(),
        }
    }

    /// Load button mapping from config. Empty or unrecognised lists keep the default.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        let map = &mut self.action_map;
        let fl = parse_list(&cfg.flap);
        if !fl.is_empty() { map.flap = fl; }
        let rs = parse_list(&cfg.restart);
        if !rs.is_empty() { map.restart = rs; }
        let qt = parse_list(&cfg.quit);
        if !qt.is_empty() { map.quit = qt; }
    }

    pub fn update(&mut self) {
        self.presses = [0; BTN_COUNT];

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    if let Some(b) = Btn::from_gilrs(btn) {
                        self.record(b);
                    }
                }
                EventType::Connected => log::info!("gamepad {:?} connected", event.id),
                EventType::Disconnected => log::info!("gamepad {:?} disconnected", event.id),
                _ => {}
            }
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn record(&mut self, btn: Btn) {
        let slot = &mut self.presses[btn as usize];
        *slot = slot.saturating_add(1);
    }

    fn count(&self, btns: &[Btn]) -> usize {
        btns.iter().map(|&b| self.presses[b as usize] as usize).sum()
    }

    // ── Action queries (config-driven) ──

    pub fn flap_pressed(&self) -> bool {
        self.count(&self.action_map.flap) > 0
    }
    pub fn restart_pressed(&self) -> bool {
        self.count(&self.action_map.restart) > 0
    }
    pub fn quit_pressed(&self) -> bool {
        self.count(&self.action_map.quit) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(flap: &[&str], restart: &[&str], quit: &[&str]) -> GamepadConfig {
        let v = |s: &[&str]| s.iter().map(|x| x.to_string()).collect();
        GamepadConfig { flap: v(flap), restart: v(restart), quit: v(quit) }
    }

    #[test]
    fn button_names_are_case_insensitive() {
        assert_eq!(Btn::from_name("south"), Some(Btn::A));
        assert_eq!(Btn::from_name("Rb"), Some(Btn::R1));
        assert_eq!(Btn::from_name("back"), Some(Btn::Select));
        assert_eq!(Btn::from_name("turbo"), None);
    }

    #[test]
    fn config_overrides_mapping() {
        let mut gp = GamepadState::new();
        gp.load_button_config(&cfg(&["R1", "bogus"], &["A"], &[]));
        assert_eq!(gp.action_map.flap, vec![Btn::R1]);
        assert_eq!(gp.action_map.restart, vec![Btn::A]);
        assert_eq!(gp.action_map.quit, vec![Btn::Select]);
    }

    #[test]
    fn presses_map_to_actions() {
        let mut gp = GamepadState::new();
        gp.record(Btn::A);
        gp.record(Btn::Y);
        gp.record(Btn::Start);
        assert!(gp.flap_pressed());
        assert_eq!(gp.count(&gp.action_map.flap), 2);
        assert!(gp.restart_pressed());
        assert!(!gp.quit_pressed());
    }
}
