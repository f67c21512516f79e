//! Gamepad sampler
//!
//! Reads every controller slot once per frame and normalizes it into the
//! canonical button/axis index space.

use nxcore_platform::{GamepadAxis, GamepadButton, InputState, MAX_GAMEPADS};
use tracing::{debug, info};

use crate::hid::{gamepad_name, HidBackend, NpadButtons, NpadStyleSet, PadSnapshot};

/// Largest raw stick magnitude
pub const STICK_MAX: f32 = 32767.0;

/// Native bit for each mapped logical button, in logical index order
const BUTTON_MAP: &[(GamepadButton, NpadButtons)] = &[
    (GamepadButton::LeftFaceUp, NpadButtons::UP),
    (GamepadButton::LeftFaceRight, NpadButtons::RIGHT),
    (GamepadButton::LeftFaceDown, NpadButtons::DOWN),
    (GamepadButton::LeftFaceLeft, NpadButtons::LEFT),
    (GamepadButton::RightFaceUp, NpadButtons::X),
    (GamepadButton::RightFaceRight, NpadButtons::A),
    (GamepadButton::RightFaceDown, NpadButtons::B),
    (GamepadButton::RightFaceLeft, NpadButtons::Y),
    (GamepadButton::LeftTrigger1, NpadButtons::L),
    (GamepadButton::LeftTrigger2, NpadButtons::ZL),
    (GamepadButton::RightTrigger1, NpadButtons::R),
    (GamepadButton::RightTrigger2, NpadButtons::ZR),
    (GamepadButton::MiddleLeft, NpadButtons::MINUS),
    (GamepadButton::MiddleRight, NpadButtons::PLUS),
    (GamepadButton::LeftThumb, NpadButtons::STICK_L),
    (GamepadButton::RightThumb, NpadButtons::STICK_R),
];

/// Raw snapshot of each slot that was connected this frame
pub type ConnectedPads = [Option<PadSnapshot>; MAX_GAMEPADS];

/// Normalize a raw stick axis into [-1, 1]
pub fn normalize_stick(raw: i32) -> f32 {
    (raw as f32 / STICK_MAX).clamp(-1.0, 1.0)
}

fn trigger(buttons: NpadButtons, bit: NpadButtons) -> f32 {
    if buttons.contains(bit) {
        1.0
    } else {
        0.0
    }
}

/// Per-slot style cache and sampling
#[derive(Debug, Default)]
pub struct GamepadSampler {
    styles: [NpadStyleSet; MAX_GAMEPADS],
    name_resolutions: [u32; MAX_GAMEPADS],
}

impl GamepadSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style last seen on a slot
    pub fn style(&self, slot: usize) -> Option<NpadStyleSet> {
        self.styles.get(slot).copied()
    }

    /// How many times a slot's display name has been resolved
    pub fn name_resolutions(&self, slot: usize) -> u32 {
        self.name_resolutions.get(slot).copied().unwrap_or(0)
    }

    /// Configure the pad layout and resolve the initial style of each slot
    pub fn initialize(&mut self, hid: &mut dyn HidBackend, input: &mut InputState) {
        hid.configure_pads(MAX_GAMEPADS);
        for slot in 0..MAX_GAMEPADS {
            let snapshot = hid.update_pad(slot);
            self.resolve_name(slot, snapshot.style, input);
        }
    }

    fn resolve_name(&mut self, slot: usize, style: NpadStyleSet, input: &mut InputState) {
        let Some(pad) = input.gamepad_mut(slot) else {
            return;
        };
        let name = gamepad_name(style);
        self.styles[slot] = style;
        self.name_resolutions[slot] += 1;
        pad.set_name(name);
        debug!(slot, name, "gamepad style resolved");
    }

    /// Sample every slot; returns the raw snapshot of each connected slot
    pub fn sample(&mut self, hid: &mut dyn HidBackend, input: &mut InputState) -> ConnectedPads {
        let mut held = [None; MAX_GAMEPADS];

        for (slot, entry) in held.iter_mut().enumerate() {
            let snapshot = hid.update_pad(slot);
            let Some(pad) = input.gamepad_mut(slot) else {
                continue;
            };

            if pad.is_ready() != snapshot.connected {
                info!(slot, connected = snapshot.connected, "gamepad connection changed");
            }
            pad.set_ready(snapshot.connected);
            if !snapshot.connected {
                continue;
            }

            if snapshot.style != self.styles[slot] {
                self.resolve_name(slot, snapshot.style, input);
            }

            let Some(pad) = input.gamepad_mut(slot) else {
                continue;
            };
            pad.set_axis_count(GamepadAxis::COUNT);
            pad.rotate_buttons();

            let mut last_pressed = None;
            for &(button, bit) in BUTTON_MAP {
                let down = snapshot.buttons.contains(bit);
                pad.set_button_down(button, down);
                if down {
                    last_pressed = Some(button);
                }
            }

            pad.set_axis(GamepadAxis::LeftX, normalize_stick(snapshot.left_stick.x));
            pad.set_axis(GamepadAxis::LeftY, normalize_stick(snapshot.left_stick.y));
            pad.set_axis(GamepadAxis::RightX, normalize_stick(snapshot.right_stick.x));
            pad.set_axis(GamepadAxis::RightY, normalize_stick(snapshot.right_stick.y));
            // No analog triggers on this hardware
            pad.set_axis(GamepadAxis::LeftTrigger, trigger(snapshot.buttons, NpadButtons::ZL));
            pad.set_axis(GamepadAxis::RightTrigger, trigger(snapshot.buttons, NpadButtons::ZR));

            if let Some(button) = last_pressed {
                input.set_last_gamepad_button_pressed(button);
            }
            *entry = Some(snapshot);
        }

        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHid;

    fn sampled(hid: &mut FakeHid, sampler: &mut GamepadSampler, input: &mut InputState) -> ConnectedPads {
        sampler.sample(hid, input)
    }

    #[test]
    fn test_initialize_configures_and_names() {
        let mut hid = FakeHid::default();
        hid.connect(0, NpadStyleSet::HANDHELD);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();

        sampler.initialize(&mut hid, &mut input);

        assert_eq!(hid.script().configured_players, Some(MAX_GAMEPADS));
        assert_eq!(input.gamepad(0).unwrap().name(), "Handheld Joy-Con controller");
        assert_eq!(input.gamepad(1).unwrap().name(), "Generic controller");
        assert_eq!(sampler.name_resolutions(0), 1);
    }

    #[test]
    fn test_buttons_map_to_logical_indices() {
        let mut hid = FakeHid::default();
        hid.connect(0, NpadStyleSet::FULL_KEY);
        hid.hold(0, NpadButtons::A | NpadButtons::UP | NpadButtons::STICK_R_UP);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();

        let held = sampled(&mut hid, &mut sampler, &mut input);

        assert!(held[0].is_some());
        assert!(held[1].is_none());
        assert!(input.gamepad_button_pressed(0, GamepadButton::RightFaceRight));
        assert!(input.gamepad_button_down(0, GamepadButton::LeftFaceUp));
        assert!(!input.gamepad_button_down(0, GamepadButton::Middle));
        assert!(!input.gamepad_button_down(0, GamepadButton::Unknown));
        assert_eq!(input.gamepad(0).unwrap().axis_count(), GamepadAxis::COUNT);
        assert_eq!(
            input.last_gamepad_button_pressed(),
            GamepadButton::RightFaceRight
        );
    }

    #[test]
    fn test_edges_across_frames() {
        let mut hid = FakeHid::default();
        hid.connect(0, NpadStyleSet::FULL_KEY);
        hid.hold(0, NpadButtons::B);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();

        sampled(&mut hid, &mut sampler, &mut input);
        hid.hold(0, NpadButtons::empty());
        sampled(&mut hid, &mut sampler, &mut input);

        assert!(input.gamepad(0).unwrap().is_button_released(GamepadButton::RightFaceDown));
    }

    #[test]
    fn test_axes_stay_in_range() {
        let mut hid = FakeHid::default();
        hid.connect(0, NpadStyleSet::FULL_KEY);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();

        for raw in [i32::MIN, -32768, -32767, -1, 0, 1, 16384, 32767, 40000, i32::MAX] {
            hid.set_sticks(0, (raw, -raw.saturating_add(1)), (raw / 2, raw));
            hid.hold(0, if raw > 0 { NpadButtons::ZL } else { NpadButtons::ZR });
            sampled(&mut hid, &mut sampler, &mut input);

            let pad = input.gamepad(0).unwrap();
            for axis in [GamepadAxis::LeftX, GamepadAxis::LeftY, GamepadAxis::RightX, GamepadAxis::RightY] {
                let value = pad.axis(axis);
                assert!((-1.0..=1.0).contains(&value), "{axis:?} = {value} for {raw}");
            }
            for axis in [GamepadAxis::LeftTrigger, GamepadAxis::RightTrigger] {
                let value = pad.axis(axis);
                assert!(value == 0.0 || value == 1.0);
            }
        }
        assert_eq!(normalize_stick(32767), 1.0);
        assert_eq!(normalize_stick(-32768), -1.0);
    }

    #[test]
    fn test_triggers_follow_digital_bits() {
        let mut hid = FakeHid::default();
        hid.connect(0, NpadStyleSet::FULL_KEY);
        hid.hold(0, NpadButtons::ZR);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();

        sampled(&mut hid, &mut sampler, &mut input);

        assert_eq!(input.gamepad_axis(0, GamepadAxis::RightTrigger), 1.0);
        assert_eq!(input.gamepad_axis(0, GamepadAxis::LeftTrigger), 0.0);
    }

    #[test]
    fn test_disconnected_slot_keeps_buffers() {
        let mut hid = FakeHid::default();
        hid.connect(2, NpadStyleSet::JOY_DUAL);
        hid.hold(2, NpadButtons::A);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();
        sampled(&mut hid, &mut sampler, &mut input);

        hid.disconnect(2);
        hid.hold(2, NpadButtons::empty());
        let held = sampled(&mut hid, &mut sampler, &mut input);

        let pad = input.gamepad(2).unwrap();
        assert!(held[2].is_none());
        assert!(!pad.is_ready());
        assert!(pad.is_button_down(GamepadButton::RightFaceRight));
        assert!(pad.is_button_pressed(GamepadButton::RightFaceRight));
    }

    #[test]
    fn test_name_resolved_once_per_style_change() {
        let mut hid = FakeHid::default();
        hid.connect(1, NpadStyleSet::JOY_DUAL);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();

        for _ in 0..5 {
            sampled(&mut hid, &mut sampler, &mut input);
        }
        assert_eq!(sampler.name_resolutions(1), 1);
        assert_eq!(input.gamepad_name(1), Some("Dual Joy-Con controller"));

        hid.connect(1, NpadStyleSet::GC);
        for _ in 0..3 {
            sampled(&mut hid, &mut sampler, &mut input);
        }
        assert_eq!(sampler.name_resolutions(1), 2);
        assert_eq!(input.gamepad_name(1), Some("GameCube controller"));
        assert_eq!(sampler.name_resolutions(0), 0);
    }

    #[test]
    fn test_last_pressed_is_last_write_across_slots() {
        let mut hid = FakeHid::default();
        hid.connect(0, NpadStyleSet::FULL_KEY);
        hid.connect(1, NpadStyleSet::FULL_KEY);
        hid.hold(0, NpadButtons::STICK_R);
        hid.hold(1, NpadButtons::UP);
        let mut sampler = GamepadSampler::new();
        let mut input = InputState::new();

        sampled(&mut hid, &mut sampler, &mut input);

        assert_eq!(input.last_gamepad_button_pressed(), GamepadButton::LeftFaceUp);
    }
}
