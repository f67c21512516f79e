//! Keyboard and mouse emulation from gamepads
//!
//! Lets keyboard/mouse-driven applications run with only controllers
//! attached. Runs after the gamepad sampler and writes only the keyboard and
//! mouse channels. Every connected slot is applied in index order, so when
//! two slots disagree the higher slot wins for keys, buttons and the wheel;
//! cursor movement from each slot accumulates.
//!
//! Emulated keys behave like a physical keyboard: the first frame a key is
//! held queues a key press (and its character, for printable keys), and a key
//! held past [`REPEAT_DELAY_FRAMES`] repeats every [`REPEAT_INTERVAL_FRAMES`].

use nxcore_platform::{
    GamepadAxis, InputState, Key, KeyboardState, MouseButton, Size, Vector2,
};

use crate::config::DEFAULT_CURSOR_SENSITIVITY;
use crate::gamepad::ConnectedPads;
use crate::hid::{NpadButtons, PadSnapshot};

const KEY_BINDINGS: &[(NpadButtons, &[Key])] = &[
    (
        NpadButtons::RIGHT.union(NpadButtons::STICK_L_RIGHT),
        &[Key::Right, Key::D],
    ),
    (
        NpadButtons::LEFT.union(NpadButtons::STICK_L_LEFT),
        &[Key::Left, Key::A],
    ),
    (
        NpadButtons::DOWN.union(NpadButtons::STICK_L_DOWN),
        &[Key::Down, Key::S],
    ),
    (
        NpadButtons::UP.union(NpadButtons::STICK_L_UP),
        &[Key::Up, Key::W],
    ),
    (NpadButtons::Y, &[Key::Q]),
    (NpadButtons::A, &[Key::E]),
    (NpadButtons::X, &[Key::R]),
    (NpadButtons::B, &[Key::F]),
    (NpadButtons::STICK_L, &[Key::LeftShift]),
];

/// Every key the bridge can drive
const EMULATED_KEYS: [Key; 16] = [
    Key::Right,
    Key::D,
    Key::Left,
    Key::A,
    Key::Down,
    Key::S,
    Key::Up,
    Key::W,
    Key::Q,
    Key::E,
    Key::R,
    Key::F,
    Key::LeftShift,
    Key::Escape,
    Key::Enter,
    Key::Space,
];

/// Frames a key is held before it starts repeating (about half a second)
pub const REPEAT_DELAY_FRAMES: u32 = 30;

/// Frames between repeats once a key is repeating
pub const REPEAT_INTERVAL_FRAMES: u32 = 2;

const MOUSE_BINDINGS: &[(NpadButtons, MouseButton)] = &[
    (NpadButtons::ZR, MouseButton::Left),
    (NpadButtons::ZL, MouseButton::Right),
    (NpadButtons::STICK_R, MouseButton::Middle),
];

/// Synthesizes keyboard and mouse state from connected gamepads
#[derive(Clone, Debug)]
pub struct EmulationBridge {
    cursor_sensitivity: f32,
    held_frames: [u32; Key::COUNT],
}

impl Default for EmulationBridge {
    fn default() -> Self {
        Self::new(DEFAULT_CURSOR_SENSITIVITY)
    }
}

impl EmulationBridge {
    pub fn new(cursor_sensitivity: f32) -> Self {
        Self {
            cursor_sensitivity,
            held_frames: [0; Key::COUNT],
        }
    }

    pub fn cursor_sensitivity(&self) -> f32 {
        self.cursor_sensitivity
    }

    /// Apply every connected slot; returns true when the exit key ended up held
    ///
    /// Does nothing when no slot is connected.
    pub fn apply(&mut self, pads: &ConnectedPads, input: &mut InputState, screen: Size) -> bool {
        if pads.iter().all(Option::is_none) {
            return false;
        }

        input.mouse_mut().rotate();

        let mut exit_requested = false;
        for (slot, snapshot) in pads.iter().enumerate() {
            let Some(snapshot) = snapshot else {
                continue;
            };
            self.apply_slot(slot, snapshot, input, screen);
            exit_requested |= input.keyboard().exit_key_down();
        }
        self.publish_key_events(input.keyboard_mut());
        exit_requested
    }

    /// Queue presses, characters and repeats for the final key state
    fn publish_key_events(&mut self, keyboard: &mut KeyboardState) {
        let shift = keyboard.is_down(Key::LeftShift);
        for key in EMULATED_KEYS {
            let held = &mut self.held_frames[key.index()];
            if !keyboard.is_down(key) {
                *held = 0;
                continue;
            }
            *held = held.saturating_add(1);

            let repeat = *held > REPEAT_DELAY_FRAMES
                && (*held - REPEAT_DELAY_FRAMES) % REPEAT_INTERVAL_FRAMES == 0;
            if *held == 1 {
                keyboard.push_pressed(key);
            } else if repeat {
                keyboard.set_repeated(key);
            } else {
                continue;
            }
            if let Some(ch) = key_char(key, shift) {
                keyboard.push_char(ch);
            }
        }
    }

    fn apply_slot(&self, slot: usize, snapshot: &PadSnapshot, input: &mut InputState, screen: Size) {
        let buttons = snapshot.buttons;
        let (rx, ry) = input.gamepad(slot).map_or((0.0, 0.0), |pad| {
            (pad.axis(GamepadAxis::RightX), pad.axis(GamepadAxis::RightY))
        });

        let keyboard = input.keyboard_mut();
        for (bits, keys) in KEY_BINDINGS {
            let down = buttons.intersects(*bits);
            for key in keys.iter() {
                keyboard.set_down(*key, down);
            }
        }

        let plus = buttons.contains(NpadButtons::PLUS);
        let minus = buttons.contains(NpadButtons::MINUS);
        keyboard.set_down(Key::Escape, plus && minus);
        keyboard.set_down(Key::Enter, plus && !minus);
        keyboard.set_down(Key::Space, minus && !plus);

        let mouse = input.mouse_mut();
        for (bit, button) in MOUSE_BINDINGS {
            mouse.set_button_down(*button, buttons.contains(*bit));
        }

        let wheel = if buttons.contains(NpadButtons::L) {
            Vector2::new(0.0, -1.0)
        } else if buttons.contains(NpadButtons::R) {
            Vector2::new(0.0, 1.0)
        } else {
            Vector2::ZERO
        };
        mouse.set_wheel(wheel);

        let scale = mouse.scale();
        let bounds = Vector2::new(
            screen.width as f32 / scale.x,
            screen.height as f32 / scale.y,
        );
        let mut position = mouse.position();
        position.x += rx * self.cursor_sensitivity;
        position.y -= ry * self.cursor_sensitivity;
        position.x = position.x.max(0.0).min(bounds.x);
        position.y = position.y.max(0.0).min(bounds.y);
        mouse.set_current_position(position);
    }
}

/// Character a printable emulated key types
fn key_char(key: Key, shift: bool) -> Option<char> {
    let ch = match key {
        Key::A => 'a',
        Key::D => 'd',
        Key::E => 'e',
        Key::F => 'f',
        Key::Q => 'q',
        Key::R => 'r',
        Key::S => 's',
        Key::W => 'w',
        Key::Space => return Some(' '),
        _ => return None,
    };
    Some(if shift { ch.to_ascii_uppercase() } else { ch })
}
