//! Input state store for keyboard, mouse, gamepad and touch
//!
//! Every channel keeps a `current` and a `previous` snapshot. Backends rotate
//! `previous := current` at the start of a frame's sampling and then overwrite
//! `current` with fresh samples; edge queries (`*_pressed`, `*_released`) diff
//! the two buffers.
//!
//! All channels are fixed-size arrays indexed by closed enumerations, so every
//! lookup is a plain index and the store never allocates after construction
//! (gamepad names aside).

use smallvec::SmallVec;

/// Number of gamepad slots tracked
pub const MAX_GAMEPADS: usize = 4;
/// Number of simultaneous touch points tracked
pub const MAX_TOUCH_POINTS: usize = 8;
/// Capacity of the per-frame pressed-key queue
pub const MAX_KEY_PRESSED_QUEUE: usize = 16;
/// Capacity of the per-frame pressed-char queue
pub const MAX_CHAR_PRESSED_QUEUE: usize = 16;

/// 2D vector used for positions, wheel deltas and scales
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// The zero vector
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    /// The one vector
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };

    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Keyboard
// ============================================================================

/// Key codes
///
/// A closed enumeration; [`Key::index`] is the slot in the keyboard buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Special keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    // Arrow keys
    Left,
    Right,
    Up,
    Down,

    // Modifier keys
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftMeta,
    RightMeta,

    // Punctuation and symbols
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Grave,
}

impl Key {
    /// Number of keys in the enumeration
    pub const COUNT: usize = Key::Grave as usize + 1;

    /// Buffer index of this key
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Keyboard channel
#[derive(Clone, Debug)]
pub struct KeyboardState {
    current: [bool; Key::COUNT],
    previous: [bool; Key::COUNT],
    repeat_in_frame: [bool; Key::COUNT],
    pressed_queue: SmallVec<[Key; MAX_KEY_PRESSED_QUEUE]>,
    char_queue: SmallVec<[char; MAX_CHAR_PRESSED_QUEUE]>,
    exit_key: Option<Key>,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            current: [false; Key::COUNT],
            previous: [false; Key::COUNT],
            repeat_in_frame: [false; Key::COUNT],
            pressed_queue: SmallVec::new(),
            char_queue: SmallVec::new(),
            exit_key: Some(Key::Escape),
        }
    }
}

impl KeyboardState {
    /// Key is held this frame
    pub fn is_down(&self, key: Key) -> bool {
        self.current[key.index()]
    }

    /// Key was held last frame
    pub fn was_down(&self, key: Key) -> bool {
        self.previous[key.index()]
    }

    /// Key went down this frame
    pub fn is_pressed(&self, key: Key) -> bool {
        self.is_down(key) && !self.was_down(key)
    }

    /// Key went up this frame
    pub fn is_released(&self, key: Key) -> bool {
        !self.is_down(key) && self.was_down(key)
    }

    /// Key repeat was reported this frame
    pub fn is_repeated(&self, key: Key) -> bool {
        self.repeat_in_frame[key.index()]
    }

    /// Keys pressed this frame, in press order
    pub fn pressed_queue(&self) -> &[Key] {
        &self.pressed_queue
    }

    /// Characters entered this frame, in input order
    pub fn char_queue(&self) -> &[char] {
        &self.char_queue
    }

    /// Key that requests application close, if any
    pub fn exit_key(&self) -> Option<Key> {
        self.exit_key
    }

    /// Whether the configured exit key is held this frame
    pub fn exit_key_down(&self) -> bool {
        self.exit_key.is_some_and(|key| self.is_down(key))
    }

    /// Set (or clear with `None`) the exit key
    pub fn set_exit_key(&mut self, key: Option<Key>) {
        self.exit_key = key;
    }

    /// Write the current state of a key
    pub fn set_down(&mut self, key: Key, down: bool) {
        self.current[key.index()] = down;
    }

    /// Flag a key repeat for this frame
    pub fn set_repeated(&mut self, key: Key) {
        self.repeat_in_frame[key.index()] = true;
    }

    /// Queue a key press; returns false when the queue is full
    pub fn push_pressed(&mut self, key: Key) -> bool {
        if self.pressed_queue.len() >= MAX_KEY_PRESSED_QUEUE {
            return false;
        }
        self.pressed_queue.push(key);
        true
    }

    /// Queue a character; returns false when the queue is full
    pub fn push_char(&mut self, ch: char) -> bool {
        if self.char_queue.len() >= MAX_CHAR_PRESSED_QUEUE {
            return false;
        }
        self.char_queue.push(ch);
        true
    }

    /// Clear the per-frame queues and repeat flags
    pub fn reset_frame_counters(&mut self) {
        self.pressed_queue.clear();
        self.char_queue.clear();
        self.repeat_in_frame = [false; Key::COUNT];
    }

    /// previous := current
    pub fn rotate(&mut self) {
        self.previous = self.current;
    }
}

// ============================================================================
// Mouse
// ============================================================================

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Side button
    Side,
    /// Extra button
    Extra,
    /// Forward button
    Forward,
    /// Back button
    Back,
}

impl MouseButton {
    /// Number of mouse buttons
    pub const COUNT: usize = MouseButton::Back as usize + 1;

    /// Buffer index of this button
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Mouse channel
#[derive(Clone, Debug)]
pub struct MouseState {
    current_buttons: [bool; MouseButton::COUNT],
    previous_buttons: [bool; MouseButton::COUNT],
    current_position: Vector2,
    previous_position: Vector2,
    current_wheel: Vector2,
    previous_wheel: Vector2,
    scale: Vector2,
    cursor_hidden: bool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            current_buttons: [false; MouseButton::COUNT],
            previous_buttons: [false; MouseButton::COUNT],
            current_position: Vector2::ZERO,
            previous_position: Vector2::ZERO,
            current_wheel: Vector2::ZERO,
            previous_wheel: Vector2::ZERO,
            scale: Vector2::ONE,
            cursor_hidden: false,
        }
    }
}

impl MouseState {
    /// Button is held this frame
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.current_buttons[button.index()]
    }

    /// Button was held last frame
    pub fn was_button_down(&self, button: MouseButton) -> bool {
        self.previous_buttons[button.index()]
    }

    /// Button went down this frame
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.is_button_down(button) && !self.was_button_down(button)
    }

    /// Button went up this frame
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        !self.is_button_down(button) && self.was_button_down(button)
    }

    /// Cursor position this frame
    pub fn position(&self) -> Vector2 {
        self.current_position
    }

    /// Cursor position last frame
    pub fn previous_position(&self) -> Vector2 {
        self.previous_position
    }

    /// Cursor movement since last frame
    pub fn delta(&self) -> Vector2 {
        Vector2::new(
            self.current_position.x - self.previous_position.x,
            self.current_position.y - self.previous_position.y,
        )
    }

    /// Wheel movement this frame
    pub fn wheel(&self) -> Vector2 {
        self.current_wheel
    }

    /// Wheel movement last frame
    pub fn previous_wheel(&self) -> Vector2 {
        self.previous_wheel
    }

    /// Mouse coordinate scale
    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    /// Whether the cursor is hidden
    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Write the current state of a button
    pub fn set_button_down(&mut self, button: MouseButton, down: bool) {
        self.current_buttons[button.index()] = down;
    }

    /// Move the cursor this frame, leaving last frame's position intact
    pub fn set_current_position(&mut self, position: Vector2) {
        self.current_position = position;
    }

    /// Warp the cursor: both buffers take the position, so no motion is reported
    pub fn warp_to(&mut self, position: Vector2) {
        self.current_position = position;
        self.previous_position = position;
    }

    /// Write this frame's wheel movement
    pub fn set_wheel(&mut self, wheel: Vector2) {
        self.current_wheel = wheel;
    }

    /// Set the mouse coordinate scale
    pub fn set_scale(&mut self, scale: Vector2) {
        self.scale = scale;
    }

    /// Show or hide the cursor
    pub fn set_cursor_hidden(&mut self, hidden: bool) {
        self.cursor_hidden = hidden;
    }

    /// previous := current for buttons, position and wheel
    pub fn rotate(&mut self) {
        self.previous_buttons = self.current_buttons;
        self.previous_position = self.current_position;
        self.previous_wheel = self.current_wheel;
    }
}

// ============================================================================
// Gamepad
// ============================================================================

/// Canonical gamepad buttons
///
/// Face buttons are named by position, so the same index means the same
/// physical location on every controller style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    /// No button / unmapped
    #[default]
    Unknown,
    /// D-pad up
    LeftFaceUp,
    /// D-pad right
    LeftFaceRight,
    /// D-pad down
    LeftFaceDown,
    /// D-pad left
    LeftFaceLeft,
    /// Top face button
    RightFaceUp,
    /// Right face button
    RightFaceRight,
    /// Bottom face button
    RightFaceDown,
    /// Left face button
    RightFaceLeft,
    /// Left bumper
    LeftTrigger1,
    /// Left trigger
    LeftTrigger2,
    /// Right bumper
    RightTrigger1,
    /// Right trigger
    RightTrigger2,
    /// Left menu button
    MiddleLeft,
    /// Central button
    Middle,
    /// Right menu button
    MiddleRight,
    /// Left stick click
    LeftThumb,
    /// Right stick click
    RightThumb,
}

impl GamepadButton {
    /// Number of logical button indices
    pub const COUNT: usize = GamepadButton::RightThumb as usize + 1;

    /// Every logical button, in index order
    pub const ALL: [GamepadButton; GamepadButton::COUNT] = [
        GamepadButton::Unknown,
        GamepadButton::LeftFaceUp,
        GamepadButton::LeftFaceRight,
        GamepadButton::LeftFaceDown,
        GamepadButton::LeftFaceLeft,
        GamepadButton::RightFaceUp,
        GamepadButton::RightFaceRight,
        GamepadButton::RightFaceDown,
        GamepadButton::RightFaceLeft,
        GamepadButton::LeftTrigger1,
        GamepadButton::LeftTrigger2,
        GamepadButton::RightTrigger1,
        GamepadButton::RightTrigger2,
        GamepadButton::MiddleLeft,
        GamepadButton::Middle,
        GamepadButton::MiddleRight,
        GamepadButton::LeftThumb,
        GamepadButton::RightThumb,
    ];

    /// Buffer index of this button
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Canonical gamepad axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    /// Left stick horizontal, [-1, 1]
    LeftX,
    /// Left stick vertical, [-1, 1]
    LeftY,
    /// Right stick horizontal, [-1, 1]
    RightX,
    /// Right stick vertical, [-1, 1]
    RightY,
    /// Left trigger, [0, 1]
    LeftTrigger,
    /// Right trigger, [0, 1]
    RightTrigger,
}

impl GamepadAxis {
    /// Number of axes
    pub const COUNT: usize = GamepadAxis::RightTrigger as usize + 1;

    /// Every axis, in index order
    pub const ALL: [GamepadAxis; GamepadAxis::COUNT] = [
        GamepadAxis::LeftX,
        GamepadAxis::LeftY,
        GamepadAxis::RightX,
        GamepadAxis::RightY,
        GamepadAxis::LeftTrigger,
        GamepadAxis::RightTrigger,
    ];

    /// Buffer index of this axis
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is a trigger axis
    pub const fn is_trigger(self) -> bool {
        matches!(self, GamepadAxis::LeftTrigger | GamepadAxis::RightTrigger)
    }
}

/// One controller slot
///
/// A slot that is not ready keeps whatever it last held; readiness going
/// false is the release signal.
#[derive(Clone, Debug, Default)]
pub struct GamepadSlot {
    ready: bool,
    name: String,
    axis_count: usize,
    current: [bool; GamepadButton::COUNT],
    previous: [bool; GamepadButton::COUNT],
    axes: [f32; GamepadAxis::COUNT],
}

impl GamepadSlot {
    /// A controller is connected to this slot
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Display name of the connected controller
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of axes reported by the controller
    pub fn axis_count(&self) -> usize {
        self.axis_count
    }

    /// Button is held this frame
    pub fn is_button_down(&self, button: GamepadButton) -> bool {
        self.current[button.index()]
    }

    /// Button was held last frame
    pub fn was_button_down(&self, button: GamepadButton) -> bool {
        self.previous[button.index()]
    }

    /// Button went down this frame
    pub fn is_button_pressed(&self, button: GamepadButton) -> bool {
        self.is_button_down(button) && !self.was_button_down(button)
    }

    /// Button went up this frame
    pub fn is_button_released(&self, button: GamepadButton) -> bool {
        !self.is_button_down(button) && self.was_button_down(button)
    }

    /// Axis value
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis.index()]
    }

    /// Set connection status
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Replace the cached display name
    pub fn set_name(&mut self, name: &str) {
        self.name.clear();
        self.name.push_str(name);
    }

    /// Set the reported axis count
    pub fn set_axis_count(&mut self, count: usize) {
        self.axis_count = count.min(GamepadAxis::COUNT);
    }

    /// Write the current state of a button
    pub fn set_button_down(&mut self, button: GamepadButton, down: bool) {
        self.current[button.index()] = down;
    }

    /// Write an axis value
    pub fn set_axis(&mut self, axis: GamepadAxis, value: f32) {
        self.axes[axis.index()] = value;
    }

    /// previous := current for every button
    pub fn rotate_buttons(&mut self) {
        self.previous = self.current;
    }
}

// ============================================================================
// Touch
// ============================================================================

/// Touch channel
///
/// Points are reindexed every frame in hardware report order. Slots at or
/// beyond [`TouchState::point_count`] are not cleared and keep stale
/// positions; gate on the count, not on position values.
#[derive(Clone, Debug, Default)]
pub struct TouchState {
    point_count: usize,
    positions: [Vector2; MAX_TOUCH_POINTS],
    point_ids: [u32; MAX_TOUCH_POINTS],
    delta_times: [u64; MAX_TOUCH_POINTS],
    current: [bool; MAX_TOUCH_POINTS],
    previous: [bool; MAX_TOUCH_POINTS],
}

impl TouchState {
    /// Number of active points
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Position stored in a slot (may be stale beyond the point count)
    pub fn position(&self, index: usize) -> Vector2 {
        self.positions.get(index).copied().unwrap_or_default()
    }

    /// Hardware identifier stored in a slot
    pub fn point_id(&self, index: usize) -> Option<u32> {
        self.point_ids.get(index).copied()
    }

    /// Time since the contact in a slot began, in the panel's units
    pub fn delta_time(&self, index: usize) -> Option<u64> {
        self.delta_times.get(index).copied()
    }

    /// Slot is touched this frame
    pub fn is_down(&self, index: usize) -> bool {
        self.current.get(index).copied().unwrap_or(false)
    }

    /// Slot was touched last frame
    pub fn was_down(&self, index: usize) -> bool {
        self.previous.get(index).copied().unwrap_or(false)
    }

    /// Active points as `(id, position)`
    pub fn active_points(&self) -> impl Iterator<Item = (u32, Vector2)> + '_ {
        self.point_ids
            .iter()
            .zip(self.positions.iter())
            .take(self.point_count)
            .map(|(id, pos)| (*id, *pos))
    }

    /// Write a point into a slot; out-of-range indices are ignored
    pub fn set_point(&mut self, index: usize, position: Vector2, id: u32, delta_time: u64) {
        if index < MAX_TOUCH_POINTS {
            self.positions[index] = position;
            self.point_ids[index] = id;
            self.delta_times[index] = delta_time;
        }
    }

    /// Set the active point count, clamped to [`MAX_TOUCH_POINTS`]
    pub fn set_point_count(&mut self, count: usize) {
        self.point_count = count.min(MAX_TOUCH_POINTS);
    }

    /// Write the current touched flag of a slot
    pub fn set_down(&mut self, index: usize, down: bool) {
        if index < MAX_TOUCH_POINTS {
            self.current[index] = down;
        }
    }

    /// previous := current
    pub fn rotate(&mut self) {
        self.previous = self.current;
    }
}

// ============================================================================
// Store
// ============================================================================

/// The double-buffered input state store
#[derive(Clone, Debug, Default)]
pub struct InputState {
    keyboard: KeyboardState,
    mouse: MouseState,
    gamepads: [GamepadSlot; MAX_GAMEPADS],
    last_gamepad_button: GamepadButton,
    touch: TouchState,
}

impl InputState {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard channel
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Mutable keyboard channel
    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    /// Mouse channel
    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Mutable mouse channel
    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    /// Touch channel
    pub fn touch(&self) -> &TouchState {
        &self.touch
    }

    /// Mutable touch channel
    pub fn touch_mut(&mut self) -> &mut TouchState {
        &mut self.touch
    }

    /// Gamepad slot, `None` when out of range
    pub fn gamepad(&self, slot: usize) -> Option<&GamepadSlot> {
        self.gamepads.get(slot)
    }

    /// Mutable gamepad slot, `None` when out of range
    pub fn gamepad_mut(&mut self, slot: usize) -> Option<&mut GamepadSlot> {
        self.gamepads.get_mut(slot)
    }

    /// All gamepad slots
    pub fn gamepads(&self) -> &[GamepadSlot; MAX_GAMEPADS] {
        &self.gamepads
    }

    /// Display name of a connected gamepad
    pub fn gamepad_name(&self, slot: usize) -> Option<&str> {
        self.gamepad(slot)
            .filter(|pad| pad.is_ready())
            .map(GamepadSlot::name)
    }

    /// Last gamepad button seen pressed this frame, across all slots
    pub fn last_gamepad_button_pressed(&self) -> GamepadButton {
        self.last_gamepad_button
    }

    /// Record the last gamepad button seen pressed
    pub fn set_last_gamepad_button_pressed(&mut self, button: GamepadButton) {
        self.last_gamepad_button = button;
    }

    /// Key went down this frame
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keyboard.is_pressed(key)
    }

    /// Key is held
    pub fn key_down(&self, key: Key) -> bool {
        self.keyboard.is_down(key)
    }

    /// Gamepad button went down this frame (false for a disconnected slot)
    pub fn gamepad_button_pressed(&self, slot: usize, button: GamepadButton) -> bool {
        self.gamepad(slot)
            .is_some_and(|pad| pad.is_ready() && pad.is_button_pressed(button))
    }

    /// Gamepad button is held (false for a disconnected slot)
    pub fn gamepad_button_down(&self, slot: usize, button: GamepadButton) -> bool {
        self.gamepad(slot)
            .is_some_and(|pad| pad.is_ready() && pad.is_button_down(button))
    }

    /// Gamepad axis value (0.0 for a disconnected slot)
    pub fn gamepad_axis(&self, slot: usize, axis: GamepadAxis) -> f32 {
        self.gamepad(slot)
            .filter(|pad| pad.is_ready())
            .map_or(0.0, |pad| pad.axis(axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_counts() {
        assert_eq!(GamepadButton::COUNT, 18);
        assert_eq!(GamepadAxis::COUNT, 6);
        assert_eq!(MouseButton::COUNT, 7);
        for (i, button) in GamepadButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn test_keyboard_edges() {
        let mut keyboard = KeyboardState::default();
        keyboard.set_down(Key::W, true);
        assert!(keyboard.is_pressed(Key::W));

        keyboard.rotate();
        assert!(keyboard.is_down(Key::W));
        assert!(!keyboard.is_pressed(Key::W));

        keyboard.set_down(Key::W, false);
        assert!(keyboard.is_released(Key::W));
    }

    #[test]
    fn test_keyboard_queue_is_bounded() {
        let mut keyboard = KeyboardState::default();
        for _ in 0..MAX_KEY_PRESSED_QUEUE {
            assert!(keyboard.push_pressed(Key::A));
        }
        assert!(!keyboard.push_pressed(Key::B));
        assert_eq!(keyboard.pressed_queue().len(), MAX_KEY_PRESSED_QUEUE);

        keyboard.set_repeated(Key::A);
        keyboard.reset_frame_counters();
        assert!(keyboard.pressed_queue().is_empty());
        assert!(!keyboard.is_repeated(Key::A));
    }

    #[test]
    fn test_exit_key_default_and_clear() {
        let mut keyboard = KeyboardState::default();
        assert_eq!(keyboard.exit_key(), Some(Key::Escape));
        keyboard.set_down(Key::Escape, true);
        assert!(keyboard.exit_key_down());

        keyboard.set_exit_key(None);
        assert!(!keyboard.exit_key_down());
    }

    #[test]
    fn test_mouse_warp_reports_no_motion() {
        let mut mouse = MouseState::default();
        mouse.set_current_position(Vector2::new(5.0, 5.0));
        assert_eq!(mouse.delta(), Vector2::new(5.0, 5.0));

        mouse.warp_to(Vector2::new(100.0, 50.0));
        assert_eq!(mouse.delta(), Vector2::ZERO);
        assert_eq!(mouse.position(), Vector2::new(100.0, 50.0));
    }

    #[test]
    fn test_disconnected_pad_reads_neutral() {
        let mut input = InputState::new();
        let pad = input.gamepad_mut(1).unwrap();
        pad.set_button_down(GamepadButton::RightFaceDown, true);
        pad.set_axis(GamepadAxis::LeftX, 0.5);

        assert!(!input.gamepad_button_down(1, GamepadButton::RightFaceDown));
        assert_eq!(input.gamepad_axis(1, GamepadAxis::LeftX), 0.0);
        // Raw slot still holds the value
        assert!(input.gamepad(1).unwrap().is_button_down(GamepadButton::RightFaceDown));
        assert!(input.gamepad(MAX_GAMEPADS).is_none());
    }

    #[test]
    fn test_touch_active_points_gate_on_count() {
        let mut touch = TouchState::default();
        touch.set_point(0, Vector2::new(1.0, 2.0), 7, 16);
        touch.set_point(1, Vector2::new(3.0, 4.0), 9, 48);
        touch.set_point_count(1);

        let points: Vec<_> = touch.active_points().collect();
        assert_eq!(points, vec![(7, Vector2::new(1.0, 2.0))]);
        assert_eq!(touch.position(1), Vector2::new(3.0, 4.0));
        assert_eq!(touch.delta_time(1), Some(48));
        assert_eq!(touch.delta_time(MAX_TOUCH_POINTS), None);

        touch.set_point_count(MAX_TOUCH_POINTS + 4);
        assert_eq!(touch.point_count(), MAX_TOUCH_POINTS);
    }
}
