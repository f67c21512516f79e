//! Human-interface device backend
//!
//! Raw controller and touch-panel types as the HID service reports them, and
//! the [`HidBackend`] trait the samplers read through.

use bitflags::bitflags;
use smallvec::SmallVec;

/// Touch states the hardware can report in one snapshot
pub const HID_TOUCH_STATE_CAPACITY: usize = 16;

bitflags! {
    /// Native controller button bits
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NpadButtons: u64 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const STICK_L = 1 << 4;
        const STICK_R = 1 << 5;
        const L = 1 << 6;
        const R = 1 << 7;
        const ZL = 1 << 8;
        const ZR = 1 << 9;
        const PLUS = 1 << 10;
        const MINUS = 1 << 11;
        const LEFT = 1 << 12;
        const UP = 1 << 13;
        const RIGHT = 1 << 14;
        const DOWN = 1 << 15;
        const STICK_L_LEFT = 1 << 16;
        const STICK_L_UP = 1 << 17;
        const STICK_L_RIGHT = 1 << 18;
        const STICK_L_DOWN = 1 << 19;
        const STICK_R_LEFT = 1 << 20;
        const STICK_R_UP = 1 << 21;
        const STICK_R_RIGHT = 1 << 22;
        const STICK_R_DOWN = 1 << 23;
    }
}

bitflags! {
    /// Controller style tags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NpadStyleSet: u32 {
        const FULL_KEY = 1 << 0;
        const HANDHELD = 1 << 1;
        const JOY_DUAL = 1 << 2;
        const JOY_LEFT = 1 << 3;
        const JOY_RIGHT = 1 << 4;
        const GC = 1 << 5;
        const PALMA = 1 << 6;
        const LARK = 1 << 7;
        const HANDHELD_LARK = 1 << 8;
        const LUCIA = 1 << 9;
        const LAGON = 1 << 10;
        const LAGER = 1 << 11;
        const SYSTEM_EXT = 1 << 29;
        const SYSTEM = 1 << 30;

        /// Styles accepted when configuring pad input
        const STANDARD = Self::FULL_KEY.bits()
            | Self::HANDHELD.bits()
            | Self::JOY_DUAL.bits()
            | Self::JOY_LEFT.bits()
            | Self::JOY_RIGHT.bits();
    }
}

const STYLE_NAMES: &[(NpadStyleSet, &str)] = &[
    (NpadStyleSet::FULL_KEY, "Nintendo Switch Pro Controller"),
    (NpadStyleSet::HANDHELD, "Handheld Joy-Con controller"),
    (NpadStyleSet::JOY_DUAL, "Dual Joy-Con controller"),
    (NpadStyleSet::JOY_LEFT, "Single Joy-Con left controller"),
    (NpadStyleSet::JOY_RIGHT, "Single Joy-Con right controller"),
    (NpadStyleSet::GC, "GameCube controller"),
    (NpadStyleSet::PALMA, "Poké Ball Plus controller"),
    (NpadStyleSet::LARK, "NES/Famicom controller"),
    (NpadStyleSet::HANDHELD_LARK, "Handheld NES/Famicom controller"),
    (NpadStyleSet::LUCIA, "SNES controller"),
    (NpadStyleSet::LAGON, "N64 controller"),
    (NpadStyleSet::LAGER, "Sega Genesis controller"),
    (NpadStyleSet::SYSTEM_EXT, "Generic external controller"),
];

/// Display name for a controller style
///
/// Matches the exact style value; combined or unknown styles fall back to a
/// generic name.
pub fn gamepad_name(style: NpadStyleSet) -> &'static str {
    STYLE_NAMES
        .iter()
        .find(|(tag, _)| *tag == style)
        .map_or("Generic controller", |(_, name)| name)
}

/// Raw analog stick position, each axis in [-32767, 32767]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StickPosition {
    pub x: i32,
    pub y: i32,
}

impl StickPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One controller slot as read this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PadSnapshot {
    /// A controller is attached to the slot
    pub connected: bool,
    /// Reported style set
    pub style: NpadStyleSet,
    /// Held buttons
    pub buttons: NpadButtons,
    /// Left stick
    pub left_stick: StickPosition,
    /// Right stick
    pub right_stick: StickPosition,
}

impl PadSnapshot {
    /// Snapshot of an empty slot
    pub const fn disconnected() -> Self {
        Self {
            connected: false,
            style: NpadStyleSet::empty(),
            buttons: NpadButtons::empty(),
            left_stick: StickPosition::new(0, 0),
            right_stick: StickPosition::new(0, 0),
        }
    }
}

/// One contact reported by the touch panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTouch {
    /// Native pixel X
    pub x: u32,
    /// Native pixel Y
    pub y: u32,
    /// Hardware finger identifier
    pub finger_id: u32,
    /// Time since the contact began, in the panel's units
    pub delta_time: u64,
}

/// One touch-panel snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchScreenState {
    pub touches: SmallVec<[RawTouch; HID_TOUCH_STATE_CAPACITY]>,
}

impl TouchScreenState {
    /// Number of contacts the panel reported
    pub fn count(&self) -> usize {
        self.touches.len()
    }
}

/// Access to the controller and touch-panel services
pub trait HidBackend {
    /// Configure the pad input layout for `max_players` players
    fn configure_pads(&mut self, max_players: usize);

    /// Start touch-panel sampling
    fn initialize_touch_screen(&mut self);

    /// Refresh and read one controller slot
    fn update_pad(&mut self, slot: usize) -> PadSnapshot;

    /// Read the latest touch-panel snapshot; `None` when no state is available
    fn touch_screen_state(&mut self) -> Option<TouchScreenState>;
}
