//! libnx system library bindings
//!
//! Layouts follow the libnx headers. Only the calls the backends use are
//! declared; inline helpers from the headers are reimplemented on the Rust
//! side by reading the struct fields directly.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_void};

/// libnx result code; zero is success
pub type NxResult = u32;

/// `HidNpadIdType_No1`
pub const NPAD_ID_NO1: u32 = 0;
/// `HidNpadIdType_Handheld`
pub const NPAD_ID_HANDHELD: u32 = 0x20;

/// `HidAnalogStickState`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct HidAnalogStickState {
    pub x: i32,
    pub y: i32,
}

/// `PadState`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct PadState {
    pub id_mask: u8,
    pub active_id_mask: u8,
    pub read_handheld: bool,
    pub active_handheld: bool,
    pub style_set: u32,
    pub attributes: u32,
    pub buttons_cur: u64,
    pub buttons_old: u64,
    pub sticks: [HidAnalogStickState; 2],
    pub gc_triggers: [u32; 2],
}

/// `HidTouchState`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct HidTouchState {
    pub delta_time: u64,
    pub attributes: u32,
    pub finger_id: u32,
    pub x: u32,
    pub y: u32,
    pub diameter_x: u32,
    pub diameter_y: u32,
    pub rotation_angle: u32,
    pub reserved: u32,
}

/// `HidTouchScreenState`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct HidTouchScreenState {
    pub sampling_number: u64,
    pub count: i32,
    pub reserved: u32,
    pub touches: [HidTouchState; 16],
}

/// Opaque `NWindow`
#[repr(C)]
pub struct NWindow {
    _private: [u8; 0],
}

#[link(name = "nx")]
extern "C" {
    pub fn appletMainLoop() -> bool;

    pub fn romfsMountSelf(name: *const c_char) -> NxResult;
    pub fn romfsUnmount(name: *const c_char) -> NxResult;

    pub fn usbCommsInitialize() -> NxResult;
    pub fn usbCommsExit();

    pub fn padConfigureInput(max_players: u32, style_set: u32);
    pub fn padInitializeWithMask(pad: *mut PadState, mask: u64);
    pub fn padUpdate(pad: *mut PadState);

    pub fn hidInitializeTouchScreen();
    pub fn hidGetTouchScreenStates(states: *mut HidTouchScreenState, count: usize) -> usize;

    pub fn nwindowGetDefault() -> *mut NWindow;
}

/// Erase the window type for the EGL native-window parameter
pub fn native_window_ptr(window: *mut NWindow) -> *mut c_void {
    window.cast()
}
