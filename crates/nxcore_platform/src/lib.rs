//! nxcore Platform Contract
//!
//! This crate provides the platform-agnostic types and traits that sit between
//! an application's main loop and a concrete device backend.
//!
//! # Architecture
//!
//! The contract is built around a polled, once-per-frame model:
//!
//! - [`Platform`] - The top-level platform abstraction (exit signal, input
//!   polling, presentation, elapsed time)
//! - [`Window`] - Stored window properties plus the inert window, monitor and
//!   clipboard stubs
//! - [`InputState`] - The double-buffered input state store read by the
//!   application after each [`Platform::poll_input_events`]
//! - [`DiagnosticSink`] - Where backends report unsupported calls
//!
//! # Platform Implementations
//!
//! - `nxcore_platform_switch` - Handheld console backend (HID + EGL)
//!
//! # Example
//!
//! ```ignore
//! use nxcore_platform::prelude::*;
//! use nxcore_platform_switch::{SwitchConfig, SwitchPlatform};
//!
//! fn main() -> Result<()> {
//!     let mut platform = SwitchPlatform::new(SwitchConfig::default());
//!     platform.initialize()?;
//!
//!     run_frames(&mut platform, |input, _window| {
//!         if input.gamepad_button_pressed(0, GamepadButton::RightFaceRight) {
//!             // Jump
//!         }
//!         ControlFlow::Continue
//!     })?;
//!     Ok(())
//! }
//! ```

mod diagnostics;
mod error;
mod frame_loop;
mod input;
mod platform;
mod window;

// Re-export all public types
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingDiagnostics};
pub use error::{PlatformError, Result};
pub use frame_loop::{run_frames, ControlFlow};
pub use input::{
    GamepadAxis, GamepadButton, GamepadSlot, InputState, Key, KeyboardState,
    MouseButton, MouseState, TouchState, Vector2, MAX_CHAR_PRESSED_QUEUE, MAX_GAMEPADS,
    MAX_KEY_PRESSED_QUEUE, MAX_TOUCH_POINTS,
};
pub use platform::Platform;
pub use window::{Cursor, IconImage, Size, Window, WindowFlags, WindowState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingDiagnostics};
    pub use crate::error::{PlatformError, Result};
    pub use crate::frame_loop::{run_frames, ControlFlow};
    pub use crate::input::{
        GamepadAxis, GamepadButton, InputState, Key, MouseButton, Vector2, MAX_GAMEPADS,
        MAX_TOUCH_POINTS,
    };
    pub use crate::platform::Platform;
    pub use crate::window::{Cursor, Size, Window, WindowFlags};
}
