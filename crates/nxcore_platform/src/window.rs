//! Window contract
//!
//! A handheld has exactly one fixed, fullscreen window. Title and size limits
//! are stored and queryable; every other window, monitor and clipboard
//! operation is a constant-returning stub that reports
//! [`Diagnostic::Unsupported`].

use std::ffi::c_void;
use std::ptr::NonNull;

use bitflags::bitflags;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::input::Vector2;

/// Size in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size as a float vector
    pub fn as_vector(self) -> Vector2 {
        Vector2::new(self.width as f32, self.height as f32)
    }
}

bitflags! {
    /// Window configuration/state flags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const FULLSCREEN = 0x0000_0002;
        const RESIZABLE = 0x0000_0004;
        const UNDECORATED = 0x0000_0008;
        const TRANSPARENT = 0x0000_0010;
        const MSAA_4X = 0x0000_0020;
        const VSYNC = 0x0000_0040;
        const HIDDEN = 0x0000_0080;
        const ALWAYS_RUN = 0x0000_0100;
        const MINIMIZED = 0x0000_0200;
        const MAXIMIZED = 0x0000_0400;
        const UNFOCUSED = 0x0000_0800;
        const TOPMOST = 0x0000_1000;
        const HIGHDPI = 0x0000_2000;
        const MOUSE_PASSTHROUGH = 0x0000_4000;
        const BORDERLESS = 0x0000_8000;
        const INTERLACED = 0x0001_0000;
    }
}

/// Stored window properties
#[derive(Clone, Debug, Default)]
pub struct WindowState {
    /// Window title (stored only)
    pub title: String,
    /// Screen size requested by the application
    pub screen: Size,
    /// Physical display size
    pub display: Size,
    /// Framebuffer size
    pub render: Size,
    /// Viewport offset inside the framebuffer
    pub render_offset: (i32, i32),
    /// Minimum size (stored only)
    pub screen_min: Size,
    /// Maximum size (stored only)
    pub screen_max: Size,
    /// Configuration flags
    pub flags: WindowFlags,
    /// Fullscreen is forced on this device
    pub fullscreen: bool,
    /// The presentation surface is bound and usable
    pub ready: bool,
    /// Close was requested by the application or the exit key
    pub should_close: bool,
}

/// Borrowed RGBA icon image
#[derive(Clone, Copy, Debug)]
pub struct IconImage<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGBA8 pixel data
    pub pixels: &'a [u8],
}

/// Cursor icons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Default arrow cursor
    #[default]
    Default,
    /// Pointer/hand cursor (for clickable elements)
    Pointer,
    /// Text/I-beam cursor (for text input)
    Text,
    /// Crosshair cursor
    Crosshair,
    /// Move cursor (for dragging)
    Move,
    /// Not allowed cursor
    NotAllowed,
    /// North-South resize cursor
    ResizeNS,
    /// East-West resize cursor
    ResizeEW,
    /// Northeast-Southwest resize cursor
    ResizeNESW,
    /// Northwest-Southeast resize cursor
    ResizeNWSE,
}

/// Window abstraction trait
///
/// Implementors provide access to the stored [`WindowState`] and a diagnostics
/// sink; every operation has a default body.
pub trait Window {
    /// Stored window properties
    fn state(&self) -> &WindowState;

    /// Mutable stored window properties
    fn state_mut(&mut self) -> &mut WindowState;

    /// Sink receiving unsupported-operation reports
    fn diagnostics(&self) -> &dyn DiagnosticSink;

    /// Report an ignored operation
    fn unsupported(&self, operation: &'static str) {
        self.diagnostics()
            .report(&Diagnostic::Unsupported { operation });
    }

    // ------------------------------------------------------------------
    // Stored properties
    // ------------------------------------------------------------------

    /// Set the window title
    fn set_title(&mut self, title: &str) {
        self.state_mut().title = title.to_owned();
    }

    /// Window title
    fn title(&self) -> &str {
        &self.state().title
    }

    /// Set the minimum window size
    fn set_min_size(&mut self, width: u32, height: u32) {
        self.state_mut().screen_min = Size::new(width, height);
    }

    /// Minimum window size
    fn min_size(&self) -> Size {
        self.state().screen_min
    }

    /// Set the maximum window size
    fn set_max_size(&mut self, width: u32, height: u32) {
        self.state_mut().screen_max = Size::new(width, height);
    }

    /// Maximum window size
    fn max_size(&self) -> Size {
        self.state().screen_max
    }

    /// Screen size
    fn screen_size(&self) -> Size {
        self.state().screen
    }

    /// Framebuffer size
    fn render_size(&self) -> Size {
        self.state().render
    }

    /// Physical display size
    fn display_size(&self) -> Size {
        self.state().display
    }

    /// Fullscreen is active
    fn is_fullscreen(&self) -> bool {
        self.state().fullscreen
    }

    /// The presentation surface is usable
    fn is_ready(&self) -> bool {
        self.state().ready
    }

    /// Check whether all of `flags` are set
    fn is_state(&self, flags: WindowFlags) -> bool {
        self.state().flags.contains(flags)
    }

    // ------------------------------------------------------------------
    // Inert stubs
    // ------------------------------------------------------------------

    /// Toggle fullscreen mode
    fn toggle_fullscreen(&mut self) {
        self.unsupported("toggle_fullscreen");
    }

    /// Toggle borderless windowed mode
    fn toggle_borderless_windowed(&mut self) {
        self.unsupported("toggle_borderless_windowed");
    }

    /// Maximize the window
    fn maximize(&mut self) {
        self.unsupported("maximize_window");
    }

    /// Minimize the window
    fn minimize(&mut self) {
        self.unsupported("minimize_window");
    }

    /// Restore the window
    fn restore(&mut self) {
        self.unsupported("restore_window");
    }

    /// Set window state flags
    fn set_state(&mut self, _flags: WindowFlags) {
        self.unsupported("set_window_state");
    }

    /// Clear window state flags
    fn clear_state(&mut self, _flags: WindowFlags) {
        self.unsupported("clear_window_state");
    }

    /// Set the window icon
    fn set_icon(&mut self, _icon: IconImage<'_>) {
        self.unsupported("set_window_icon");
    }

    /// Set the window icon set
    fn set_icons(&mut self, _icons: &[IconImage<'_>]) {
        self.unsupported("set_window_icons");
    }

    /// Set the window position
    fn set_position(&mut self, _x: i32, _y: i32) {
        self.unsupported("set_window_position");
    }

    /// Move the window to a monitor
    fn set_monitor(&mut self, _monitor: i32) {
        self.unsupported("set_window_monitor");
    }

    /// Resize the window
    fn set_size(&mut self, _width: u32, _height: u32) {
        self.unsupported("set_window_size");
    }

    /// Set window opacity
    fn set_opacity(&mut self, _opacity: f32) {
        self.unsupported("set_window_opacity");
    }

    /// Focus the window
    fn set_focused(&mut self) {
        self.unsupported("set_window_focused");
    }

    /// Native window handle
    fn window_handle(&self) -> Option<NonNull<c_void>> {
        self.unsupported("get_window_handle");
        None
    }

    /// Number of monitors
    fn monitor_count(&self) -> i32 {
        self.unsupported("get_monitor_count");
        1
    }

    /// Monitor the window is on
    fn current_monitor(&self) -> i32 {
        self.unsupported("get_current_monitor");
        0
    }

    /// Monitor position
    fn monitor_position(&self, _monitor: i32) -> Vector2 {
        self.unsupported("get_monitor_position");
        Vector2::ZERO
    }

    /// Monitor width in pixels
    fn monitor_width(&self, _monitor: i32) -> i32 {
        self.unsupported("get_monitor_width");
        0
    }

    /// Monitor height in pixels
    fn monitor_height(&self, _monitor: i32) -> i32 {
        self.unsupported("get_monitor_height");
        0
    }

    /// Monitor physical width in millimetres
    fn monitor_physical_width(&self, _monitor: i32) -> i32 {
        self.unsupported("get_monitor_physical_width");
        0
    }

    /// Monitor physical height in millimetres
    fn monitor_physical_height(&self, _monitor: i32) -> i32 {
        self.unsupported("get_monitor_physical_height");
        0
    }

    /// Monitor refresh rate
    fn monitor_refresh_rate(&self, _monitor: i32) -> i32 {
        self.unsupported("get_monitor_refresh_rate");
        0
    }

    /// Monitor name
    fn monitor_name(&self, _monitor: i32) -> &str {
        self.unsupported("get_monitor_name");
        ""
    }

    /// Window position on the desktop
    fn position(&self) -> Vector2 {
        self.unsupported("get_window_position");
        Vector2::ZERO
    }

    /// Window DPI scale
    fn scale_dpi(&self) -> Vector2 {
        self.unsupported("get_window_scale_dpi");
        Vector2::ONE
    }

    /// Write clipboard text
    fn set_clipboard_text(&mut self, _text: &str) {
        self.unsupported("set_clipboard_text");
    }

    /// Read clipboard text
    fn clipboard_text(&self) -> Option<String> {
        self.unsupported("get_clipboard_text");
        None
    }

    /// Set the cursor shape
    fn set_cursor(&mut self, _cursor: Cursor) {
        self.unsupported("set_mouse_cursor");
    }

    /// Load gamepad mappings; returns the number of mappings applied
    fn set_gamepad_mappings(&mut self, _mappings: &str) -> i32 {
        self.unsupported("set_gamepad_mappings");
        0
    }
}
