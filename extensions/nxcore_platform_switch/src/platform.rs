//! Handheld platform context
//!
//! [`SwitchPlatform`] owns every piece of platform state: the backends, the
//! surface lifecycle, the frame coordinator, the input store and the window.
//! One value per process on the device; tests build as many as they like
//! over fake backends.

use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nxcore_platform::{
    Diagnostic, DiagnosticSink, InputState, Key, Platform, PlatformError, Result,
    TracingDiagnostics, Vector2, Window,
};
use tracing::{debug, error, info, warn};

use crate::config::SwitchConfig;
#[cfg(feature = "gamepad-emulation")]
use crate::emulation::EmulationBridge;
use crate::frame::FrameCoordinator;
use crate::graphics::GraphicsBackend;
use crate::hid::HidBackend;
use crate::services::{MonotonicClock, ServiceError, SystemServices};
use crate::surface::{Severity, SurfaceManager, SurfaceRequest};
use crate::window::SwitchWindow;

/// The hardware the platform drives
pub struct Backends {
    pub hid: Box<dyn HidBackend>,
    pub graphics: Box<dyn GraphicsBackend>,
    pub services: Box<dyn SystemServices>,
    pub clock: Box<dyn MonotonicClock>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Created,
    Running,
    Failed,
    ShutDown,
}

/// Handheld platform
pub struct SwitchPlatform {
    config: SwitchConfig,
    backends: Backends,
    surface: SurfaceManager,
    frames: FrameCoordinator,
    input: InputState,
    window: SwitchWindow,
    phase: Phase,
    time_base: u64,
    base_path: Option<PathBuf>,
    storage_mounted: bool,
    usb_debugger_active: bool,
}

impl SwitchPlatform {
    /// Create the platform over the device's native backends
    #[cfg(target_os = "horizon")]
    pub fn new(config: SwitchConfig) -> Self {
        Self::with_backends(config, crate::native::backends())
    }

    /// Create the platform over explicit backends
    pub fn with_backends(config: SwitchConfig, backends: Backends) -> Self {
        let mut input = InputState::new();
        input.keyboard_mut().set_exit_key(config.input.exit_key);
        let [scale_x, scale_y] = config.input.mouse_scale;
        input.mouse_mut().set_scale(Vector2::new(scale_x, scale_y));

        let window = SwitchWindow::new(config.display.size(), Arc::new(TracingDiagnostics));
        let frames = Self::frame_coordinator(&config);

        Self {
            config,
            backends,
            surface: SurfaceManager::new(),
            frames,
            input,
            window,
            phase: Phase::Created,
            time_base: 0,
            base_path: None,
            storage_mounted: false,
            usb_debugger_active: false,
        }
    }

    #[cfg(feature = "gamepad-emulation")]
    fn frame_coordinator(config: &SwitchConfig) -> FrameCoordinator {
        let frames = FrameCoordinator::new();
        if config.emulation.enabled {
            frames.with_emulation(EmulationBridge::new(config.emulation.cursor_sensitivity))
        } else {
            frames
        }
    }

    #[cfg(not(feature = "gamepad-emulation"))]
    fn frame_coordinator(_config: &SwitchConfig) -> FrameCoordinator {
        FrameCoordinator::new()
    }

    /// Route diagnostics to `sink` instead of the log
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.window.set_diagnostics(sink);
        self
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    pub fn surface(&self) -> &SurfaceManager {
        &self.surface
    }

    pub fn frames(&self) -> &FrameCoordinator {
        &self.frames
    }

    /// Bring the device up: debugger, storage, surface, controllers, touch,
    /// timer, storage base path
    ///
    /// Runs once. On failure the platform stays alive but
    /// [`Platform::should_close`] returns true.
    pub fn initialize(&mut self) -> Result<()> {
        if self.phase != Phase::Created {
            return Err(PlatformError::AlreadyInitialized);
        }
        self.config.validate()?;

        if self.config.debug.usb_debugger {
            match self.backends.services.usb_debugger_init() {
                Ok(()) => self.usb_debugger_active = true,
                Err(e) => warn!(error = %e, "USB debugger unavailable"),
            }
        }

        match self.backends.services.mount_storage() {
            Ok(()) => self.storage_mounted = true,
            Err(e) => warn!(error = %e, "asset storage unavailable"),
        }

        let request = SurfaceRequest {
            screen: self.config.display.size(),
            gles: self.config.display.gles,
        };
        let ready = match self.surface.initialize(self.backends.graphics.as_mut(), &request) {
            Ok(ready) => ready,
            Err(e) => {
                match e.severity() {
                    Severity::Fatal => error!(error = %e, "Failed to initialize graphics device"),
                    Severity::Reported => warn!(error = %e, "Failed to initialize display"),
                }
                self.window.mark_lost();
                self.release_services();
                self.phase = Phase::Failed;
                return Err(e.into());
            }
        };
        self.window.mark_ready(&ready);

        self.frames
            .initialize(self.backends.hid.as_mut(), &mut self.input);

        self.time_base = self.backends.clock.now_nanos();

        self.base_path = match self.backends.services.working_directory() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "no storage base path");
                None
            }
        };

        self.phase = Phase::Running;
        info!(
            gles = ?self.config.display.gles,
            storage = self.storage_mounted,
            "Platform initialized"
        );
        Ok(())
    }

    /// Release the surface and system services; safe to call more than once
    pub fn shutdown(&mut self) {
        if self.phase == Phase::ShutDown {
            return;
        }

        self.surface.shutdown(self.backends.graphics.as_mut());
        self.window.mark_lost();
        self.release_services();

        self.phase = Phase::ShutDown;
        debug!("Platform shut down");
    }

    /// Unmount storage, then stop the USB debugger; reverse of acquisition
    fn release_services(&mut self) {
        if self.storage_mounted {
            if let Err(e) = self.backends.services.unmount_storage() {
                warn!(error = %e, "failed to unmount asset storage");
            }
            self.storage_mounted = false;
        }
        if self.usb_debugger_active {
            self.backends.services.usb_debugger_end();
            self.usb_debugger_active = false;
        }
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    pub fn show_cursor(&mut self) {
        self.input.mouse_mut().set_cursor_hidden(false);
    }

    pub fn hide_cursor(&mut self) {
        self.input.mouse_mut().set_cursor_hidden(true);
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.input.mouse().is_cursor_hidden()
    }

    /// Show the cursor and move it to the screen centre
    pub fn enable_cursor(&mut self) {
        self.center_mouse();
        self.input.mouse_mut().set_cursor_hidden(false);
    }

    /// Hide the cursor and move it to the screen centre
    pub fn disable_cursor(&mut self) {
        self.center_mouse();
        self.input.mouse_mut().set_cursor_hidden(true);
    }

    fn center_mouse(&mut self) {
        let screen = self.window.screen_size();
        self.set_mouse_position((screen.width / 2) as i32, (screen.height / 2) as i32);
    }

    /// Warp the cursor; no motion is reported for the jump
    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.input
            .mouse_mut()
            .warp_to(Vector2::new(x as f32, y as f32));
    }

    /// Set the mouse coordinate scale; non-positive or non-finite values are
    /// ignored
    pub fn set_mouse_scale(&mut self, x: f32, y: f32) {
        if ![x, y].iter().all(|s| s.is_finite() && *s > 0.0) {
            warn!(x, y, "ignoring invalid mouse scale");
            return;
        }
        self.input.mouse_mut().set_scale(Vector2::new(x, y));
    }

    /// Set or clear the key that requests close
    pub fn set_exit_key(&mut self, key: Option<Key>) {
        self.input.keyboard_mut().set_exit_key(key);
    }

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------

    /// Hand a URL to the system browser
    ///
    /// URLs containing `'` are rejected before reaching the system.
    pub fn open_url(&mut self, url: &str) {
        if url.contains('\'') {
            self.window
                .diagnostics()
                .report(&Diagnostic::SuspiciousUrl { url });
            return;
        }
        match self.backends.services.open_url(url) {
            Ok(()) => {}
            Err(ServiceError::Unsupported(operation)) => self
                .window
                .diagnostics()
                .report(&Diagnostic::Unsupported { operation }),
            Err(e) => warn!(url, error = %e, "could not open URL"),
        }
    }

    /// Working directory captured at initialization
    pub fn storage_base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Address of a GL entry point, for the renderer's loader
    pub fn gl_proc_address(&self, name: &str) -> Option<*const c_void> {
        self.backends.graphics.proc_address(name)
    }
}

impl Drop for SwitchPlatform {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Platform for SwitchPlatform {
    type Window = SwitchWindow;

    fn name(&self) -> &'static str {
        "switch"
    }

    fn should_close(&mut self) -> bool {
        if !self.backends.services.applet_main_loop() {
            return true;
        }
        if self.window.is_ready() {
            self.window.state().should_close
        } else {
            true
        }
    }

    fn request_close(&mut self) {
        self.window.state_mut().should_close = true;
    }

    fn poll_input_events(&mut self) {
        self.frames.poll(
            self.backends.hid.as_mut(),
            &mut self.input,
            self.window.state_mut(),
        );
    }

    fn present(&mut self) -> Result<()> {
        if let Err(e) = self.surface.present(self.backends.graphics.as_mut()) {
            error!(error = %e, "Failed to present frame");
            self.window.mark_lost();
            return Err(e.into());
        }
        Ok(())
    }

    fn input(&self) -> &InputState {
        &self.input
    }

    fn window(&self) -> &SwitchWindow {
        &self.window
    }

    fn window_mut(&mut self) -> &mut SwitchWindow {
        &mut self.window
    }

    fn frame_view(&mut self) -> (&InputState, &mut SwitchWindow) {
        (&self.input, &mut self.window)
    }

    fn elapsed_time(&self) -> f64 {
        let now = self.backends.clock.now_nanos();
        now.saturating_sub(self.time_base) as f64 * 1e-9
    }
}
