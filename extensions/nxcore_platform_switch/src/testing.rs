//! Scripted fakes of the hardware traits for unit tests
//!
//! Each fake is a cheap handle around shared state, so a test can keep a
//! clone after boxing the other into [`Backends`] and inspect what the
//! platform did.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::ffi::c_void;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use nxcore_platform::{Diagnostic, DiagnosticSink, MAX_GAMEPADS};

use crate::graphics::{EglError, FramebufferAttribs, GraphicsBackend};
use crate::handles::{ConfigHandle, ContextHandle, DisplayHandle, NativeWindowHandle, SurfaceHandle};
use crate::hid::{
    HidBackend, NpadButtons, NpadStyleSet, PadSnapshot, RawTouch, StickPosition, TouchScreenState,
};
use crate::platform::Backends;
use crate::services::{MonotonicClock, ServiceError, SystemServices};

// ============================================================================
// Graphics
// ============================================================================

#[derive(Debug, Default)]
pub struct GraphicsLog {
    pub calls: Vec<&'static str>,
    pub fail: Option<&'static str>,
    pub no_matching_config: bool,
    pub client_version: Option<i32>,
    pub swap_interval: Option<i32>,
    pub display_initialized: bool,
    pub bound: bool,
    pub live_contexts: usize,
    pub live_surfaces: usize,
    pub swaps: usize,
}

#[derive(Clone, Debug, Default)]
pub struct FakeGraphics(Rc<RefCell<GraphicsLog>>);

impl FakeGraphics {
    /// A driver whose `call` fails
    pub fn failing(call: &'static str) -> Self {
        let gfx = Self::default();
        gfx.log_mut().fail = Some(call);
        gfx
    }

    pub fn log(&self) -> Ref<'_, GraphicsLog> {
        self.0.borrow()
    }

    pub fn log_mut(&self) -> RefMut<'_, GraphicsLog> {
        self.0.borrow_mut()
    }

    fn call(&self, name: &'static str) -> Result<RefMut<'_, GraphicsLog>, EglError> {
        let mut log = self.0.borrow_mut();
        log.calls.push(name);
        if log.fail == Some(name) {
            return Err(EglError::new(name, 0x3001));
        }
        Ok(log)
    }
}

fn handle<T>(raw: usize, wrap: fn(usize) -> Option<T>) -> T {
    wrap(raw).expect("fake handles are non-null")
}

impl GraphicsBackend for FakeGraphics {
    fn default_display(&mut self) -> Result<DisplayHandle, EglError> {
        self.call("default_display")?;
        Ok(handle(0x1000, DisplayHandle::from_raw))
    }

    fn initialize(&mut self, _display: DisplayHandle) -> Result<(i32, i32), EglError> {
        self.call("initialize")?.display_initialized = true;
        Ok((1, 5))
    }

    fn choose_config(
        &mut self,
        _display: DisplayHandle,
        _attribs: &FramebufferAttribs,
    ) -> Result<Option<ConfigHandle>, EglError> {
        let log = self.call("choose_config")?;
        if log.no_matching_config {
            return Ok(None);
        }
        Ok(Some(handle(0x2000, ConfigHandle::from_raw)))
    }

    fn bind_api(&mut self) -> Result<(), EglError> {
        self.call("bind_api").map(drop)
    }

    fn create_context(
        &mut self,
        _display: DisplayHandle,
        _config: ConfigHandle,
        client_version: i32,
    ) -> Result<ContextHandle, EglError> {
        let mut log = self.call("create_context")?;
        log.client_version = Some(client_version);
        log.live_contexts += 1;
        Ok(handle(0x3000, ContextHandle::from_raw))
    }

    fn default_native_window(&mut self) -> Option<NativeWindowHandle> {
        self.call("default_native_window").ok()?;
        NativeWindowHandle::from_raw(0x5000)
    }

    fn create_window_surface(
        &mut self,
        _display: DisplayHandle,
        _config: ConfigHandle,
        _window: NativeWindowHandle,
    ) -> Result<SurfaceHandle, EglError> {
        self.call("create_window_surface")?.live_surfaces += 1;
        Ok(handle(0x4000, SurfaceHandle::from_raw))
    }

    fn swap_interval(&mut self, _display: DisplayHandle, interval: i32) -> Result<(), EglError> {
        self.call("swap_interval")?.swap_interval = Some(interval);
        Ok(())
    }

    fn make_current(
        &mut self,
        _display: DisplayHandle,
        target: Option<(SurfaceHandle, ContextHandle)>,
    ) -> Result<(), EglError> {
        self.call("make_current")?.bound = target.is_some();
        Ok(())
    }

    fn swap_buffers(
        &mut self,
        _display: DisplayHandle,
        _surface: SurfaceHandle,
    ) -> Result<(), EglError> {
        self.call("swap_buffers")?.swaps += 1;
        Ok(())
    }

    fn destroy_surface(
        &mut self,
        _display: DisplayHandle,
        _surface: SurfaceHandle,
    ) -> Result<(), EglError> {
        self.call("destroy_surface")?.live_surfaces -= 1;
        Ok(())
    }

    fn destroy_context(
        &mut self,
        _display: DisplayHandle,
        _context: ContextHandle,
    ) -> Result<(), EglError> {
        self.call("destroy_context")?.live_contexts -= 1;
        Ok(())
    }

    fn terminate(&mut self, _display: DisplayHandle) -> Result<(), EglError> {
        self.call("terminate")?.display_initialized = false;
        Ok(())
    }

    fn proc_address(&self, name: &str) -> Option<*const c_void> {
        (name == "glClear").then_some(0x6000 as *const c_void)
    }
}

// ============================================================================
// HID
// ============================================================================

#[derive(Debug, Default)]
pub struct HidScript {
    pub pads: [PadSnapshot; MAX_GAMEPADS],
    pub touch: Option<TouchScreenState>,
    pub configured_players: Option<usize>,
    pub touch_initialized: bool,
    pub pad_updates: usize,
}

#[derive(Clone, Debug, Default)]
pub struct FakeHid(Rc<RefCell<HidScript>>);

impl FakeHid {
    pub fn script(&self) -> Ref<'_, HidScript> {
        self.0.borrow()
    }

    /// Attach a controller of `style` to `slot`
    pub fn connect(&self, slot: usize, style: NpadStyleSet) {
        let mut script = self.0.borrow_mut();
        script.pads[slot].connected = true;
        script.pads[slot].style = style;
    }

    pub fn disconnect(&self, slot: usize) {
        self.0.borrow_mut().pads[slot].connected = false;
    }

    /// Replace the held buttons of `slot`
    pub fn hold(&self, slot: usize, buttons: NpadButtons) {
        self.0.borrow_mut().pads[slot].buttons = buttons;
    }

    pub fn set_sticks(&self, slot: usize, left: (i32, i32), right: (i32, i32)) {
        let mut script = self.0.borrow_mut();
        script.pads[slot].left_stick = StickPosition::new(left.0, left.1);
        script.pads[slot].right_stick = StickPosition::new(right.0, right.1);
    }

    /// Report these `(x, y, finger_id)` contacts on every read
    pub fn set_touches(&self, touches: &[(u32, u32, u32)]) {
        let state = TouchScreenState {
            touches: touches
                .iter()
                .map(|&(x, y, finger_id)| RawTouch {
                    x,
                    y,
                    finger_id,
                    delta_time: 16,
                })
                .collect(),
        };
        self.0.borrow_mut().touch = Some(state);
    }

    /// Report no snapshot on every read
    pub fn clear_touch_state(&self) {
        self.0.borrow_mut().touch = None;
    }
}

impl HidBackend for FakeHid {
    fn configure_pads(&mut self, max_players: usize) {
        self.0.borrow_mut().configured_players = Some(max_players);
    }

    fn initialize_touch_screen(&mut self) {
        self.0.borrow_mut().touch_initialized = true;
    }

    fn update_pad(&mut self, slot: usize) -> PadSnapshot {
        let mut script = self.0.borrow_mut();
        script.pad_updates += 1;
        script.pads.get(slot).copied().unwrap_or_default()
    }

    fn touch_screen_state(&mut self) -> Option<TouchScreenState> {
        self.0.borrow().touch.clone()
    }
}

// ============================================================================
// Services
// ============================================================================

#[derive(Debug)]
pub struct ServicesLog {
    pub main_loop: bool,
    pub calls: Vec<&'static str>,
    pub opened_urls: Vec<String>,
    pub mounted: bool,
    pub fail_mount: bool,
    pub usb_active: bool,
    pub working_dir: PathBuf,
}

impl Default for ServicesLog {
    fn default() -> Self {
        Self {
            main_loop: true,
            calls: Vec::new(),
            opened_urls: Vec::new(),
            mounted: false,
            fail_mount: false,
            usb_active: false,
            working_dir: PathBuf::from("sdmc:/switch/demo"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeServices(Rc<RefCell<ServicesLog>>);

impl FakeServices {
    pub fn log(&self) -> Ref<'_, ServicesLog> {
        self.0.borrow()
    }

    pub fn log_mut(&self) -> RefMut<'_, ServicesLog> {
        self.0.borrow_mut()
    }
}

impl SystemServices for FakeServices {
    fn applet_main_loop(&mut self) -> bool {
        self.0.borrow().main_loop
    }

    fn mount_storage(&mut self) -> Result<(), ServiceError> {
        let mut log = self.0.borrow_mut();
        log.calls.push("mount_storage");
        if log.fail_mount {
            return Err(ServiceError::Mount {
                name: "romfs",
                code: 0x2ee202,
            });
        }
        log.mounted = true;
        Ok(())
    }

    fn unmount_storage(&mut self) -> Result<(), ServiceError> {
        let mut log = self.0.borrow_mut();
        log.calls.push("unmount_storage");
        log.mounted = false;
        Ok(())
    }

    fn working_directory(&self) -> Result<PathBuf, ServiceError> {
        Ok(self.0.borrow().working_dir.clone())
    }

    fn open_url(&mut self, url: &str) -> Result<(), ServiceError> {
        self.0.borrow_mut().opened_urls.push(url.to_string());
        Ok(())
    }

    fn usb_debugger_init(&mut self) -> Result<(), ServiceError> {
        let mut log = self.0.borrow_mut();
        log.calls.push("usb_debugger_init");
        log.usb_active = true;
        Ok(())
    }

    fn usb_debugger_end(&mut self) {
        let mut log = self.0.borrow_mut();
        log.calls.push("usb_debugger_end");
        log.usb_active = false;
    }
}

// ============================================================================
// Clock and diagnostics
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub fn advance(&self, nanos: u64) {
        self.0.set(self.0.get() + nanos);
    }
}

impl MonotonicClock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.0.get()
    }
}

/// Keeps the display form of every diagnostic
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<String>>,
    unsupported: Mutex<Vec<&'static str>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<String> {
        self.reports.lock().unwrap().clone()
    }

    pub fn unsupported(&self) -> Vec<&'static str> {
        self.unsupported.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        if let Diagnostic::Unsupported { operation } = diagnostic {
            self.unsupported.lock().unwrap().push(operation);
        }
        self.reports.lock().unwrap().push(diagnostic.to_string());
    }
}

// ============================================================================
// Bundles
// ============================================================================

/// Test-side handles to the fakes inside a [`Backends`]
#[derive(Clone, Debug, Default)]
pub struct Fakes {
    pub hid: FakeHid,
    pub graphics: FakeGraphics,
    pub services: FakeServices,
    pub clock: ManualClock,
    pub sink: Arc<RecordingSink>,
}

impl Fakes {
    pub fn backends(&self) -> Backends {
        Backends {
            hid: Box::new(self.hid.clone()),
            graphics: Box::new(self.graphics.clone()),
            services: Box::new(self.services.clone()),
            clock: Box::new(self.clock.clone()),
        }
    }
}
