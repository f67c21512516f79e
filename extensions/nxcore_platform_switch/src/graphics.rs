//! Graphics driver backend
//!
//! [`GraphicsBackend`] mirrors the EGL calls the surface lifecycle needs, one
//! method per native call, so the lifecycle can be driven against a fake.

use std::ffi::c_void;

use serde::Deserialize;
use thiserror::Error;

use crate::handles::{ConfigHandle, ContextHandle, DisplayHandle, NativeWindowHandle, SurfaceHandle};

/// GLES API version the context is created for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlesVersion {
    /// OpenGL ES 2.0
    #[default]
    Es2,
    /// OpenGL ES 3.0
    Es3,
}

impl GlesVersion {
    /// Context client version attribute
    pub fn client_version(self) -> i32 {
        match self {
            GlesVersion::Es2 => 2,
            GlesVersion::Es3 => 3,
        }
    }
}

/// Framebuffer attribute set to match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramebufferAttribs {
    /// Renderable API
    pub renderable: GlesVersion,
    pub red_size: i32,
    pub green_size: i32,
    pub blue_size: i32,
    /// Depth buffer bits, required for depth testing
    pub depth_size: i32,
}

impl FramebufferAttribs {
    /// RGB888 with a 16-bit depth buffer
    pub fn for_version(renderable: GlesVersion) -> Self {
        Self {
            renderable,
            red_size: 8,
            green_size: 8,
            blue_size: 8,
            depth_size: 16,
        }
    }
}

/// A failed native graphics call
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{call} failed (EGL error {code:#06x})")]
pub struct EglError {
    /// Name of the native call
    pub call: &'static str,
    /// Native error code
    pub code: i32,
}

impl EglError {
    pub fn new(call: &'static str, code: i32) -> Self {
        Self { call, code }
    }
}

/// Native graphics driver calls
pub trait GraphicsBackend {
    /// Open the default display connection
    fn default_display(&mut self) -> Result<DisplayHandle, EglError>;

    /// Initialize the display; returns the driver version `(major, minor)`
    fn initialize(&mut self, display: DisplayHandle) -> Result<(i32, i32), EglError>;

    /// First framebuffer configuration matching `attribs`, if any
    fn choose_config(
        &mut self,
        display: DisplayHandle,
        attribs: &FramebufferAttribs,
    ) -> Result<Option<ConfigHandle>, EglError>;

    /// Select the GLES client API
    fn bind_api(&mut self) -> Result<(), EglError>;

    /// Create a rendering context
    fn create_context(
        &mut self,
        display: DisplayHandle,
        config: ConfigHandle,
        client_version: i32,
    ) -> Result<ContextHandle, EglError>;

    /// The device's default native window
    fn default_native_window(&mut self) -> Option<NativeWindowHandle>;

    /// Create a window surface for `window`
    fn create_window_surface(
        &mut self,
        display: DisplayHandle,
        config: ConfigHandle,
        window: NativeWindowHandle,
    ) -> Result<SurfaceHandle, EglError>;

    /// Set the minimum number of vsyncs per swap
    fn swap_interval(&mut self, display: DisplayHandle, interval: i32) -> Result<(), EglError>;

    /// Bind `surface` and `context` to the calling thread, or unbind with `None`
    fn make_current(
        &mut self,
        display: DisplayHandle,
        target: Option<(SurfaceHandle, ContextHandle)>,
    ) -> Result<(), EglError>;

    /// Present the back buffer
    fn swap_buffers(&mut self, display: DisplayHandle, surface: SurfaceHandle)
        -> Result<(), EglError>;

    fn destroy_surface(&mut self, display: DisplayHandle, surface: SurfaceHandle)
        -> Result<(), EglError>;

    fn destroy_context(&mut self, display: DisplayHandle, context: ContextHandle)
        -> Result<(), EglError>;

    fn terminate(&mut self, display: DisplayHandle) -> Result<(), EglError>;

    /// Address of a GL entry point
    fn proc_address(&self, name: &str) -> Option<*const c_void>;
}
