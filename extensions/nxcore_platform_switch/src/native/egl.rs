//! EGL driver backend

use std::ffi::c_void;

use khronos_egl as egl;
use tracing::debug;

use super::ffi;
use crate::graphics::{EglError, FramebufferAttribs, GlesVersion, GraphicsBackend};
use crate::handles::{ConfigHandle, ContextHandle, DisplayHandle, NativeWindowHandle, SurfaceHandle};

const EGL_BAD_DISPLAY: i32 = 0x3008;
const EGL_BAD_ALLOC: i32 = 0x3003;

/// [`GraphicsBackend`] over the statically linked EGL
pub struct NativeGraphics {
    egl: egl::Instance<egl::Static>,
}

impl NativeGraphics {
    pub fn new() -> Self {
        Self {
            egl: egl::Instance::new(egl::Static),
        }
    }

    fn error(&self, call: &'static str, err: egl::Error) -> EglError {
        EglError::new(call, egl::Int::from(err))
    }

    /// Error for a call that returned a null handle
    fn last_error(&self, call: &'static str, fallback: i32) -> EglError {
        let code = self.egl.get_error().map_or(fallback, egl::Int::from);
        EglError::new(call, code)
    }
}

// Handles are only ever built from pointers the driver returned, and the
// registry never outlives the display they belong to.
fn display(handle: DisplayHandle) -> egl::Display {
    unsafe { egl::Display::from_ptr(handle.as_raw() as egl::EGLDisplay) }
}

fn config(handle: ConfigHandle) -> egl::Config {
    unsafe { egl::Config::from_ptr(handle.as_raw() as egl::EGLConfig) }
}

fn context(handle: ContextHandle) -> egl::Context {
    unsafe { egl::Context::from_ptr(handle.as_raw() as egl::EGLContext) }
}

fn surface(handle: SurfaceHandle) -> egl::Surface {
    unsafe { egl::Surface::from_ptr(handle.as_raw() as egl::EGLSurface) }
}

fn config_attribs(attribs: &FramebufferAttribs) -> [egl::Int; 11] {
    let renderable = match attribs.renderable {
        GlesVersion::Es2 => egl::OPENGL_ES2_BIT,
        GlesVersion::Es3 => egl::OPENGL_ES3_BIT,
    };
    [
        egl::RENDERABLE_TYPE,
        renderable,
        egl::RED_SIZE,
        attribs.red_size,
        egl::GREEN_SIZE,
        attribs.green_size,
        egl::BLUE_SIZE,
        attribs.blue_size,
        egl::DEPTH_SIZE,
        attribs.depth_size,
        egl::NONE,
    ]
}

impl GraphicsBackend for NativeGraphics {
    fn default_display(&mut self) -> Result<DisplayHandle, EglError> {
        let raw = unsafe { self.egl.get_display(egl::DEFAULT_DISPLAY) };
        raw.and_then(|d| DisplayHandle::from_raw(d.as_ptr() as usize))
            .ok_or_else(|| self.last_error("eglGetDisplay", EGL_BAD_DISPLAY))
    }

    fn initialize(&mut self, handle: DisplayHandle) -> Result<(i32, i32), EglError> {
        self.egl
            .initialize(display(handle))
            .map_err(|e| self.error("eglInitialize", e))
    }

    fn choose_config(
        &mut self,
        handle: DisplayHandle,
        attribs: &FramebufferAttribs,
    ) -> Result<Option<ConfigHandle>, EglError> {
        let found = self
            .egl
            .choose_first_config(display(handle), &config_attribs(attribs))
            .map_err(|e| self.error("eglChooseConfig", e))?;
        Ok(found.and_then(|c| ConfigHandle::from_raw(c.as_ptr() as usize)))
    }

    fn bind_api(&mut self) -> Result<(), EglError> {
        self.egl
            .bind_api(egl::OPENGL_ES_API)
            .map_err(|e| self.error("eglBindAPI", e))
    }

    fn create_context(
        &mut self,
        handle: DisplayHandle,
        cfg: ConfigHandle,
        client_version: i32,
    ) -> Result<ContextHandle, EglError> {
        let attribs = [egl::CONTEXT_CLIENT_VERSION, client_version, egl::NONE];
        let ctx = self
            .egl
            .create_context(display(handle), config(cfg), None, &attribs)
            .map_err(|e| self.error("eglCreateContext", e))?;
        ContextHandle::from_raw(ctx.as_ptr() as usize)
            .ok_or_else(|| EglError::new("eglCreateContext", EGL_BAD_ALLOC))
    }

    fn default_native_window(&mut self) -> Option<NativeWindowHandle> {
        let window = unsafe { ffi::nwindowGetDefault() };
        NativeWindowHandle::from_raw(ffi::native_window_ptr(window) as usize)
    }

    fn create_window_surface(
        &mut self,
        handle: DisplayHandle,
        cfg: ConfigHandle,
        window: NativeWindowHandle,
    ) -> Result<SurfaceHandle, EglError> {
        let created = unsafe {
            self.egl.create_window_surface(
                display(handle),
                config(cfg),
                window.as_raw() as egl::NativeWindowType,
                None,
            )
        };
        let created = created.map_err(|e| self.error("eglCreateWindowSurface", e))?;
        SurfaceHandle::from_raw(created.as_ptr() as usize)
            .ok_or_else(|| EglError::new("eglCreateWindowSurface", EGL_BAD_ALLOC))
    }

    fn swap_interval(&mut self, handle: DisplayHandle, interval: i32) -> Result<(), EglError> {
        self.egl
            .swap_interval(display(handle), interval)
            .map_err(|e| self.error("eglSwapInterval", e))
    }

    fn make_current(
        &mut self,
        handle: DisplayHandle,
        target: Option<(SurfaceHandle, ContextHandle)>,
    ) -> Result<(), EglError> {
        let (draw, ctx) = match target {
            Some((s, c)) => (Some(surface(s)), Some(context(c))),
            None => (None, None),
        };
        self.egl
            .make_current(display(handle), draw, draw, ctx)
            .map_err(|e| self.error("eglMakeCurrent", e))
    }

    fn swap_buffers(&mut self, handle: DisplayHandle, s: SurfaceHandle) -> Result<(), EglError> {
        self.egl
            .swap_buffers(display(handle), surface(s))
            .map_err(|e| self.error("eglSwapBuffers", e))
    }

    fn destroy_surface(&mut self, handle: DisplayHandle, s: SurfaceHandle) -> Result<(), EglError> {
        self.egl
            .destroy_surface(display(handle), surface(s))
            .map_err(|e| self.error("eglDestroySurface", e))
    }

    fn destroy_context(&mut self, handle: DisplayHandle, c: ContextHandle) -> Result<(), EglError> {
        self.egl
            .destroy_context(display(handle), context(c))
            .map_err(|e| self.error("eglDestroyContext", e))
    }

    fn terminate(&mut self, handle: DisplayHandle) -> Result<(), EglError> {
        self.egl
            .terminate(display(handle))
            .map_err(|e| self.error("eglTerminate", e))
    }

    fn proc_address(&self, name: &str) -> Option<*const c_void> {
        let address = self.egl.get_proc_address(name).map(|f| f as *const c_void);
        if address.is_none() {
            debug!(name, "GL entry point not found");
        }
        address
    }
}
