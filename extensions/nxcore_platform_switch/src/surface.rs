//! Presentation surface lifecycle
//!
//! Opens the display, negotiates a framebuffer configuration, creates the
//! context and window surface, and binds them. Runs once per process: a
//! manager that has been initialized (successfully or not) or shut down
//! cannot be initialized again.
//!
//! Context and surface are either both held and bound, or both released.
//! Any failure part-way through releases what was acquired, in reverse order,
//! before the error is returned.

use nxcore_platform::{PlatformError, Size};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::graphics::{EglError, FramebufferAttribs, GlesVersion, GraphicsBackend};
use crate::handles::DeviceHandles;

/// Lifecycle position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceState {
    #[default]
    Uninitialized,
    DisplayOpened,
    ConfigChosen,
    ContextCreated,
    SurfaceBound,
    TornDown,
}

/// How a surface error is reported
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Logged as a warning
    Reported,
    /// Logged as an error; nothing can render
    Fatal,
}

/// Surface lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("failed to open display: {0}")]
    DisplayOpen(EglError),

    #[error("failed to initialize display: {0}")]
    DisplayInit(EglError),

    #[error("failed to choose framebuffer config: {0}")]
    ConfigChoice(EglError),

    #[error("no framebuffer config matches the requested attributes")]
    NoMatchingConfig,

    #[error("failed to bind GLES API: {0}")]
    BindApi(EglError),

    #[error("failed to create context: {0}")]
    ContextCreate(EglError),

    #[error("no default native window")]
    NoNativeWindow,

    #[error("failed to create window surface: {0}")]
    SurfaceCreate(EglError),

    #[error("failed to bind surface and context: {0}")]
    Bind(EglError),

    #[error("failed to present: {0}")]
    Present(EglError),

    #[error("surface is not bound")]
    NotBound,

    #[error("surface lifecycle already ran in this process")]
    AlreadyInitialized,
}

impl SurfaceError {
    pub fn severity(&self) -> Severity {
        match self {
            SurfaceError::Bind(_) | SurfaceError::Present(_) | SurfaceError::NotBound => {
                Severity::Fatal
            }
            _ => Severity::Reported,
        }
    }
}

impl From<SurfaceError> for PlatformError {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::AlreadyInitialized => PlatformError::AlreadyInitialized,
            err if err.severity() == Severity::Fatal => PlatformError::Fatal(err.to_string()),
            err => PlatformError::InitFailed(err.to_string()),
        }
    }
}

/// What the application asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceRequest {
    pub screen: Size,
    pub gles: GlesVersion,
}

/// Window geometry once the surface is bound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadyInfo {
    pub display: Size,
    pub screen: Size,
    pub render: Size,
    pub render_offset: (i32, i32),
    pub fullscreen: bool,
}

/// Owns the device handles and drives them through the lifecycle
#[derive(Debug, Default)]
pub struct SurfaceManager {
    state: SurfaceState,
    handles: DeviceHandles,
    driver_version: Option<(i32, i32)>,
}

impl SurfaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn handles(&self) -> &DeviceHandles {
        &self.handles
    }

    /// Driver version reported when the display was initialized
    pub fn driver_version(&self) -> Option<(i32, i32)> {
        self.driver_version
    }

    pub fn is_bound(&self) -> bool {
        self.state == SurfaceState::SurfaceBound
    }

    /// Establish and bind the presentation surface
    pub fn initialize(
        &mut self,
        gfx: &mut dyn GraphicsBackend,
        request: &SurfaceRequest,
    ) -> Result<ReadyInfo, SurfaceError> {
        if self.state != SurfaceState::Uninitialized {
            return Err(SurfaceError::AlreadyInitialized);
        }

        match self.establish(gfx, request) {
            Ok(info) => Ok(info),
            Err(err) => {
                self.release(gfx);
                self.state = SurfaceState::TornDown;
                Err(err)
            }
        }
    }

    fn establish(
        &mut self,
        gfx: &mut dyn GraphicsBackend,
        request: &SurfaceRequest,
    ) -> Result<ReadyInfo, SurfaceError> {
        let display = gfx.default_display().map_err(SurfaceError::DisplayOpen)?;
        let version = gfx
            .initialize(display)
            .map_err(SurfaceError::DisplayInit)?;
        self.handles.display = Some(display);
        self.driver_version = Some(version);
        self.state = SurfaceState::DisplayOpened;
        debug!(major = version.0, minor = version.1, "display initialized");

        let attribs = FramebufferAttribs::for_version(request.gles);
        let config = gfx
            .choose_config(display, &attribs)
            .map_err(SurfaceError::ConfigChoice)?
            .ok_or(SurfaceError::NoMatchingConfig)?;
        self.handles.config = Some(config);
        self.state = SurfaceState::ConfigChosen;

        gfx.bind_api().map_err(SurfaceError::BindApi)?;
        let context = gfx
            .create_context(display, config, request.gles.client_version())
            .map_err(SurfaceError::ContextCreate)?;
        self.handles.context = Some(context);
        self.state = SurfaceState::ContextCreated;

        let window = gfx
            .default_native_window()
            .ok_or(SurfaceError::NoNativeWindow)?;
        self.handles.native_window = Some(window);
        let surface = gfx
            .create_window_surface(display, config, window)
            .map_err(SurfaceError::SurfaceCreate)?;
        self.handles.surface = Some(surface);

        // At least one frame must be displayed before buffers swap
        if let Err(err) = gfx.swap_interval(display, 1) {
            warn!(error = %err, "could not set swap interval");
        }

        gfx.make_current(display, Some((surface, context)))
            .map_err(SurfaceError::Bind)?;
        self.state = SurfaceState::SurfaceBound;

        let info = ReadyInfo {
            display: request.screen,
            screen: request.screen,
            render: request.screen,
            render_offset: (0, 0),
            fullscreen: true,
        };

        info!(
            "Surface bound: display {}x{}, screen {}x{}, render {}x{}, offset ({}, {})",
            info.display.width,
            info.display.height,
            info.screen.width,
            info.screen.height,
            info.render.width,
            info.render.height,
            info.render_offset.0,
            info.render_offset.1,
        );

        Ok(info)
    }

    /// Swap buffers once; blocks for one vsync interval
    pub fn present(&mut self, gfx: &mut dyn GraphicsBackend) -> Result<(), SurfaceError> {
        match (self.state, self.handles.display, self.handles.surface) {
            (SurfaceState::SurfaceBound, Some(display), Some(surface)) => gfx
                .swap_buffers(display, surface)
                .map_err(SurfaceError::Present),
            _ => Err(SurfaceError::NotBound),
        }
    }

    /// Unbind and release everything; safe to call repeatedly or before
    /// [`SurfaceManager::initialize`]
    pub fn shutdown(&mut self, gfx: &mut dyn GraphicsBackend) {
        if self.state == SurfaceState::TornDown {
            return;
        }
        self.release(gfx);
        self.state = SurfaceState::TornDown;
        debug!("surface torn down");
    }

    fn release(&mut self, gfx: &mut dyn GraphicsBackend) {
        let handles = std::mem::take(&mut self.handles);
        let Some(display) = handles.display else {
            return;
        };

        if self.state == SurfaceState::SurfaceBound {
            teardown_step("make_current", gfx.make_current(display, None));
        }
        if let Some(surface) = handles.surface {
            teardown_step("destroy_surface", gfx.destroy_surface(display, surface));
        }
        if let Some(context) = handles.context {
            teardown_step("destroy_context", gfx.destroy_context(display, context));
        }
        teardown_step("terminate", gfx.terminate(display));
    }
}

fn teardown_step(step: &'static str, result: Result<(), EglError>) {
    if let Err(err) = result {
        warn!(step, error = %err, "teardown step failed, continuing");
    }
}
