//! System services: host exit signal, asset storage, URL hand-off, USB
//! debugging, and the monotonic clock

use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;

/// System service errors
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Asset storage could not be mounted
    #[error("failed to mount storage '{name}' (result {code:#x})")]
    Mount { name: &'static str, code: u32 },

    /// Working directory could not be read
    #[error("failed to read working directory: {0}")]
    WorkingDirectory(#[from] std::io::Error),

    /// USB debugger could not be started
    #[error("USB debugger initialization failed (result {0:#x})")]
    UsbDebugger(u32),

    /// Service not available on this device
    #[error("{0} is not supported on this device")]
    Unsupported(&'static str),
}

/// Host system services
pub trait SystemServices {
    /// Pump the host applet loop; false once the host asked the app to exit
    fn applet_main_loop(&mut self) -> bool;

    /// Mount the read-only asset filesystem
    fn mount_storage(&mut self) -> Result<(), ServiceError>;

    /// Unmount the asset filesystem
    fn unmount_storage(&mut self) -> Result<(), ServiceError>;

    /// Current working directory
    fn working_directory(&self) -> Result<PathBuf, ServiceError>;

    /// Hand a URL to the system browser
    fn open_url(&mut self, url: &str) -> Result<(), ServiceError>;

    /// Start the USB debugging channel
    fn usb_debugger_init(&mut self) -> Result<(), ServiceError>;

    /// Stop the USB debugging channel
    fn usb_debugger_end(&mut self);
}

/// Monotonic nanosecond counter
pub trait MonotonicClock {
    fn now_nanos(&self) -> u64;
}

/// [`MonotonicClock`] backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}
