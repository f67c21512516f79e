//! nxcore handheld console platform
//!
//! Implements the `nxcore_platform` traits for the handheld console:
//! EGL surface lifecycle, controller and touch sampling, and optional
//! keyboard/mouse emulation from gamepads.
//!
//! Device access sits behind the [`HidBackend`], [`GraphicsBackend`],
//! [`SystemServices`] and [`MonotonicClock`] traits. On the device the
//! native implementations are selected automatically; elsewhere the crate
//! builds without them and every backend must be supplied through
//! [`SwitchPlatform::with_backends`].
//!
//! # Example
//!
//! ```ignore
//! use nxcore_platform::prelude::*;
//! use nxcore_platform_switch::{init_logging, SwitchConfig, SwitchPlatform};
//!
//! let config = SwitchConfig::load_or_default("romfs:/nxcore.toml".as_ref())?;
//! init_logging(&config.logging.filter);
//!
//! let mut platform = SwitchPlatform::new(config);
//! platform.initialize()?;
//! run_frames(&mut platform, |input, _window| {
//!     if input.key_pressed(Key::Enter) {
//!         // ...
//!     }
//!     ControlFlow::Continue
//! })?;
//! ```

pub mod config;
#[cfg(feature = "gamepad-emulation")]
pub mod emulation;
pub mod frame;
pub mod gamepad;
pub mod graphics;
pub mod handles;
pub mod hid;
pub mod logging;
pub mod platform;
pub mod services;
pub mod surface;
pub mod touch;
pub mod window;

#[cfg(target_os = "horizon")]
mod native;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, SwitchConfig};
#[cfg(feature = "gamepad-emulation")]
pub use emulation::EmulationBridge;
pub use frame::FrameCoordinator;
pub use graphics::{GlesVersion, GraphicsBackend};
pub use hid::HidBackend;
pub use logging::init_logging;
pub use platform::{Backends, SwitchPlatform};
pub use services::{MonotonicClock, SystemClock, SystemServices};
pub use surface::{SurfaceError, SurfaceState};
pub use window::SwitchWindow;
