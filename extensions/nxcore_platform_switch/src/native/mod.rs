//! Device bindings, compiled only for the console target

mod egl;
mod ffi;
mod hid;
mod services;

use crate::platform::Backends;
use crate::services::SystemClock;

pub use egl::NativeGraphics;
pub use hid::NativeHid;
pub use services::NativeServices;

/// The device's native backends
pub fn backends() -> Backends {
    Backends {
        hid: Box::new(NativeHid::new()),
        graphics: Box::new(NativeGraphics::new()),
        services: Box::new(NativeServices),
        clock: Box::new(SystemClock::new()),
    }
}
