//! Platform trait and abstraction

use crate::error::Result;
use crate::input::InputState;
use crate::window::Window;

/// Platform abstraction trait
///
/// Implemented by each device backend. The model is polled: the application
/// calls [`Platform::poll_input_events`] once per frame, reads
/// [`Platform::input`], renders, then calls [`Platform::present`].
pub trait Platform {
    /// The window type for this platform
    type Window: Window;

    /// Get the platform name
    fn name(&self) -> &'static str;

    /// Check whether the application should stop
    ///
    /// True when the host asked the application to exit, when the
    /// presentation surface is not usable, or when close was requested.
    fn should_close(&mut self) -> bool;

    /// Request that the application close at the end of this frame
    fn request_close(&mut self);

    /// Sample every input source once and update the input state store
    fn poll_input_events(&mut self);

    /// Present the rendered frame
    ///
    /// Blocks for one vsync interval. A failure is fatal: the window is marked
    /// not ready and [`Platform::should_close`] returns true afterwards.
    fn present(&mut self) -> Result<()>;

    /// Read view of the input state store
    fn input(&self) -> &InputState;

    /// The platform window
    fn window(&self) -> &Self::Window;

    /// The platform window, mutably
    fn window_mut(&mut self) -> &mut Self::Window;

    /// Input and window together, for per-frame handlers
    fn frame_view(&mut self) -> (&InputState, &mut Self::Window);

    /// Seconds elapsed since initialization
    fn elapsed_time(&self) -> f64;

    /// Get the default display scale factor
    fn scale_factor(&self) -> f64 {
        1.0
    }
}
