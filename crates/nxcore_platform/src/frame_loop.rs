//! Frame loop driver

use crate::error::Result;
use crate::input::InputState;
use crate::platform::Platform;

/// Control flow after handling a frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue running the frame loop
    #[default]
    Continue,
    /// Exit the frame loop
    Exit,
}

/// Drive `platform` until it should close or the handler exits
///
/// Each iteration polls input, calls the handler, then presents. Returns the
/// number of frames presented; a fatal present error ends the loop with that
/// error.
pub fn run_frames<P, F>(platform: &mut P, mut handler: F) -> Result<u64>
where
    P: Platform,
    F: FnMut(&InputState, &mut P::Window) -> ControlFlow,
{
    let mut frames = 0u64;

    while !platform.should_close() {
        platform.poll_input_events();

        let (input, window) = platform.frame_view();
        if handler(input, window) == ControlFlow::Exit {
            tracing::debug!(frames, "frame handler requested exit");
            break;
        }

        platform.present()?;
        frames += 1;
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
    use crate::error::PlatformError;
    use crate::input::Key;
    use crate::window::{Window, WindowState};

    #[derive(Default)]
    struct NullWindow {
        state: WindowState,
        sink: TracingDiagnostics,
    }

    impl Window for NullWindow {
        fn state(&self) -> &WindowState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut WindowState {
            &mut self.state
        }

        fn diagnostics(&self) -> &dyn DiagnosticSink {
            &self.sink
        }
    }

    /// Closes after `budget` polls; optionally fails presenting frame `fail_at`
    struct ScriptedPlatform {
        input: InputState,
        window: NullWindow,
        polls: u32,
        budget: u32,
        fail_at: Option<u32>,
    }

    impl ScriptedPlatform {
        fn new(budget: u32) -> Self {
            Self {
                input: InputState::new(),
                window: NullWindow::default(),
                polls: 0,
                budget,
                fail_at: None,
            }
        }
    }

    impl Platform for ScriptedPlatform {
        type Window = NullWindow;

        fn name(&self) -> &'static str {
            "scripted"
        }

        fn should_close(&mut self) -> bool {
            self.window.state.should_close || self.polls >= self.budget
        }

        fn request_close(&mut self) {
            self.window.state.should_close = true;
        }

        fn poll_input_events(&mut self) {
            self.polls += 1;
            self.input.keyboard_mut().rotate();
            self.input
                .keyboard_mut()
                .set_down(Key::Space, self.polls == 2);
        }

        fn present(&mut self) -> Result<()> {
            if self.fail_at == Some(self.polls) {
                self.window.state.ready = false;
                return Err(PlatformError::Fatal("swap failed".into()));
            }
            Ok(())
        }

        fn input(&self) -> &InputState {
            &self.input
        }

        fn window(&self) -> &NullWindow {
            &self.window
        }

        fn window_mut(&mut self) -> &mut NullWindow {
            &mut self.window
        }

        fn frame_view(&mut self) -> (&InputState, &mut NullWindow) {
            (&self.input, &mut self.window)
        }

        fn elapsed_time(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }

    #[test]
    fn test_runs_until_should_close() {
        let mut platform = ScriptedPlatform::new(3);
        let frames = run_frames(&mut platform, |_, _| ControlFlow::Continue).unwrap();
        assert_eq!(frames, 3);
    }

    #[test]
    fn test_handler_exit_skips_present() {
        let mut platform = ScriptedPlatform::new(10);
        let frames = run_frames(&mut platform, |input, _| {
            if input.key_pressed(Key::Space) {
                ControlFlow::Exit
            } else {
                ControlFlow::Continue
            }
        })
        .unwrap();
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_fatal_present_ends_loop() {
        let mut platform = ScriptedPlatform::new(10);
        platform.fail_at = Some(2);
        let err = run_frames(&mut platform, |_, _| ControlFlow::Continue).unwrap_err();
        assert!(err.is_fatal());
        assert!(!platform.window().is_ready());
    }
}
