//! Handheld window
//!
//! The device has one fixed fullscreen window. Everything beyond the stored
//! properties falls through to the inert defaults of [`Window`].

use std::sync::Arc;

use nxcore_platform::{DiagnosticSink, Size, Window, WindowFlags, WindowState};

use crate::surface::ReadyInfo;

/// The device's single window
pub struct SwitchWindow {
    state: WindowState,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl SwitchWindow {
    /// Create the window for a requested screen size; not ready until the
    /// surface is bound
    pub fn new(screen: Size, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            state: WindowState {
                screen,
                display: screen,
                fullscreen: true,
                flags: WindowFlags::FULLSCREEN,
                ..WindowState::default()
            },
            diagnostics,
        }
    }

    /// Route unsupported-operation reports to `sink`
    pub(crate) fn set_diagnostics(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.diagnostics = sink;
    }

    /// Apply the geometry of a freshly bound surface
    pub(crate) fn mark_ready(&mut self, info: &ReadyInfo) {
        self.state.display = info.display;
        self.state.screen = info.screen;
        self.state.render = info.render;
        self.state.render_offset = info.render_offset;
        self.state.fullscreen = info.fullscreen;
        if info.fullscreen {
            self.state.flags |= WindowFlags::FULLSCREEN;
        }
        self.state.ready = true;
    }

    /// The surface can no longer render
    pub(crate) fn mark_lost(&mut self) {
        self.state.ready = false;
    }
}

impl std::fmt::Debug for SwitchWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchWindow")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Window for SwitchWindow {
    fn state(&self) -> &WindowState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WindowState {
        &mut self.state
    }

    fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.diagnostics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use nxcore_platform::Vector2;

    fn window() -> (SwitchWindow, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (SwitchWindow::new(Size::new(1280, 720), sink.clone()), sink)
    }

    #[test]
    fn test_new_window_is_fullscreen_not_ready() {
        let (window, _) = window();
        assert!(window.is_fullscreen());
        assert!(window.is_state(WindowFlags::FULLSCREEN));
        assert!(!window.is_ready());
        assert_eq!(window.display_size(), Size::new(1280, 720));
    }

    #[test]
    fn test_mark_ready_applies_geometry() {
        let (mut window, _) = window();
        window.mark_ready(&ReadyInfo {
            display: Size::new(1280, 720),
            screen: Size::new(1280, 720),
            render: Size::new(1280, 720),
            render_offset: (0, 0),
            fullscreen: true,
        });
        assert!(window.is_ready());
        assert_eq!(window.render_size(), Size::new(1280, 720));

        window.mark_lost();
        assert!(!window.is_ready());
    }

    #[test]
    fn test_unsupported_operations_report_to_sink() {
        let (mut window, sink) = window();
        window.set_title("game");
        window.minimize();
        window.set_icons(&[]);
        assert_eq!(window.monitor_position(0), Vector2::ZERO);
        assert_eq!(window.monitor_refresh_rate(0), 0);
        assert!(window.window_handle().is_none());
        assert_eq!(window.current_monitor(), 0);
        assert_eq!(window.position(), Vector2::ZERO);

        assert_eq!(window.title(), "game");
        assert_eq!(
            sink.unsupported(),
            vec![
                "minimize_window",
                "set_window_icons",
                "get_monitor_position",
                "get_monitor_refresh_rate",
                "get_window_handle",
                "get_current_monitor",
                "get_window_position",
            ]
        );
        assert_eq!(
            sink.reports()[0],
            "minimize_window() not supported on this platform"
        );
    }
}
