//! Per-frame input ordering

use nxcore_platform::{GamepadButton, InputState, WindowState};

#[cfg(feature = "gamepad-emulation")]
use crate::emulation::EmulationBridge;
use crate::gamepad::{ConnectedPads, GamepadSampler};
use crate::hid::HidBackend;
use crate::touch::TouchSampler;

/// Runs the samplers in a fixed order once per frame
///
/// 1. Zero the transient counters (key and char queues, key repeats, last
///    gamepad button).
/// 2. Rotate keyboard and touch buffers.
/// 3. Touch sampler.
/// 4. Gamepad sampler, every slot.
/// 5. Emulation bridge, when enabled.
#[derive(Debug, Default)]
pub struct FrameCoordinator {
    touch: TouchSampler,
    gamepads: GamepadSampler,
    #[cfg(feature = "gamepad-emulation")]
    emulation: Option<EmulationBridge>,
}

impl FrameCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable emulation with the given bridge
    #[cfg(feature = "gamepad-emulation")]
    pub fn with_emulation(mut self, bridge: EmulationBridge) -> Self {
        self.emulation = Some(bridge);
        self
    }

    #[cfg(feature = "gamepad-emulation")]
    pub fn emulation(&self) -> Option<&EmulationBridge> {
        self.emulation.as_ref()
    }

    pub fn touch(&self) -> &TouchSampler {
        &self.touch
    }

    pub fn gamepads(&self) -> &GamepadSampler {
        &self.gamepads
    }

    /// Configure the pad layout, resolve initial styles, start the touch panel
    pub fn initialize(&mut self, hid: &mut dyn HidBackend, input: &mut InputState) {
        self.gamepads.initialize(hid, input);
        self.touch.initialize(hid);
    }

    /// Sample one frame of input
    pub fn poll(
        &mut self,
        hid: &mut dyn HidBackend,
        input: &mut InputState,
        window: &mut WindowState,
    ) {
        input.keyboard_mut().reset_frame_counters();
        input.set_last_gamepad_button_pressed(GamepadButton::Unknown);

        input.keyboard_mut().rotate();
        input.touch_mut().rotate();

        self.touch.sample(hid, input.touch_mut());

        let pads = self.gamepads.sample(hid, input);
        self.emulate(&pads, input, window);
    }

    #[cfg(feature = "gamepad-emulation")]
    fn emulate(&mut self, pads: &ConnectedPads, input: &mut InputState, window: &mut WindowState) {
        if let Some(bridge) = &mut self.emulation {
            if bridge.apply(pads, input, window.screen) {
                window.should_close = true;
            }
        }
    }

    #[cfg(not(feature = "gamepad-emulation"))]
    fn emulate(&mut self, _pads: &ConnectedPads, _input: &mut InputState, _window: &mut WindowState) {}
}
