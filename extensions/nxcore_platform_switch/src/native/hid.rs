//! Controller and touch-panel backend

use nxcore_platform::MAX_GAMEPADS;
use smallvec::SmallVec;

use super::ffi::{self, PadState, NPAD_ID_HANDHELD, NPAD_ID_NO1};
use crate::hid::{
    HidBackend, NpadButtons, NpadStyleSet, PadSnapshot, RawTouch, StickPosition, TouchScreenState,
};

/// [`HidBackend`] over the libnx pad and touch services
pub struct NativeHid {
    pads: [PadState; MAX_GAMEPADS],
}

impl NativeHid {
    pub fn new() -> Self {
        Self {
            pads: [PadState::default(); MAX_GAMEPADS],
        }
    }
}

/// Slot 0 reads player 1 and the handheld controller; slot n reads player n+1
fn slot_mask(slot: usize) -> u64 {
    let player = 1u64 << (NPAD_ID_NO1 as u64 + slot as u64);
    if slot == 0 {
        player | (1u64 << NPAD_ID_HANDHELD)
    } else {
        player
    }
}

impl HidBackend for NativeHid {
    fn configure_pads(&mut self, max_players: usize) {
        unsafe { ffi::padConfigureInput(max_players as u32, NpadStyleSet::STANDARD.bits()) };
        for (slot, pad) in self.pads.iter_mut().enumerate() {
            unsafe { ffi::padInitializeWithMask(pad, slot_mask(slot)) };
        }
    }

    fn initialize_touch_screen(&mut self) {
        unsafe { ffi::hidInitializeTouchScreen() };
    }

    fn update_pad(&mut self, slot: usize) -> PadSnapshot {
        let Some(pad) = self.pads.get_mut(slot) else {
            return PadSnapshot::disconnected();
        };
        unsafe { ffi::padUpdate(pad) };

        if pad.active_id_mask == 0 && !pad.active_handheld {
            return PadSnapshot::disconnected();
        }
        let [left, right] = pad.sticks;
        PadSnapshot {
            connected: true,
            style: NpadStyleSet::from_bits_retain(pad.style_set),
            buttons: NpadButtons::from_bits_retain(pad.buttons_cur),
            left_stick: StickPosition::new(left.x, left.y),
            right_stick: StickPosition::new(right.x, right.y),
        }
    }

    fn touch_screen_state(&mut self) -> Option<TouchScreenState> {
        let mut state = ffi::HidTouchScreenState::default();
        let read = unsafe { ffi::hidGetTouchScreenStates(&mut state, 1) };
        if read == 0 {
            return None;
        }

        let count = usize::try_from(state.count)
            .unwrap_or(0)
            .min(state.touches.len());
        let touches: SmallVec<_> = state.touches[..count]
            .iter()
            .map(|t| RawTouch {
                x: t.x,
                y: t.y,
                finger_id: t.finger_id,
                delta_time: t.delta_time,
            })
            .collect();
        Some(TouchScreenState { touches })
    }
}
