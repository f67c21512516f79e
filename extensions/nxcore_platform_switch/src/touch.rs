//! Touch panel sampler

use nxcore_platform::{TouchState, Vector2, MAX_TOUCH_POINTS};
use tracing::debug;

use crate::hid::HidBackend;

/// Republishes the panel's active contacts into the touch channel
///
/// Points are reindexed in report order each frame. Slots past the reported
/// count keep whatever they last held.
#[derive(Debug, Default)]
pub struct TouchSampler {
    last_count: usize,
}

impl TouchSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, hid: &mut dyn HidBackend) {
        hid.initialize_touch_screen();
    }

    /// Read one snapshot; returns false when the panel had none
    pub fn sample(&mut self, hid: &mut dyn HidBackend, touch: &mut TouchState) -> bool {
        let sampled = match hid.touch_screen_state() {
            Some(state) => {
                let count = state.count().min(MAX_TOUCH_POINTS);
                for (i, raw) in state.touches.iter().take(count).enumerate() {
                    let position = Vector2::new(raw.x as f32, raw.y as f32);
                    touch.set_point(i, position, raw.finger_id, raw.delta_time);
                }
                if count != self.last_count {
                    debug!(count, "touch point count changed");
                    self.last_count = count;
                }
                touch.set_point_count(count);
                true
            }
            None => false,
        };

        let count = touch.point_count();
        for i in 0..MAX_TOUCH_POINTS {
            touch.set_down(i, i < count);
        }
        sampled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHid;

    #[test]
    fn test_sample_publishes_points() {
        let mut hid = FakeHid::default();
        let mut sampler = TouchSampler::new();
        let mut touch = TouchState::default();
        hid.set_touches(&[(100, 200, 3), (640, 360, 4)]);

        assert!(sampler.sample(&mut hid, &mut touch));

        assert_eq!(touch.point_count(), 2);
        assert_eq!(touch.position(1), Vector2::new(640.0, 360.0));
        assert_eq!(touch.point_id(0), Some(3));
        assert!(touch.is_down(1));
        assert!(!touch.is_down(2));
        assert_eq!(touch.delta_time(0), Some(16));
    }

    #[test]
    fn test_no_snapshot_keeps_count() {
        let mut hid = FakeHid::default();
        let mut sampler = TouchSampler::new();
        let mut touch = TouchState::default();
        hid.set_touches(&[(1, 1, 0)]);
        sampler.sample(&mut hid, &mut touch);

        hid.clear_touch_state();
        assert!(!sampler.sample(&mut hid, &mut touch));
        assert_eq!(touch.point_count(), 1);
        assert!(touch.is_down(0));
    }

    #[test]
    fn test_count_clamped_to_capacity() {
        let mut hid = FakeHid::default();
        let mut sampler = TouchSampler::new();
        let mut touch = TouchState::default();
        let many: Vec<_> = (0..12).map(|i| (i, i, i)).collect();
        hid.set_touches(&many);

        sampler.sample(&mut hid, &mut touch);
        assert_eq!(touch.point_count(), MAX_TOUCH_POINTS);
    }

    // Slots past the count are never cleared; callers must gate on the count.
    #[test]
    fn test_slots_beyond_count_keep_stale_positions() {
        let mut hid = FakeHid::default();
        let mut sampler = TouchSampler::new();
        let mut touch = TouchState::default();
        hid.set_touches(&[(10, 10, 1), (20, 20, 2), (30, 30, 3)]);
        sampler.sample(&mut hid, &mut touch);

        hid.set_touches(&[(50, 50, 7)]);
        sampler.sample(&mut hid, &mut touch);

        assert_eq!(touch.point_count(), 1);
        assert_eq!(touch.position(0), Vector2::new(50.0, 50.0));
        assert_eq!(touch.position(2), Vector2::new(30.0, 30.0));
        assert_eq!(touch.point_id(2), Some(3));
        assert!(!touch.is_down(2));
    }
}
