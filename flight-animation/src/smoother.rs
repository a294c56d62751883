use std::collections::HashMap;

use crate::types::Coordinate;

const POSITION_KEEP: f64 = 0.2;
const BEARING_KEEP: f64 = 0.85;
const BEARING_SNAP_DEGREES: f64 = 45.0;
const CAMERA_KEEP: f64 = 0.7;

/// Low-pass filters for the plane and the following camera.
///
/// The filters carry state from one tick to the next, so the smoothed output
/// depends on the history of raw samples and not only on the current progress.
#[derive(Debug, Default, Clone)]
pub struct Smoother {
    last_position: Option<Coordinate>,
    last_bearing_by_flight: HashMap<usize, f64>,
    current_camera_position: Option<Coordinate>,
    target_camera_position: Option<Coordinate>,
}

impl Smoother {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smooth_position(&mut self, raw: Coordinate) -> Coordinate {
        let smoothed = match self.last_position {
            Some(last) => last.blend(&raw, POSITION_KEEP),
            None => raw,
        };
        self.last_position = Some(smoothed);
        smoothed
    }

    /// Damps small heading changes; jumps of 45° or more (a real turn or a
    /// crossing of north) are adopted as-is so the icon never spins the long way.
    pub fn smooth_bearing(&mut self, flight_index: usize, raw: f64) -> f64 {
        let smoothed = match self.last_bearing_by_flight.get(&flight_index) {
            Some(prior) if (prior - raw).abs() < BEARING_SNAP_DEGREES => {
                prior * BEARING_KEEP + raw * (1.0 - BEARING_KEEP)
            }
            _ => raw,
        };
        self.last_bearing_by_flight.insert(flight_index, smoothed);
        smoothed
    }

    /// One step of camera following: eases from the live camera centre towards
    /// the raw plane position.
    pub fn follow_camera(&mut self, live_center: Coordinate, target: Coordinate) -> Coordinate {
        self.current_camera_position = Some(live_center);
        self.target_camera_position = Some(target);
        live_center.blend(&target, CAMERA_KEEP)
    }

    /// Prepares the camera tracker for a new flight.
    pub fn track_camera(&mut self, live_center: Coordinate, target: Coordinate) {
        self.current_camera_position = Some(live_center);
        self.target_camera_position = Some(target);
    }

    pub fn reset_camera(&mut self) {
        self.current_camera_position = None;
        self.target_camera_position = None;
    }

    pub fn reset(&mut self) {
        self.last_position = None;
        self.last_bearing_by_flight.clear();
        self.reset_camera();
    }

    pub fn last_position(&self) -> Option<Coordinate> {
        self.last_position
    }

    pub fn last_bearing(&self, flight_index: usize) -> Option<f64> {
        self.last_bearing_by_flight.get(&flight_index).copied()
    }

    pub fn camera_target(&self) -> Option<Coordinate> {
        self.target_camera_position
    }

    pub fn camera_position(&self) -> Option<Coordinate> {
        self.current_camera_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_first_position_is_taken_verbatim() {
        let mut smoother = Smoother::new();
        let raw = Coordinate::new(10.0, 10.0);

        assert_eq!(smoother.smooth_position(raw), raw);
        assert_eq!(smoother.last_position(), Some(raw));
    }

    #[test]
    fn test_position_leans_towards_the_raw_sample() {
        let mut smoother = Smoother::new();
        smoother.smooth_position(Coordinate::new(0.0, 0.0));

        let smoothed = smoother.smooth_position(Coordinate::new(10.0, -10.0));
        assert_abs_diff_eq!(smoothed.longitude, 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(smoothed.latitude, -8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bearing_snaps_on_large_jumps_and_averages_small_ones() {
        let mut smoother = Smoother::new();
        let raws = [100.0, 110.0, 120.0, 200.0, 205.0];
        let outputs: Vec<f64> = raws.iter().map(|raw| smoother.smooth_bearing(0, *raw)).collect();

        assert_abs_diff_eq!(outputs[0], 100.0);
        assert_abs_diff_eq!(outputs[1], 100.0 * 0.85 + 110.0 * 0.15, epsilon = 1e-9);
        assert_abs_diff_eq!(outputs[2], outputs[1] * 0.85 + 120.0 * 0.15, epsilon = 1e-9);
        // 200 is more than 45° away from the prior: no averaging at this step.
        assert_abs_diff_eq!(outputs[3], 200.0);
        assert_abs_diff_eq!(outputs[4], 200.0 * 0.85 + 205.0 * 0.15, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_crossing_north_is_not_averaged() {
        let mut smoother = Smoother::new();
        smoother.smooth_bearing(3, 358.0);

        assert_abs_diff_eq!(smoother.smooth_bearing(3, 2.0), 2.0);
    }

    #[test]
    fn test_bearings_are_tracked_per_flight() {
        let mut smoother = Smoother::new();
        smoother.smooth_bearing(0, 90.0);

        assert_abs_diff_eq!(smoother.smooth_bearing(1, 100.0), 100.0);
        assert_eq!(smoother.last_bearing(0), Some(90.0));
    }

    #[test]
    fn test_camera_blend_and_reset() {
        let mut smoother = Smoother::new();
        let blended = smoother.follow_camera(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 20.0));

        assert_abs_diff_eq!(blended.longitude, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(blended.latitude, 6.0, epsilon = 1e-12);
        assert_eq!(smoother.camera_target(), Some(Coordinate::new(10.0, 20.0)));

        smoother.reset_camera();
        assert_eq!(smoother.camera_target(), None);
        assert_eq!(smoother.camera_position(), None);
    }
}
