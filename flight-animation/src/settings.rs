use std::time::Duration;

use crate::{geometry::DEFAULT_PATH_STEPS, types::DEFAULT_FLIGHT_COLOR};

/// Timing, camera and geometry constants of a playback session.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    /// Time a plane takes to cover one path.
    pub flight_duration: Duration,
    /// Pause between the arrival of one flight and the start of the next.
    pub path_pause: Duration,
    pub path_steps: usize,
    pub follow_zoom: f64,
    pub fly_duration: Duration,
    pub smoothed_pan_duration: Duration,
    pub direct_pan_duration: Duration,
    /// Degrees on each axis under which two markers count as the same airport.
    pub marker_tolerance: f64,
    pub default_color: String,
    pub follow_plane: bool,
    pub camera_smoothing: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            flight_duration: Duration::from_millis(8000),
            path_pause: Duration::from_millis(1500),
            path_steps: DEFAULT_PATH_STEPS,
            follow_zoom: 3.5,
            fly_duration: Duration::from_millis(2000),
            smoothed_pan_duration: Duration::from_millis(500),
            direct_pan_duration: Duration::from_millis(50),
            marker_tolerance: 0.1,
            default_color: DEFAULT_FLIGHT_COLOR.to_string(),
            follow_plane: true,
            camera_smoothing: true,
        }
    }
}

impl AnimationSettings {
    pub fn with_follow_plane(mut self, follow_plane: bool) -> Self {
        self.follow_plane = follow_plane;
        self
    }

    pub fn with_camera_smoothing(mut self, camera_smoothing: bool) -> Self {
        self.camera_smoothing = camera_smoothing;
        self
    }
}
