use std::time::Duration;

use crate::{
    easing::Easing,
    types::{Coordinate, MapStyle},
};

/// Identifies a destination marker on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// Content shown above a destination marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub image_path: String,
    pub caption: String,
}

/// The rendering surface the playback controller draws on.
///
/// Every call is fire-and-forget: the controller never waits for a render to
/// happen, and only keeps marker handles to remove markers later.
pub trait RenderBridge {
    /// Replaces the visible trail of a flight.
    fn set_path_geometry(&mut self, flight_index: usize, coordinates: &[Coordinate]);

    fn set_plane_state(&mut self, flight_index: usize, position: Coordinate, bearing: f64, opacity: f32);

    /// Current centre of the camera.
    fn camera_center(&self) -> Coordinate;

    fn pan_camera(&mut self, position: Coordinate, duration: Duration, easing: Option<Easing>);

    fn fly_camera(&mut self, position: Coordinate, zoom: f64, duration: Duration, easing: Easing);

    fn add_destination_marker(&mut self, position: Coordinate, color: &str) -> MarkerHandle;

    fn attach_popup(&mut self, handle: MarkerHandle, popup: Popup);

    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Text describing the flight in the air, `None` when nothing is flying.
    fn set_caption(&mut self, caption: Option<&str>);

    fn set_map_style(&mut self, style: MapStyle);
}
