use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
    time::Duration,
};

use egui::Color32;
use flight_animation::{
    Coordinate, Easing, FlightRecord, MapStyle, MarkerHandle, Popup, RenderBridge,
};

use crate::{
    camera::CameraAnimator,
    types::{parse_css_color, DestinationMarker, PlaneSprite},
};

/// Tracks which destination marker has its popup open.
pub struct SelectionState {
    pub marker: Option<MarkerHandle>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        Self { marker: None }
    }

    /// If the provided marker is already selected, it will be deselected.
    /// Otherwise, it will be selected.
    pub fn toggle_marker_selection(&mut self, marker: MarkerHandle) {
        if self.marker == Some(marker) {
            self.marker = None;
        } else {
            self.marker = Some(marker);
        }
    }
}

/// Everything the map draws, as last set by the playback controller.
pub struct SceneState {
    pub trails: HashMap<usize, Vec<Coordinate>>,
    pub planes: HashMap<usize, PlaneSprite>,
    pub markers: BTreeMap<MarkerHandle, DestinationMarker>,
    pub caption: Option<String>,
    pub camera: CameraAnimator,
    pub style: MapStyle,
    /// Shared with the destinations plugin; an attached popup opens here.
    pub selection_state: Rc<RefCell<SelectionState>>,
    trail_colors: Vec<Color32>,
    fallback_color: Color32,
    next_marker: u64,
    now: Duration,
}

impl SceneState {
    pub fn new(flights: &[FlightRecord], default_color: &str) -> Self {
        let fallback_color = parse_css_color(default_color).unwrap_or(Color32::from_rgb(0xFF, 0x57, 0x33));
        let trail_colors = flights
            .iter()
            .map(|flight| parse_css_color(&flight.color).unwrap_or(fallback_color))
            .collect();

        Self {
            trails: HashMap::new(),
            planes: HashMap::new(),
            markers: BTreeMap::new(),
            caption: None,
            camera: CameraAnimator::default(),
            style: MapStyle::default(),
            selection_state: Rc::new(RefCell::new(SelectionState::new())),
            trail_colors,
            fallback_color,
            next_marker: 0,
            now: Duration::ZERO,
        }
    }

    /// Sets the clock used for camera transitions requested during this frame.
    pub fn begin_frame(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn trail_color(&self, flight_index: usize) -> Color32 {
        self.trail_colors
            .get(flight_index)
            .copied()
            .unwrap_or(self.fallback_color)
    }
}

impl RenderBridge for SceneState {
    fn set_path_geometry(&mut self, flight_index: usize, coordinates: &[Coordinate]) {
        self.trails.insert(flight_index, coordinates.to_vec());
    }

    fn set_plane_state(&mut self, flight_index: usize, position: Coordinate, bearing: f64, opacity: f32) {
        self.planes.insert(
            flight_index,
            PlaneSprite {
                position,
                bearing,
                opacity,
            },
        );
    }

    fn camera_center(&self) -> Coordinate {
        self.camera.center()
    }

    fn pan_camera(&mut self, position: Coordinate, duration: Duration, easing: Option<Easing>) {
        self.camera.pan_to(position, self.now, duration, easing);
    }

    fn fly_camera(&mut self, position: Coordinate, zoom: f64, duration: Duration, easing: Easing) {
        self.camera.fly_to(position, zoom, self.now, duration, easing);
    }

    fn add_destination_marker(&mut self, position: Coordinate, color: &str) -> MarkerHandle {
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        self.markers.insert(
            handle,
            DestinationMarker {
                position,
                color: parse_css_color(color).unwrap_or(self.fallback_color),
                popup: None,
            },
        );
        handle
    }

    fn attach_popup(&mut self, handle: MarkerHandle, popup: Popup) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.popup = Some(popup);
            self.selection_state.borrow_mut().marker = Some(handle);
        }
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        let mut selection = self.selection_state.borrow_mut();
        if selection.marker == Some(handle) {
            selection.marker = None;
        }
    }

    fn set_caption(&mut self, caption: Option<&str>) {
        self.caption = caption.map(str::to_string);
    }

    fn set_map_style(&mut self, style: MapStyle) {
        self.style = style;
    }
}
