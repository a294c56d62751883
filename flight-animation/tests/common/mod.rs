#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    rc::Rc,
    time::Duration,
};

use flight_animation::{
    AnimationSettings, Coordinate, Easing, FlightRecord, ImageProbe, MapStyle, MarkerHandle,
    PlaybackController, Popup, ProbeRequest, ProbeResult, RenderBridge,
};

pub const FRAME_MS: u64 = 16;

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// One call made on the bridge, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCall {
    PathGeometry {
        flight: usize,
        points: usize,
    },
    PlaneState {
        flight: usize,
        position: Coordinate,
        bearing: f64,
        opacity: f32,
    },
    Pan {
        position: Coordinate,
        duration: Duration,
        easing: Option<Easing>,
    },
    Fly {
        position: Coordinate,
        zoom: f64,
        duration: Duration,
    },
    AddMarker(MarkerHandle, Coordinate),
    AttachPopup(MarkerHandle, Popup),
    RemoveMarker(MarkerHandle),
    Caption(Option<String>),
    Style(MapStyle),
}

/// Bridge that records every call and keeps the resulting scene.
#[derive(Debug)]
pub struct RecordingBridge {
    pub calls: Vec<BridgeCall>,
    pub trails: HashMap<usize, Vec<Coordinate>>,
    pub planes: HashMap<usize, (Coordinate, f64, f32)>,
    pub markers: BTreeMap<MarkerHandle, Coordinate>,
    pub popups: BTreeMap<MarkerHandle, Popup>,
    pub caption: Option<String>,
    pub camera: Coordinate,
    pub style: MapStyle,
    next_marker: u64,
}

impl Default for RecordingBridge {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            trails: HashMap::new(),
            planes: HashMap::new(),
            markers: BTreeMap::new(),
            popups: BTreeMap::new(),
            caption: None,
            camera: Coordinate::new(0.0, 20.0),
            style: MapStyle::default(),
            next_marker: 0,
        }
    }
}

impl RecordingBridge {
    pub fn last_plane(&self, flight: usize) -> Option<(Coordinate, f64, f32)> {
        self.calls.iter().rev().find_map(|call| match call {
            BridgeCall::PlaneState {
                flight: f,
                position,
                bearing,
                opacity,
            } if *f == flight => Some((*position, *bearing, *opacity)),
            _ => None,
        })
    }

    pub fn pans(&self) -> Vec<(Coordinate, Duration, Option<Easing>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::Pan {
                    position,
                    duration,
                    easing,
                } => Some((*position, *duration, *easing)),
                _ => None,
            })
            .collect()
    }

    pub fn removed_markers(&self) -> Vec<MarkerHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::RemoveMarker(handle) => Some(*handle),
                _ => None,
            })
            .collect()
    }
}

impl RenderBridge for RecordingBridge {
    fn set_path_geometry(&mut self, flight_index: usize, coordinates: &[Coordinate]) {
        self.calls.push(BridgeCall::PathGeometry {
            flight: flight_index,
            points: coordinates.len(),
        });
        self.trails.insert(flight_index, coordinates.to_vec());
    }

    fn set_plane_state(&mut self, flight_index: usize, position: Coordinate, bearing: f64, opacity: f32) {
        self.calls.push(BridgeCall::PlaneState {
            flight: flight_index,
            position,
            bearing,
            opacity,
        });
        self.planes.insert(flight_index, (position, bearing, opacity));
    }

    fn camera_center(&self) -> Coordinate {
        self.camera
    }

    fn pan_camera(&mut self, position: Coordinate, duration: Duration, easing: Option<Easing>) {
        self.calls.push(BridgeCall::Pan {
            position,
            duration,
            easing,
        });
        self.camera = position;
    }

    fn fly_camera(&mut self, position: Coordinate, zoom: f64, duration: Duration, _easing: Easing) {
        self.calls.push(BridgeCall::Fly {
            position,
            zoom,
            duration,
        });
        self.camera = position;
    }

    fn add_destination_marker(&mut self, position: Coordinate, _color: &str) -> MarkerHandle {
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        self.calls.push(BridgeCall::AddMarker(handle, position));
        self.markers.insert(handle, position);
        handle
    }

    fn attach_popup(&mut self, handle: MarkerHandle, popup: Popup) {
        self.calls.push(BridgeCall::AttachPopup(handle, popup.clone()));
        self.popups.insert(handle, popup);
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.calls.push(BridgeCall::RemoveMarker(handle));
        self.markers.remove(&handle);
        self.popups.remove(&handle);
    }

    fn set_caption(&mut self, caption: Option<&str>) {
        self.calls.push(BridgeCall::Caption(caption.map(str::to_string)));
        self.caption = caption.map(str::to_string);
    }

    fn set_map_style(&mut self, style: MapStyle) {
        self.calls.push(BridgeCall::Style(style));
        self.style = style;
    }
}

/// Probe whose requests stay pending until the test resolves them.
#[derive(Clone, Default)]
pub struct ManualProbe {
    pending: Rc<RefCell<Vec<ProbeRequest>>>,
    ready: Rc<RefCell<Vec<ProbeResult>>>,
}

impl ManualProbe {
    pub fn pending(&self) -> Vec<ProbeRequest> {
        self.pending.borrow().clone()
    }

    /// Completes every pending request, resolving each image under `base`.
    pub fn resolve_all(&self, base: &str) {
        let requests: Vec<ProbeRequest> = self.pending.borrow_mut().drain(..).collect();
        let mut ready = self.ready.borrow_mut();
        for request in requests {
            let resolved = Some(PathBuf::from(base).join(&request.image_path));
            ready.push(ProbeResult { request, resolved });
        }
    }
}

impl ImageProbe for ManualProbe {
    fn request(&mut self, request: ProbeRequest) {
        self.pending.borrow_mut().push(request);
    }

    fn poll(&mut self) -> Vec<ProbeResult> {
        self.ready.borrow_mut().drain(..).collect()
    }
}

pub fn flight(id: i64, origin: (&str, Coordinate), destination: (&str, Coordinate)) -> FlightRecord {
    FlightRecord::new(
        id,
        &format!("Flight {}", id),
        origin,
        destination,
    )
}

pub fn controller_with(
    flights: Vec<FlightRecord>,
    settings: AnimationSettings,
) -> (PlaybackController, ManualProbe) {
    let probe = ManualProbe::default();
    let controller = PlaybackController::new(flights, settings, Box::new(probe.clone()));
    (controller, probe)
}

/// Advances the controller one frame at a time over `(from, to]`.
pub fn play(controller: &mut PlaybackController, bridge: &mut RecordingBridge, from: u64, to: u64) {
    let mut now = from + FRAME_MS;
    while now <= to {
        controller.advance(ms(now), bridge);
        now += FRAME_MS;
    }
}
