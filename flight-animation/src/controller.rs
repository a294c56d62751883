use std::time::Duration;

use crate::{
    bridge::{MarkerHandle, Popup, RenderBridge},
    easing::Easing,
    geometry::{bearing, build_path, sample_path},
    probe::{ImageProbe, ProbeRequest, ProbeResult},
    scheduler::{Scheduler, TaskHandle},
    settings::AnimationSettings,
    smoother::Smoother,
    types::{AnimationError, Coordinate, FlightRecord, MapStyle, PlaybackPhase, PlaybackState},
};

/// Commands produced by the playback controls.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    PauseOrStop,
    Reset,
    SetFollowPlane(bool),
    SetCameraSmoothing(bool),
    ChangeStyle(String),
}

/// Work deferred to a later frame. Each task remembers the generation it was
/// scheduled in and is dropped if playback was reset since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    AdvanceFlight { generation: u64 },
}

/// Where a paused playback will pick up.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PausePoint {
    InFlight(f64),
    BetweenFlights,
}

/// The flight currently being drawn.
#[derive(Debug)]
struct ActiveFlight {
    index: usize,
    path: Vec<Coordinate>,
    overall_bearing: f64,
    /// Set on the first tick of a run, shifted back by the resumed progress.
    start_ms: Option<f64>,
    initial_progress: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct DestinationMarker {
    handle: MarkerHandle,
    position: Coordinate,
}

fn millis(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}

/// Drives the playback of a sequence of flights.
///
/// The controller owns every piece of mutable animation state. The host feeds
/// it commands and calls [`PlaybackController::advance`] once per rendered
/// frame with a monotonic timestamp; all drawing goes through a
/// [`RenderBridge`].
pub struct PlaybackController {
    flights: Vec<FlightRecord>,
    settings: AnimationSettings,
    phase: PlaybackPhase,
    current_flight_index: usize,
    progress: f64,
    pause_point: Option<PausePoint>,
    active: Option<ActiveFlight>,
    smoother: Smoother,
    scheduler: Scheduler<Deferred>,
    frame_handle: Option<TaskHandle>,
    advance_handle: Option<TaskHandle>,
    generation: u64,
    markers: Vec<DestinationMarker>,
    probe: Box<dyn ImageProbe>,
    follow_hold_until: Option<Duration>,
    style: MapStyle,
}

impl PlaybackController {
    pub fn new(
        flights: Vec<FlightRecord>,
        settings: AnimationSettings,
        probe: Box<dyn ImageProbe>,
    ) -> Self {
        Self {
            flights,
            settings,
            phase: PlaybackPhase::Idle,
            current_flight_index: 0,
            progress: 0.0,
            pause_point: None,
            active: None,
            smoother: Smoother::new(),
            scheduler: Scheduler::new(),
            frame_handle: None,
            advance_handle: None,
            generation: 0,
            markers: Vec::new(),
            probe,
            follow_hold_until: None,
            style: MapStyle::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_flight_index: self.current_flight_index,
            progress_fraction: self.progress,
            is_running: self.phase == PlaybackPhase::Running,
            paused_elapsed_fraction: match self.pause_point {
                Some(PausePoint::InFlight(progress)) => Some(progress),
                Some(PausePoint::BetweenFlights) => Some(1.0),
                None => None,
            },
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    /// The flight in the air, or waiting to resume.
    pub fn current_flight(&self) -> Option<&FlightRecord> {
        if self.phase.is_idle() {
            return None;
        }
        self.flights.get(self.current_flight_index)
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn follow_plane(&self) -> bool {
        self.settings.follow_plane
    }

    pub fn camera_smoothing(&self) -> bool {
        self.settings.camera_smoothing
    }

    pub fn smoother(&self) -> &Smoother {
        &self.smoother
    }

    /// Handles and positions of the destination markers on the map.
    pub fn destination_markers(&self) -> Vec<(MarkerHandle, Coordinate)> {
        self.markers.iter().map(|m| (m.handle, m.position)).collect()
    }

    /// Frame requests or timers are still pending.
    pub fn has_scheduled_work(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// Text of the start/pause toggle for the current phase.
    pub fn button_label(&self) -> &'static str {
        match self.phase {
            PlaybackPhase::Running => "Pause Animation",
            PlaybackPhase::Paused => "Resume Animation",
            PlaybackPhase::Idle | PlaybackPhase::Finished => "Start Animation",
        }
    }

    pub fn handle<B: RenderBridge>(
        &mut self,
        command: Command,
        now: Duration,
        bridge: &mut B,
    ) -> Result<(), AnimationError> {
        match command {
            Command::Start => self.start(now, bridge)?,
            Command::PauseOrStop => self.pause(now),
            Command::Reset => self.reset(bridge),
            Command::SetFollowPlane(follow) => self.set_follow_plane(follow),
            Command::SetCameraSmoothing(smoothing) => self.set_camera_smoothing(smoothing),
            Command::ChangeStyle(name) => self.change_style(&name, bridge)?,
        }
        Ok(())
    }

    /// Starts playback from the first flight, or resumes a paused one.
    pub fn start<B: RenderBridge>(&mut self, now: Duration, bridge: &mut B) -> Result<(), AnimationError> {
        if self.flights.is_empty() {
            return Err(AnimationError::NoFlights);
        }

        match self.phase {
            PlaybackPhase::Running => {}
            PlaybackPhase::Paused => self.resume(now, bridge),
            PlaybackPhase::Idle | PlaybackPhase::Finished => {
                self.reset(bridge);
                self.phase = PlaybackPhase::Running;
                self.begin_flight(0, now, bridge);
                log::info!("Animation started");
            }
        }
        Ok(())
    }

    /// Stops the tick loop and remembers how far the active flight got.
    pub fn pause(&mut self, now: Duration) {
        if self.phase != PlaybackPhase::Running {
            return;
        }

        if let Some(handle) = self.frame_handle.take() {
            self.scheduler.cancel(handle);
        }

        let pause_point = if let Some(handle) = self.advance_handle.take() {
            self.scheduler.cancel(handle);
            PausePoint::BetweenFlights
        } else {
            let progress = match &self.active {
                Some(ActiveFlight {
                    start_ms: Some(start),
                    ..
                }) => (millis(now) - start) / millis(self.settings.flight_duration),
                Some(active) => active.initial_progress,
                None => self.progress,
            };
            PausePoint::InFlight(progress.clamp(0.0, 1.0))
        };

        if let PausePoint::InFlight(progress) = pause_point {
            self.progress = progress;
        }
        self.pause_point = Some(pause_point);
        self.phase = PlaybackPhase::Paused;
        log::info!("Animation paused at flight {}", self.current_flight_index);
    }

    fn resume<B: RenderBridge>(&mut self, now: Duration, bridge: &mut B) {
        self.phase = PlaybackPhase::Running;

        match self.pause_point.take() {
            Some(PausePoint::BetweenFlights) => self.advance_to_next_flight(now, bridge),
            Some(PausePoint::InFlight(progress)) => {
                let Some(active) = self.active.as_mut() else {
                    self.begin_flight(self.current_flight_index, now, bridge);
                    return;
                };
                active.start_ms = None;
                active.initial_progress = progress;

                let sample = sample_path(&active.path, progress, active.overall_bearing);
                bridge.set_path_geometry(active.index, &active.path[..sample.trail_len]);

                if let Some((position, heading)) = sample.plane {
                    bridge.set_plane_state(active.index, position, heading, 1.0);
                    if self.settings.follow_plane {
                        bridge.pan_camera(position, self.settings.smoothed_pan_duration, None);
                    }
                }

                self.follow_hold_until = None;
                self.frame_handle = Some(self.scheduler.request_frame());
                log::info!("Animation resumed at {:.3}", progress);
            }
            None => self.begin_flight(self.current_flight_index, now, bridge),
        }
    }

    /// Returns to an inert idle state from any phase. Pending work is
    /// cancelled before any visual is torn down.
    pub fn reset<B: RenderBridge>(&mut self, bridge: &mut B) {
        let previous = self.phase;
        self.scheduler.cancel_all();
        self.frame_handle = None;
        self.advance_handle = None;
        self.generation += 1;

        for (index, flight) in self.flights.iter().enumerate() {
            bridge.set_path_geometry(index, &[]);
            bridge.set_plane_state(index, flight.origin, 0.0, 0.0);
        }

        for marker in self.markers.drain(..) {
            bridge.remove_marker(marker.handle);
        }

        self.current_flight_index = 0;
        self.progress = 0.0;
        self.pause_point = None;
        self.active = None;
        self.follow_hold_until = None;
        self.smoother.reset();
        bridge.set_caption(None);

        self.phase = PlaybackPhase::Idle;
        log::info!("Animation reset from {}", previous.as_str());
    }

    pub fn set_follow_plane(&mut self, follow: bool) {
        self.settings.follow_plane = follow;
    }

    pub fn set_camera_smoothing(&mut self, smoothing: bool) {
        self.settings.camera_smoothing = smoothing;
        self.smoother.reset_camera();
    }

    /// Switches the base map. Playback is reset first since the host rebuilds
    /// its layers for the new style.
    pub fn change_style<B: RenderBridge>(&mut self, name: &str, bridge: &mut B) -> Result<(), AnimationError> {
        let style: MapStyle = name.parse()?;
        if style == self.style {
            return Ok(());
        }

        self.reset(bridge);
        self.style = style;
        bridge.set_map_style(style);
        log::info!("Map style changed to {}", style);
        Ok(())
    }

    /// Runs everything due at `now`: finished image probes, expired timers and
    /// the pending frame tick, in that order.
    pub fn advance<B: RenderBridge>(&mut self, now: Duration, bridge: &mut B) {
        for result in self.probe.poll() {
            self.apply_probe_result(result, bridge);
        }

        for task in self.scheduler.take_due(now) {
            match task {
                Deferred::AdvanceFlight { generation } => {
                    if generation != self.generation || self.phase != PlaybackPhase::Running {
                        continue;
                    }
                    self.advance_handle = None;
                    self.advance_to_next_flight(now, bridge);
                }
            }
        }

        if let Some(handle) = self.scheduler.take_frame() {
            if self.frame_handle == Some(handle) {
                self.frame_handle = None;
                self.tick(now, bridge);
            }
        }
    }

    fn begin_flight<B: RenderBridge>(&mut self, index: usize, now: Duration, bridge: &mut B) {
        let Some(flight) = self.flights.get(index) else {
            self.finish(bridge);
            return;
        };
        let origin = flight.origin;
        let destination = flight.destination;
        let caption = flight.route_caption();

        let path = build_path(origin, destination, self.settings.path_steps);
        let overall_bearing = bearing(&origin, &destination);

        self.current_flight_index = index;
        self.progress = 0.0;
        self.pause_point = None;
        self.smoother.reset();

        bridge.set_caption(Some(&caption));
        self.remove_markers_near(origin, bridge);
        bridge.set_plane_state(index, origin, overall_bearing, 1.0);

        if self.settings.follow_plane {
            self.smoother.track_camera(bridge.camera_center(), origin);
            bridge.fly_camera(
                origin,
                self.settings.follow_zoom,
                self.settings.fly_duration,
                Easing::EaseInOut,
            );
            self.follow_hold_until = Some(now + self.settings.fly_duration);
        } else {
            self.follow_hold_until = None;
        }

        self.active = Some(ActiveFlight {
            index,
            path,
            overall_bearing,
            start_ms: None,
            initial_progress: 0.0,
        });
        self.frame_handle = Some(self.scheduler.request_frame());
        log::info!("Flight {} started: {}", index, caption);
    }

    fn tick<B: RenderBridge>(&mut self, now: Duration, bridge: &mut B) {
        if self.phase != PlaybackPhase::Running {
            return;
        }

        let duration_ms = millis(self.settings.flight_duration);
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let start = *active
            .start_ms
            .get_or_insert(millis(now) - active.initial_progress * duration_ms);
        let progress = (millis(now) - start) / duration_ms;

        if progress > 1.0 {
            self.complete_flight(now, bridge);
            return;
        }
        self.progress = progress.max(0.0);

        let index = active.index;
        let sample = sample_path(&active.path, progress, active.overall_bearing);
        bridge.set_path_geometry(index, &active.path[..sample.trail_len]);

        if let Some((raw_position, raw_bearing)) = sample.plane {
            let position = self.smoother.smooth_position(raw_position);
            let heading = self.smoother.smooth_bearing(index, raw_bearing);
            bridge.set_plane_state(index, position, heading, 1.0);
            self.follow_camera(raw_position, now, bridge);
        }

        self.frame_handle = Some(self.scheduler.request_frame());
    }

    fn follow_camera<B: RenderBridge>(&mut self, target: Coordinate, now: Duration, bridge: &mut B) {
        if !self.settings.follow_plane {
            return;
        }
        if self.follow_hold_until.is_some_and(|hold| now < hold) {
            return;
        }

        if self.settings.camera_smoothing {
            let blended = self.smoother.follow_camera(bridge.camera_center(), target);
            bridge.pan_camera(
                blended,
                self.settings.smoothed_pan_duration,
                Some(Easing::EaseOutCubic),
            );
        } else {
            bridge.pan_camera(target, self.settings.direct_pan_duration, None);
        }
    }

    fn complete_flight<B: RenderBridge>(&mut self, now: Duration, bridge: &mut B) {
        let Some(active) = self.active.take() else {
            return;
        };
        let index = active.index;
        let flight = self.flights[index].clone();

        self.progress = 1.0;
        self.follow_hold_until = None;
        bridge.set_path_geometry(index, &active.path);
        bridge.set_plane_state(index, flight.destination, active.overall_bearing, 0.0);

        if let Some(next_origin) = self.flights.get(index + 1).map(|next| next.origin) {
            self.remove_markers_near(next_origin, bridge);
        }
        self.remove_markers_near(flight.destination, bridge);

        let handle = bridge.add_destination_marker(flight.destination, &flight.color);
        self.markers.push(DestinationMarker {
            handle,
            position: flight.destination,
        });
        self.probe.request(ProbeRequest {
            generation: self.generation,
            flight_index: index,
            marker: handle,
            image_path: flight.image_path(),
        });

        self.advance_handle = Some(self.scheduler.schedule_after(
            now,
            self.settings.path_pause,
            Deferred::AdvanceFlight {
                generation: self.generation,
            },
        ));
        log::info!("Flight {} arrived at {}", index, flight.destination_name);
    }

    fn advance_to_next_flight<B: RenderBridge>(&mut self, now: Duration, bridge: &mut B) {
        let next = self.current_flight_index + 1;
        if next < self.flights.len() {
            self.begin_flight(next, now, bridge);
        } else {
            self.finish(bridge);
        }
    }

    fn finish<B: RenderBridge>(&mut self, bridge: &mut B) {
        if let Some(handle) = self.frame_handle.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.advance_handle.take() {
            self.scheduler.cancel(handle);
        }

        self.active = None;
        self.progress = 0.0;
        self.pause_point = None;
        self.follow_hold_until = None;
        bridge.set_caption(None);

        self.phase = PlaybackPhase::Finished;
        log::info!("All {} flights completed", self.flights.len());
    }

    fn remove_markers_near<B: RenderBridge>(&mut self, position: Coordinate, bridge: &mut B) {
        let tolerance = self.settings.marker_tolerance;
        self.markers.retain(|marker| {
            if marker.position.is_near(&position, tolerance) {
                bridge.remove_marker(marker.handle);
                false
            } else {
                true
            }
        });
    }

    /// Attaches a popup once an image probe succeeds. Results from an older
    /// generation, or for a marker that was removed meanwhile, are discarded.
    fn apply_probe_result<B: RenderBridge>(&mut self, result: ProbeResult, bridge: &mut B) {
        let request = result.request;
        if request.generation != self.generation {
            log::debug!("Discarding stale image probe for flight {}", request.flight_index);
            return;
        }

        if !self.markers.iter().any(|m| m.handle == request.marker) {
            return;
        }

        match result.resolved {
            Some(path) => {
                let caption = self
                    .flights
                    .get(request.flight_index)
                    .map(|flight| flight.label.clone())
                    .unwrap_or_default();
                bridge.attach_popup(
                    request.marker,
                    Popup {
                        image_path: path.display().to_string(),
                        caption,
                    },
                );
            }
            None => log::info!("No image found for flight {}", request.flight_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::NoImages;

    #[derive(Default)]
    struct NullBridge {
        markers: u64,
    }

    impl RenderBridge for NullBridge {
        fn set_path_geometry(&mut self, _: usize, _: &[Coordinate]) {}
        fn set_plane_state(&mut self, _: usize, _: Coordinate, _: f64, _: f32) {}
        fn camera_center(&self) -> Coordinate {
            Coordinate::new(0.0, 20.0)
        }
        fn pan_camera(&mut self, _: Coordinate, _: Duration, _: Option<Easing>) {}
        fn fly_camera(&mut self, _: Coordinate, _: f64, _: Duration, _: Easing) {}
        fn add_destination_marker(&mut self, _: Coordinate, _: &str) -> MarkerHandle {
            self.markers += 1;
            MarkerHandle(self.markers)
        }
        fn attach_popup(&mut self, _: MarkerHandle, _: Popup) {}
        fn remove_marker(&mut self, _: MarkerHandle) {}
        fn set_caption(&mut self, _: Option<&str>) {}
        fn set_map_style(&mut self, _: MapStyle) {}
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn controller(flights: Vec<FlightRecord>) -> PlaybackController {
        PlaybackController::new(flights, AnimationSettings::default(), Box::new(NoImages::default()))
    }

    fn one_flight() -> Vec<FlightRecord> {
        vec![FlightRecord::new(
            1,
            "Hop",
            ("A", Coordinate::new(0.0, 0.0)),
            ("B", Coordinate::new(10.0, 0.0)),
        )]
    }

    #[test]
    fn test_start_without_flights_is_a_no_op() {
        let mut controller = controller(Vec::new());
        let mut bridge = NullBridge::default();

        assert!(matches!(
            controller.start(ms(0), &mut bridge),
            Err(AnimationError::NoFlights)
        ));
        assert_eq!(controller.phase(), PlaybackPhase::Idle);
        assert!(!controller.has_scheduled_work());
    }

    #[test]
    fn test_button_label_follows_the_phase() {
        let mut controller = controller(one_flight());
        let mut bridge = NullBridge::default();
        assert_eq!(controller.button_label(), "Start Animation");

        controller.start(ms(0), &mut bridge).unwrap();
        assert_eq!(controller.button_label(), "Pause Animation");

        controller.pause(ms(100));
        assert_eq!(controller.button_label(), "Resume Animation");
    }

    #[test]
    fn test_pause_before_the_first_tick_keeps_zero_progress() {
        let mut controller = controller(one_flight());
        let mut bridge = NullBridge::default();

        controller.start(ms(0), &mut bridge).unwrap();
        controller.pause(ms(5000));

        assert_eq!(controller.state().paused_elapsed_fraction, Some(0.0));
        assert!(!controller.has_scheduled_work());
    }

    #[test]
    fn test_pause_captures_elapsed_fraction() {
        let mut controller = controller(one_flight());
        let mut bridge = NullBridge::default();

        controller.start(ms(0), &mut bridge).unwrap();
        controller.advance(ms(1000), &mut bridge);
        controller.advance(ms(3000), &mut bridge);
        controller.pause(ms(5000));

        let state = controller.state();
        assert!(!state.is_running);
        assert_eq!(state.paused_elapsed_fraction, Some(0.5));
    }

    #[test]
    fn test_changing_to_the_current_style_keeps_playing() {
        let mut controller = controller(one_flight());
        let mut bridge = NullBridge::default();
        controller.start(ms(0), &mut bridge).unwrap();

        controller.change_style("dark", &mut bridge).unwrap();
        assert_eq!(controller.phase(), PlaybackPhase::Running);

        controller.change_style("streets", &mut bridge).unwrap();
        assert_eq!(controller.phase(), PlaybackPhase::Idle);
        assert_eq!(controller.style(), MapStyle::Streets);
        assert!(controller.change_style("satellite", &mut bridge).is_err());
    }

    #[test]
    fn test_toggling_smoothing_clears_camera_tracking() {
        let mut controller = controller(one_flight());
        let mut bridge = NullBridge::default();
        controller.start(ms(0), &mut bridge).unwrap();
        assert!(controller.smoother().camera_target().is_some());

        controller.set_camera_smoothing(false);
        assert!(controller.smoother().camera_target().is_none());
        assert!(!controller.camera_smoothing());
    }

    #[test]
    fn test_unsmoothed_camera_pans_straight_to_the_plane() {
        let settings = AnimationSettings::default().with_camera_smoothing(false);
        let mut controller =
            PlaybackController::new(one_flight(), settings, Box::new(NoImages::default()));
        let mut bridge = NullBridge::default();
        assert!(!controller.camera_smoothing());

        controller.start(ms(0), &mut bridge).unwrap();
        controller.advance(ms(16), &mut bridge);
        controller.advance(ms(3000), &mut bridge);

        // Only the fly-in touched the tracker; following bypassed the blend.
        assert_eq!(controller.smoother().camera_target(), Some(Coordinate::new(0.0, 0.0)));
        assert_eq!(controller.phase(), PlaybackPhase::Running);
    }
}
