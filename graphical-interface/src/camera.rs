use std::time::Duration;

use flight_animation::{Coordinate, Easing};

pub const INITIAL_CENTER: Coordinate = Coordinate::new(0.0, 20.0);
pub const INITIAL_ZOOM: f64 = 1.5;

#[derive(Debug, Clone, Copy)]
struct Tween<T> {
    from: T,
    to: T,
    start: Duration,
    duration: Duration,
    easing: Option<Easing>,
}

impl<T: Copy> Tween<T> {
    /// Eased fraction of the tween at `now`, in `[0, 1]`.
    fn fraction(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = now.saturating_sub(self.start).as_secs_f64() / self.duration.as_secs_f64();
        self.easing.unwrap_or(Easing::Linear).apply(t)
    }

    fn finished(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }
}

/// Animates the map camera between the positions requested by the playback.
///
/// Centre and zoom are tweened separately: a pan replaces the centre tween
/// and leaves a running zoom tween alone.
#[derive(Debug, Clone)]
pub struct CameraAnimator {
    center: Coordinate,
    zoom: f64,
    center_tween: Option<Tween<Coordinate>>,
    zoom_tween: Option<Tween<f64>>,
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            center_tween: None,
            zoom_tween: None,
        }
    }
}

impl CameraAnimator {
    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_animating(&self) -> bool {
        self.center_tween.is_some() || self.zoom_tween.is_some()
    }

    pub fn pan_to(&mut self, target: Coordinate, now: Duration, duration: Duration, easing: Option<Easing>) {
        self.center_tween = Some(Tween {
            from: self.center,
            to: target,
            start: now,
            duration,
            easing,
        });
    }

    pub fn fly_to(&mut self, target: Coordinate, zoom: f64, now: Duration, duration: Duration, easing: Easing) {
        self.pan_to(target, now, duration, Some(easing));
        self.zoom_tween = Some(Tween {
            from: self.zoom,
            to: zoom,
            start: now,
            duration,
            easing: Some(easing),
        });
    }

    /// Takes over a position the user dragged the map to.
    pub fn follow_user(&mut self, center: Coordinate, zoom: f64) {
        if !self.is_animating() {
            self.center = center;
            self.zoom = zoom;
        }
    }

    /// Advances the running tweens to `now`.
    pub fn update(&mut self, now: Duration) {
        if let Some(tween) = self.center_tween {
            if tween.finished(now) {
                self.center = tween.to;
                self.center_tween = None;
            } else {
                self.center = tween.from.lerp(&tween.to, tween.fraction(now));
            }
        }

        if let Some(tween) = self.zoom_tween {
            if tween.finished(now) {
                self.zoom = tween.to;
                self.zoom_tween = None;
            } else {
                self.zoom = tween.from + (tween.to - tween.from) * tween.fraction(now);
            }
        }
    }
}
