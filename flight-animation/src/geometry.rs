use std::f64::consts::PI;

use crate::types::Coordinate;

/// Number of curve steps used when no other value is configured.
pub const DEFAULT_PATH_STEPS: usize = 500;

const LONG_HAUL_LONGITUDE_DELTA: f64 = 90.0;
const LONG_HAUL_BUMP: f64 = 15.0;
const SHORT_HAUL_BUMP: f64 = 5.0;

/// Builds the curved path a plane follows from `origin` to `destination`.
///
/// The curve is a quadratic Bezier whose control point sits on the midpoint,
/// lifted in latitude by a bump that grows with the longitude delta. It is a
/// visual arc, not a geodesic. Both endpoints are always present exactly.
pub fn build_path(origin: Coordinate, destination: Coordinate, steps: usize) -> Vec<Coordinate> {
    let mut coordinates = Vec::with_capacity(steps.saturating_add(1).max(2));
    coordinates.push(origin);

    let bump = bump_height(&origin, &destination);
    let mid_longitude = (origin.longitude + destination.longitude) / 2.0;
    let mid_latitude = (origin.latitude + destination.latitude) / 2.0;

    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let u = 1.0 - t;
        let control = Coordinate::new(mid_longitude, mid_latitude + bump * (t * PI).sin());

        coordinates.push(Coordinate::new(
            u * u * origin.longitude + 2.0 * u * t * control.longitude + t * t * destination.longitude,
            u * u * origin.latitude + 2.0 * u * t * control.latitude + t * t * destination.latitude,
        ));
    }

    coordinates.push(destination);

    if coordinates.len() < 2 {
        log::warn!("Path has less than 2 points, adding endpoints explicitly");
        coordinates.push(origin);
        coordinates.push(destination);
    }

    log::debug!("Generated path with {} points", coordinates.len());
    coordinates
}

fn bump_height(origin: &Coordinate, destination: &Coordinate) -> f64 {
    if (origin.longitude - destination.longitude).abs() > LONG_HAUL_LONGITUDE_DELTA {
        LONG_HAUL_BUMP
    } else {
        SHORT_HAUL_BUMP
    }
}

/// Initial bearing from `from` to `to` in degrees, in `[0, 360)`.
pub fn bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lon1 = from.longitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let lon2 = to.longitude.to_radians();

    let delta_lon = lon2 - lon1;

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    let bearing = y.atan2(x).to_degrees();

    (bearing + 360.0) % 360.0
}

/// Bearing of one segment of a path.
pub fn segment_bearing(point_a: &Coordinate, point_b: &Coordinate) -> f64 {
    bearing(point_a, point_b)
}

/// Where the plane and its trail stand at a given progress along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Number of leading path points that make up the visible trail.
    pub trail_len: usize,
    /// Interpolated plane position and heading, absent past the last point.
    pub plane: Option<(Coordinate, f64)>,
}

/// Samples `path` at `progress` (a fraction of the flight duration).
///
/// The progress is mapped to a fractional index; the trail covers every point
/// up to its floor and the plane is interpolated linearly towards the next
/// point, heading along that segment. On the final point the plane keeps the
/// flight's `overall_bearing`.
pub fn sample_path(path: &[Coordinate], progress: f64, overall_bearing: f64) -> PathSample {
    let len = path.len();
    if len == 0 {
        return PathSample {
            trail_len: 0,
            plane: None,
        };
    }

    let exact_index = progress.max(0.0) * len as f64;
    let current_index = exact_index.floor() as usize;
    let fraction = exact_index - current_index as f64;
    let trail_len = (current_index + 1).min(len);

    let plane = if current_index + 1 < len {
        let current = &path[current_index];
        let next = &path[current_index + 1];
        Some((current.lerp(next, fraction), segment_bearing(current, next)))
    } else if current_index + 1 == len {
        Some((path[current_index], overall_bearing))
    } else {
        None
    };

    PathSample { trail_len, plane }
}
