/// A geographic position in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Both components are finite and inside the usual lon/lat ranges.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }

    /// Linear interpolation towards `other`; `fraction` 0 yields `self`.
    pub fn lerp(&self, other: &Coordinate, fraction: f64) -> Coordinate {
        Coordinate {
            longitude: self.longitude + (other.longitude - self.longitude) * fraction,
            latitude: self.latitude + (other.latitude - self.latitude) * fraction,
        }
    }

    /// Weighted blend `self * keep + other * (1 - keep)`.
    pub fn blend(&self, other: &Coordinate, keep: f64) -> Coordinate {
        Coordinate {
            longitude: self.longitude * keep + other.longitude * (1.0 - keep),
            latitude: self.latitude * keep + other.latitude * (1.0 - keep),
        }
    }

    /// True when both axes differ by less than `tolerance` degrees.
    pub fn is_near(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.longitude - other.longitude).abs() < tolerance
            && (self.latitude - other.latitude).abs() < tolerance
    }
}
