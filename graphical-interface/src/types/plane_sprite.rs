use flight_animation::Coordinate;

/// Represents the plane icon of one flight: where it is, where it points
/// and how visible it is.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSprite {
    pub position: Coordinate,
    pub bearing: f64,
    pub opacity: f32,
}

impl PlaneSprite {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}
