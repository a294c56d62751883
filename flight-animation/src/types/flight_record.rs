use super::Coordinate;

pub const DEFAULT_FLIGHT_COLOR: &str = "#FF5733";

/// Represents one flight of the playback sequence, with its route and the
/// colour used for its trail and destination marker.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub id: i64,
    pub label: String,
    pub origin_name: String,
    pub origin: Coordinate,
    pub destination_name: String,
    pub destination: Coordinate,
    pub color: String,
}

impl FlightRecord {
    pub fn new(
        id: i64,
        label: &str,
        (origin_name, origin): (&str, Coordinate),
        (destination_name, destination): (&str, Coordinate),
    ) -> Self {
        Self {
            id,
            label: label.to_string(),
            origin_name: origin_name.to_string(),
            origin,
            destination_name: destination_name.to_string(),
            destination,
            color: DEFAULT_FLIGHT_COLOR.to_string(),
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    /// Text shown while the flight is in the air.
    pub fn route_caption(&self) -> String {
        format!("{} to {}", self.origin_name, self.destination_name)
    }

    /// Relative path of the image shown above the destination marker.
    pub fn image_path(&self) -> String {
        format!("img/{}.png", self.id)
    }
}
