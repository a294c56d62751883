use egui::Color32;
use flight_animation::{Coordinate, Popup};

/// Represents a marker left at the destination of a completed flight.

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationMarker {
    pub position: Coordinate,
    pub color: Color32,
    pub popup: Option<Popup>,
}
