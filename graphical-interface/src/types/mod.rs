mod destination_marker;
pub use destination_marker::DestinationMarker;

mod plane_sprite;
pub use plane_sprite::PlaneSprite;

mod color;
pub use color::parse_css_color;

mod viewer_options;
pub use viewer_options::ViewerOptions;
