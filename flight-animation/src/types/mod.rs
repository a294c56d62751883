mod animation_error;
pub use animation_error::{AnimationError, LoadError, RecordError};

mod coordinate;
pub use coordinate::Coordinate;

mod flight_record;
pub use flight_record::{FlightRecord, DEFAULT_FLIGHT_COLOR};

mod map_style;
pub use map_style::MapStyle;

mod playback_phase;
pub use playback_phase::{PlaybackPhase, PlaybackState};
