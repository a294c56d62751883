pub mod bridge;
pub mod controller;
pub mod easing;
pub mod geometry;
pub mod probe;
pub mod records;
pub mod scheduler;
pub mod settings;
pub mod smoother;
pub mod types;

pub use bridge::{MarkerHandle, Popup, RenderBridge};
pub use controller::{Command, PlaybackController};
pub use easing::Easing;
pub use probe::{ImageProbe, NoImages, ProbeRequest, ProbeResult, ThreadedImageProbe};
pub use records::{load_or_empty, parse_flights, CsvFlightSource, FlightSource, LoadReport};
pub use settings::AnimationSettings;
pub use types::*;
