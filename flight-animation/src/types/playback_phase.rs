/// Represents the phases of the playback state machine.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl PlaybackPhase {
    /// Converts the `PlaybackPhase` variant to its string representation.
    pub fn as_str(&self) -> &str {
        match self {
            PlaybackPhase::Idle => "idle",
            PlaybackPhase::Running => "running",
            PlaybackPhase::Paused => "paused",
            PlaybackPhase::Finished => "finished",
        }
    }

    /// Finished playback accepts commands exactly like an idle one.
    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackPhase::Idle | PlaybackPhase::Finished)
    }
}

/// Read-only view of the playback counters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    pub current_flight_index: usize,
    pub progress_fraction: f64,
    pub is_running: bool,
    pub paused_elapsed_fraction: Option<f64>,
}
