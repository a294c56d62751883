use std::{fmt, str::FromStr};

use super::AnimationError;

/// Base map styles the host can switch between.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub enum MapStyle {
    #[default]
    Dark,
    Streets,
}

impl MapStyle {
    pub const ALL: [MapStyle; 2] = [MapStyle::Dark, MapStyle::Streets];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Dark => "dark",
            MapStyle::Streets => "streets",
        }
    }
}

impl FromStr for MapStyle {
    type Err = AnimationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Ok(MapStyle::Dark),
            "streets" => Ok(MapStyle::Streets),
            other => Err(AnimationError::UnknownStyle(other.to_string())),
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
