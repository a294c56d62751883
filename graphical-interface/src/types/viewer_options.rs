use std::path::PathBuf;

use flight_animation::AnimationSettings;

/// Session options handed to the viewer by the launcher.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Directory holding `plane-icon.png` and the `img/` destination images.
    pub assets_dir: PathBuf,
    /// Enables the Mapbox dark and streets tiles.
    pub mapbox_token: Option<String>,
    pub settings: AnimationSettings,
}

impl ViewerOptions {
    pub fn new(assets_dir: PathBuf) -> Self {
        Self {
            assets_dir,
            mapbox_token: None,
            settings: AnimationSettings::default(),
        }
    }

    pub fn with_mapbox_token(mut self, token: Option<String>) -> Self {
        self.mapbox_token = token.filter(|token| !token.trim().is_empty());
        self
    }

    pub fn plane_icon_path(&self) -> PathBuf {
        self.assets_dir.join("plane-icon.png")
    }
}
