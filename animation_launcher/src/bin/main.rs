use std::env;
use std::fs;

use animation_launcher::config::LaunchConfig;
use flight_animation::{load_or_empty, CsvFlightSource};
use graphical_interface::ViewerOptions;
use log::LevelFilter;
use logger::{Color, Logger};

/// Main entry point of the flight playback viewer.
///
/// Reads the session configuration, installs the file logger, loads the
/// flights and opens the map window.
///
/// # Usage
///
/// ```sh
/// cargo run -- [flights.csv] [assets_dir]
/// ```
///
/// The flight file defaults to `data/flights.csv` and the assets directory
/// (holding `plane-icon.png` and `img/<id>.png`) to the current directory.
/// `MAPBOX_ACCESS_TOKEN`, `FLIGHT_ARCS_LOG_DIR`, `FLIGHT_ARCS_LOG` and
/// `FLIGHT_ARCS_LOG_CONSOLE` are read from the environment or a `.env` file.
///
/// # Errors
///
/// The program returns an error if:
/// - The arguments or the log level are invalid.
/// - The log directory cannot be created.
/// - The window cannot be opened.
///
/// A missing or malformed flight file is not an error: the viewer opens with
/// no flights.
fn main() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    let dotenv = fs::read_to_string(".env").ok();

    let config =
        LaunchConfig::from_sources(&args, dotenv.as_deref(), |key| env::var(key).ok()).map_err(|e| e.to_string())?;

    let session = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let console_level = if config.log_to_console {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    Logger::new(&config.log_dir, &session)
        .map_err(|e| e.to_string())?
        .with_console_level(console_level)
        .with_info_color(Color::Cyan)
        .init(config.log_level)
        .map_err(|e| e.to_string())?;

    log::info!("Loading flights from {}", config.flights_path.display());
    let flights = load_or_empty(&mut CsvFlightSource::new(&config.flights_path));

    let options = ViewerOptions::new(config.assets_dir).with_mapbox_token(config.mapbox_token);
    graphical_interface::run(flights, options).map_err(|e| e.to_string())
}
