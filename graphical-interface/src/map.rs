use std::time::{Duration, Instant};

use egui::{Context, TextureHandle};
use egui_extras::install_image_loaders;
use flight_animation::{
    Coordinate, FlightRecord, MapStyle, PlaybackController, ThreadedImageProbe,
};
use walkers::{
    sources::{Mapbox, MapboxStyle, OpenStreetMap},
    HttpOptions, HttpTiles, Map, MapMemory, Position, Tiles,
};

use crate::{
    camera::INITIAL_ZOOM,
    icon::load_plane_icon,
    plugins,
    state::SceneState,
    types::ViewerOptions,
    widgets::{WidgetControls, WidgetCurrentFlight, WidgetFlightsTable},
    windows,
};

const IDLE_TICK_MS: u64 = 250;

/// Base map tiles, one set per style.
struct TileSet {
    dark: Box<dyn Tiles>,
    streets: Box<dyn Tiles>,
}

impl TileSet {
    fn new(egui_ctx: &Context, mapbox_token: Option<&str>) -> Self {
        match mapbox_token {
            Some(token) => Self {
                dark: Self::mapbox(egui_ctx, MapboxStyle::Dark, token),
                streets: Self::mapbox(egui_ctx, MapboxStyle::Streets, token),
            },
            None => {
                log::warn!("No Mapbox access token configured, using OpenStreetMap tiles for every style");
                Self {
                    dark: Self::open_street_map(egui_ctx),
                    streets: Self::open_street_map(egui_ctx),
                }
            }
        }
    }

    fn mapbox(egui_ctx: &Context, style: MapboxStyle, token: &str) -> Box<dyn Tiles> {
        Box::new(HttpTiles::with_options(
            Mapbox {
                style,
                high_resolution: false,
                access_token: token.to_string(),
            },
            HttpOptions::default(),
            egui_ctx.to_owned(),
        ))
    }

    fn open_street_map(egui_ctx: &Context) -> Box<dyn Tiles> {
        Box::new(HttpTiles::with_options(
            OpenStreetMap,
            HttpOptions::default(),
            egui_ctx.to_owned(),
        ))
    }

    fn for_style(&mut self, style: MapStyle) -> &mut dyn Tiles {
        match style {
            MapStyle::Dark => self.dark.as_mut(),
            MapStyle::Streets => self.streets.as_mut(),
        }
    }
}

/// The main application struct that plays the flights over the map.
///
/// `FlightArcsApp` owns the playback controller and the scene it draws on,
/// advances the playback once per frame and turns the control widgets into
/// playback commands.
pub struct FlightArcsApp {
    tiles: TileSet,
    map_memory: MapMemory,
    scene: SceneState,
    controller: PlaybackController,
    controls_widget: WidgetControls,
    current_flight_widget: WidgetCurrentFlight,
    flights_table_widget: WidgetFlightsTable,
    plane_icon: Option<TextureHandle>,
    started: Instant,
}

impl FlightArcsApp {
    /// Creates a new `FlightArcsApp`, loading the plane icon and the map tiles.
    pub fn new(egui_ctx: Context, flights: Vec<FlightRecord>, options: ViewerOptions) -> Self {
        install_image_loaders(&egui_ctx);
        let mut initial_map_memory = MapMemory::default();
        if let Err(e) = initial_map_memory.set_zoom(INITIAL_ZOOM) {
            log::warn!("Invalid initial zoom: {:?}", e);
        }

        let plane_icon = match load_plane_icon(&egui_ctx, &options.plane_icon_path()) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("{}, drawing the fallback plane", e);
                None
            }
        };

        let scene = SceneState::new(&flights, &options.settings.default_color);
        let probe = ThreadedImageProbe::new(&options.assets_dir);
        let controller = PlaybackController::new(flights, options.settings.clone(), Box::new(probe));

        Self {
            tiles: TileSet::new(&egui_ctx, options.mapbox_token.as_deref()),
            map_memory: initial_map_memory,
            controls_widget: WidgetControls::new(&controller),
            current_flight_widget: WidgetCurrentFlight::new(),
            flights_table_widget: WidgetFlightsTable::new(),
            scene,
            controller,
            plane_icon,
            started: Instant::now(),
        }
    }

    /// Advances the playback to `now` and moves the map along with the camera.
    fn advance_playback(&mut self, now: Duration) {
        if let Some(position) = self.map_memory.detached() {
            self.scene.camera.follow_user(
                Coordinate::new(position.lon(), position.lat()),
                self.map_memory.zoom(),
            );
        }

        self.scene.begin_frame(now);
        self.controller.advance(now, &mut self.scene);

        let animating = self.scene.camera.is_animating();
        self.scene.camera.update(now);
        if animating {
            let center = self.scene.camera.center();
            self.map_memory
                .center_at(Position::from_lat_lon(center.latitude, center.longitude));
            if let Err(e) = self.map_memory.set_zoom(self.scene.camera.zoom()) {
                log::debug!("Camera zoom rejected: {:?}", e);
            }
        }
    }
}

impl eframe::App for FlightArcsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.started.elapsed();
        self.advance_playback(now);

        if self.controller.has_scheduled_work() || self.scene.camera.is_animating() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(IDLE_TICK_MS));
        }

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let center = self.scene.camera.center();
                let my_position = Position::from_lat_lon(center.latitude, center.longitude);

                let tiles = self.tiles.for_style(self.scene.style);

                let flights_plugin = plugins::Flights::new(&self.scene, self.plane_icon.as_ref());

                let destinations_plugin =
                    plugins::Destinations::new(&self.scene, self.scene.selection_state.clone());

                let map = Map::new(Some(tiles), &mut self.map_memory, my_position)
                    .with_plugin(flights_plugin)
                    .with_plugin(destinations_plugin);

                ui.add(map);

                self.current_flight_widget
                    .show(ctx, self.scene.caption.as_deref(), &self.controller);

                let commands = self.controls_widget.show(ctx, &self.controller);
                for command in commands {
                    if let Err(e) = self.controller.handle(command, now, &mut self.scene) {
                        log::warn!("{}", e);
                    }
                }

                {
                    use windows::*;
                    zoom(ui, &mut self.map_memory);
                    if itinerary(ui) {
                        self.flights_table_widget.toggle();
                    }
                }

                self.flights_table_widget.show(ctx, &self.controller);
            });
    }
}
