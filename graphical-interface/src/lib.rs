use flight_animation::FlightRecord;

mod camera;
mod icon;
mod map;
mod plugins;
mod state;
mod types;
mod widgets;
mod windows;
use map::FlightArcsApp;
pub use types::ViewerOptions;

pub fn run(flights: Vec<FlightRecord>, options: ViewerOptions) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Flight Arcs",
        Default::default(),
        Box::new(|cc| Ok(Box::new(FlightArcsApp::new(cc.egui_ctx.clone(), flights, options)))),
    )
}
