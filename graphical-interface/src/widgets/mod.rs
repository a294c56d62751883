mod controls;
mod current_flight;
mod flights_table;
pub use controls::WidgetControls;
pub use current_flight::WidgetCurrentFlight;
pub use flights_table::WidgetFlightsTable;

use flight_animation::{Command, PlaybackController};

pub trait View {
    fn ui(&mut self, ui: &mut egui::Ui, controller: &PlaybackController, commands: &mut Vec<Command>);
}
