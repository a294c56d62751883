use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};
use flight_animation::{Command, PlaybackController};

use super::View;

/// Lists every loaded flight in playback order, highlighting the one in the air.
pub struct WidgetFlightsTable {
    open: bool,
}

impl WidgetFlightsTable {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn show(&mut self, ctx: &egui::Context, controller: &PlaybackController) {
        let mut open = self.open;

        egui::Window::new(format!("Itinerary ({} flights)", controller.flights().len()))
            .resizable(false)
            .collapsible(true)
            .open(&mut open)
            .fixed_pos([20.0, 20.0])
            .show(ctx, |ui| {
                ui.visuals_mut().override_text_color = Some(Color32::WHITE);
                ui.visuals_mut().widgets.noninteractive.bg_fill = Color32::from_gray(30);
                self.ui(ui, controller, &mut Vec::new());
            });

        self.open = open;
    }
}

impl View for WidgetFlightsTable {
    fn ui(&mut self, ui: &mut egui::Ui, controller: &PlaybackController, _commands: &mut Vec<Command>) {
        if controller.flights().is_empty() {
            ui.label("No flights loaded.");
            return;
        }

        let current = controller
            .current_flight()
            .map(|_| controller.state().current_flight_index);

        ui.group(|ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(30.0)) // Position column
                .column(Column::remainder().at_least(140.0)) // Label column
                .column(Column::remainder().at_least(160.0)) // Route column
                .header(25.0, |mut header| {
                    for title in ["#", "Flight", "Route"] {
                        header.col(|ui| {
                            ui.strong(RichText::new(title).color(Color32::YELLOW).size(16.0));
                        });
                    }
                })
                .body(|mut body| {
                    for (index, flight) in controller.flights().iter().enumerate() {
                        let color = if current == Some(index) {
                            Color32::from_rgb(0, 255, 0)
                        } else {
                            Color32::WHITE
                        };

                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.label(RichText::new((index + 1).to_string()).color(color).size(14.0));
                            });
                            row.col(|ui| {
                                ui.label(RichText::new(&flight.label).color(color).size(14.0));
                            });
                            row.col(|ui| {
                                ui.label(RichText::new(flight.route_caption()).color(color).size(14.0));
                            });
                        });
                    }
                });
        });
    }
}
