use egui::{Color32, RichText};
use flight_animation::{Command, PlaybackController};

use super::View;

/// Caption of the flight in the air, shown at the top of the map.
pub struct WidgetCurrentFlight {
    caption: Option<String>,
}

impl WidgetCurrentFlight {
    pub fn new() -> Self {
        Self { caption: None }
    }

    pub fn show(&mut self, ctx: &egui::Context, caption: Option<&str>, controller: &PlaybackController) {
        self.caption = caption.map(str::to_string);
        if self.caption.is_none() {
            return;
        }

        egui::Area::new("current_flight".into())
            .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    self.ui(ui, controller, &mut Vec::new());
                });
            });
    }
}

impl View for WidgetCurrentFlight {
    fn ui(&mut self, ui: &mut egui::Ui, controller: &PlaybackController, _commands: &mut Vec<Command>) {
        let Some(caption) = &self.caption else {
            return;
        };

        ui.label(
            RichText::new(caption)
                .strong()
                .size(20.0)
                .color(Color32::from_rgb(0, 150, 255)),
        );
        if let Some(flight) = controller.current_flight() {
            ui.label(RichText::new(&flight.label).size(14.0).color(Color32::WHITE));
        }
        ui.add(
            egui::ProgressBar::new(controller.state().progress_fraction as f32)
                .desired_width(220.0),
        );
    }
}
