use egui::{Color32, RichText};
use flight_animation::{Command, MapStyle, PlaybackController, PlaybackPhase};

use super::View;

/// The playback panel: start/pause toggle, reset, map style and camera options.
pub struct WidgetControls {
    follow_plane: bool,
    camera_smoothing: bool,
    selected_style: MapStyle,
}

impl WidgetControls {
    pub fn new(controller: &PlaybackController) -> Self {
        Self {
            follow_plane: controller.follow_plane(),
            camera_smoothing: controller.camera_smoothing(),
            selected_style: controller.style(),
        }
    }

    /// Shows the panel anchored to the bottom right corner and returns the
    /// commands issued this frame.
    pub fn show(&mut self, ctx: &egui::Context, controller: &PlaybackController) -> Vec<Command> {
        let mut commands = Vec::new();

        egui::Area::new("playback_controls".into())
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    self.ui(ui, controller, &mut commands);
                });
            });

        commands
    }
}

impl View for WidgetControls {
    fn ui(&mut self, ui: &mut egui::Ui, controller: &PlaybackController, commands: &mut Vec<Command>) {
        ui.visuals_mut().override_text_color = Some(Color32::WHITE);
        let button_size = [150.0, 40.0];

        ui.vertical(|ui| {
            let toggle = ui.add_enabled(
                !controller.flights().is_empty(),
                egui::Button::new(controller.button_label()).rounding(10.0).min_size(button_size.into()),
            );
            if toggle.clicked() {
                commands.push(match controller.phase() {
                    PlaybackPhase::Running => Command::PauseOrStop,
                    _ => Command::Start,
                });
            }

            if ui
                .add(egui::Button::new("Reset").rounding(10.0).min_size(button_size.into()))
                .clicked()
            {
                commands.push(Command::Reset);
            }

            ui.add_space(8.0);

            // The controller owns the style; follow it after resets elsewhere.
            self.selected_style = controller.style();
            egui::ComboBox::from_label("Map style")
                .selected_text(self.selected_style.as_str())
                .show_ui(ui, |ui| {
                    for style in MapStyle::ALL {
                        if ui
                            .selectable_value(&mut self.selected_style, style, style.as_str())
                            .clicked()
                        {
                            commands.push(Command::ChangeStyle(style.as_str().to_string()));
                        }
                    }
                });

            if ui.checkbox(&mut self.follow_plane, "Follow plane").changed() {
                commands.push(Command::SetFollowPlane(self.follow_plane));
            }
            if ui
                .checkbox(&mut self.camera_smoothing, "Smooth camera")
                .changed()
            {
                commands.push(Command::SetCameraSmoothing(self.camera_smoothing));
            }

            if controller.flights().is_empty() {
                ui.label(RichText::new("No flights loaded").color(Color32::YELLOW));
            }
        });
    }
}
