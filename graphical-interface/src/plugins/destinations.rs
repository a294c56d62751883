use std::{cell::RefCell, rc::Rc};

use egui::{Color32, Image, Pos2, Rect, Response, RichText, Stroke, Vec2};
use flight_animation::MarkerHandle;
use walkers::{Plugin, Position, Projector};

use crate::{
    state::{SceneState, SelectionState},
    types::DestinationMarker,
};

const POPUP_IMAGE_WIDTH: f32 = 160.0;

/// Draws the destination markers. A popup opens when its image arrives and
/// clicking the marker toggles it.
pub struct Destinations<'a> {
    scene: &'a SceneState,
    selection_state: Rc<RefCell<SelectionState>>,
}

impl<'a> Destinations<'a> {
    pub fn new(scene: &'a SceneState, selection_state: Rc<RefCell<SelectionState>>) -> Self {
        Self {
            scene,
            selection_state,
        }
    }
}

impl Plugin for Destinations<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        let mut selection_state = self.selection_state.borrow_mut();

        // A marker removed by the playback takes its popup with it.
        if let Some(selected) = selection_state.marker {
            if !self.scene.markers.contains_key(&selected) {
                selection_state.marker = None;
            }
        }

        for (handle, marker) in &self.scene.markers {
            marker.draw(ui, projector, *handle, &mut selection_state);
        }
    }
}

impl DestinationMarker {
    fn draw(
        &self,
        ui: &mut egui::Ui,
        projector: &Projector,
        handle: MarkerHandle,
        selection_state: &mut SelectionState,
    ) {
        let screen_position = projector
            .project(Position::from_lat_lon(self.position.latitude, self.position.longitude))
            .to_pos2();

        let symbol_size = Vec2::new(18.0, 24.0);
        let clickable_area = Rect::from_center_size(screen_position, symbol_size);
        let response = ui.allocate_rect(clickable_area, egui::Sense::click());

        let head = screen_position - Vec2::new(0.0, 12.0);
        let outline = if response.hovered() {
            Stroke::new(2.0, Color32::WHITE)
        } else {
            Stroke::new(1.0, Color32::from_gray(30))
        };
        let painter = ui.painter();
        painter.line_segment([head, screen_position], Stroke::new(2.0, self.color));
        painter.circle(head, 7.0, self.color, outline);
        painter.circle_filled(head, 2.5, Color32::WHITE);

        if response.clicked() {
            selection_state.toggle_marker_selection(handle);
        }

        if selection_state.marker == Some(handle) {
            self.show_popup(ui, handle, head);
        }
    }

    fn show_popup(&self, ui: &egui::Ui, handle: MarkerHandle, anchor: Pos2) {
        let Some(popup) = &self.popup else {
            return;
        };

        egui::Area::new(egui::Id::new(("destination_popup", handle.0)))
            .fixed_pos(anchor + Vec2::new(12.0, -12.0))
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.add(
                        Image::new(format!("file://{}", popup.image_path))
                            .max_width(POPUP_IMAGE_WIDTH)
                            .rounding(4.0),
                    );
                    ui.label(RichText::new(&popup.caption).size(14.0).strong());
                });
            });
    }
}
