use egui::{Align2, RichText, Ui, Window};
use walkers::MapMemory;

/// Zoom buttons in the top right corner of the map.
pub fn zoom(ui: &Ui, map_memory: &mut MapMemory) {
    Window::new("Map")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_TOP, [-10., 10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("➕").heading()).clicked() {
                    if let Err(e) = map_memory.zoom_in() {
                        log::debug!("Cannot zoom in: {:?}", e);
                    }
                }

                if ui.button(RichText::new("➖").heading()).clicked() {
                    if let Err(e) = map_memory.zoom_out() {
                        log::debug!("Cannot zoom out: {:?}", e);
                    }
                }
            });
        });
}

/// Button that opens or closes the itinerary window. Returns whether it was clicked.
pub fn itinerary(ui: &Ui) -> bool {
    let mut clicked = false;
    Window::new("Itinerary toggle")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::LEFT_BOTTOM, [10., -10.])
        .show(ui.ctx(), |ui| {
            clicked = ui.button(RichText::new("Itinerary").heading()).clicked();
        });
    clicked
}
