use egui::{Color32, Image, Pos2, Rect, Response, Stroke, TextureHandle, Vec2};
use walkers::{Plugin, Position, Projector};

use crate::{icon::draw_fallback_plane, state::SceneState, types::PlaneSprite};

const TRAIL_WIDTH: f32 = 3.0;
const TRAIL_OPACITY: f32 = 0.8;
const PLANE_SIZE: f32 = 30.0;

/// Draws the trail of every flight and the plane of the active one.
pub struct Flights<'a> {
    scene: &'a SceneState,
    plane_icon: Option<&'a TextureHandle>,
}

impl<'a> Flights<'a> {
    pub fn new(scene: &'a SceneState, plane_icon: Option<&'a TextureHandle>) -> Self {
        Self { scene, plane_icon }
    }
}

impl Plugin for Flights<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        let mut trails: Vec<_> = self.scene.trails.iter().collect();
        trails.sort_by_key(|(index, _)| **index);

        for (index, trail) in trails {
            if trail.len() < 2 {
                continue;
            }
            let points: Vec<Pos2> = trail
                .iter()
                .map(|c| projector.project(Position::from_lat_lon(c.latitude, c.longitude)).to_pos2())
                .collect();
            let color = self.scene.trail_color(*index).gamma_multiply(TRAIL_OPACITY);
            ui.painter().add(egui::Shape::line(points, Stroke::new(TRAIL_WIDTH, color)));
        }

        for plane in self.scene.planes.values().filter(|plane| plane.is_visible()) {
            plane.draw(ui, projector, self.plane_icon);
        }
    }
}

impl PlaneSprite {
    fn draw(&self, ui: &mut egui::Ui, projector: &Projector, icon: Option<&TextureHandle>) {
        let screen_position = projector
            .project(Position::from_lat_lon(self.position.latitude, self.position.longitude))
            .to_pos2();

        // Define the size for the plane icon
        let symbol_size = Vec2::splat(PLANE_SIZE);

        match icon {
            Some(texture) => {
                let rect = Rect::from_center_size(screen_position, symbol_size);
                let image = Image::from_texture(texture)
                    .fit_to_exact_size(symbol_size)
                    .tint(Color32::WHITE.gamma_multiply(self.opacity))
                    .rotate(self.bearing.to_radians() as f32, Vec2::splat(0.5));

                ui.put(rect, image);
            }
            None => draw_fallback_plane(
                ui.painter(),
                screen_position,
                self.bearing as f32,
                PLANE_SIZE,
                self.opacity,
            ),
        }
    }
}
