use std::path::Path;

use egui::{Color32, Context, Painter, Pos2, Shape, Stroke, TextureHandle, TextureOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("Failed to decode plane icon: {0}")]
    Decode(#[from] image::ImageError),
}

/// Loads the plane icon into a texture. The icon points north.
pub fn load_plane_icon(ctx: &Context, path: &Path) -> Result<TextureHandle, IconError> {
    let image = image::open(path)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());

    Ok(ctx.load_texture("plane-icon", color_image, TextureOptions::LINEAR))
}

// Outline of a plane pointing north, in units of half the icon size.
const BODY: [(f32, f32); 5] = [(0.0, -1.0), (0.15, -0.6), (0.15, 0.7), (-0.15, 0.7), (-0.15, -0.6)];
const WINGS: [(f32, f32); 5] = [(0.0, -0.25), (0.9, 0.15), (0.9, 0.3), (-0.9, 0.3), (-0.9, 0.15)];
const TAIL: [(f32, f32); 5] = [(0.0, 0.5), (0.4, 0.85), (0.4, 0.95), (-0.4, 0.95), (-0.4, 0.85)];

/// Draws the plane with the painter when no icon texture is available.
pub fn draw_fallback_plane(painter: &Painter, center: Pos2, bearing_degrees: f32, size: f32, opacity: f32) {
    let angle = bearing_degrees.to_radians();
    let (sin_a, cos_a) = angle.sin_cos();
    let half = size / 2.0;

    let transform = |(x, y): (f32, f32)| {
        let (sx, sy) = (x * half, y * half);
        egui::pos2(
            center.x + sx * cos_a - sy * sin_a,
            center.y + sx * sin_a + sy * cos_a,
        )
    };

    let fill = Color32::WHITE.gamma_multiply(opacity);
    let outline = Stroke::new(1.0, Color32::from_gray(40).gamma_multiply(opacity));

    for part in [BODY, WINGS, TAIL] {
        let points: Vec<Pos2> = part.into_iter().map(transform).collect();
        painter.add(Shape::convex_polygon(points, fill, outline));
    }
}
