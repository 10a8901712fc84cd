// src/renderer.rs
use eframe::egui::{self, Color32, Pos2, Rect, Shape, Stroke};

use crate::canvas::{CanvasItem, Primitive};
use crate::geometry::{self, Point};
use crate::texture_manager::TextureManager;

/// Number of snapshot textures kept alive between frames
const TEXTURE_CACHE_SIZE: usize = 8;

/// Paints the canvas display list with the egui painter
pub struct Renderer {
    textures: TextureManager,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
        }
    }

    /// Renders the canvas for the current frame
    ///
    /// Args:
    ///     ctx (egui::Context): The egui context for the current frame
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): Screen rectangle of the canvas; its top-left is canvas (0, 0)
    ///     background (Color32): Canvas background color
    ///     items (&[CanvasItem]): Display list, bottom to top
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        background: Color32,
        items: &[CanvasItem],
    ) {
        self.textures.begin_frame();
        painter.rect_filled(rect, 0.0, background);

        let painter = painter.with_clip_rect(rect);
        let to_screen = |p: Point| rect.min + p.to_pos2().to_vec2();

        for item in items {
            match &item.primitive {
                Primitive::Line { from, to, color, width, round_cap, arrow } => {
                    let (start, mut end) = (to_screen(*from), to_screen(*to));
                    let stroke = Stroke::new(*width, *color);
                    if *arrow {
                        if let Some([tip, left, right]) = geometry::arrowhead(start, end, *width) {
                            end = left + (right - left) * 0.5;
                            painter.add(Shape::convex_polygon(vec![tip, left, right], *color, Stroke::NONE));
                        }
                    }
                    painter.line_segment([start, end], stroke);
                    if *round_cap {
                        painter.circle_filled(start, width / 2.0, *color);
                        painter.circle_filled(end, width / 2.0, *color);
                    }
                }
                Primitive::Rect { min, max, color, width, dashed } => {
                    let r = Rect::from_two_pos(to_screen(*min), to_screen(*max));
                    let stroke = Stroke::new(*width, *color);
                    if *dashed {
                        let corners = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom(), r.left_top()];
                        painter.extend(Shape::dashed_line(&corners, stroke, 5.0, 2.0));
                    } else {
                        painter.rect_stroke(r, 0.0, stroke);
                    }
                }
                Primitive::Oval { min, max, color, width } => {
                    let r = Rect::from_two_pos(to_screen(*min), to_screen(*max));
                    painter.add(Shape::ellipse_stroke(r.center(), r.size() / 2.0, Stroke::new(*width, *color)));
                }
                Primitive::Polygon { points, color, width } => {
                    let points: Vec<Pos2> = points.iter().map(|p| to_screen(*p)).collect();
                    painter.add(Shape::closed_line(points, Stroke::new(*width, *color)));
                }
                Primitive::Image { origin, snapshot } => {
                    let texture = self.textures.texture_for(snapshot, ctx);
                    let size = egui::vec2(snapshot.width() as f32, snapshot.height() as f32);
                    let image_rect = Rect::from_min_size(to_screen(*origin), size);
                    let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture, image_rect, uv, Color32::WHITE);
                }
            }
        }
    }
}
