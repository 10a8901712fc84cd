use egui::Color32;
use image::{Rgba, RgbaImage};
use tiny_skia::{
    ColorU8, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Rect,
    Stroke, StrokeDash, Transform,
};

use super::{CanvasItem, Primitive};
use crate::geometry::{self, Point};
use crate::snapshot::Snapshot;

const CROP_DASH: [f32; 2] = [5.0, 2.0];

/// Paints `items` in order over an opaque `background` and returns the pixels.
pub fn rasterize(width: u32, height: u32, background: Color32, items: &[CanvasItem]) -> RgbaImage {
    let [r, g, b, _] = background.to_srgba_unmultiplied();
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        log::warn!("rasterize: cannot allocate {width}x{height} pixmap");
        return RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
    };
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));

    for item in items {
        draw_primitive(&mut pixmap, &item.primitive);
    }

    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

fn draw_primitive(pixmap: &mut Pixmap, primitive: &Primitive) {
    match primitive {
        Primitive::Line { from, to, color, width, round_cap, arrow } => {
            draw_line(pixmap, *from, *to, *color, *width, *round_cap, *arrow);
        }
        Primitive::Rect { min, max, color, width, dashed } => {
            let path = outline_path(&corners(*min, *max));
            let dash = if *dashed { StrokeDash::new(CROP_DASH.to_vec(), 0.0) } else { None };
            stroke_path(pixmap, path, *color, outline_stroke(*width, dash));
        }
        Primitive::Oval { min, max, color, width } => {
            let path = bounds(*min, *max).and_then(PathBuilder::from_oval);
            stroke_path(pixmap, path, *color, outline_stroke(*width, None));
        }
        Primitive::Polygon { points, color, width } => {
            stroke_path(pixmap, outline_path(points), *color, outline_stroke(*width, None));
        }
        Primitive::Image { origin, snapshot } => blit(pixmap, *origin, snapshot),
    }
}

fn draw_line(
    pixmap: &mut Pixmap,
    from: Point,
    to: Point,
    color: Color32,
    width: f32,
    round_cap: bool,
    arrow: bool,
) {
    let start = from.to_pos2();
    let mut end = to.to_pos2();

    // The shaft stops at the base of the head so the tip stays sharp.
    let head = if arrow { geometry::arrowhead(start, end, width) } else { None };
    if let Some([tip, left, right]) = head {
        end = left + (right - left) * 0.5;
        let mut pb = PathBuilder::new();
        pb.move_to(tip.x, tip.y);
        pb.line_to(left.x, left.y);
        pb.line_to(right.x, right.y);
        pb.close();
        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
        }
    }

    let mut pb = PathBuilder::new();
    pb.move_to(start.x, start.y);
    pb.line_to(end.x, end.y);
    let cap = if round_cap { LineCap::Round } else { LineCap::Butt };
    let stroke = Stroke {
        width,
        line_cap: cap,
        line_join: if round_cap { LineJoin::Round } else { LineJoin::Miter },
        ..Stroke::default()
    };
    stroke_path(pixmap, pb.finish(), color, stroke);
}

fn blit(pixmap: &mut Pixmap, origin: Point, snapshot: &Snapshot) {
    let Some(mut source) = Pixmap::new(snapshot.width(), snapshot.height()) else {
        return;
    };
    for (dst, src) in source.pixels_mut().iter_mut().zip(snapshot.pixels().pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    pixmap.draw_pixmap(
        origin.x,
        origin.y,
        source.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

fn paint(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn outline_stroke(width: f32, dash: Option<StrokeDash>) -> Stroke {
    Stroke {
        width,
        dash,
        ..Stroke::default()
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: Option<Path>, color: Color32, stroke: Stroke) {
    match path {
        Some(path) => pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None),
        None => log::trace!("rasterize: skipping degenerate path"),
    }
}

fn bounds(a: Point, b: Point) -> Option<Rect> {
    Rect::from_ltrb(
        a.x.min(b.x) as f32,
        a.y.min(b.y) as f32,
        a.x.max(b.x) as f32,
        a.y.max(b.y) as f32,
    )
}

fn corners(a: Point, b: Point) -> [Point; 4] {
    [a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)]
}

fn outline_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ItemId;

    fn item(primitive: Primitive) -> CanvasItem {
        CanvasItem { id: ItemId::next(), primitive }
    }

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_empty_canvas_is_background() {
        let image = rasterize(8, 4, Color32::WHITE, &[]);
        assert_eq!(image.dimensions(), (8, 4));
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_thick_line_covers_center() {
        let line = item(Primitive::Line {
            from: Point::new(10, 10),
            to: Point::new(50, 10),
            color: Color32::BLACK,
            width: 6.0,
            round_cap: true,
            arrow: false,
        });
        let image = rasterize(64, 32, Color32::WHITE, &[line]);
        assert_eq!(*image.get_pixel(30, 10), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(30, 25), WHITE);
    }

    #[test]
    fn test_rect_outline_is_hollow() {
        let rect = item(Primitive::Rect {
            min: Point::new(10, 10),
            max: Point::new(50, 50),
            color: Color32::RED,
            width: 4.0,
            dashed: false,
        });
        let image = rasterize(64, 64, Color32::WHITE, &[rect]);
        assert_eq!(*image.get_pixel(30, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(30, 30), WHITE);
    }

    #[test]
    fn test_image_blit_is_exact() {
        let mut pixels = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        pixels.put_pixel(3, 3, Rgba([200, 100, 50, 255]));
        let snapshot = Snapshot::new(pixels.clone());
        let blit = item(Primitive::Image { origin: Point::ORIGIN, snapshot });
        let image = rasterize(6, 6, Color32::WHITE, &[blit]);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(image.get_pixel(x, y), pixels.get_pixel(x, y));
            }
        }
        assert_eq!(*image.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn test_short_arrow_does_not_pass_its_start() {
        let arrow = item(Primitive::Line {
            from: Point::new(20, 20),
            to: Point::new(26, 20),
            color: Color32::BLACK,
            width: 2.0,
            round_cap: false,
            arrow: true,
        });
        let image = rasterize(40, 40, Color32::WHITE, &[arrow]);
        assert_eq!(*image.get_pixel(22, 20), Rgba([0, 0, 0, 255]));
        for x in 0..19 {
            for y in 14..27 {
                assert_eq!(*image.get_pixel(x, y), WHITE, "ink at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_degenerate_shapes_do_not_panic() {
        let items = [
            item(Primitive::Oval {
                min: Point::new(5, 5),
                max: Point::new(5, 5),
                color: Color32::BLACK,
                width: 1.0,
            }),
            item(Primitive::Polygon { points: vec![], color: Color32::BLACK, width: 1.0 }),
            item(Primitive::Line {
                from: Point::new(3, 3),
                to: Point::new(3, 3),
                color: Color32::BLACK,
                width: 1.0,
                round_cap: false,
                arrow: true,
            }),
        ];
        let image = rasterize(10, 10, Color32::WHITE, &items);
        assert_eq!(image.dimensions(), (10, 10));
    }
}
