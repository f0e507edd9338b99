//! Raster renderer for the 2D schematic.
//! Draws a [`CanvasFrame`] into an image buffer using tiny-skia, the same way
//! an interactive host would paint it:
//!
//! - Ground line with hatching
//! - Optional grid
//! - Anchors while aiming, plus a translucent preview pole at the caught anchor
//! - Poles as vertical strokes sized by profile, selected pole highlighted
//! - Zoom overlay box in the lower-left corner

use std::path::Path;

use image::{ImageFormat, ImageResult, Rgb, RgbImage};
use tiny_skia::{Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::grid::{grid_lines, GridSettings};
use crate::model::{Point, Pole};
use crate::placement::CanvasFrame;
use crate::snap::{SnapKind, SnapPoint};
use crate::viewport::{SurfaceSize, Viewport};

/// Scale used to turn profile dimensions (metres) into stroke widths.
pub const PIXELS_PER_METRE: f64 = 100.0;

const HATCH_SPACING: f64 = 20.0;

fn bg_color() -> Color {
    Color::from_rgba8(248, 249, 250, 255)
}
fn grid_color() -> Color {
    Color::from_rgba8(224, 224, 224, 255)
}
fn ground_color() -> Color {
    Color::from_rgba8(139, 69, 19, 255)
}
fn hatch_color() -> Color {
    Color::from_rgba8(101, 67, 33, 255)
}
fn pole_color() -> Color {
    Color::from_rgba8(128, 128, 128, 255)
}
fn highlight_color() -> Color {
    Color::from_rgba8(231, 76, 60, 255)
}
fn border_color() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}
fn overlay_color() -> Color {
    Color::from_rgba8(0, 0, 0, 178)
}

fn anchor_colors(kind: SnapKind) -> (Color, Color) {
    match kind {
        SnapKind::Ground => (
            Color::from_rgba8(39, 174, 96, 255),
            Color::from_rgba8(46, 204, 113, 255),
        ),
        SnapKind::PoleTop => (
            Color::from_rgba8(52, 152, 219, 255),
            Color::from_rgba8(41, 128, 185, 255),
        ),
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn stroke(width: f64) -> Stroke {
    Stroke {
        width: width as f32,
        ..Default::default()
    }
}

fn segment(pixmap: &mut Pixmap, from: Point, to: Point, paint: &Paint, stroke: &Stroke, transform: Transform) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32, from.y as f32);
    pb.line_to(to.x as f32, to.y as f32);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, paint, stroke, transform, None);
    }
}

fn disc(pixmap: &mut Pixmap, centre: Point, radius: f64, paint: &Paint, transform: Transform) {
    if let Some(path) = PathBuilder::from_circle(centre.x as f32, centre.y as f32, radius as f32) {
        pixmap.fill_path(&path, paint, FillRule::Winding, transform, None);
    }
}

/// Render a frame of the 2D view to an image buffer
pub fn render_canvas(frame: &CanvasFrame, grid: &GridSettings, width: u32, height: u32) -> RgbImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(bg_color());

    let zoom = frame.zoom;
    // World -> Screen: screen = world * zoom + pan (both y axes point down)
    let transform =
        Transform::from_scale(zoom as f32, zoom as f32).post_translate(frame.pan.x as f32, frame.pan.y as f32);

    let mut viewport = Viewport::new();
    if let Ok(surface) = SurfaceSize::new(width as f64, height as f64) {
        viewport = Viewport::with_surface(surface);
    }
    viewport.set_zoom(zoom);
    viewport.set_pan(frame.pan);
    let Some((top_left, bottom_right)) = viewport.visible_world_bounds() else {
        return to_rgb(&pixmap, width, height);
    };

    if let Some(ground_y) = frame.ground_y {
        draw_ground(&mut pixmap, ground_y, top_left.x, bottom_right.x, zoom, transform);
    }

    if grid.visible {
        let lines = grid_lines(&viewport, grid.size);
        let paint = paint(grid_color());
        let stroke = stroke(1.0 / zoom);
        for x in &lines.vertical {
            segment(&mut pixmap, Point::new(*x, top_left.y), Point::new(*x, bottom_right.y), &paint, &stroke, transform);
        }
        for y in &lines.horizontal {
            segment(&mut pixmap, Point::new(top_left.x, *y), Point::new(bottom_right.x, *y), &paint, &stroke, transform);
        }
    }

    if frame.aiming {
        for anchor in &frame.snap_points {
            draw_anchor(&mut pixmap, anchor, zoom, transform);
        }
        if let Some(anchor) = &frame.preview {
            draw_preview(&mut pixmap, anchor, frame.preview_height, transform);
        }
    }

    if let Some(ground_y) = frame.ground_y {
        for pole in &frame.poles {
            draw_pole(&mut pixmap, pole, ground_y, zoom, transform);
        }
    }

    // Overlay box, screen space
    if let Some(rect) = Rect::from_xywh(10.0, height as f32 - 80.0, 120.0, 70.0) {
        pixmap.fill_rect(rect, &paint(overlay_color()), Transform::identity(), None);
    }

    to_rgb(&pixmap, width, height)
}

fn draw_ground(pixmap: &mut Pixmap, ground_y: f64, left: f64, right: f64, zoom: f64, transform: Transform) {
    let mut line = stroke(6.0 / zoom);
    line.line_cap = LineCap::Round;
    segment(pixmap, Point::new(left, ground_y), Point::new(right, ground_y), &paint(ground_color()), &line, transform);

    let hatch_paint = paint(hatch_color());
    let hatch = stroke(2.0 / zoom);
    let mut x = (left / HATCH_SPACING).floor() * HATCH_SPACING;
    while x < right {
        segment(
            pixmap,
            Point::new(x, ground_y + 2.0),
            Point::new(x + 10.0, ground_y + 8.0),
            &hatch_paint,
            &hatch,
            transform,
        );
        x += HATCH_SPACING;
    }
}

fn draw_anchor(pixmap: &mut Pixmap, anchor: &SnapPoint, zoom: f64, transform: Transform) {
    let (fill, outline) = anchor_colors(anchor.kind);
    let centre = anchor.point();
    let radius = (8.0 / zoom).max(4.0);
    let cross = (4.0 / zoom).max(2.0);

    disc(pixmap, centre, radius, &paint(fill), transform);
    if let Some(path) = PathBuilder::from_circle(centre.x as f32, centre.y as f32, radius as f32) {
        pixmap.stroke_path(&path, &paint(outline), &stroke((2.0 / zoom).max(1.0)), transform, None);
    }

    let white = paint(Color::WHITE);
    let thin = stroke((1.0 / zoom).max(0.5));
    segment(pixmap, centre - Point::new(cross, 0.0), centre + Point::new(cross, 0.0), &white, &thin, transform);
    segment(pixmap, centre - Point::new(0.0, cross), centre + Point::new(0.0, cross), &white, &thin, transform);
}

fn draw_preview(pixmap: &mut Pixmap, anchor: &SnapPoint, preview_height: f64, transform: Transform) {
    let mut color = highlight_color();
    color.apply_opacity(0.5);
    let translucent = paint(color);
    let mut line = stroke(4.0);
    line.line_cap = LineCap::Round;

    let base = anchor.point();
    segment(pixmap, base, base - Point::new(0.0, preview_height), &translucent, &line, transform);
    disc(pixmap, base, 6.0, &translucent, transform);
}

fn draw_pole(pixmap: &mut Pixmap, pole: &Pole, ground_y: f64, zoom: f64, transform: Transform) {
    let x = pole.position.x;
    let base = Point::new(x, pole.base_y(ground_y));
    let top = Point::new(x, pole.top_y(ground_y));
    let width = pole.profile.shape.stroke_width(PIXELS_PER_METRE);

    let body_color = if pole.selected { highlight_color() } else { pole_color() };
    let mut body = stroke(width);
    body.line_cap = LineCap::Round;
    segment(pixmap, base, top, &paint(body_color), &body, transform);

    if let Some(rect) = Rect::from_ltrb(
        (x - width / 2.0) as f32,
        top.y as f32,
        (x + width / 2.0) as f32,
        base.y as f32,
    ) {
        let outline = PathBuilder::from_rect(rect);
        pixmap.stroke_path(&outline, &paint(border_color()), &stroke(1.0 / zoom), transform, None);
    }

    if pole.selected {
        let marker = paint(highlight_color());
        disc(pixmap, base, 4.0, &marker, transform);
        disc(pixmap, top, 4.0, &marker, transform);
    }
}

fn to_rgb(pixmap: &Pixmap, width: u32, height: u32) -> RgbImage {
    // Background is opaque, so premultiplied channels equal straight ones.
    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}

/// Writes a rendered frame as a PNG file.
pub fn export_png(image: &RgbImage, path: impl AsRef<Path>) -> ImageResult<()> {
    image.save_with_format(path, ImageFormat::Png)
}
