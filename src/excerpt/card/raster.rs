//! Paints a [`CardLayout`] into an RGBA bitmap.
//!
//! Borders and glyphs are anti-aliased by exact pixel coverage and blended
//! over the opaque background, so the output is fully opaque.

use crate::card::font::{CardFonts, em_scale};
use crate::card::layout::{BorderStroke, CardLayout, Rect, TextRun};
use ab_glyph::{Font, FontArc, point};
use image::{Rgba, RgbaImage};

/// Horizontal offset of the second pass for fonts without a bold face.
const SYNTHETIC_BOLD_OFFSET: f32 = 0.4;

pub fn pixel_size(layout: &CardLayout, scale: f32) -> (u32, u32) {
    let width = (layout.width * scale).round().max(1.0) as u32;
    let height = (layout.height * scale).ceil().max(1.0) as u32;
    (width, height)
}

pub fn rasterize(layout: &CardLayout, fonts: &CardFonts, scale: f32) -> RgbaImage {
    let (width, height) = pixel_size(layout, scale);
    let mut image = RgbaImage::from_pixel(width, height, layout.background);

    for border in &layout.borders {
        stroke_rect(&mut image, border, scale);
    }

    for run in &layout.runs {
        let face = fonts.for_role(run.role);
        draw_run(&mut image, run, &face.font, scale, 0.0);
        if face.synthetic_bold {
            draw_run(&mut image, run, &face.font, scale, SYNTHETIC_BOLD_OFFSET);
        }
    }

    image
}

fn blend(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * (color[3] as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let under = pixel[channel] as f32;
        let over = color[channel] as f32;
        pixel[channel] = (under + (over - under) * alpha).round() as u8;
    }
    pixel[3] = 255;
}

/// Area of the unit pixel at (px, py) covered by `rect`.
fn pixel_overlap(px: f32, py: f32, rect: &Rect) -> f32 {
    let w = (px + 1.0).min(rect.x + rect.width) - px.max(rect.x);
    let h = (py + 1.0).min(rect.y + rect.height) - py.max(rect.y);
    w.max(0.0) * h.max(0.0)
}

fn scaled(rect: &Rect, scale: f32) -> Rect {
    Rect {
        x: rect.x * scale,
        y: rect.y * scale,
        width: rect.width * scale,
        height: rect.height * scale,
    }
}

fn stroke_rect(image: &mut RgbaImage, border: &BorderStroke, scale: f32) {
    let outer = scaled(&border.rect, scale);
    let inner = outer.inset(border.stroke * scale);

    let x0 = outer.x.floor() as i64;
    let y0 = outer.y.floor() as i64;
    let x1 = (outer.x + outer.width).ceil() as i64;
    let y1 = (outer.y + outer.height).ceil() as i64;

    for y in y0..y1 {
        for x in x0..x1 {
            let (px, py) = (x as f32, y as f32);
            let coverage = pixel_overlap(px, py, &outer) - pixel_overlap(px, py, &inner);
            if coverage > 0.0 {
                blend(image, x, y, border.color, coverage);
            }
        }
    }
}

fn draw_run(image: &mut RgbaImage, run: &TextRun, font: &FontArc, scale: f32, offset: f32) {
    let px_scale = em_scale(font, run.size * scale);
    let origin_x = run.x * scale + offset * scale;
    let baseline = run.baseline * scale;

    for placed in &run.line.glyphs {
        let glyph = placed
            .id
            .with_scale_and_position(px_scale, point(origin_x + placed.x * scale, baseline));
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        let left = bounds.min.x as i64;
        let top = bounds.min.y as i64;
        outlined.draw(|gx, gy, coverage| {
            blend(image, left + gx as i64, top + gy as i64, run.color, coverage);
        });
    }
}
