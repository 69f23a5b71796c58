use font8x8::{UnicodeFonts, BASIC_FONTS};
use lidarcam_image::Image;
use std::cmp::{max, min};

/// Side of a glyph of the built-in bitmap font, in pixels at scale 1.
const GLYPH_SIZE: i64 = 8;

/// Set a pixel's color, ignoring coordinates outside the image.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x < 0 || y < 0 || x >= img.cols() as i64 || y >= img.rows() as i64 {
        return;
    }
    let start = (y as usize * img.cols() + x as usize) * C;
    img.as_slice_mut()[start..start + C].copy_from_slice(&color);
}

/// Draws a line on an image inplace using a standard Bresenham's line algorithm.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `thickness` - The thickness of the line. (Note: thickness > 1 is approximate).
pub fn draw_line<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;
    let half_thickness = thickness as i64 / 2;

    loop {
        if thickness <= 1 {
            set_pixel(img, x0, y0, color);
        } else {
            // square brush centered at the current point
            for i in -half_thickness..=half_thickness {
                for j in -half_thickness..=half_thickness {
                    set_pixel(img, x0 + i, y0 + j, color);
                }
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a rectangle outline on an image inplace.
///
/// The four edges are clipped against the image before rasterization, so corners far outside
/// the image (e.g. sentinel extents of an empty cluster) are cheap to draw.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `top_left` - The top-left corner coordinates (x, y).
/// * `bottom_right` - The bottom-right corner coordinates (x, y).
/// * `color` - The color of the rectangle outline.
/// * `thickness` - The thickness of the lines.
pub fn draw_rect<const C: usize>(
    img: &mut Image<u8, C>,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    let (x0, y0) = top_left;
    let (x1, y1) = bottom_right;

    let (lx0, lx1) = (min(x0, x1), max(x0, x1));
    let (ly0, ly1) = (min(y0, y1), max(y0, y1));
    let h = if thickness > 1 { thickness as i64 / 2 } else { 0 };

    // edge bands as [v - h, v + h + 1), saturating at the i64 range
    let lo = |v: i64| v.saturating_sub(h);
    let hi = |v: i64| v.saturating_add(h + 1);

    // top, bottom, left, right
    draw_filled_rect(img, (lo(lx0), lo(ly0)), (hi(lx1), hi(ly0)), color);
    draw_filled_rect(img, (lo(lx0), lo(ly1)), (hi(lx1), hi(ly1)), color);
    draw_filled_rect(img, (lo(lx0), lo(ly0)), (hi(lx0), hi(ly1)), color);
    draw_filled_rect(img, (lo(lx1), lo(ly0)), (hi(lx1), hi(ly1)), color);
}

/// Draws a filled rectangle on an image inplace.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `top_left` - The top-left corner coordinates (x, y), inclusive.
/// * `bottom_right` - The bottom-right corner coordinates (x, y), exclusive.
/// * `color` - The fill color of the rectangle.
pub fn draw_filled_rect<const C: usize>(
    img: &mut Image<u8, C>,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    color: [u8; C],
) {
    let (x_start, y_start) = top_left;
    let (x_end, y_end) = bottom_right;

    // clamp coordinates to image bounds
    let x_min = max(0, min(x_start, x_end));
    let y_min = max(0, min(y_start, y_end));
    let x_max = min(img.cols() as i64, max(x_start, x_end));
    let y_max = min(img.rows() as i64, max(y_start, y_end));

    for y in y_min..y_max {
        for x in x_min..x_max {
            set_pixel(img, x, y, color);
        }
    }
}

/// Draws a filled circle on an image inplace.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `center` - The center of the circle (x, y).
/// * `radius` - The radius of the circle in pixels.
/// * `color` - The fill color of the circle.
pub fn draw_filled_circle<const C: usize>(
    img: &mut Image<u8, C>,
    center: (i64, i64),
    radius: u32,
    color: [u8; C],
) {
    let (cx, cy) = center;
    let r = radius as i64;

    for dy in -r..=r {
        let dx = ((r * r - dy * dy) as f64).sqrt() as i64;
        let y = cy.saturating_add(dy);
        draw_filled_rect(
            img,
            (cx.saturating_sub(dx), y),
            (cx.saturating_add(dx + 1), y.saturating_add(1)),
            color,
        );
    }
}

/// Draws a single line of text on an image inplace using an 8x8 bitmap font.
///
/// Characters without a glyph in the basic latin font are rendered as blanks.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `text` - The text to draw.
/// * `origin` - The bottom-left corner of the text (x, y).
/// * `color` - The color of the text.
/// * `scale` - Integer magnification of the 8x8 glyphs.
pub fn draw_text<const C: usize>(
    img: &mut Image<u8, C>,
    text: &str,
    origin: (i64, i64),
    color: [u8; C],
    scale: u32,
) {
    let s = scale.max(1) as i64;
    let glyph_side = GLYPH_SIZE * s;
    let (ox, oy) = (origin.0, origin.1.saturating_sub(glyph_side));

    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let gx = ox.saturating_add((i as i64).saturating_mul(glyph_side));
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE as u32 {
                // the least significant bit is the leftmost pixel
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let px = gx.saturating_add(col as i64 * s);
                let py = oy.saturating_add(row as i64 * s);
                draw_filled_rect(
                    img,
                    (px, py),
                    (px.saturating_add(s), py.saturating_add(s)),
                    color,
                );
            }
        }
    }
}
