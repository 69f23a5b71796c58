use lidarcam_image::Image;
use lidarcam_imgproc::draw::draw_line;

use crate::config::{world_to_row, WorldSize};

/// Draws horizontal range markers every `spacing` metres of forward distance.
///
/// `floor(world_size.height / spacing)` markers are drawn starting at the sensor, the first one
/// therefore falls on the bottom edge of the image. Nothing is drawn for a non positive spacing.
///
/// # Arguments
///
/// * `img` - The unrotated bird's-eye image to draw on.
/// * `world_size` - The ground area covered by the image.
/// * `spacing` - The distance between markers in metres.
/// * `color` - The color of the markers.
pub fn draw_distance_markers<const C: usize>(
    img: &mut Image<u8, C>,
    world_size: &WorldSize,
    spacing: f64,
    color: [u8; C],
) {
    if spacing.is_nan() || spacing <= 0.0 {
        log::warn!("skipping distance markers with spacing {spacing}");
        return;
    }

    let num_markers = (world_size.height / spacing).floor() as i64;
    let width = img.width() as i64;
    let size = img.size();

    for i in 0..num_markers {
        let y = world_to_row(i as f64 * spacing, world_size.height, size);
        draw_line(img, (0, y), (width, y), color, 1);
    }
}
