use lidarcam_3d::LidarPoint;
use lidarcam_image::{Image, ImageError};
use lidarcam_imgproc::{draw::draw_filled_circle, rotate::rotate90_clockwise};

use crate::{color::distance_color, config::TopViewConfig, markers::draw_distance_markers};

/// Color of the range markers.
const MARKER_COLOR: [u8; 3] = [0, 0, 255];

/// Renders a bird's-eye view of a LiDAR point cloud.
///
/// Points above the ground clip height are drawn as filled circles colored by their forward
/// distance, range markers are drawn across the raster and the result is rotated 90 degrees
/// clockwise so that the forward direction points right.
///
/// # Arguments
///
/// * `lidar_points` - The points in the LiDAR frame.
/// * `config` - The rendering parameters.
///
/// # Returns
///
/// An RGB image of `config.image_size` with width and height swapped.
pub fn render_lidar_top_view(
    lidar_points: &[LidarPoint],
    config: &TopViewConfig,
) -> Result<Image<u8, 3>, ImageError> {
    let mut img = Image::<u8, 3>::from_size_val(config.image_size, 0)?;

    let mut num_drawn = 0;
    for point in lidar_points {
        if point.z <= config.ground_clip_z {
            continue;
        }
        let color = distance_color(point.x, config.world_size.height);
        draw_filled_circle(&mut img, config.to_pixel(point), config.point_radius, color);
        num_drawn += 1;
    }

    draw_distance_markers(
        &mut img,
        &config.world_size,
        config.marker_spacing,
        MARKER_COLOR,
    );

    log::debug!(
        "top view: drew {num_drawn} of {} points",
        lidar_points.len()
    );

    rotate90_clockwise(&img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidarcam_image::ImageSize;

    fn small_config() -> TopViewConfig {
        TopViewConfig {
            image_size: ImageSize {
                width: 100,
                height: 200,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_top_view_rotated_size() -> Result<(), ImageError> {
        let img = render_lidar_top_view(&[], &small_config())?;
        assert_eq!(img.width(), 200);
        assert_eq!(img.height(), 100);
        Ok(())
    }

    #[test]
    fn test_top_view_point_position_and_color() -> Result<(), ImageError> {
        // 10 px per metre: (11, 1) lands at column 40, row 90 before rotation
        let config = small_config();
        let img = render_lidar_top_view(&[LidarPoint::new(11.0, 1.0, -1.0, 0.5)], &config)?;

        // after a clockwise rotation (x, y) moves to (rows - 1 - y, x)
        assert_eq!(img.pixel(200 - 1 - 90, 40)?, &[114, 140, 0]);
        assert_eq!(img.pixel(200 - 1 - 90, 40 + 5)?, &[114, 140, 0]);
        assert_eq!(img.pixel(200 - 1 - 90, 40 + 7)?, &[0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_top_view_markers() -> Result<(), ImageError> {
        let img = render_lidar_top_view(&[], &small_config())?;
        // the 10 m marker is row 100 before rotation, column 99 after
        assert_eq!(img.pixel(99, 0)?, &MARKER_COLOR);
        assert_eq!(img.pixel(99, 99)?, &MARKER_COLOR);
        assert_eq!(img.pixel(98, 50)?, &[0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_top_view_ground_clip() -> Result<(), ImageError> {
        let config = small_config();
        let background = render_lidar_top_view(&[], &config)?;

        let img = render_lidar_top_view(&[LidarPoint::new(5.0, 0.0, -2.0, 0.5)], &config)?;
        assert_eq!(img, background);

        let img = render_lidar_top_view(&[LidarPoint::new(5.0, 0.0, -1.40, 0.5)], &config)?;
        assert_eq!(img, background);

        let img = render_lidar_top_view(&[LidarPoint::new(5.0, 0.0, -1.0, 0.5)], &config)?;
        assert_ne!(img, background);
        Ok(())
    }

    #[test]
    fn test_top_view_points_outside_world() -> Result<(), ImageError> {
        let config = small_config();
        let background = render_lidar_top_view(&[], &config)?;
        let img = render_lidar_top_view(
            &[
                LidarPoint::new(-10.0, 0.0, 0.0, 0.0),
                LidarPoint::new(100.0, 0.0, 0.0, 0.0),
                LidarPoint::new(5.0, 50.0, 0.0, 0.0),
            ],
            &config,
        )?;
        assert_eq!(img, background);
        Ok(())
    }

    #[test]
    fn test_top_view_far_points() -> Result<(), ImageError> {
        let config = small_config();
        let background = render_lidar_top_view(&[], &config)?;
        let img = render_lidar_top_view(
            &[
                LidarPoint::new(1e17, 0.0, 0.0, 0.0),
                LidarPoint::new(5.0, -1e17, 0.0, 0.0),
                LidarPoint::new(-f64::MAX, f64::MAX, 0.0, 0.0),
            ],
            &config,
        )?;
        assert_eq!(img, background);
        Ok(())
    }
}
