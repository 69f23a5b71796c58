use lidarcam_3d::{BoundingBox, LidarPoint};
use lidarcam_image::{Image, ImageError};
use lidarcam_imgproc::draw::{draw_filled_circle, draw_rect, draw_text};

use crate::{color::box_color, config::ObjectsViewConfig, markers::draw_distance_markers};

const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];
const RECT_COLOR: [u8; 3] = [0, 0, 0];
const MARKER_COLOR: [u8; 3] = [0, 0, 255];

/// Pixel and metric extents of a cluster of LiDAR points in the objects view.
///
/// A cluster without points keeps the initial values: `top` and `left` at `1e8`, `bottom` and
/// `right` at `0`, `xw_min` and `yw_min` at `1e8`, `yw_max` at `-1e8`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectExtents {
    /// Smallest row of the cluster.
    pub top: i64,
    /// Smallest column of the cluster.
    pub left: i64,
    /// Largest row of the cluster.
    pub bottom: i64,
    /// Largest column of the cluster.
    pub right: i64,
    /// Forward distance of the closest point, in metres.
    pub xw_min: f64,
    /// Smallest lateral position, in metres.
    pub yw_min: f64,
    /// Largest lateral position, in metres.
    pub yw_max: f64,
}

impl Default for ObjectExtents {
    fn default() -> Self {
        Self {
            top: 100_000_000,
            left: 100_000_000,
            bottom: 0,
            right: 0,
            xw_min: 1e8,
            yw_min: 1e8,
            yw_max: -1e8,
        }
    }
}

impl ObjectExtents {
    /// Compute the extents of a set of points under the objects view mapping.
    pub fn from_points(points: &[LidarPoint], config: &ObjectsViewConfig) -> Self {
        points.iter().fold(Self::default(), |mut e, p| {
            let (x, y) = config.to_pixel(p);
            e.top = e.top.min(y);
            e.left = e.left.min(x);
            e.bottom = e.bottom.max(y);
            e.right = e.right.max(x);
            e.xw_min = e.xw_min.min(p.x);
            e.yw_min = e.yw_min.min(p.y);
            e.yw_max = e.yw_max.max(p.y);
            e
        })
    }

    /// Lateral extent of the cluster, in metres.
    pub fn lateral_width(&self) -> f64 {
        self.yw_max - self.yw_min
    }
}

/// Renders a bird's-eye view of the LiDAR points of every bounding box.
///
/// The points of each box are drawn in a color derived from its id and enclosed in a black
/// rectangle annotated with the id, the number of points, the distance to the closest point and
/// the lateral width of the cluster. Range markers are drawn last.
///
/// # Arguments
///
/// * `bounding_boxes` - The boxes with their associated LiDAR points.
/// * `config` - The rendering parameters.
///
/// # Returns
///
/// An RGB image of `config.image_size`.
pub fn render_3d_objects(
    bounding_boxes: &[BoundingBox],
    config: &ObjectsViewConfig,
) -> Result<Image<u8, 3>, ImageError> {
    let mut img = Image::<u8, 3>::from_size_pixel(config.image_size, BACKGROUND_COLOR)?;

    for bbox in bounding_boxes {
        let color = box_color(bbox.box_id, config.color_cap);

        for point in &bbox.lidar_points {
            draw_filled_circle(&mut img, config.to_pixel(point), config.point_radius, color);
        }

        let extents = ObjectExtents::from_points(&bbox.lidar_points, config);
        if bbox.lidar_points.is_empty() {
            log::warn!("box {} has no lidar points", bbox.box_id);
        }

        draw_rect(
            &mut img,
            (extents.left, extents.top),
            (extents.right, extents.bottom),
            RECT_COLOR,
            config.rect_thickness,
        );

        let label = format!("id={}, #pts={}", bbox.box_id, bbox.lidar_points.len());
        let summary = format!(
            "xmin={:.2} m, yw={:.2} m",
            extents.xw_min,
            extents.lateral_width()
        );

        draw_text(
            &mut img,
            &label,
            (extents.left.saturating_sub(50), extents.top.saturating_sub(50)),
            color,
            config.text_scale,
        );
        draw_text(
            &mut img,
            &summary,
            (extents.left, extents.top.saturating_sub(25)),
            color,
            config.text_scale,
        );
    }

    draw_distance_markers(
        &mut img,
        &config.world_size,
        config.marker_spacing,
        MARKER_COLOR,
    );

    Ok(img)
}
