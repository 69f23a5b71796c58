use lidarcam_3d::LidarPoint;
use lidarcam_image::ImageSize;
use serde::{Deserialize, Serialize};

/// Extent of the ground area covered by a bird's-eye view, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSize {
    /// Lateral extent, along the sensor y axis.
    pub width: f64,
    /// Forward extent, along the sensor x axis.
    pub height: f64,
}

impl WorldSize {
    /// Create a new world size from its lateral and forward extents.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pixel coordinates are clamped to this magnitude so that far away points stay drawable.
const PIXEL_LIMIT: f64 = (1i64 << 30) as f64;

/// Truncate a pixel coordinate toward zero after clamping it to [`PIXEL_LIMIT`].
#[inline]
fn to_pixel_coord(value: f64) -> i64 {
    value.clamp(-PIXEL_LIMIT, PIXEL_LIMIT) as i64
}

/// Map a forward distance to an image row, `x = 0` being the bottom row.
#[inline]
pub(crate) fn world_to_row(xw: f64, world_height: f64, image_size: ImageSize) -> i64 {
    let rows = image_size.height as f64;
    to_pixel_coord(-xw * rows / world_height + rows)
}

/// Parameters of [`crate::render_lidar_top_view`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopViewConfig {
    /// Ground area covered by the view.
    pub world_size: WorldSize,
    /// Size of the raster before rotation.
    pub image_size: ImageSize,
    /// Points at or below this height are treated as road surface and skipped.
    pub ground_clip_z: f64,
    /// Radius of the drawn points, in pixels.
    pub point_radius: u32,
    /// Distance between range markers, in metres.
    pub marker_spacing: f64,
}

impl Default for TopViewConfig {
    fn default() -> Self {
        Self {
            world_size: WorldSize::new(10.0, 20.0),
            image_size: ImageSize {
                width: 1000,
                height: 2000,
            },
            ground_clip_z: -1.40,
            point_radius: 5,
            marker_spacing: 2.0,
        }
    }
}

impl TopViewConfig {
    /// Pixel `(x, y)` of a point in the unrotated raster.
    ///
    /// Both axes are scaled by the forward extent, so the view keeps the aspect ratio of the
    /// ground.
    pub fn to_pixel(&self, point: &LidarPoint) -> (i64, i64) {
        let rows = self.image_size.height as f64;
        let half_width = (self.image_size.width / 2) as f64;
        let x = to_pixel_coord(-point.y * rows / self.world_size.height + half_width);
        let y = world_to_row(point.x, self.world_size.height, self.image_size);
        (x, y)
    }
}

/// Parameters of [`crate::render_3d_objects`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectsViewConfig {
    /// Ground area covered by the view.
    pub world_size: WorldSize,
    /// Size of the raster.
    pub image_size: ImageSize,
    /// Radius of the drawn points, in pixels.
    pub point_radius: u32,
    /// Exclusive upper bound of every channel of the cluster colors.
    pub color_cap: u8,
    /// Thickness of the cluster rectangles, in pixels.
    pub rect_thickness: usize,
    /// Magnification of the annotation font.
    pub text_scale: u32,
    /// Distance between range markers, in metres.
    pub marker_spacing: f64,
}

impl Default for ObjectsViewConfig {
    fn default() -> Self {
        Self {
            world_size: WorldSize::new(10.0, 25.0),
            image_size: ImageSize {
                width: 1000,
                height: 2000,
            },
            point_radius: 4,
            color_cap: 150,
            rect_thickness: 2,
            text_scale: 2,
            marker_spacing: 2.0,
        }
    }
}

impl ObjectsViewConfig {
    /// Pixel `(x, y)` of a point in the raster.
    ///
    /// Unlike [`TopViewConfig::to_pixel`], the lateral axis is scaled by the lateral extent.
    pub fn to_pixel(&self, point: &LidarPoint) -> (i64, i64) {
        let cols = self.image_size.width as f64;
        let half_width = (self.image_size.width / 2) as f64;
        let x = to_pixel_coord(-point.y * cols / self.world_size.width + half_width);
        let y = world_to_row(point.x, self.world_size.height, self.image_size);
        (x, y)
    }

    /// Configuration of the per-object top views drawn next to this view.
    pub fn top_view(&self) -> TopViewConfig {
        TopViewConfig {
            world_size: self.world_size,
            image_size: self.image_size,
            marker_spacing: self.marker_spacing,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_view_to_pixel() {
        let config = TopViewConfig::default();

        // the sensor sits at the bottom center
        assert_eq!(config.to_pixel(&LidarPoint::new(0.0, 0.0, 0.0, 0.0)), (500, 2000));
        // 100 px per metre on both axes
        assert_eq!(config.to_pixel(&LidarPoint::new(10.0, 1.0, 0.0, 0.0)), (400, 1000));
        assert_eq!(config.to_pixel(&LidarPoint::new(20.0, -2.0, 0.0, 0.0)), (700, 0));
    }

    #[test]
    fn test_objects_view_to_pixel() {
        let config = ObjectsViewConfig::default();

        // 80 px per forward metre, 100 px per lateral metre
        assert_eq!(config.to_pixel(&LidarPoint::new(0.0, 0.0, 0.0, 0.0)), (500, 2000));
        assert_eq!(config.to_pixel(&LidarPoint::new(10.0, 1.0, 0.0, 0.0)), (400, 1200));
        assert_eq!(config.to_pixel(&LidarPoint::new(7.916, -0.061, 0.0, 0.0)), (506, 1366));
    }

    #[test]
    fn test_pixel_truncates_toward_zero() {
        let config = TopViewConfig::default();
        // 20.005 m maps to row -0.5, truncated to 0
        assert_eq!(config.to_pixel(&LidarPoint::new(20.005, 0.0, 0.0, 0.0)).1, 0);
        assert_eq!(config.to_pixel(&LidarPoint::new(10.004, 0.0, 0.0, 0.0)).1, 999);
    }

    #[test]
    fn test_pixel_is_clamped() {
        let limit = 1i64 << 30;
        let config = TopViewConfig::default();
        assert_eq!(
            config.to_pixel(&LidarPoint::new(1e17, -1e17, 0.0, 0.0)),
            (limit, -limit)
        );

        let config = ObjectsViewConfig::default();
        assert_eq!(
            config.to_pixel(&LidarPoint::new(-1e300, 1e300, 0.0, 0.0)),
            (-limit, limit)
        );
    }

    #[test]
    fn test_objects_top_view() {
        let config = ObjectsViewConfig::default().top_view();
        assert_eq!(config.world_size, WorldSize::new(10.0, 25.0));
        assert_eq!(config.ground_clip_z, -1.40);
        assert_eq!(config.point_radius, 5);
    }

    #[test]
    fn test_config_partial_json() -> Result<(), serde_json::Error> {
        let config: TopViewConfig =
            serde_json::from_str(r#"{"world_size": {"width": 10.0, "height": 25.0}}"#)?;
        assert_eq!(config.world_size.height, 25.0);
        assert_eq!(config.ground_clip_z, -1.40);

        let config: ObjectsViewConfig = serde_json::from_str(r#"{"color_cap": 200}"#)?;
        assert_eq!(config.color_cap, 200);
        assert_eq!(config.image_size.width, 1000);
        Ok(())
    }
}
