use serde::{Deserialize, Serialize};

use crate::pointcloud::LidarPoint;

/// An axis-aligned rectangle in whole image pixels.
///
/// `(x, y)` is the top-left corner. The rectangle covers `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Contract the rectangle toward its center.
    ///
    /// The corner moves by `factor / 2` of the size and the size is scaled by `(1 - factor)`.
    /// Both are truncated toward zero to whole pixels.
    ///
    /// # Example
    ///
    /// ```
    /// use lidarcam_3d::Rect;
    ///
    /// let roi = Rect::new(100, 50, 200, 100).shrink(0.5);
    /// assert_eq!(roi, Rect::new(150, 75, 100, 50));
    ///
    /// // 450 + 5.05 and 101 * 0.9 are truncated
    /// assert_eq!(Rect::new(450, 470, 101, 100).shrink(0.1), Rect::new(455, 475, 90, 90));
    /// ```
    pub fn shrink(&self, factor: f64) -> Rect {
        let (x, y) = (self.x as f64, self.y as f64);
        let (width, height) = (self.width as f64, self.height as f64);
        Rect {
            x: (x + factor * width / 2.0) as i32,
            y: (y + factor * height / 2.0) as i32,
            width: (width * (1.0 - factor)) as i32,
            height: (height * (1.0 - factor)) as i32,
        }
    }

    /// Check whether a pixel `[u, v]` lies inside the rectangle.
    ///
    /// The pixel is truncated toward zero to whole pixels first. The left and top edges are
    /// inclusive, the right and bottom edges exclusive. Non-finite pixels are never inside.
    #[inline]
    pub fn contains(&self, pixel: [f64; 2]) -> bool {
        let [u, v] = pixel;
        if !(u.is_finite() && v.is_finite()) {
            return false;
        }
        let (u, v) = (u as i64, v as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        x <= u && u < x + self.width as i64 && y <= v && v < y + self.height as i64
    }
}

/// A 2D detection in the camera image together with the LiDAR points assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    /// Identifier of the detection.
    pub box_id: i32,
    /// Region of interest in image pixel coordinates.
    pub roi: Rect,
    /// LiDAR points in the sensor frame associated with this box.
    pub lidar_points: Vec<LidarPoint>,
}

impl BoundingBox {
    /// Create a new bounding box without associated points.
    pub fn new(box_id: i32, roi: Rect) -> Self {
        Self {
            box_id,
            roi,
            lidar_points: Vec::new(),
        }
    }
}
