use glam::{DMat4, DVec4};
use serde::{Deserialize, Serialize};

use crate::pointcloud::LidarPoint;

/// Calibration of a rigidly mounted LiDAR/camera pair.
///
/// All matrices are given row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSet {
    /// Rotation and translation from the LiDAR frame to the camera reference frame.
    pub extrinsic: [[f64; 4]; 4],
    /// Rectifying rotation making the image planes co-planar, embedded in a 4x4 matrix.
    pub rectification: [[f64; 4]; 4],
    /// Projection matrix of the rectified camera.
    pub projection: [[f64; 4]; 3],
}

impl CalibrationSet {
    /// Create a new calibration from its row-major matrices.
    pub fn new(
        extrinsic: [[f64; 4]; 4],
        rectification: [[f64; 4]; 4],
        projection: [[f64; 4]; 3],
    ) -> Self {
        Self {
            extrinsic,
            rectification,
            projection,
        }
    }

    /// Velodyne to left grayscale camera calibration of the KITTI raw recording the LiDAR
    /// exercises are based on.
    #[rustfmt::skip]
    pub fn kitti() -> Self {
        Self {
            extrinsic: [
                [7.533745e-03, -9.999714e-01, -6.166020e-04, -4.069766e-03],
                [1.480249e-02,  7.280733e-04, -9.998902e-01, -7.631618e-02],
                [9.998621e-01,  7.523790e-03,  1.480755e-02, -2.717806e-01],
                [0.0, 0.0, 0.0, 1.0],
            ],
            rectification: [
                [ 9.999239e-01, 9.837760e-03, -7.445048e-03, 0.0],
                [-9.869795e-03, 9.999421e-01, -4.278459e-03, 0.0],
                [ 7.402527e-03, 4.351614e-03,  9.999631e-01, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            projection: [
                [7.215377e+02, 0.000000e+00, 6.095593e+02, 0.000000e+00],
                [0.000000e+00, 7.215377e+02, 1.728540e+02, 0.000000e+00],
                [0.000000e+00, 0.000000e+00, 1.000000e+00, 0.000000e+00],
            ],
        }
    }
}

impl Default for CalibrationSet {
    fn default() -> Self {
        Self::kitti()
    }
}

fn mat4_from_rows(rows: &[[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(rows).transpose()
}

/// Projects LiDAR points into the pixel coordinates of a calibrated camera.
///
/// The chain `P * R_rect * RT` is multiplied once on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    image_from_lidar: DMat4,
}

impl Projector {
    /// Create a new projector from a calibration.
    pub fn new(calibration: &CalibrationSet) -> Self {
        let [p0, p1, p2] = calibration.projection;
        // the fourth row only carries the homogeneous coordinate through
        let projection = mat4_from_rows(&[p0, p1, p2, [0.0, 0.0, 0.0, 1.0]]);
        let rectification = mat4_from_rows(&calibration.rectification);
        let extrinsic = mat4_from_rows(&calibration.extrinsic);

        Self {
            image_from_lidar: projection * rectification * extrinsic,
        }
    }

    /// Project a point to pixel coordinates `[u, v]`.
    ///
    /// The homogeneous image point is normalized by its third component. Points on the camera
    /// plane produce non-finite coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use lidarcam_3d::{CalibrationSet, LidarPoint, Projector};
    ///
    /// let projector = Projector::new(&CalibrationSet::kitti());
    /// let [u, v] = projector.project(&LidarPoint::new(10.0, 0.0, 0.0, 0.0));
    ///
    /// assert!((u - 609.526).abs() < 1e-3);
    /// assert!((v - 175.034).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn project(&self, point: &LidarPoint) -> [f64; 2] {
        let y = self.image_from_lidar * DVec4::from_array(point.to_homogeneous());
        [y.x / y.z, y.y / y.z]
    }

    /// Project a set of points to pixel coordinates.
    pub fn project_points(&self, points: &[LidarPoint]) -> Vec<[f64; 2]> {
        points.iter().map(|p| self.project(p)).collect()
    }
}
