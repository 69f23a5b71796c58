#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Association of LiDAR points to camera regions of interest.
pub mod association;

/// Image-space rectangles and bounding boxes.
pub mod bbox;

/// Camera calibration and LiDAR-to-image projection.
pub mod camera;

/// I/O utilities for reading and writing LiDAR points and bounding boxes.
pub mod io;

/// LiDAR point types.
pub mod pointcloud;

pub use crate::association::{cluster_lidar_with_roi, AssociationConfig, AssociationStats};
pub use crate::bbox::{BoundingBox, Rect};
pub use crate::camera::{CalibrationSet, Projector};
pub use crate::pointcloud::LidarPoint;
