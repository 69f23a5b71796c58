use serde::{Deserialize, Serialize};

use crate::{
    bbox::{BoundingBox, Rect},
    camera::Projector,
    pointcloud::LidarPoint,
};

/// Parameters of the point to region of interest association.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    /// Fraction of the width and height removed from every region of interest before testing
    /// containment. Rejects outlier points around the box edges.
    pub shrink_factor: f64,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self { shrink_factor: 0.10 }
    }
}

/// Outcome counters of [`cluster_lidar_with_roi`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssociationStats {
    /// Points appended to exactly one box.
    pub assigned: usize,
    /// Points outside every shrunk box.
    pub unmatched: usize,
    /// Points inside more than one shrunk box.
    pub ambiguous: usize,
}

/// Associate LiDAR points with the camera bounding boxes enclosing their projection.
///
/// Every point is projected into the image, truncated to whole pixels and tested against the
/// shrunk region of interest of every box. A point enclosed by exactly one box is appended to that box's `lidar_points`;
/// points enclosed by no box or by several boxes are dropped.
///
/// # Arguments
///
/// * `bounding_boxes` - The boxes to fill. Previously associated points are kept.
/// * `lidar_points` - The points in the LiDAR frame.
/// * `projector` - The LiDAR to image projection.
/// * `config` - The association parameters.
///
/// # Returns
///
/// How many points were assigned, unmatched and ambiguous.
pub fn cluster_lidar_with_roi(
    bounding_boxes: &mut [BoundingBox],
    lidar_points: &[LidarPoint],
    projector: &Projector,
    config: &AssociationConfig,
) -> AssociationStats {
    let shrunk_rois = bounding_boxes
        .iter()
        .map(|bbox| bbox.roi.shrink(config.shrink_factor))
        .collect::<Vec<Rect>>();

    let mut stats = AssociationStats::default();

    for point in lidar_points {
        let pixel = projector.project(point);

        let mut enclosing = shrunk_rois
            .iter()
            .enumerate()
            .filter(|(_, roi)| roi.contains(pixel))
            .map(|(i, _)| i);

        match (enclosing.next(), enclosing.next()) {
            (Some(i), None) => {
                bounding_boxes[i].lidar_points.push(*point);
                stats.assigned += 1;
            }
            (None, _) => stats.unmatched += 1,
            (Some(_), Some(_)) => stats.ambiguous += 1,
        }
    }

    log::debug!(
        "associated {} of {} lidar points to {} boxes ({} unmatched, {} ambiguous)",
        stats.assigned,
        lidar_points.len(),
        bounding_boxes.len(),
        stats.unmatched,
        stats.ambiguous
    );

    stats
}
