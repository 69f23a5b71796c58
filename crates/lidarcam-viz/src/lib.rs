#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Color ramps for points and clusters.
pub mod color;

/// Rendering parameters of the bird's-eye views.
pub mod config;

/// Interactive display of the rendered views.
pub mod display;

/// Range markers drawn across the views.
pub mod markers;

/// Bird's-eye view of the LiDAR points associated to camera detections.
pub mod objects;

/// Bird's-eye view of a LiDAR point cloud.
pub mod topview;

pub use crate::config::{ObjectsViewConfig, TopViewConfig, WorldSize};
pub use crate::display::{Viewer, ViewerError, ViewerOptions};
pub use crate::objects::{render_3d_objects, ObjectExtents};
pub use crate::topview::render_lidar_top_view;
