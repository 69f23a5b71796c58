use argh::FromArgs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use lidarcam::io::functional as F;
use lidarcam::k3d::{self, AssociationConfig, CalibrationSet, Projector};
use lidarcam::viz::{self, ObjectsViewConfig, Viewer, ViewerOptions};

#[derive(FromArgs)]
/// Associate LiDAR points with camera detections and render the resulting objects
struct Args {
    /// path to the LiDAR point file (.dat, .bin, .txt or .csv)
    #[argh(option, short = 'p')]
    points: PathBuf,

    /// path to the bounding box file (.dat, .bin, .txt or .csv)
    #[argh(option, short = 'b')]
    boxes: PathBuf,

    /// directory where objects.jpg and topview.jpg are written
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// JSON file overriding the calibration, association and rendering parameters
    #[argh(option)]
    config: Option<PathBuf>,

    /// do not wait for Enter after showing each view
    #[argh(switch)]
    no_wait: bool,

    /// show the views in a rerun viewer
    #[argh(switch)]
    rerun: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    calibration: CalibrationSet,
    association: AssociationConfig,
    objects: ObjectsViewConfig,
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = load_config(args.config.as_deref())?;

    let lidar_points = k3d::io::read_lidar_points(&args.points)?;
    let mut bounding_boxes = k3d::io::read_bounding_boxes(&args.boxes)?;
    log::info!(
        "Read #{} lidar points and #{} bounding boxes",
        lidar_points.len(),
        bounding_boxes.len()
    );

    let projector = Projector::new(&config.calibration);
    let stats = k3d::cluster_lidar_with_roi(
        &mut bounding_boxes,
        &lidar_points,
        &projector,
        &config.association,
    );
    log::info!(
        "Associated #{} points, #{} unmatched, #{} ambiguous",
        stats.assigned,
        stats.unmatched,
        stats.ambiguous
    );

    let viewer = Viewer::new(
        "LiDAR Clusters",
        ViewerOptions {
            wait_key: !args.no_wait,
            spawn_rerun: args.rerun,
        },
    )?;

    std::fs::create_dir_all(&args.output_dir)?;

    let objects = viz::render_3d_objects(&bounding_boxes, &config.objects)?;
    F::write_image_rgb8(args.output_dir.join("objects.jpg"), &objects)?;
    viewer.show("3D Objects", &objects)?;
    viewer.wait_key()?;

    // the detail views share the world and image size of the objects view
    let top_view_config = config.objects.top_view();
    for bbox in bounding_boxes.iter().filter(|b| !b.lidar_points.is_empty()) {
        let top_view = viz::render_lidar_top_view(&bbox.lidar_points, &top_view_config)?;
        F::write_image_rgb8(args.output_dir.join("topview.jpg"), &top_view)?;
        viewer.show("Top-View Perspective of LiDAR data", &top_view)?;
        viewer.wait_key()?;
    }

    Ok(())
}
