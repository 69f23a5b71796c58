use argh::FromArgs;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use lidarcam::io::functional as F;
use lidarcam::k3d;
use lidarcam::viz::{self, TopViewConfig, Viewer, ViewerOptions};

#[derive(FromArgs)]
/// Render a LiDAR point cloud as seen from above
struct Args {
    /// path to the LiDAR point file (.dat, .bin, .txt or .csv)
    #[argh(option, short = 'p')]
    points: PathBuf,

    /// directory where topview.jpg is written
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// JSON file overriding the rendering parameters
    #[argh(option)]
    config: Option<PathBuf>,

    /// do not wait for Enter after showing the view
    #[argh(switch)]
    no_wait: bool,

    /// show the view in a rerun viewer
    #[argh(switch)]
    rerun: bool,
}

fn load_config<T: DeserializeOwned + Default>(
    path: Option<&Path>,
) -> Result<T, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config: TopViewConfig = load_config(args.config.as_deref())?;

    let lidar_points = k3d::io::read_lidar_points(&args.points)?;
    log::info!("Read #{} lidar points", lidar_points.len());

    let top_view = viz::render_lidar_top_view(&lidar_points, &config)?;

    std::fs::create_dir_all(&args.output_dir)?;
    F::write_image_rgb8(args.output_dir.join("topview.jpg"), &top_view)?;

    let viewer = Viewer::new(
        "LiDAR Top View",
        ViewerOptions {
            wait_key: !args.no_wait,
            spawn_rerun: args.rerun,
        },
    )?;
    viewer.show("Top-View Perspective of LiDAR data", &top_view)?;
    viewer.wait_key()?;

    Ok(())
}
