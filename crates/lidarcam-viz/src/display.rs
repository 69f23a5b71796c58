use std::io::BufRead;

use lidarcam_image::Image;

/// Error types for the display of rendered views.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Failed to read the key press from stdin
    #[error("Failed to wait for a key press. {0}")]
    Io(#[from] std::io::Error),

    /// Failed to spawn or log to the rerun viewer
    #[cfg(feature = "rerun")]
    #[error("Failed to log to the rerun viewer. {0}")]
    Rerun(#[from] rerun::RecordingStreamError),
}

/// Behavior of a [`Viewer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Block on a key press in [`Viewer::wait_key`].
    pub wait_key: bool,
    /// Send the images to a spawned rerun viewer. Requires the `rerun` feature.
    pub spawn_rerun: bool,
}

/// Displays rendered views and paces the visualization steps.
pub struct Viewer {
    options: ViewerOptions,
    #[cfg(feature = "rerun")]
    rec: Option<rerun::RecordingStream>,
}

impl Viewer {
    /// Create a new viewer, spawning a rerun viewer when requested and available.
    pub fn new(app_id: &str, options: ViewerOptions) -> Result<Self, ViewerError> {
        #[cfg(feature = "rerun")]
        let rec = if options.spawn_rerun {
            Some(rerun::RecordingStreamBuilder::new(app_id).spawn()?)
        } else {
            None
        };

        #[cfg(not(feature = "rerun"))]
        {
            if options.spawn_rerun {
                log::warn!("{app_id}: built without the rerun feature, images are not displayed");
            }
        }

        Ok(Self {
            options,
            #[cfg(feature = "rerun")]
            rec,
        })
    }

    /// Show an image under a title.
    pub fn show(&self, title: &str, image: &Image<u8, 3>) -> Result<(), ViewerError> {
        log::info!("{title}: {}x{}", image.width(), image.height());

        #[cfg(feature = "rerun")]
        {
            if let Some(rec) = &self.rec {
                rec.log(
                    entity_path(title),
                    &rerun::Image::from_elements(
                        image.as_slice(),
                        image.size().into(),
                        rerun::ColorModel::RGB,
                    ),
                )?;
            }
        }

        Ok(())
    }

    /// Block until Enter is pressed, when waiting is enabled.
    pub fn wait_key(&self) -> Result<(), ViewerError> {
        self.wait_key_from(std::io::stdin().lock())
    }

    fn wait_key_from(&self, mut reader: impl BufRead) -> Result<(), ViewerError> {
        if !self.options.wait_key {
            return Ok(());
        }
        log::info!("press Enter to continue");
        // a closed stdin returns immediately
        reader.read_line(&mut String::new())?;
        Ok(())
    }
}

/// Entity path of a window title, e.g. `3D Objects` -> `3d_objects`.
#[cfg_attr(not(feature = "rerun"), allow(dead_code))]
fn entity_path(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
