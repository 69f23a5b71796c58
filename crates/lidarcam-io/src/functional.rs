use std::path::Path;

use lidarcam_image::Image;

use crate::{
    error::IoError,
    jpeg::{write_image_jpeg_rgb8, DEFAULT_JPEG_QUALITY},
    png::write_image_png_rgb8,
};

/// Writes an rgb8 image, picking the encoder from the file extension.
///
/// `jpg`/`jpeg` files are written with [`DEFAULT_JPEG_QUALITY`], `png` files losslessly.
///
/// # Arguments
///
/// * `file_path` - The path of the image to write.
/// * `image` - The image to write.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileExtension`] for any other extension.
///
/// # Example
///
/// ```no_run
/// use lidarcam_image::Image;
/// use lidarcam_io::functional as F;
///
/// let image = Image::<u8, 3>::from_size_val([1000, 2000].into(), 255).unwrap();
/// F::write_image_rgb8("objects.jpg", &image).unwrap();
/// ```
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let extension = file_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => {
            write_image_jpeg_rgb8(file_path, image, DEFAULT_JPEG_QUALITY)?
        }
        Some("png") => write_image_png_rgb8(file_path, image)?,
        _ => return Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }

    log::info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        file_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_by_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = Image::<u8, 3>::from_size_val([8, 8].into(), 255)?;

        for name in ["a.jpg", "b.JPEG", "c.png"] {
            let file_path = tmp_dir.path().join(name);
            write_image_rgb8(&file_path, &image)?;
            assert!(file_path.exists(), "File does not exist: {:?}", file_path);
        }
        Ok(())
    }

    #[test]
    fn write_unsupported_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = Image::<u8, 3>::from_size_val([8, 8].into(), 255)?;

        for name in ["a.bmp", "no_extension"] {
            let res = write_image_rgb8(tmp_dir.path().join(name), &image);
            assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        }
        Ok(())
    }
}
