use lidarcam_image::{Image, ImageError, ImageSize};

/// Rotate the input image by 90 degrees clockwise.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The rotated image with shape (W, H, C).
///
/// # Example
///
/// ```
/// use lidarcam_image::{Image, ImageSize};
/// use lidarcam_imgproc::rotate::rotate90_clockwise;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     vec![0, 1, 2, 3, 4, 5],
/// )
/// .unwrap();
///
/// let rotated = rotate90_clockwise(&image).unwrap();
///
/// assert_eq!(rotated.size().width, 3);
/// assert_eq!(rotated.size().height, 2);
/// assert_eq!(rotated.as_slice(), &[4, 2, 0, 5, 3, 1]);
/// ```
pub fn rotate90_clockwise<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy,
{
    let (src_cols, src_rows) = (src.cols(), src.rows());
    let src_data = src.as_slice();

    let mut dst = Vec::with_capacity(src_data.len());

    // the destination row `y` is the source column `y` read bottom-up
    for y in 0..src_cols {
        for x in 0..src_rows {
            let start = ((src_rows - 1 - x) * src_cols + y) * C;
            dst.extend_from_slice(&src_data[start..start + C]);
        }
    }

    Image::new(
        ImageSize {
            width: src_rows,
            height: src_cols,
        },
        dst,
    )
}
