#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding failures.
pub mod error;

/// High-level image writing functions.
///
/// Picks the encoder from the file extension, see [`functional::write_image_rgb8`].
pub mod functional;

/// JPEG image encoding.
///
/// Pure Rust JPEG encoder for writing the rendered views.
pub mod jpeg;

/// PNG image encoding and decoding.
///
/// Lossless output for the rendered views.
pub mod png;

pub use crate::error::IoError;
pub use crate::functional::write_image_rgb8;
