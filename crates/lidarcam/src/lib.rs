#![doc = include_str!("../README.md")]

#[doc(inline)]
pub use lidarcam_image as image;

#[doc(inline)]
pub use lidarcam_imgproc as imgproc;

#[doc(inline)]
pub use lidarcam_io as io;

#[doc(inline)]
pub use lidarcam_3d as k3d;

#[doc(inline)]
pub use lidarcam_viz as viz;
