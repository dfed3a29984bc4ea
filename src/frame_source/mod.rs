#[cfg(any(feature = "v4l2", test))]
pub mod capture_worker;
pub mod impl_fake;
pub mod impl_image_file;
#[cfg(feature = "v4l2")]
pub mod impl_v4l2;
pub mod interface;
pub mod latest_frame;
