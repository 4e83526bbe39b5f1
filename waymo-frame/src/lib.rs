//! The subset of the Waymo Open Dataset frame format read by the converter.

mod common;

pub mod parse;
pub mod proto;

pub use parse::*;
pub use proto::{label, CameraImage, CameraLabels, CameraName, Context, Frame, Label};
