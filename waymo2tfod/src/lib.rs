//! Conversion of Waymo Open Dataset frames into TensorFlow Object Detection
//! API records.
//!
//! Each frame in the input file yields at most one record holding the image
//! of the selected camera and its normalized bounding boxes. See
//! [process::process_tfr] for the file-level loop and
//! [convert::create_tf_example] for the per-frame conversion.

mod common;

pub mod config;
pub mod convert;
pub mod example;
pub mod inspect;
pub mod process;

pub use config::{Config, DecodeErrorPolicy};
pub use convert::{create_tf_example, ConvertError, ConvertOptions};
pub use inspect::{inspect_file, InspectSummary};
pub use process::{process_tfr, ProcessSummary};
