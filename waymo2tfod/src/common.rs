//! Common imports from external crates.

pub use anyhow::{bail, ensure, format_err, Context, Result};
pub use bbox::{CyCxHW, HW, TLBR};
pub use label::{Label, ObjectClass};
pub use prost::Message;
pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
pub use tfrecord::{
    BytesIter, Example, ExampleIter, ExampleWriter, Feature, RecordReaderConfig,
};
pub use tracing::{debug, info, info_span, warn};
pub use waymo_frame::{parse_frame, CameraName, Frame};

unzip_n::unzip_n!(pub 6);
