//! Converter configuration format.

use crate::common::*;

/// The converter configuration.
///
/// Every field has a default, so an empty JSON5 object is a valid file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The directory to write output records into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// The camera whose image and labels are converted.
    #[serde(default = "default_camera_view")]
    pub camera_view: CameraName,
    /// If set, normalized box coordinates are clamped into `[0, 1]`.
    #[serde(default)]
    pub clamp_boxes: bool,
    /// What to do with a frame that fails to decode.
    #[serde(default)]
    pub on_decode_error: DecodeErrorPolicy,
    /// Verify record checksums while reading the input file.
    #[serde(default = "default_check_integrity")]
    pub check_integrity: bool,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            camera_view: default_camera_view(),
            clamp_boxes: false,
            on_decode_error: DecodeErrorPolicy::default(),
            check_integrity: default_check_integrity(),
        }
    }
}

/// The handling of frames that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeErrorPolicy {
    /// Stop the run with an error.
    #[default]
    Abort,
    /// Log the frame, count it and continue.
    Skip,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_camera_view() -> CameraName {
    CameraName::Front
}

fn default_check_integrity() -> bool {
    true
}
