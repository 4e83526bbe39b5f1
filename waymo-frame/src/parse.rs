use crate::proto::{CameraName, Frame, Label};

/// The image and labels of one camera in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView<'a> {
    pub camera: CameraName,
    /// The compressed image bytes.
    pub encoded_jpeg: &'a [u8],
    /// The labels in their original order.
    pub annotations: &'a [Label],
}

/// Extracts the image and labels of the selected camera.
///
/// Returns `None` if the frame has no image for the camera. A camera without
/// labels yields an empty annotation list. If a camera appears more than
/// once, the last entry is used.
pub fn parse_frame(frame: &Frame, camera: CameraName) -> Option<CameraView<'_>> {
    let name = Some(camera as i32);

    let encoded_jpeg = frame
        .images
        .iter()
        .rev()
        .find(|image| image.name == name)?
        .image
        .as_deref()
        .filter(|bytes| !bytes.is_empty())?;

    let annotations = frame
        .camera_labels
        .iter()
        .rev()
        .find(|labels| labels.name == name)
        .map(|labels| labels.labels.as_slice())
        .unwrap_or(&[]);

    Some(CameraView {
        camera,
        encoded_jpeg,
        annotations,
    })
}

impl Frame {
    /// The segment name and timestamp, used to identify the frame in logs.
    pub fn describe(&self) -> String {
        let name = self
            .context
            .as_ref()
            .and_then(|context| context.name.as_deref())
            .unwrap_or("<unnamed>");
        format!("{}@{}", name, self.timestamp_micros.unwrap_or_default())
    }
}
