//! Conversion of one camera view into a detection training record.

use crate::{common::*, example::*};
use waymo_frame::Label as Annotation;

/// Feature names of the output record.
pub mod keys {
    pub const HEIGHT: &str = "image/height";
    pub const WIDTH: &str = "image/width";
    pub const FILENAME: &str = "image/filename";
    pub const SOURCE_ID: &str = "image/source_id";
    pub const ENCODED: &str = "image/encoded";
    pub const FORMAT: &str = "image/format";
    pub const BBOX_MIN_X: &str = "image/object/bbox/min_x";
    pub const BBOX_MAX_X: &str = "image/object/bbox/max_x";
    pub const BBOX_MIN_Y: &str = "image/object/bbox/min_y";
    pub const BBOX_MAX_Y: &str = "image/object/bbox/max_y";
    pub const CLASS_TEXT: &str = "image/object/class/text";
    pub const CLASS_LABEL: &str = "image/object/class/label";
}

/// The value of the `image/format` feature.
pub const IMAGE_FORMAT: &[u8] = b"jpg";

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("annotation {index} has class id {class_id}, which is not in the class list")]
    UnmappedClass { index: usize, class_id: i32 },
    #[error("unable to read image size: {0}")]
    ImageSize(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConvertOptions {
    /// Clamp normalized coordinates into `[0, 1]`.
    pub clamp_boxes: bool,
}

/// Builds a detection record from an image and its annotations.
///
/// The image is only probed for its size and stored as is. Box coordinates
/// are divided by the image width and height, and the per-object features
/// follow the order of `annotations`.
pub fn create_tf_example(
    filename: &str,
    encoded_jpeg: &[u8],
    annotations: &[Annotation],
    options: ConvertOptions,
) -> Result<Example> {
    // load image size
    let size = {
        let imagesize::ImageSize { height, width } = imagesize::blob_size(encoded_jpeg)
            .map_err(|err| ConvertError::ImageSize(format!("{:?}", err)))?;
        HW::try_from_hw([height, width])
            .map_err(|err| ConvertError::ImageSize(format!("{:#}", err)))?
    };
    let ratio_size: HW<f64> = size
        .try_cast()
        .ok_or_else(|| format_err!("image size {:?} does not fit in f64", size))?;

    // convert annotations
    let labels: Vec<_> = annotations
        .iter()
        .enumerate()
        .map(|(index, annotation)| to_ratio_label(index, annotation, &ratio_size, options))
        .collect::<Result<_, ConvertError>>()?;

    let (min_xs, max_xs, min_ys, max_ys, text_classes, classes) = labels
        .into_iter()
        .map(|label| {
            let Label {
                rect: TLBR { t, l, b, r },
                class,
            } = label;
            (
                l as f32,
                r as f32,
                t as f32,
                b as f32,
                class.text().as_bytes().to_vec(),
                class.id(),
            )
        })
        .unzip_n_vec();

    let filename = filename.as_bytes().to_vec();

    let example = [
        (keys::HEIGHT, int64_feature(size.h() as i64)),
        (keys::WIDTH, int64_feature(size.w() as i64)),
        (keys::FILENAME, bytes_feature(filename.clone())),
        (keys::SOURCE_ID, bytes_feature(filename)),
        (keys::ENCODED, bytes_feature(encoded_jpeg.to_vec())),
        (keys::FORMAT, bytes_feature(IMAGE_FORMAT.to_vec())),
        (keys::BBOX_MIN_X, float_list_feature(min_xs)),
        (keys::BBOX_MAX_X, float_list_feature(max_xs)),
        (keys::BBOX_MIN_Y, float_list_feature(min_ys)),
        (keys::BBOX_MAX_Y, float_list_feature(max_ys)),
        (keys::CLASS_TEXT, bytes_list_feature(text_classes)),
        (keys::CLASS_LABEL, int64_list_feature(classes)),
    ]
    .into_iter()
    .map(|(key, feature)| (key.to_string(), feature))
    .collect();

    Ok(example)
}

fn to_ratio_label(
    index: usize,
    annotation: &Annotation,
    size: &HW<f64>,
    options: ConvertOptions,
) -> Result<Label<TLBR<f64>, ObjectClass>, ConvertError> {
    let class_id = annotation.r#type.unwrap_or_default();
    let class = ObjectClass::from_id(class_id as i64)
        .ok_or(ConvertError::UnmappedClass { index, class_id })?;

    // length spans x and width spans y
    let rect = match &annotation.r#box {
        Some(bbox) => CyCxHW::from_cycxhw([
            bbox.center_y.unwrap_or_default(),
            bbox.center_x.unwrap_or_default(),
            bbox.width.unwrap_or_default(),
            bbox.length.unwrap_or_default(),
        ]),
        None => CyCxHW::from_cycxhw([0.0; 4]),
    };

    let label = Label { rect, class }.to_ratio_tlbr(size);
    let label = if options.clamp_boxes {
        Label {
            rect: label.rect.clamp(0.0, 1.0),
            ..label
        }
    } else {
        label
    };

    Ok(label)
}
