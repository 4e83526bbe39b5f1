use anyhow::Result;
use approx::assert_abs_diff_eq;
use image::{DynamicImage, ImageFormat, RgbImage};
use prost::Message;
use std::{io::Cursor, path::Path};
use tfrecord::{BytesIter, BytesWriter, Example, ExampleIter, RecordReaderConfig};
use waymo2tfod::{
    convert::keys, example::ExampleExt, inspect_file, process_tfr, Config, ConvertError,
    DecodeErrorPolicy,
};
use waymo_frame::{label, CameraImage, CameraLabels, CameraName, Context, Frame, Label};

const FILE_NAME: &str = "segment-7_with_camera_labels.tfrecord";

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut cursor = Cursor::new(vec![]);
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut cursor, ImageFormat::Jpeg)
        .unwrap();
    cursor.into_inner()
}

fn annotation(class_id: i32, cx: f64, cy: f64, length: f64, width: f64) -> Label {
    Label {
        r#box: Some(label::Box {
            center_x: Some(cx),
            center_y: Some(cy),
            length: Some(length),
            width: Some(width),
            ..Default::default()
        }),
        r#type: Some(class_id),
        id: Some("object".into()),
    }
}

fn frame(camera: CameraName, image: Option<Vec<u8>>, labels: Vec<Label>) -> Frame {
    Frame {
        context: Some(Context {
            name: Some("segment-7".into()),
        }),
        timestamp_micros: Some(1_000),
        images: image
            .into_iter()
            .map(|image| CameraImage {
                name: Some(camera as i32),
                image: Some(image),
            })
            .collect(),
        camera_labels: vec![CameraLabels {
            name: Some(camera as i32),
            labels,
        }],
    }
}

fn write_records(path: &Path, records: Vec<Vec<u8>>) {
    let mut writer: BytesWriter<_> = BytesWriter::create(path).unwrap();
    for record in records {
        writer.send(record).unwrap();
    }
    writer.flush().unwrap();
}

fn read_examples(path: &Path) -> Vec<Example> {
    ExampleIter::open(path, RecordReaderConfig::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn config(output_dir: &Path) -> Config {
    Config {
        output_dir: output_dir.to_owned(),
        ..Config::default()
    }
}

#[test]
fn front_camera_conversion() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);
    let output_dir = dir.path().join("output");
    let image = encode_jpeg(200, 100);

    write_records(
        &input,
        vec![
            frame(
                CameraName::Front,
                Some(image.clone()),
                vec![annotation(1, 100.0, 50.0, 20.0, 10.0)],
            )
            .encode_to_vec(),
            frame(CameraName::SideLeft, Some(image.clone()), vec![]).encode_to_vec(),
        ],
    );

    let summary = process_tfr(&input, &config(&output_dir))?;
    assert_eq!(summary.output_path, output_dir.join(FILE_NAME));
    assert_eq!(summary.num_frames, 2);
    assert_eq!(summary.num_records, 1);
    assert_eq!(summary.num_missing_images, 1);
    assert_eq!(summary.num_corrupted, 0);

    let examples = read_examples(&summary.output_path);
    assert_eq!(examples.len(), 1);
    let example = &examples[0];

    assert_eq!(example.int64(keys::WIDTH), Some(200));
    assert_eq!(example.int64(keys::HEIGHT), Some(100));
    assert_eq!(
        example.bytes(keys::FILENAME),
        Some(&b"segment-7_with_camera_labels_0.tfrecord"[..])
    );
    assert_eq!(example.bytes(keys::ENCODED), Some(image.as_slice()));
    assert_abs_diff_eq!(
        example.float_list(keys::BBOX_MIN_X).unwrap()[0],
        0.45,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        example.float_list(keys::BBOX_MAX_X).unwrap()[0],
        0.55,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        example.float_list(keys::BBOX_MIN_Y).unwrap()[0],
        0.45,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        example.float_list(keys::BBOX_MAX_Y).unwrap()[0],
        0.55,
        epsilon = 1e-6
    );
    assert_eq!(example.int64_list(keys::CLASS_LABEL), Some(&[1][..]));

    Ok(())
}

#[test]
fn frame_indices_follow_input_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);
    let image = encode_jpeg(64, 32);

    write_records(
        &input,
        vec![
            frame(CameraName::Front, Some(image.clone()), vec![]).encode_to_vec(),
            frame(CameraName::Front, None, vec![]).encode_to_vec(),
            frame(
                CameraName::Front,
                Some(image),
                vec![
                    annotation(2, 10.0, 10.0, 4.0, 4.0),
                    annotation(3, 20.0, 20.0, 4.0, 4.0),
                ],
            )
            .encode_to_vec(),
        ],
    );

    let summary = process_tfr(&input, &config(&dir.path().join("output")))?;
    assert_eq!(summary.num_records, 2);
    assert_eq!(summary.num_missing_images, 1);

    let examples = read_examples(&summary.output_path);
    let file_names: Vec<_> = examples
        .iter()
        .map(|example| example.bytes(keys::FILENAME).unwrap().to_vec())
        .collect();
    assert_eq!(
        file_names,
        [
            b"segment-7_with_camera_labels_0.tfrecord".to_vec(),
            b"segment-7_with_camera_labels_2.tfrecord".to_vec(),
        ]
    );

    // a frame without labels is still written
    assert_eq!(examples[0].int64_list(keys::CLASS_LABEL), Some(&[][..]));
    assert_eq!(examples[1].int64_list(keys::CLASS_LABEL), Some(&[2, 3][..]));

    Ok(())
}

#[test]
fn selected_camera_view() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);
    let image = encode_jpeg(64, 32);

    write_records(
        &input,
        vec![
            frame(CameraName::Front, Some(image.clone()), vec![]).encode_to_vec(),
            frame(
                CameraName::SideRight,
                Some(image),
                vec![annotation(4, 10.0, 10.0, 4.0, 4.0)],
            )
            .encode_to_vec(),
        ],
    );

    let config = Config {
        camera_view: CameraName::SideRight,
        ..config(&dir.path().join("output"))
    };
    let summary = process_tfr(&input, &config)?;
    assert_eq!(summary.num_records, 1);

    let examples = read_examples(&summary.output_path);
    assert_eq!(
        examples[0].bytes_list(keys::CLASS_TEXT),
        Some(&[b"cyclist".to_vec()][..])
    );

    Ok(())
}

#[test]
fn corrupted_frame_policy() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);
    let image = encode_jpeg(64, 32);

    write_records(
        &input,
        vec![
            vec![0xff, 0xff, 0xff],
            frame(CameraName::Front, Some(image), vec![]).encode_to_vec(),
        ],
    );

    let abort = config(&dir.path().join("abort"));
    assert!(process_tfr(&input, &abort).is_err());

    let skip = Config {
        on_decode_error: DecodeErrorPolicy::Skip,
        ..config(&dir.path().join("skip"))
    };
    let summary = process_tfr(&input, &skip)?;
    assert_eq!(summary.num_frames, 2);
    assert_eq!(summary.num_corrupted, 1);
    assert_eq!(summary.num_records, 1);

    let examples = read_examples(&summary.output_path);
    assert_eq!(
        examples[0].bytes(keys::FILENAME),
        Some(&b"segment-7_with_camera_labels_1.tfrecord"[..])
    );

    Ok(())
}

#[test]
fn unmapped_class_aborts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);

    write_records(
        &input,
        vec![frame(
            CameraName::Front,
            Some(encode_jpeg(64, 32)),
            vec![annotation(0, 10.0, 10.0, 4.0, 4.0)],
        )
        .encode_to_vec()],
    );

    let err = process_tfr(&input, &config(&dir.path().join("output"))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::UnmappedClass {
            index: 0,
            class_id: 0
        })
    ));

    Ok(())
}

#[test]
fn abort_keeps_written_records() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);
    let image = encode_jpeg(64, 32);

    write_records(
        &input,
        vec![
            frame(
                CameraName::Front,
                Some(image.clone()),
                vec![annotation(1, 10.0, 10.0, 4.0, 4.0)],
            )
            .encode_to_vec(),
            frame(
                CameraName::Front,
                Some(image),
                vec![annotation(9, 10.0, 10.0, 4.0, 4.0)],
            )
            .encode_to_vec(),
        ],
    );

    let output_dir = dir.path().join("output");
    let err = process_tfr(&input, &config(&output_dir)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::UnmappedClass {
            index: 0,
            class_id: 9
        })
    ));

    // the record converted before the failure is complete and readable
    let examples = read_examples(&output_dir.join(FILE_NAME));
    assert_eq!(examples.len(), 1);
    assert_eq!(
        examples[0].bytes(keys::FILENAME),
        Some(&b"segment-7_with_camera_labels_0.tfrecord"[..])
    );
    assert_eq!(examples[0].int64_list(keys::CLASS_LABEL), Some(&[1][..]));

    Ok(())
}

#[test]
fn refuse_to_overwrite_input() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);
    let records = vec![frame(CameraName::Front, Some(encode_jpeg(8, 8)), vec![]).encode_to_vec()];
    write_records(&input, records);

    assert!(process_tfr(&input, &config(dir.path())).is_err());

    // the input is left intact
    let reader = BytesIter::open(&input, RecordReaderConfig::default())?;
    assert_eq!(reader.count(), 1);

    Ok(())
}

#[test]
fn inspect_converted_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(FILE_NAME);
    let image = encode_jpeg(64, 32);

    write_records(
        &input,
        vec![
            frame(
                CameraName::Front,
                Some(image.clone()),
                vec![
                    annotation(1, 10.0, 10.0, 4.0, 4.0),
                    annotation(2, 20.0, 10.0, 4.0, 4.0),
                ],
            )
            .encode_to_vec(),
            frame(
                CameraName::Front,
                Some(image),
                vec![annotation(1, 30.0, 10.0, 4.0, 4.0)],
            )
            .encode_to_vec(),
        ],
    );

    let summary = process_tfr(&input, &config(&dir.path().join("output")))?;
    let stats = inspect_file(&summary.output_path)?;
    assert_eq!(stats.num_records, 2);
    assert_eq!(stats.num_objects, 3);
    assert_eq!(stats.class_counts.get("vehicle"), Some(&2));
    assert_eq!(stats.class_counts.get("pedestrian"), Some(&1));
    assert_eq!(stats.class_counts.get("cyclist"), None);

    Ok(())
}
