//! The file-level conversion loop.

use crate::{
    common::*,
    config::{Config, DecodeErrorPolicy},
    convert::{create_tf_example, ConvertOptions},
};

/// Counters of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub output_path: PathBuf,
    /// Number of frames read from the input file.
    pub num_frames: usize,
    /// Number of records written to the output file.
    pub num_records: usize,
    /// Frames without an image for the selected camera.
    pub num_missing_images: usize,
    /// Frames that failed to decode and were skipped.
    pub num_corrupted: usize,
}

/// Converts a file of sensor frames into a file of detection records.
///
/// The output file has the same name as the input file and is written into
/// `config.output_dir`. Records are written in the order of the input frames.
/// Frames without an image for the selected camera are skipped.
pub fn process_tfr<P>(path: P, config: &Config) -> Result<ProcessSummary>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let _span = info_span!("process", path = %path.display()).entered();

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format_err!("invalid input file name '{}'", path.display()))?;
    let options = ConvertOptions {
        clamp_boxes: config.clamp_boxes,
    };

    info!("processing {}", path.display());

    // create processed data dir
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            config.output_dir.display()
        )
    })?;
    let output_path = config.output_dir.join(file_name);
    ensure!(
        !is_same_file(path, &output_path),
        "the output file '{}' would overwrite the input file",
        output_path.display()
    );

    let reader = BytesIter::open(
        path,
        RecordReaderConfig {
            check_integrity: config.check_integrity,
        },
    )
    .with_context(|| format!("failed to open input file '{}'", path.display()))?;
    let mut writer: ExampleWriter<_> = ExampleWriter::create(&output_path)
        .with_context(|| format!("failed to create output file '{}'", output_path.display()))?;

    let mut summary = ProcessSummary {
        output_path: output_path.clone(),
        num_frames: 0,
        num_records: 0,
        num_missing_images: 0,
        num_corrupted: 0,
    };

    for (idx, data) in reader.enumerate() {
        let data = data.with_context(|| {
            format!("failed to read record {} of '{}'", idx, path.display())
        })?;
        summary.num_frames += 1;

        let frame = match Frame::decode(data.as_slice()) {
            Ok(frame) => frame,
            Err(err) => match config.on_decode_error {
                DecodeErrorPolicy::Abort => {
                    return Err(err).with_context(|| {
                        format!("failed to decode frame {} of '{}'", idx, path.display())
                    });
                }
                DecodeErrorPolicy::Skip => {
                    warn!("skip frame {}: failed to decode: {}", idx, err);
                    summary.num_corrupted += 1;
                    continue;
                }
            },
        };

        let view = match parse_frame(&frame, config.camera_view) {
            Some(view) => view,
            None => {
                warn!(
                    "skip frame {} ({}): no image from camera {}",
                    idx,
                    frame.describe(),
                    config.camera_view
                );
                summary.num_missing_images += 1;
                continue;
            }
        };

        let filename = output_filename(file_name, idx);
        let example = create_tf_example(&filename, view.encoded_jpeg, view.annotations, options)
            .with_context(|| format!("failed to convert frame {} ({})", idx, frame.describe()))?;
        debug!(
            "write {} with {} objects",
            filename,
            view.annotations.len()
        );

        writer
            .send(example)
            .with_context(|| format!("failed to write '{}'", output_path.display()))?;
        summary.num_records += 1;
    }

    writer
        .flush()
        .with_context(|| format!("failed to write '{}'", output_path.display()))?;

    info!(
        "wrote {} records from {} frames to {} ({} without image, {} corrupted)",
        summary.num_records,
        summary.num_frames,
        output_path.display(),
        summary.num_missing_images,
        summary.num_corrupted
    );

    Ok(summary)
}

/// Names the record of frame `idx`, e.g. `segment.tfrecord` becomes
/// `segment_3.tfrecord`.
pub fn output_filename(file_name: &str, idx: usize) -> String {
    file_name.replace(".tfrecord", &format!("_{}.tfrecord", idx))
}

fn is_same_file(lhs: &Path, rhs: &Path) -> bool {
    match (fs::canonicalize(lhs), fs::canonicalize(rhs)) {
        (Ok(lhs), Ok(rhs)) => lhs == rhs,
        _ => false,
    }
}
